pub mod classifier;
pub mod export;

pub use classifier::EmailClassifier;
