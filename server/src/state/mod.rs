pub mod batch_cache;

pub use batch_cache::BatchCache;
