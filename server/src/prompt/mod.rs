pub(crate) mod gemini;
pub mod tags;

pub use tags::Tag;
