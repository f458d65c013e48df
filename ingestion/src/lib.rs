pub mod pipeline;
pub mod searchable_text;

pub use pipeline::IngestionPipeline;
