pub mod graph;
pub mod output;
pub mod generator;

pub use generator::{GenerationReport, SiteGenerator};
