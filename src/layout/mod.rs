mod registry;

pub use registry::{TemplateRegistry, TemplateRenderer};
