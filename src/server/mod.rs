pub mod app;
pub mod core;
pub mod handlers;

pub use self::core::serve;
