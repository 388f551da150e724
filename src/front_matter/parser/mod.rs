mod block;

pub use block::{parse, read_body};
