//! YAML document reading and writing.

mod reader;
mod writer;

pub use reader::{describe, read_yaml_file};
pub use writer::{to_yaml_string, write_yaml_file};
