//! Structural parse of template source: tag scanning and section nesting.
pub mod node;
pub mod parser;

pub use node::{references, Node, Target};
pub use parser::{parse, SyntaxError};
