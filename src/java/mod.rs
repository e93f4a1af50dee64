//! Java source emission shared by the R, BR and binding generators.

mod writer;

pub use writer::{capitalize, java_identifier, JavaFile, JavaSourceBuilder};
