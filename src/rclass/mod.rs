//! R class symbols: resource kinds, value sub-parsers, collection and rendering.

mod collector;
mod generator;
mod kind;
mod parsers;
mod symbol;

pub use collector::ResourceSymbolCollector;
pub use generator::RClassGenerator;
pub use kind::{ResourceKind, ValueTag};
pub use parsers::{ParserFn, ParserRegistry, ParserResult, ParserType, StyleableGroup, XmlEntry};
pub use symbol::{placeholder_array, SymbolEntry, SymbolTable, DEFAULT_VALUE};
