//! aapt-lite - compile-only R classes and data-binding stubs for Android modules
//!
//! Produces the Java sources a module needs to compile against its own and its
//! dependencies' resources, without running the real resource compiler.
//!
//! # Architecture
//!
//! The pipeline consists of:
//! 1. **File Discovery** - Find resource files below `res/` directories
//! 2. **Symbol Collection** - Derive typed resource symbols from file names,
//!    `@+id/` declarations and `values` files, merged with dependency `R.txt`
//! 3. **Layout Parsing** - Extract view bindings, variables and imports from
//!    data-binding layouts
//! 4. **Emission** - Write `R.java`, `BR.java` and abstract binding stubs

pub mod binding;
pub mod command;
pub mod config;
pub mod discovery;
pub mod error;
pub mod java;
pub mod parser;
pub mod rclass;

pub use binding::{BindingClassGenerator, BrClassGenerator, LayoutBindingData, LayoutTypeStore, MapLayoutTypeStore};
pub use command::{AaptLiteCommand, RunSummary};
pub use config::Config;
pub use discovery::{partition_layouts, FileFinder};
pub use error::{AaptError, Result};
pub use parser::{resolve, LayoutBindingsParser, TypeDescriptor};
pub use rclass::{RClassGenerator, ResourceKind, ResourceSymbolCollector, SymbolEntry, SymbolTable};
