//! Data binding: layout binding model, include type lookups and stub generation.

mod br;
mod generator;
mod model;
mod store;

pub use br::BrClassGenerator;
pub use generator::BindingClassGenerator;
pub use model::{to_camel_case, to_layout_binding_name, Binding, BindingKind, LayoutBindingData};
pub use store::{layout_name_of, LayoutTypeStore, MapLayoutTypeStore};
