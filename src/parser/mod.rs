mod type_name;
pub mod xml;

pub use type_name::{resolve, ImportAliases, TypeDescriptor, TypeNameError};
pub use xml::{collect_ids, LayoutBindingsParser, ValueDeclaration, ValuesFileParser, XmlAttributes};
