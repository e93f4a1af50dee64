use crate::java::capitalize;
use crate::parser::TypeDescriptor;
use std::path::PathBuf;

const BINDING_SUFFIX: &str = "Binding";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BindingKind {
    View,
    Variable,
    IncludedLayout {
        layout_name: String,
        /// The layout type was found in neither the local nor the dependency store.
        layout_missing: bool,
    },
}

/// A view reference or data-binding variable of a layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Binding {
    pub raw_name: String,
    pub type_name: TypeDescriptor,
    pub kind: BindingKind,
}

impl Binding {
    pub fn new(raw_name: impl Into<String>, type_name: TypeDescriptor, kind: BindingKind) -> Self {
        Self {
            raw_name: raw_name.into(),
            type_name,
            kind,
        }
    }

    /// Java field name: `user_name` becomes `userName`.
    pub fn name(&self) -> String {
        to_camel_case(&self.raw_name)
    }
}

/// Bindings parsed out of one layout file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutBindingData {
    /// Layout resource name, e.g. `activity_main`.
    pub layout_name: String,
    /// `None` for placeholders synthesized for missing includes.
    pub file: Option<PathBuf>,
    pub bindings: Vec<Binding>,
    pub bindables: Vec<Binding>,
}

impl LayoutBindingData {
    pub fn empty(layout_name: impl Into<String>) -> Self {
        Self {
            layout_name: layout_name.into(),
            file: None,
            bindings: Vec::new(),
            bindables: Vec::new(),
        }
    }

    pub fn binding_class_name(&self) -> String {
        to_layout_binding_name(&self.layout_name)
    }

    /// Layout names of includes whose type could not be resolved.
    pub fn missing_includes(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().filter_map(|binding| match &binding.kind {
            BindingKind::IncludedLayout {
                layout_name,
                layout_missing: true,
            } => Some(layout_name.as_str()),
            _ => None,
        })
    }
}

/// `activity_main` becomes `ActivityMainBinding`.
pub fn to_layout_binding_name(layout_name: &str) -> String {
    let mut name: String = layout_name
        .split('_')
        .map(capitalize)
        .collect();
    name.push_str(BINDING_SUFFIX);
    name
}

/// `submit_btn` becomes `submitBtn`.
pub fn to_camel_case(raw_name: &str) -> String {
    let joined: String = raw_name.split('_').map(capitalize).collect();
    let mut chars = joined.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
