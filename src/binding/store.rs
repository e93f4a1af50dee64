//! Layout name to generated binding type lookups used for `<include>` resolution.

use super::model::to_layout_binding_name;
use crate::error::{self, AaptError, Result};
use crate::parser::TypeDescriptor;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::debug;

pub(crate) const LAYOUT_MARKER: &str = "<layout";

pub trait LayoutTypeStore: Send + Sync {
    fn get(&self, layout_name: &str) -> Option<TypeDescriptor>;
}

#[derive(Debug, Clone, Default)]
pub struct MapLayoutTypeStore {
    types: HashMap<String, TypeDescriptor>,
}

impl MapLayoutTypeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type. The first registration of a layout wins.
    pub fn insert(&mut self, layout_name: impl Into<String>, type_name: TypeDescriptor) {
        self.types.entry(layout_name.into()).or_insert(type_name);
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Types generated for this module's own data-binding layouts.
    pub fn local<P: AsRef<Path>>(package_name: &str, layout_files: &[P]) -> Result<Self> {
        let mut store = Self::new();
        for file in layout_files {
            let file = file.as_ref();
            let contents = error::read_to_string(file)?;
            if !contents.contains(LAYOUT_MARKER) {
                continue;
            }
            let layout_name = layout_name_of(file);
            let type_name = TypeDescriptor::named(format!(
                "{}.databinding.{}",
                package_name,
                to_layout_binding_name(&layout_name)
            ));
            store.insert(layout_name, type_name);
        }
        debug!("Local layout store: {} layouts", store.len());
        Ok(store)
    }

    /// Types published by dependencies in their data-binding class info JSON.
    pub fn from_class_infos<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut store = Self::new();
        for path in paths {
            let path = path.as_ref();
            let contents = error::read_to_string(path)?;
            let log: ClassInfoLog = serde_json::from_str(&contents).map_err(|source| {
                AaptError::InvalidClassInfo {
                    path: path.to_path_buf(),
                    source,
                }
            })?;
            for (layout_name, mapping) in log.mappings {
                store.insert(layout_name, TypeDescriptor::named(mapping.qualified_name));
            }
        }
        debug!("Dependency layout store: {} layouts", store.len());
        Ok(store)
    }
}

impl LayoutTypeStore for MapLayoutTypeStore {
    fn get(&self, layout_name: &str) -> Option<TypeDescriptor> {
        self.types.get(layout_name).cloned()
    }
}

/// `res/layout-land/activity_main.xml` is the layout `activity_main`.
pub fn layout_name_of(file: &Path) -> String {
    let file_name = file
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    file_name
        .split(".xml")
        .next()
        .unwrap_or_default()
        .to_string()
}

#[derive(Debug, Deserialize)]
struct ClassInfoLog {
    #[serde(default)]
    mappings: BTreeMap<String, ClassInfoMapping>,
}

#[derive(Debug, Deserialize)]
struct ClassInfoMapping {
    qualified_name: String,
}
