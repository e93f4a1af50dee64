use super::model::LayoutBindingData;
use crate::error::Result;
use crate::java::{JavaFile, JavaSourceBuilder};
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::debug;

const BR_CLASS: &str = "BR";

/// Writes `<package>.BR` with one placeholder id per bindable name.
pub struct BrClassGenerator {
    base_dir: PathBuf,
}

impl BrClassGenerator {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn generate(&self, package_name: &str, layout_bindings: &[LayoutBindingData]) -> Result<PathBuf> {
        let path = self.render(package_name, layout_bindings).write_to(&self.base_dir)?;
        debug!("Generated {}", path.display());
        Ok(self.base_dir.clone())
    }

    pub fn render(&self, package_name: &str, layout_bindings: &[LayoutBindingData]) -> JavaFile {
        let names: BTreeSet<String> = layout_bindings
            .iter()
            .flat_map(|data| data.bindables.iter().map(|bindable| bindable.name()))
            .collect();

        let mut builder = JavaSourceBuilder::new();
        builder.open_block(&format!("public class {}", BR_CLASS));
        builder.push_line("public static final int _all = 0;");
        for (index, name) in names.iter().enumerate() {
            builder.push_line(&format!("public static int {} = {};", name, index + 1));
        }
        builder.close_block();
        JavaFile::new(package_name, BR_CLASS, builder.build())
    }
}
