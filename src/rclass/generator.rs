use super::kind::ResourceKind;
use super::symbol::{SymbolEntry, SymbolTable};
use crate::error::Result;
use crate::java::{java_identifier, JavaFile, JavaSourceBuilder};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::debug;

const R_CLASS: &str = "R";

/// Renders a [`SymbolTable`] as `<package>.R`.
///
/// Fields are non-final so the placeholder values are never inlined by javac.
pub struct RClassGenerator {
    base_dir: PathBuf,
}

impl RClassGenerator {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn generate(&self, package_name: &str, table: &SymbolTable) -> Result<PathBuf> {
        let file = self.render(package_name, table);
        let path = file.write_to(&self.base_dir)?;
        debug!("Generated {} with {} symbols", path.display(), table.len());
        Ok(self.base_dir.clone())
    }

    pub fn render(&self, package_name: &str, table: &SymbolTable) -> JavaFile {
        let mut builder = JavaSourceBuilder::new();
        builder.open_block(&format!("public final class {}", R_CLASS));

        for (index, (kind, entries)) in table.iter().enumerate() {
            if index > 0 {
                builder.blank_line();
            }
            builder.open_block(&format!("public static final class {}", kind.name()));

            let mut emitted = HashSet::new();
            for entry in entries {
                let name = java_identifier(&entry.name);
                if !emitted.insert(name.clone()) {
                    continue;
                }
                builder.push_line(&render_field(&name, entry));

                if kind == ResourceKind::Styleable {
                    for (position, member) in table.members(&entry.name).unwrap_or_default().iter().enumerate() {
                        let member_name = format!("{}_{}", name, java_identifier(member));
                        if emitted.insert(member_name.clone()) {
                            builder.push_line(&format!(
                                "public static int {} = {};",
                                member_name, position
                            ));
                        }
                    }
                }
            }

            builder.close_block();
        }

        builder.close_block();
        JavaFile::new(package_name, R_CLASS, builder.build())
    }
}

fn render_field(name: &str, entry: &SymbolEntry) -> String {
    if entry.is_array && entry.value.starts_with('{') {
        format!("public static int[] {} = {};", name, entry.value)
    } else {
        format!("public static int {} = {};", name, entry.value)
    }
}
