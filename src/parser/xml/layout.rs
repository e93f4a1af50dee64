use super::{for_each_start_tag, XmlAttributes, ANDROID_ID, NAME};
use crate::binding::{
    layout_name_of, to_layout_binding_name, Binding, BindingKind, LayoutBindingData, LayoutTypeStore,
};
use crate::error::{self, AaptError, Result};
use crate::parser::{resolve, ImportAliases, TypeDescriptor};
use rayon::prelude::*;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, trace};

const TYPE: &str = "type";
const ALIAS: &str = "alias";
const VARIABLE: &str = "variable";
const IMPORT: &str = "import";
const INCLUDE: &str = "include";
const LAYOUT: &str = "layout";
const NEW_ID_PREFIX: &str = "@+id/";
const LAYOUT_PREFIX: &str = "@layout/";

/// Parser for data-binding layout XML files
pub struct LayoutBindingsParser<'a> {
    local_store: &'a dyn LayoutTypeStore,
    dep_store: &'a dyn LayoutTypeStore,
}

/// Bindings collected while streaming a single layout.
#[derive(Default)]
struct LayoutState {
    imports: ImportAliases,
    bindings: Vec<Binding>,
    bindables: Vec<Binding>,
    binding_names: HashSet<String>,
    bindable_names: HashSet<String>,
}

impl LayoutState {
    fn add_binding(&mut self, binding: Binding) {
        if self.binding_names.insert(binding.raw_name.clone()) {
            self.bindings.push(binding);
        }
    }

    fn add_bindable(&mut self, binding: Binding) {
        if self.bindable_names.insert(binding.raw_name.clone()) {
            self.bindables.push(binding);
        }
    }
}

impl<'a> LayoutBindingsParser<'a> {
    pub fn new(local_store: &'a dyn LayoutTypeStore, dep_store: &'a dyn LayoutTypeStore) -> Self {
        Self {
            local_store,
            dep_store,
        }
    }

    /// Parse every layout. Layouts sharing a name (e.g. `layout-land`) keep the first file.
    pub fn parse<P>(&self, package_name: &str, layout_files: &[P]) -> Result<Vec<LayoutBindingData>>
    where
        P: AsRef<Path> + Sync,
    {
        let parsed = layout_files
            .par_iter()
            .map(|file| self.parse_file(package_name, file.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        let mut seen = HashSet::new();
        Ok(parsed
            .into_iter()
            .filter(|data| seen.insert(data.layout_name.clone()))
            .collect())
    }

    pub fn parse_file(&self, package_name: &str, path: &Path) -> Result<LayoutBindingData> {
        let contents = error::read_to_string(path)?;
        self.parse_contents(package_name, path, &contents)
    }

    /// Parse the layout `contents` read from `path`.
    pub fn parse_contents(
        &self,
        package_name: &str,
        path: &Path,
        contents: &str,
    ) -> Result<LayoutBindingData> {
        let mut state = LayoutState::default();

        for_each_start_tag(path, contents, |tag, attributes| match tag {
            IMPORT => {
                let type_fqcn = required(path, tag, attributes, TYPE)?;
                let alias = attributes
                    .get(ALIAS)
                    .unwrap_or_else(|| type_fqcn.rsplit('.').next().unwrap_or(type_fqcn));
                let resolved = resolve_in(path, tag, type_fqcn, &state.imports)?;
                trace!("import {} as {}", resolved, alias);
                state.imports.insert(alias.to_string(), resolved);
                Ok(())
            }
            VARIABLE => {
                let raw_name = required(path, tag, attributes, NAME)?;
                let type_name = required(path, tag, attributes, TYPE)?;
                let resolved = resolve_in(path, tag, type_name, &state.imports)?;
                state.add_bindable(Binding::new(raw_name, resolved, BindingKind::Variable));
                Ok(())
            }
            _ => {
                if let Some(binding) = self.parse_binding(package_name, path, tag, attributes)? {
                    state.add_binding(binding);
                }
                Ok(())
            }
        })?;

        debug!(
            "Parsed layout {}: {} bindings, {} bindables",
            path.display(),
            state.bindings.len(),
            state.bindables.len()
        );

        Ok(LayoutBindingData {
            layout_name: layout_name_of(path),
            file: Some(path.to_path_buf()),
            bindings: state.bindings,
            bindables: state.bindables,
        })
    }

    /// A binding for elements declaring a new id (`@+id/...`).
    fn parse_binding(
        &self,
        package_name: &str,
        path: &Path,
        tag: &str,
        attributes: &XmlAttributes,
    ) -> Result<Option<Binding>> {
        let Some(id) = attributes.get(ANDROID_ID).filter(|id| id.contains('+')) else {
            return Ok(None);
        };
        let raw_name = id.rsplit(NEW_ID_PREFIX).next().unwrap_or(id);

        let binding = if tag == INCLUDE {
            let layout = required(path, tag, attributes, LAYOUT)?;
            let layout_name = layout.rsplit(LAYOUT_PREFIX).next().unwrap_or(layout);
            let (type_name, layout_missing) = self.parse_include(package_name, layout_name);
            Binding::new(
                raw_name,
                type_name,
                BindingKind::IncludedLayout {
                    layout_name: layout_name.to_string(),
                    layout_missing,
                },
            )
        } else {
            Binding::new(raw_name, view_type(tag), BindingKind::View)
        };
        Ok(Some(binding))
    }

    /// Type of an included layout, falling back to a local placeholder binding
    /// (flagged missing) instead of failing the build.
    fn parse_include(&self, package_name: &str, layout_name: &str) -> (TypeDescriptor, bool) {
        match self.included_layout_type(layout_name) {
            Some(type_name) => (type_name, false),
            None => {
                debug!("Included layout {} not found, using placeholder binding", layout_name);
                let fallback = format!(
                    "{}.databinding.{}",
                    package_name,
                    to_layout_binding_name(layout_name)
                );
                (TypeDescriptor::named(fallback), true)
            }
        }
    }

    /// Local layouts shadow dependency layouts.
    pub fn included_layout_type(&self, layout_name: &str) -> Option<TypeDescriptor> {
        self.local_store
            .get(layout_name)
            .or_else(|| self.dep_store.get(layout_name))
    }
}

/// Type of a view tag: custom views are fully qualified, framework views are not.
fn view_type(tag: &str) -> TypeDescriptor {
    let qualified = if tag.contains('.') {
        tag.to_string()
    } else {
        match tag {
            "ViewStub" => "androidx.databinding.ViewStubProxy".to_string(),
            "View" | "ViewGroup" | "TextureView" | "SurfaceView" => format!("android.view.{}", tag),
            "WebView" => format!("android.webkit.{}", tag),
            _ => format!("android.widget.{}", tag),
        }
    };
    TypeDescriptor::named(qualified)
}

fn required<'x>(
    path: &Path,
    tag: &str,
    attributes: &'x XmlAttributes,
    attribute: &'static str,
) -> Result<&'x str> {
    attributes
        .get(attribute)
        .ok_or_else(|| AaptError::MissingRequiredAttribute {
            file: path.to_path_buf(),
            element: tag.to_string(),
            attribute,
        })
}

fn resolve_in(
    path: &Path,
    tag: &str,
    expr: &str,
    imports: &ImportAliases,
) -> Result<TypeDescriptor> {
    resolve(expr, imports).map_err(|source| AaptError::MalformedTypeExpression {
        file: path.to_path_buf(),
        element: tag.to_string(),
        source,
    })
}
