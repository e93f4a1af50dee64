use super::model::{Binding, LayoutBindingData};
use super::store::LAYOUT_MARKER;
use crate::error::{self, Result};
use crate::java::{capitalize, JavaFile, JavaSourceBuilder};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, trace};

const DATABINDING_PACKAGE: &str = "androidx.databinding";
const DATA_BINDING_COMPONENT: &str = "DataBindingComponent";
const VIEW_DATA_BINDING: &str = "androidx.databinding.ViewDataBinding";
const NON_NULL: &str = "@androidx.annotation.NonNull";
const NULLABLE: &str = "@androidx.annotation.Nullable";
const BINDABLE: &str = "@androidx.databinding.Bindable";
const STUB_BODY: &str = "throw new RuntimeException(\"Stub!\");";
const CONSTRUCTOR_KEY: &str = "<init>";

/// Resolved types that never get a binding field.
const INVALID_BINDING_TYPES: [&str; 2] = ["android.widget.fragment", "android.widget.layout"];

const INFLATER: &str = "android.view.LayoutInflater inflater";
const ROOT: &str = "android.view.ViewGroup root";
const ATTACH_TO_ROOT: &str = "boolean attachToRoot";
const VIEW: &str = "android.view.View view";
const COMPONENT: &str = "java.lang.Object component";

/// Writes compile-only `ViewDataBinding` stubs for data-binding layouts.
pub struct BindingClassGenerator {
    base_dir: PathBuf,
}

/// A method declaration plus the name it is ordered by.
struct MethodStub {
    name: String,
    annotation: Option<&'static str>,
    signature: String,
    body: Option<Vec<String>>,
}

impl MethodStub {
    fn render(&self, builder: &mut JavaSourceBuilder) {
        if let Some(annotation) = self.annotation {
            builder.push_line(annotation);
        }
        match &self.body {
            Some(lines) => {
                builder.open_block(&self.signature);
                for line in lines {
                    builder.push_line(line);
                }
                builder.close_block();
            }
            None => builder.push_line(&format!("{};", self.signature)),
        }
    }
}

impl BindingClassGenerator {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Layouts needing a stub: files with a `<layout` root, plus empty stand-ins
    /// for included layouts that could not be resolved anywhere.
    pub fn calculate_bindings_to_generate(
        &self,
        layout_bindings: &[LayoutBindingData],
    ) -> Result<Vec<LayoutBindingData>> {
        let mut seen = HashSet::new();
        let mut selected = Vec::new();

        for data in layout_bindings {
            let Some(file) = &data.file else {
                continue;
            };
            if !error::read_to_string(file)?.contains(LAYOUT_MARKER) {
                trace!("Skipping plain layout {}", data.layout_name);
                continue;
            }
            if seen.insert(data.layout_name.clone()) {
                selected.push(data.clone());
            }
        }

        for layout_name in layout_bindings.iter().flat_map(LayoutBindingData::missing_includes) {
            if seen.insert(layout_name.to_string()) {
                debug!("Generating empty binding for missing include {}", layout_name);
                selected.push(LayoutBindingData::empty(layout_name));
            }
        }

        Ok(selected)
    }

    pub fn generate(
        &self,
        package_name: &str,
        layout_bindings: &[LayoutBindingData],
    ) -> Result<PathBuf> {
        self.data_binding_component().write_to(&self.base_dir)?;

        for data in self.calculate_bindings_to_generate(layout_bindings)? {
            let path = self.render(package_name, &data).write_to(&self.base_dir)?;
            debug!("Generated {}", path.display());
        }
        Ok(self.base_dir.clone())
    }

    pub fn data_binding_component(&self) -> JavaFile {
        let mut builder = JavaSourceBuilder::new();
        builder.open_block(&format!("public interface {}", DATA_BINDING_COMPONENT));
        builder.close_block();
        JavaFile::new(DATABINDING_PACKAGE, DATA_BINDING_COMPONENT, builder.build())
    }

    /// Render the abstract binding class for one layout.
    pub fn render(&self, package_name: &str, data: &LayoutBindingData) -> JavaFile {
        let class_name = data.binding_class_name();
        let gen_package = format!("{}.databinding", package_name);
        let qualified = format!("{}.{}", gen_package, class_name);

        let bindings: Vec<&Binding> = data
            .bindings
            .iter()
            .filter(|binding| !INVALID_BINDING_TYPES.contains(&binding.type_name.to_string().as_str()))
            .collect();

        let mut builder = JavaSourceBuilder::new();
        builder.open_block(&format!(
            "public abstract class {} extends {}",
            class_name, VIEW_DATA_BINDING
        ));

        let fields = fields(&bindings, &data.bindables);
        for (_, field) in &fields {
            for line in field {
                builder.push_line(line);
            }
        }

        let mut methods = vec![constructor(&class_name, &bindings)];
        methods.extend(bindable_methods(&data.bindables));
        methods.extend(factory_methods(&qualified));
        methods.sort_by(|a, b| a.name.cmp(&b.name));

        for (index, method) in methods.iter().enumerate() {
            if index > 0 || !fields.is_empty() {
                builder.blank_line();
            }
            method.render(&mut builder);
        }

        builder.close_block();
        JavaFile::new(gen_package, class_name, builder.build())
    }
}

/// Field declarations keyed by field name, sorted.
fn fields(bindings: &[&Binding], bindables: &[Binding]) -> Vec<(String, Vec<String>)> {
    let mut fields: Vec<(String, Vec<String>)> = bindings
        .iter()
        .map(|binding| {
            let name = binding.name();
            let declaration = format!("public final {} {};", binding.type_name, name);
            (name, vec![NON_NULL.to_string(), declaration])
        })
        .chain(bindables.iter().map(|bindable| {
            let name = format!("m{}", capitalize(&bindable.name()));
            let declaration = format!("protected {} {};", bindable.type_name, name);
            (name, vec![BINDABLE.to_string(), declaration])
        }))
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
}

fn constructor(class_name: &str, bindings: &[&Binding]) -> MethodStub {
    let mut parameters = vec![
        "java.lang.Object _bindingComponent".to_string(),
        "android.view.View _root".to_string(),
        "int _localFieldCount".to_string(),
    ];
    parameters.extend(
        bindings
            .iter()
            .map(|binding| format!("{} {}", binding.type_name, binding.name())),
    );

    let mut body = vec!["super(_bindingComponent, _root, _localFieldCount);".to_string()];
    body.extend(bindings.iter().map(|binding| {
        let name = binding.name();
        format!("this.{} = {};", name, name)
    }));

    MethodStub {
        name: CONSTRUCTOR_KEY.to_string(),
        annotation: None,
        signature: format!("protected {}({})", class_name, parameters.join(", ")),
        body: Some(body),
    }
}

/// Abstract setter and stub getter per bindable.
fn bindable_methods(bindables: &[Binding]) -> Vec<MethodStub> {
    bindables
        .iter()
        .flat_map(|bindable| {
            let name = capitalize(&bindable.name());
            let setter = MethodStub {
                name: format!("set{}", name),
                annotation: None,
                signature: format!("public abstract void set{}({} var1)", name, bindable.type_name),
                body: None,
            };
            let getter = MethodStub {
                name: format!("get{}", name),
                annotation: Some(NULLABLE),
                signature: format!("public {} get{}()", bindable.type_name, name),
                body: Some(vec![STUB_BODY.to_string()]),
            };
            [setter, getter]
        })
        .collect()
}

/// `inflate` and `bind` overloads.
fn factory_methods(qualified: &str) -> Vec<MethodStub> {
    let overloads: [(&str, Vec<&str>); 5] = [
        ("inflate", vec![INFLATER]),
        ("inflate", vec![INFLATER, ROOT, ATTACH_TO_ROOT]),
        ("inflate", vec![INFLATER, ROOT, ATTACH_TO_ROOT, COMPONENT]),
        ("bind", vec![VIEW]),
        ("bind", vec![VIEW, COMPONENT]),
    ];
    overloads
        .into_iter()
        .map(|(name, parameters)| MethodStub {
            name: name.to_string(),
            annotation: Some(NON_NULL),
            signature: format!(
                "public static {} {}({})",
                qualified,
                name,
                parameters.join(", ")
            ),
            body: Some(vec![STUB_BODY.to_string()]),
        })
        .collect()
}
