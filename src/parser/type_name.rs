//! Java type expression resolution for data-binding `<import>` and `<variable>` types.
//!
//! Expressions follow the grammar data binding accepts in layout files: primitives,
//! arrays (`T[]`), imported aliases, fully qualified names and generics with
//! arbitrarily nested type arguments (`Map<String, List<Foo>>`).

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Per-layout alias table filled by `<import>` elements.
pub type ImportAliases = HashMap<String, TypeDescriptor>;

const PRIMITIVES: [&str; 9] = [
    "void", "boolean", "byte", "short", "int", "long", "char", "float", "double",
];

/// A resolved Java type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeDescriptor {
    Primitive(String),
    Named(String),
    Array(Box<TypeDescriptor>),
    Generic {
        base: String,
        args: Vec<TypeDescriptor>,
    },
}

impl TypeDescriptor {
    pub fn named(name: impl Into<String>) -> Self {
        TypeDescriptor::Named(name.into())
    }

    pub fn primitive(name: impl Into<String>) -> Self {
        TypeDescriptor::Primitive(name.into())
    }

    pub fn array(element: TypeDescriptor) -> Self {
        TypeDescriptor::Array(Box::new(element))
    }

    /// Name of the class for `Named` and `Generic` types.
    pub fn class_name(&self) -> Option<&str> {
        match self {
            TypeDescriptor::Named(name) => Some(name),
            TypeDescriptor::Generic { base, .. } => Some(base),
            _ => None,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeDescriptor::Primitive(name) | TypeDescriptor::Named(name) => f.write_str(name),
            TypeDescriptor::Array(element) => write!(f, "{}[]", element),
            TypeDescriptor::Generic { base, args } => {
                write!(f, "{}<", base)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(">")
            }
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeNameError {
    #[error("empty type expression")]
    Empty,
    #[error("unbalanced generic delimiters in `{0}`")]
    Unbalanced(String),
    #[error("empty type argument in `{0}`")]
    EmptyArgument(String),
    #[error("generic base of `{0}` is not a class")]
    NonClassBase(String),
}

/// Resolve `expr` against `aliases`.
pub fn resolve(expr: &str, aliases: &ImportAliases) -> Result<TypeDescriptor, TypeNameError> {
    let expr = expr.trim();
    if expr.is_empty() {
        return Err(TypeNameError::Empty);
    }
    if !is_balanced(expr) {
        return Err(TypeNameError::Unbalanced(expr.to_string()));
    }

    if let Some(element) = expr.strip_suffix("[]") {
        return Ok(TypeDescriptor::array(resolve(element, aliases)?));
    }

    if let Some(generic_end) = expr.rfind('>') {
        if let Some(generic_start) = expr[..generic_end].find('<') {
            let params = &expr[generic_start + 1..generic_end];
            let args = split_type_arguments(params)
                .iter()
                .map(|arg| {
                    if arg.is_empty() {
                        Err(TypeNameError::EmptyArgument(expr.to_string()))
                    } else {
                        resolve(arg, aliases)
                    }
                })
                .collect::<Result<Vec<_>, _>>()?;

            let base = match resolve(&expr[..generic_start], aliases)? {
                TypeDescriptor::Named(name) => name,
                _ => return Err(TypeNameError::NonClassBase(expr.to_string())),
            };
            return Ok(TypeDescriptor::Generic { base, args });
        }
    }

    if let Some(aliased) = aliases.get(expr) {
        return Ok(aliased.clone());
    }

    if PRIMITIVES.contains(&expr) {
        return Ok(TypeDescriptor::primitive(expr));
    }

    Ok(TypeDescriptor::named(expr))
}

fn is_balanced(expr: &str) -> bool {
    let mut depth: i32 = 0;
    for c in expr.chars() {
        match c {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth < 0 {
                    return false;
                }
            }
            _ => {}
        }
    }
    depth == 0
}

/// Split generic parameters on top-level commas, dropping whitespace.
fn split_type_arguments(params: &str) -> Vec<String> {
    let mut list = Vec::new();
    let mut open_count = 0;
    let mut arg = String::new();
    for c in params.chars() {
        if c == ',' && open_count == 0 {
            list.push(std::mem::take(&mut arg));
        } else if !c.is_whitespace() {
            arg.push(c);
            if c == '<' {
                open_count += 1;
            } else if c == '>' {
                open_count -= 1;
            }
        }
    }
    list.push(arg);
    list
}
