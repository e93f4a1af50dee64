use crate::error::{AaptError, Result};
use std::fmt;

/// Android resource categories, one per nested class of `R`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Anim,
    Animator,
    Array,
    Attr,
    Bool,
    Color,
    Dimen,
    Drawable,
    Font,
    Fraction,
    Id,
    Integer,
    Interpolator,
    Layout,
    Menu,
    Mipmap,
    Navigation,
    Plurals,
    Raw,
    String,
    Style,
    Styleable,
    Transition,
    Xml,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 24] = [
        ResourceKind::Anim,
        ResourceKind::Animator,
        ResourceKind::Array,
        ResourceKind::Attr,
        ResourceKind::Bool,
        ResourceKind::Color,
        ResourceKind::Dimen,
        ResourceKind::Drawable,
        ResourceKind::Font,
        ResourceKind::Fraction,
        ResourceKind::Id,
        ResourceKind::Integer,
        ResourceKind::Interpolator,
        ResourceKind::Layout,
        ResourceKind::Menu,
        ResourceKind::Mipmap,
        ResourceKind::Navigation,
        ResourceKind::Plurals,
        ResourceKind::Raw,
        ResourceKind::String,
        ResourceKind::Style,
        ResourceKind::Styleable,
        ResourceKind::Transition,
        ResourceKind::Xml,
    ];

    /// Name as used in `R.txt`, resource directories and `R` nested classes.
    pub fn name(&self) -> &'static str {
        match self {
            ResourceKind::Anim => "anim",
            ResourceKind::Animator => "animator",
            ResourceKind::Array => "array",
            ResourceKind::Attr => "attr",
            ResourceKind::Bool => "bool",
            ResourceKind::Color => "color",
            ResourceKind::Dimen => "dimen",
            ResourceKind::Drawable => "drawable",
            ResourceKind::Font => "font",
            ResourceKind::Fraction => "fraction",
            ResourceKind::Id => "id",
            ResourceKind::Integer => "integer",
            ResourceKind::Interpolator => "interpolator",
            ResourceKind::Layout => "layout",
            ResourceKind::Menu => "menu",
            ResourceKind::Mipmap => "mipmap",
            ResourceKind::Navigation => "navigation",
            ResourceKind::Plurals => "plurals",
            ResourceKind::Raw => "raw",
            ResourceKind::String => "string",
            ResourceKind::Style => "style",
            ResourceKind::Styleable => "styleable",
            ResourceKind::Transition => "transition",
            ResourceKind::Xml => "xml",
        }
    }

    /// Parse a kind name, ignoring case.
    pub fn from_name(name: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| AaptError::UnknownResourceKind(name.to_string()))
    }

    /// Kind of a resource directory such as `drawable-hdpi` or `layout-land`.
    pub fn from_dir_name(dir_name: &str) -> Result<Self> {
        let base = dir_name.split('-').next().unwrap_or(dir_name);
        Self::from_name(base)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Element names that may declare a resource inside a `values` file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueTag {
    Item,
    Style,
    Array,
    StringArray,
    IntegerArray,
    Attr,
    Enum,
    Flag,
    DeclareStyleable,
    /// `<string>`, `<dimen>`, `<color>` and the other single-kind tags.
    Simple(ResourceKind),
}

impl ValueTag {
    pub fn from_tag(tag: &str) -> Option<Self> {
        let value = match tag {
            "item" => ValueTag::Item,
            "style" => ValueTag::Style,
            "array" => ValueTag::Array,
            "string-array" => ValueTag::StringArray,
            "integer-array" => ValueTag::IntegerArray,
            "attr" => ValueTag::Attr,
            "enum" => ValueTag::Enum,
            "flag" => ValueTag::Flag,
            "declare-styleable" => ValueTag::DeclareStyleable,
            other => ValueTag::Simple(ResourceKind::from_name(other).ok()?),
        };
        Some(value)
    }

    /// Kind of the symbol this tag declares. `None` for an untyped `<item>`.
    pub fn resource_kind(&self) -> Option<ResourceKind> {
        match self {
            ValueTag::Item => None,
            ValueTag::Style => Some(ResourceKind::Style),
            ValueTag::Array | ValueTag::StringArray | ValueTag::IntegerArray => {
                Some(ResourceKind::Array)
            }
            ValueTag::Attr => Some(ResourceKind::Attr),
            ValueTag::Enum | ValueTag::Flag => Some(ResourceKind::Id),
            ValueTag::DeclareStyleable => Some(ResourceKind::Styleable),
            ValueTag::Simple(kind) => Some(*kind),
        }
    }

    /// Redirect `<item type="...">` to the tag of the declared kind.
    pub fn retyped(self, item_type: Option<&str>) -> Self {
        match (self, item_type) {
            (ValueTag::Item, Some(item_type)) => ValueTag::from_tag(item_type).unwrap_or(self),
            _ => self,
        }
    }
}
