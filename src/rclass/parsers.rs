//! Sub-parsers turning one `values` declaration into R fields.
//!
//! Each resource-declaration shape has its own parser. [`ParserRegistry`] maps
//! the shape ([`ParserType`]) to a plain function, so adding a shape means adding
//! a variant and registering one function.

use super::kind::{ResourceKind, ValueTag};
use super::symbol::{placeholder_array, SymbolEntry};
use crate::error::{AaptError, Result};
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParserType {
    Default,
    Array,
    Style,
    Id,
    Styleable,
}

impl ParserType {
    pub fn for_tag(tag: ValueTag) -> Self {
        match tag {
            ValueTag::Style => ParserType::Style,
            ValueTag::Array | ValueTag::StringArray | ValueTag::IntegerArray => ParserType::Array,
            ValueTag::Enum | ValueTag::Flag => ParserType::Id,
            ValueTag::DeclareStyleable => ParserType::Styleable,
            ValueTag::Item | ValueTag::Attr | ValueTag::Simple(_) => ParserType::Default,
        }
    }
}

/// Input of a sub-parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlEntry {
    Single {
        name: String,
        kind: ResourceKind,
    },
    /// A `declare-styleable` with its member names, collected by the caller.
    Parent {
        name: String,
        children: Vec<String>,
    },
}

impl XmlEntry {
    pub fn single(name: impl Into<String>, kind: ResourceKind) -> Self {
        XmlEntry::Single {
            name: name.into(),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            XmlEntry::Single { name, .. } | XmlEntry::Parent { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleableGroup {
    pub name: String,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserResult {
    pub kind: ResourceKind,
    pub entries: BTreeSet<SymbolEntry>,
    pub group: Option<StyleableGroup>,
}

impl ParserResult {
    fn single(entry: SymbolEntry) -> Self {
        Self {
            kind: entry.kind,
            entries: BTreeSet::from([entry]),
            group: None,
        }
    }
}

pub type ParserFn = fn(&XmlEntry) -> ParserResult;

fn parse_default(entry: &XmlEntry) -> ParserResult {
    match entry {
        XmlEntry::Single { name, kind } => ParserResult::single(SymbolEntry::new(*kind, name)),
        XmlEntry::Parent { name, .. } => {
            ParserResult::single(SymbolEntry::new(ResourceKind::Styleable, name))
        }
    }
}

fn parse_array(entry: &XmlEntry) -> ParserResult {
    let mut symbol = SymbolEntry::new(ResourceKind::Array, entry.name());
    symbol.is_array = true;
    ParserResult::single(symbol)
}

fn parse_style(entry: &XmlEntry) -> ParserResult {
    ParserResult::single(SymbolEntry::new(ResourceKind::Style, entry.name()))
}

fn parse_id(entry: &XmlEntry) -> ParserResult {
    ParserResult::single(SymbolEntry::new(ResourceKind::Id, entry.name()))
}

fn parse_styleable(entry: &XmlEntry) -> ParserResult {
    let (name, children) = match entry {
        XmlEntry::Parent { name, children } => (name.clone(), children.clone()),
        XmlEntry::Single { name, .. } => (name.clone(), Vec::new()),
    };

    let mut members: Vec<String> = Vec::with_capacity(children.len());
    for child in children {
        if !members.contains(&child) {
            members.push(child);
        }
    }

    let symbol = SymbolEntry::array(
        ResourceKind::Styleable,
        name.clone(),
        placeholder_array(members.len()),
    );
    let mut result = ParserResult::single(symbol);
    result.group = Some(StyleableGroup { name, members });
    result
}

/// Dispatch table from [`ParserType`] to its parser.
#[derive(Debug, Clone, Default)]
pub struct ParserRegistry {
    parsers: HashMap<ParserType, ParserFn>,
}

impl ParserRegistry {
    /// Registry with every built-in parser.
    pub fn standard() -> Self {
        let mut registry = Self::default();
        registry.register(ParserType::Default, parse_default);
        registry.register(ParserType::Array, parse_array);
        registry.register(ParserType::Style, parse_style);
        registry.register(ParserType::Id, parse_id);
        registry.register(ParserType::Styleable, parse_styleable);
        registry
    }

    pub fn register(&mut self, parser_type: ParserType, parser: ParserFn) {
        self.parsers.insert(parser_type, parser);
    }

    pub fn parse(&self, parser_type: ParserType, entry: &XmlEntry) -> Result<ParserResult> {
        let parser = self
            .parsers
            .get(&parser_type)
            .ok_or(AaptError::MissingParserImplementation(parser_type))?;
        Ok(parser(entry))
    }
}
