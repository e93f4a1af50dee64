use super::kind::ResourceKind;
use super::parsers::ParserResult;
use crate::error::{AaptError, Result};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::hash::{Hash, Hasher};

/// Placeholder for every resource value. The real ids are assigned by the final aapt run.
pub const DEFAULT_VALUE: &str = "0";

const TYPE_INDEX: usize = 1;
const NAME_INDEX: usize = 2;
const VALUE_INDEX: usize = 3;

/// One field of the R class. Identity is `(kind, name)`.
#[derive(Debug, Clone)]
pub struct SymbolEntry {
    pub kind: ResourceKind,
    pub name: String,
    pub value: String,
    pub is_array: bool,
}

impl SymbolEntry {
    pub fn new(kind: ResourceKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            value: DEFAULT_VALUE.to_string(),
            is_array: false,
        }
    }

    pub fn array(kind: ResourceKind, name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            value: value.into(),
            is_array: true,
        }
    }

    /// Decode one legacy `R.txt` line such as `int[] styleable View { 0x1, 0x2 }`.
    ///
    /// Blank lines yield `None`.
    pub fn from_symbol_line(line: &str) -> Result<Option<Self>> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            return Ok(None);
        }
        if tokens.len() <= NAME_INDEX {
            return Err(AaptError::MalformedSymbolLine(line.to_string()));
        }

        let kind = ResourceKind::from_name(tokens[TYPE_INDEX])?;
        let name = tokens[NAME_INDEX];

        let entry = if line.contains("[]") {
            // Values sit between the `{` at VALUE_INDEX and the trailing `}`.
            let count = tokens.len().saturating_sub(VALUE_INDEX + 2);
            SymbolEntry::array(kind, name, placeholder_array(count))
        } else {
            SymbolEntry::new(kind, name)
        };
        Ok(Some(entry))
    }

    fn key(&self) -> (ResourceKind, &str) {
        (self.kind, &self.name)
    }
}

impl PartialEq for SymbolEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for SymbolEntry {}

impl Hash for SymbolEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for SymbolEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SymbolEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// `{ 0, 0, 0 }` with `count` placeholder values.
pub fn placeholder_array(count: usize) -> String {
    if count == 0 {
        return "{ }".to_string();
    }
    let values = vec![DEFAULT_VALUE; count].join(", ");
    format!("{{ {} }}", values)
}

/// All symbols of one invocation, bucketed by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    symbols: BTreeMap<ResourceKind, BTreeSet<SymbolEntry>>,
    /// Styleable group name to its declared members, in encounter order.
    styleables: BTreeMap<String, Vec<String>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. An existing entry with the same key is kept.
    pub fn add(&mut self, entry: SymbolEntry) -> bool {
        self.symbols.entry(entry.kind).or_default().insert(entry)
    }

    pub fn add_result(&mut self, result: ParserResult) {
        if let Some(group) = result.group {
            self.add_members(&group.name, group.members);
        }
        let bucket = self.symbols.entry(result.kind).or_default();
        for entry in result.entries {
            bucket.insert(entry);
        }
    }

    pub fn add_members(&mut self, group: &str, members: impl IntoIterator<Item = String>) {
        let existing = self.styleables.entry(group.to_string()).or_default();
        for member in members {
            if !existing.contains(&member) {
                existing.push(member);
            }
        }
    }

    /// Fold `other` into `self`. Union semantics, so merging is commutative on keys.
    pub fn merge(&mut self, other: SymbolTable) {
        for (kind, entries) in other.symbols {
            let bucket = self.symbols.entry(kind).or_default();
            for entry in entries {
                bucket.insert(entry);
            }
        }
        for (group, members) in other.styleables {
            self.add_members(&group, members);
        }
    }

    /// Size every styleable array to its final member list.
    pub fn resize_styleables(&mut self) {
        let Some(bucket) = self.symbols.get_mut(&ResourceKind::Styleable) else {
            return;
        };
        for (group, members) in &self.styleables {
            if bucket.contains(&SymbolEntry::new(ResourceKind::Styleable, group.as_str())) {
                bucket.replace(SymbolEntry::array(
                    ResourceKind::Styleable,
                    group.as_str(),
                    placeholder_array(members.len()),
                ));
            }
        }
    }

    /// Merge one dependency `R.txt` line.
    pub fn add_symbol_line(&mut self, line: &str) -> Result<()> {
        if let Some(entry) = SymbolEntry::from_symbol_line(line)? {
            self.add(entry);
        }
        Ok(())
    }

    pub fn get(&self, kind: ResourceKind, name: &str) -> Option<&SymbolEntry> {
        self.symbols.get(&kind)?.get(&SymbolEntry::new(kind, name))
    }

    pub fn contains(&self, kind: ResourceKind, name: &str) -> bool {
        self.get(kind, name).is_some()
    }

    pub fn entries(&self, kind: ResourceKind) -> impl Iterator<Item = &SymbolEntry> {
        self.symbols.get(&kind).into_iter().flatten()
    }

    /// Non-empty kinds with their entries, in kind order.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, &BTreeSet<SymbolEntry>)> {
        self.symbols
            .iter()
            .filter(|(_, entries)| !entries.is_empty())
            .map(|(kind, entries)| (*kind, entries))
    }

    pub fn members(&self, group: &str) -> Option<&[String]> {
        self.styleables.get(group).map(Vec::as_slice)
    }

    pub fn styleables(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.styleables
            .iter()
            .map(|(group, members)| (group.as_str(), members.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.symbols.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
