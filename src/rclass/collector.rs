//! Resource symbol collection.
//!
//! Classifies resource files by their directory, extracts typed declarations and
//! merges them with the symbols of dependencies (`R.txt` lines).

use super::kind::{ResourceKind, ValueTag};
use super::parsers::{ParserRegistry, ParserType, XmlEntry};
use super::symbol::{SymbolEntry, SymbolTable};
use crate::error::{self, Result};
use crate::parser::xml::{collect_ids, ValueDeclaration, ValuesFileParser};
use rayon::prelude::*;
use std::path::Path;
use tracing::{debug, info, trace};

const VALUES_DIR_PREFIX: &str = "values";
const NINE_PATCH_SUFFIX: &str = ".9";

/// Builds the [`SymbolTable`] of one module.
pub struct ResourceSymbolCollector {
    parsers: ParserRegistry,
    non_transitive: bool,
}

impl ResourceSymbolCollector {
    pub fn new(non_transitive: bool) -> Self {
        Self::with_parsers(ParserRegistry::standard(), non_transitive)
    }

    pub fn with_parsers(parsers: ParserRegistry, non_transitive: bool) -> Self {
        Self {
            parsers,
            non_transitive,
        }
    }

    /// Collect symbols from `resources` and, unless non-transitive, from the
    /// dependency `R.txt` lines.
    pub fn collect<P>(&self, resources: &[P], dependency_lines: &[String]) -> Result<SymbolTable>
    where
        P: AsRef<Path> + Sync,
    {
        let mut partials = resources
            .par_iter()
            .map(|resource| {
                let path = resource.as_ref();
                self.collect_file(path).map(|partial| (path, partial))
            })
            .collect::<Result<Vec<_>>>()?;
        // Styleable members are ordered, so merge in path order rather than caller order.
        partials.sort_by(|(a, _), (b, _)| a.cmp(b));

        let mut table = SymbolTable::new();
        for (_, partial) in partials {
            table.merge(partial);
        }
        table.resize_styleables();
        debug!("Collected {} local symbols", table.len());

        if self.non_transitive {
            info!("Non-transitive R class: skipping {} dependency symbols", dependency_lines.len());
        } else {
            for line in dependency_lines {
                table.add_symbol_line(line)?;
            }
        }

        Ok(table)
    }

    /// Symbols contributed by a single resource file.
    pub fn collect_file(&self, file: &Path) -> Result<SymbolTable> {
        let mut table = SymbolTable::new();
        let dir_name = file
            .parent()
            .and_then(Path::file_name)
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        if dir_name.starts_with(VALUES_DIR_PREFIX) {
            self.process_values(file, &mut table)?;
        } else {
            self.collect_ids(file, &mut table)?;
            self.process_file_name(file, &dir_name, &mut table)?;
        }
        Ok(table)
    }

    fn process_values(&self, file: &Path, table: &mut SymbolTable) -> Result<()> {
        let contents = error::read_to_string(file)?;
        let declarations = ValuesFileParser::new().parse(file, &contents)?;

        for declaration in declarations {
            match declaration {
                ValueDeclaration::Element {
                    tag,
                    name,
                    item_type,
                } => {
                    let Some(value_tag) = ValueTag::from_tag(&tag) else {
                        trace!("Ignoring <{}> {} in {}", tag, name, file.display());
                        continue;
                    };
                    let value_tag = value_tag.retyped(item_type.as_deref());
                    // An untyped item only styles its parent.
                    let Some(kind) = value_tag.resource_kind() else {
                        continue;
                    };
                    self.parse_into(ParserType::for_tag(value_tag), XmlEntry::single(name, kind), table)?;
                }
                ValueDeclaration::Styleable { name, children } => {
                    let mut members = Vec::new();
                    for child in children {
                        let child_tag = ValueTag::from_tag(&child.tag).unwrap_or(ValueTag::Attr);
                        let (parser_type, kind) = if child.nested {
                            let kind = child_tag.resource_kind().unwrap_or(ResourceKind::Attr);
                            (ParserType::for_tag(child_tag), kind)
                        } else {
                            members.push(child.name.clone());
                            (ParserType::Default, ResourceKind::Attr)
                        };
                        self.parse_into(parser_type, XmlEntry::single(child.name, kind), table)?;
                    }
                    self.parse_into(
                        ParserType::Styleable,
                        XmlEntry::Parent {
                            name,
                            children: members,
                        },
                        table,
                    )?;
                }
            }
        }
        Ok(())
    }

    fn parse_into(
        &self,
        parser_type: ParserType,
        entry: XmlEntry,
        table: &mut SymbolTable,
    ) -> Result<()> {
        let result = self.parsers.parse(parser_type, &entry)?;
        table.add_result(result);
        Ok(())
    }

    fn collect_ids(&self, file: &Path, table: &mut SymbolTable) -> Result<()> {
        if file.extension().map(|e| e != "xml").unwrap_or(true) {
            return Ok(());
        }
        let contents = error::read_to_string(file)?;
        for id in collect_ids(file, &contents)? {
            table.add(SymbolEntry::new(ResourceKind::Id, id));
        }
        Ok(())
    }

    /// `drawable-hdpi/ic_launcher.9.png` declares `drawable.ic_launcher`.
    fn process_file_name(&self, file: &Path, dir_name: &str, table: &mut SymbolTable) -> Result<()> {
        let kind = ResourceKind::from_dir_name(dir_name)?;
        let stem = file
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let name = stem.split(NINE_PATCH_SUFFIX).next().unwrap_or(&stem);
        table.add(SymbolEntry::new(kind, name));
        Ok(())
    }
}
