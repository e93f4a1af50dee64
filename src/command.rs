//! The aapt-lite pipeline: symbol collection, layout parsing and Java emission.

use crate::binding::{BindingClassGenerator, BrClassGenerator, MapLayoutTypeStore};
use crate::discovery::partition_layouts;
use crate::error::{self, Result};
use crate::parser::LayoutBindingsParser;
use crate::rclass::{RClassGenerator, ResourceSymbolCollector};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Inputs of one invocation.
#[derive(Debug, Clone, Default)]
pub struct AaptLiteCommand {
    pub package: String,
    pub resource_files: Vec<PathBuf>,
    /// Subset of `resource_files` below a `layout` directory.
    pub layout_files: Vec<PathBuf>,
    pub class_infos: Vec<PathBuf>,
    pub r_txts: Vec<PathBuf>,
    pub non_transitive: bool,
    pub r_class_output: PathBuf,
    pub stubs_output: PathBuf,
}

/// What an invocation produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub symbols: usize,
    pub layouts: usize,
    pub bindables: usize,
    pub stubs: usize,
}

impl AaptLiteCommand {
    /// A command over `resource_files`, with layouts selected by path.
    pub fn new(
        package: impl Into<String>,
        resource_files: Vec<PathBuf>,
        r_class_output: impl Into<PathBuf>,
        stubs_output: impl Into<PathBuf>,
    ) -> Self {
        let layout_files = partition_layouts(&resource_files);
        Self {
            package: package.into(),
            resource_files,
            layout_files,
            r_class_output: r_class_output.into(),
            stubs_output: stubs_output.into(),
            ..Self::default()
        }
    }

    pub fn run(&self) -> Result<RunSummary> {
        let start_time = Instant::now();

        info!("Indexing {} layouts...", self.layout_files.len());
        let local_store = MapLayoutTypeStore::local(&self.package, &self.layout_files)?;
        let dep_store = MapLayoutTypeStore::from_class_infos(&self.class_infos)?;
        info!(
            "Layout types: {} local, {} from dependencies",
            local_store.len(),
            dep_store.len()
        );

        info!("Parsing layout bindings...");
        let parser = LayoutBindingsParser::new(&local_store, &dep_store);
        let layout_bindings = parser.parse(&self.package, &self.layout_files)?;

        info!("Collecting resource symbols...");
        let dependency_lines = self.read_r_txts()?;
        let collector = ResourceSymbolCollector::new(self.non_transitive);
        let table = collector.collect(&self.resource_files, &dependency_lines)?;
        info!("Collected {} symbols", table.len());

        info!("Writing R and BR classes to {}", self.r_class_output.display());
        RClassGenerator::new(&self.r_class_output).generate(&self.package, &table)?;
        BrClassGenerator::new(&self.r_class_output).generate(&self.package, &layout_bindings)?;

        info!("Writing binding stubs to {}", self.stubs_output.display());
        let binding_generator = BindingClassGenerator::new(&self.stubs_output);
        let stubs = binding_generator.calculate_bindings_to_generate(&layout_bindings)?.len();
        binding_generator.generate(&self.package, &layout_bindings)?;

        info!("Completed in {:.2}s", start_time.elapsed().as_secs_f64());

        Ok(RunSummary {
            symbols: table.len(),
            layouts: layout_bindings.len(),
            bindables: layout_bindings.iter().map(|data| data.bindables.len()).sum(),
            stubs,
        })
    }

    /// Non-blank lines of every dependency `R.txt`, in file order.
    fn read_r_txts(&self) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        for path in &self.r_txts {
            let contents = error::read_to_string(path)?;
            lines.extend(
                contents
                    .lines()
                    .filter(|line| !line.trim().is_empty())
                    .map(str::to_string),
            );
        }
        Ok(lines)
    }
}
