use crate::config::Config;
use crate::rclass::ResourceKind;
use ignore::WalkBuilder;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

const VALUES_DIR_PREFIX: &str = "values";

/// Type of resource file, derived from its directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceFileType {
    /// `values*/` files declaring typed values
    Values,
    /// `layout*/` files
    Layout,
    /// Any other resource-type directory (`drawable-hdpi`, `menu`, `raw`, ...)
    File(ResourceKind),
}

impl ResourceFileType {
    /// Determine resource type from the parent directory name
    pub fn from_path(path: &Path) -> Option<Self> {
        let dir_name = path.parent()?.file_name()?.to_str()?;
        if dir_name.starts_with(VALUES_DIR_PREFIX) {
            return Some(ResourceFileType::Values);
        }
        match ResourceKind::from_dir_name(dir_name).ok()? {
            ResourceKind::Layout => Some(ResourceFileType::Layout),
            kind => Some(ResourceFileType::File(kind)),
        }
    }
}

/// File finder for discovering resource files below `res/` directories
pub struct FileFinder<'a> {
    config: &'a Config,
}

impl<'a> FileFinder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Find all resource files in the given `res/` directories, sorted
    pub fn find_resources(&self, res_dirs: &[PathBuf]) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = res_dirs
            .par_iter()
            .flat_map(|dir| self.scan_directory(dir))
            .collect();
        files.sort();
        files.dedup();

        debug!("Found {} resource files", files.len());
        files
    }

    /// Scan a single directory for resource files
    fn scan_directory(&self, dir: &Path) -> Vec<PathBuf> {
        if !dir.exists() {
            trace!("Directory does not exist: {}", dir.display());
            return Vec::new();
        }

        let walker = WalkBuilder::new(dir)
            .hidden(true)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .ignore(true)
            .parents(true)
            .follow_links(false)
            .build();

        walker
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|entry| {
                let path = entry.path();

                if self.config.should_exclude(path) {
                    trace!("Excluding: {}", path.display());
                    return None;
                }

                let file_type = ResourceFileType::from_path(path)?;
                trace!("Found {:?}: {}", file_type, path.display());
                Some(path.to_path_buf())
            })
            .collect()
    }
}

/// Layout files among `files`: paths with a `/layout` directory segment.
pub fn partition_layouts(files: &[PathBuf]) -> Vec<PathBuf> {
    files
        .iter()
        .filter(|file| {
            let path_str = file.to_string_lossy();
            path_str.contains("/layout") || path_str.contains("\\layout")
        })
        .cloned()
        .collect()
}
