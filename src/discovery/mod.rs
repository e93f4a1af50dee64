mod file_finder;

pub use file_finder::{partition_layouts, FileFinder, ResourceFileType};
