use miette::{IntoDiagnostic, Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for an aapt-lite invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target package of the generated R, BR and binding classes
    pub package: Option<String>,

    /// Explicit resource files
    pub resource_files: Vec<PathBuf>,

    /// `res/` directories to scan for resource files
    pub resource_dirs: Vec<PathBuf>,

    /// Patterns to exclude from discovery
    pub exclude: Vec<String>,

    /// Data-binding class info JSON files published by dependencies
    pub class_infos: Vec<PathBuf>,

    /// Dependency `R.txt` symbol files
    pub r_txts: Vec<PathBuf>,

    /// Keep dependency symbols out of the generated R class
    pub non_transitive_r_class: bool,

    /// Output configuration
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving R.java and BR.java
    pub r_class: PathBuf,

    /// Directory receiving binding stubs
    pub stubs: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            package: None,
            resource_files: vec![],
            resource_dirs: vec![],
            exclude: vec![
                "**/build/**".to_string(),
                "**/.gradle/**".to_string(),
                "**/.idea/**".to_string(),
            ],
            class_infos: vec![],
            r_txts: vec![],
            non_transitive_r_class: false,
            output: OutputConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            r_class: PathBuf::from("r-classes"),
            stubs: PathBuf::from("binding-stubs"),
        }
    }
}

impl Config {
    /// Load configuration from a file (YAML or TOML)
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        match extension {
            "yml" | "yaml" => serde_yaml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse YAML config"),
            "toml" => toml::from_str(&contents)
                .into_diagnostic()
                .wrap_err("Failed to parse TOML config"),
            _ => {
                if let Ok(config) = serde_yaml::from_str(&contents) {
                    Ok(config)
                } else {
                    toml::from_str(&contents)
                        .into_diagnostic()
                        .wrap_err("Failed to parse config file")
                }
            }
        }
    }

    /// Try to load configuration from default locations
    pub fn from_default_locations(project_root: &Path) -> Result<Self> {
        let default_names = [".aapt-lite.yml", ".aapt-lite.yaml", ".aapt-lite.toml"];

        for name in &default_names {
            let path = project_root.join(name);
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Check if a discovered path matches an exclude pattern
    pub fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.exclude.iter().any(|pattern| glob_match(pattern, &path_str))
    }
}

/// Simple glob matching for patterns like "*.9.png" or "**/build/**"
fn glob_match(pattern: &str, text: &str) -> bool {
    // "*.orig" matches on the file name suffix
    if pattern.starts_with('*') && !pattern.contains('/') {
        let suffix = &pattern[1..];
        return text.ends_with(suffix);
    }

    if pattern.ends_with('*') && !pattern.contains('/') {
        let prefix = &pattern[..pattern.len() - 1];
        return text.starts_with(prefix);
    }

    if pattern.contains("**") {
        // "**/raw/**" matches a whole directory name anywhere in the path
        if pattern.starts_with("**/") && pattern.ends_with("/**") {
            let cleaned = pattern.replace("**/", "").replace("/**", "");
            let dir_pattern = format!("/{}/", cleaned.trim_matches('/'));
            return text.contains(&dir_pattern);
        }

        let parts: Vec<&str> = pattern.split("**").collect();
        if parts.len() == 2 {
            let prefix = parts[0].trim_end_matches('/');
            let suffix = parts[1].trim_start_matches('/');

            if prefix.is_empty() && suffix.is_empty() {
                return true; // bare "**"
            }

            if prefix.is_empty() {
                return text.ends_with(suffix) || text.contains(&format!("/{}", suffix));
            }

            if suffix.is_empty() {
                return text.starts_with(prefix) || text.contains(&format!("{}/", prefix));
            }

            return (text.starts_with(prefix) || text.contains(&format!("/{}/", prefix)))
                && (text.ends_with(suffix) || text.contains(&format!("/{}", suffix)));
        }
    }

    // No wildcard left
    text == pattern
}
