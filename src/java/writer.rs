use crate::error::{AaptError, Result};
use std::fs;
use std::path::{Path, PathBuf};

const INDENT: &str = "  ";

/// Incrementally constructs Java source code with indentation handling.
#[derive(Debug, Default, Clone)]
pub struct JavaSourceBuilder {
    content: String,
    indent_level: usize,
}

impl JavaSourceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_line(&mut self, line: &str) {
        if !line.is_empty() {
            for _ in 0..self.indent_level {
                self.content.push_str(INDENT);
            }
            self.content.push_str(line);
        }
        self.content.push('\n');
    }

    pub fn blank_line(&mut self) {
        self.content.push('\n');
    }

    /// Push `header {` and indent.
    pub fn open_block(&mut self, header: &str) {
        self.push_line(&format!("{} {{", header));
        self.indent();
    }

    pub fn close_block(&mut self) {
        self.dedent();
        self.push_line("}");
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    pub fn build(self) -> String {
        self.content
    }
}

/// One top-level Java type ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JavaFile {
    pub package: String,
    pub type_name: String,
    /// Type declaration, without the package statement.
    pub body: String,
}

impl JavaFile {
    pub fn new(package: impl Into<String>, type_name: impl Into<String>, body: String) -> Self {
        Self {
            package: package.into(),
            type_name: type_name.into(),
            body,
        }
    }

    pub fn to_source(&self) -> String {
        if self.package.is_empty() {
            return self.body.clone();
        }
        format!("package {};\n\n{}", self.package, self.body)
    }

    /// `com/example/Foo.java` for `com.example.Foo`.
    pub fn relative_path(&self) -> PathBuf {
        let mut path = PathBuf::new();
        for segment in self.package.split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(format!("{}.java", self.type_name));
        path
    }

    /// Write below `dir`, creating package directories. Returns the written file.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(self.relative_path());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| AaptError::io(parent, e))?;
        }
        fs::write(&path, self.to_source()).map_err(|e| AaptError::io(&path, e))?;
        Ok(path)
    }
}

/// Replace characters that are legal in resource names but not in Java identifiers.
pub fn java_identifier(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '.' | '-' | ':' => '_',
            other => other,
        })
        .collect()
}

/// Upper-case the first character.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
