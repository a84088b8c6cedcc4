// Sat Oct 17 2026 - Alex

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend name, looked up in the generator registry
    pub generator: String,
    /// Prefix of the generated tables (`<module>_cast`, `<module>_smoke.h`)
    pub module: String,
    /// Number of `x_N.cpp` shards
    pub parts: usize,
    /// Honour signal/slot/property annotations
    pub qt_mode: bool,
    /// Flatten alias uses into their targets
    pub resolve_typedefs: bool,
    /// Aliases kept by name even when `resolve_typedefs` is on
    pub not_to_be_resolved: Vec<String>,
    pub output_dir: PathBuf,
    /// Classes to emit; empty selects every defined class
    pub classes: Vec<String>,
    /// Headers for the `#include` block of the data file
    pub headers: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            generator: "smoke".to_string(),
            module: "qt".to_string(),
            parts: 20,
            qt_mode: false,
            resolve_typedefs: true,
            not_to_be_resolved: vec!["FILE".to_string()],
            output_dir: PathBuf::from("."),
            classes: Vec::new(),
            headers: Vec::new(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn with_generator(mut self, generator: &str) -> Self {
        self.generator = generator.to_string();
        self
    }

    pub fn with_module(mut self, module: &str) -> Self {
        self.module = module.to_string();
        self
    }

    pub fn with_parts(mut self, parts: usize) -> Self {
        self.parts = parts;
        self
    }

    pub fn with_qt_mode(mut self, enabled: bool) -> Self {
        self.qt_mode = enabled;
        self
    }

    pub fn with_resolve_typedefs(mut self, enabled: bool) -> Self {
        self.resolve_typedefs = enabled;
        self
    }

    pub fn with_unresolved_typedef(mut self, name: &str) -> Self {
        self.not_to_be_resolved.push(name.to_string());
        self
    }

    pub fn with_output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = output_dir;
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    pub fn with_header(mut self, header: PathBuf) -> Self {
        self.headers.push(header);
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.generator.trim().is_empty() {
            return Err("generator must not be empty".to_string());
        }
        if self.parts == 0 {
            return Err("parts must be greater than 0".to_string());
        }
        if self.module.trim().is_empty() {
            return Err("module must not be empty".to_string());
        }
        Ok(())
    }
}
