// Sat Oct 17 2026 - Alex

pub mod dispatch;
pub mod error;
pub mod json;
pub mod smoke;

pub use dispatch::{ClassIndex, DispatchTable, InheritanceList};
pub use error::GenerateError;
pub use json::JsonGenerator;
pub use smoke::SmokeGenerator;

use crate::model::Model;
use crate::output::OutputUnit;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};

/// Backend turning a frozen model into output units
pub trait Generator: Send + Sync {
    fn name(&self) -> &str;
    fn generate(&self, model: &Model, context: &GenerateContext) -> Result<Vec<OutputUnit>, GenerateError>;
}

/// Settings shared by every backend
#[derive(Debug, Clone)]
pub struct GenerateContext {
    pub output_dir: PathBuf,
    /// Headers the trees were produced from, in command-line order
    pub headers: Vec<PathBuf>,
    /// Qualified names of the classes to emit; empty means all
    pub classes: Vec<String>,
    pub module: String,
    pub parts: usize,
}

impl GenerateContext {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            headers: Vec::new(),
            classes: Vec::new(),
            module: "qt".to_string(),
            parts: 20,
        }
    }

    pub fn with_headers(mut self, headers: Vec<PathBuf>) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_classes(mut self, classes: Vec<String>) -> Self {
        self.classes = classes;
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

    /// File names of the headers, as used in `#include` lines
    pub fn header_names(&self) -> Vec<String> {
        self.headers
            .iter()
            .map(|header| {
                header
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| header.display().to_string())
            })
            .collect()
    }
}

type GeneratorFactory = fn() -> Box<dyn Generator>;

/// Backends linked into the binary, keyed by name
pub struct GeneratorRegistry {
    factories: IndexMap<&'static str, GeneratorFactory>,
}

impl GeneratorRegistry {
    pub fn new() -> Self {
        Self {
            factories: IndexMap::new(),
        }
    }

    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("smoke", smoke_generator);
        registry.register("json", json_generator);
        registry
    }

    pub fn register(&mut self, name: &'static str, factory: GeneratorFactory) {
        self.factories.insert(name, factory);
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn Generator>, GenerateError> {
        match self.factories.get(name) {
            Some(factory) => Ok(factory()),
            None => Err(GenerateError::UnknownGenerator(
                name.to_string(),
                self.names().join(", "),
            )),
        }
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }
}

fn smoke_generator() -> Box<dyn Generator> {
    Box::new(SmokeGenerator::new())
}

fn json_generator() -> Box<dyn Generator> {
    Box::new(JsonGenerator::new())
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
