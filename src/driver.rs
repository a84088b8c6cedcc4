// Sat Oct 17 2026 - Alex

use crate::config::Config;
use crate::generator::{GenerateContext, GenerateError, GeneratorRegistry};
use crate::model::{Model, ModelStats};
use crate::output::{OutputUnit, OutputWriter};
use crate::tree::{TranslationUnit, TreeError};
use crate::visitor::{self, VisitStats, VisitorOptions};
use std::path::PathBuf;

/// What one end-to-end run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub visit: VisitStats,
    pub model: ModelStats,
    pub written: Vec<PathBuf>,
}

/// Runs translation, generation and output for one configuration
pub struct Driver {
    config: Config,
    registry: GeneratorRegistry,
}

impl Driver {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            registry: GeneratorRegistry::builtin(),
        }
    }

    pub fn with_registry(mut self, registry: GeneratorRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Builds the model from every unit, in order
    pub fn translate(&self, units: &[TranslationUnit]) -> (Model, VisitStats) {
        let options = VisitorOptions::default()
            .with_qt_mode(self.config.qt_mode)
            .with_resolve_typedefs(self.config.resolve_typedefs)
            .with_not_to_be_resolved(self.config.not_to_be_resolved.clone());
        let mut model = Model::new();
        let stats = visitor::translate(units, &mut model, options);
        log::info!(
            "translated {} units: {} classes, {} types",
            units.len(),
            model.class_count(),
            model.types.len()
        );
        if stats.skipped_methods + stats.skipped_fields + stats.skipped_functions > 0 {
            log::info!(
                "skipped {} methods, {} fields, {} functions",
                stats.skipped_methods,
                stats.skipped_fields,
                stats.skipped_functions
            );
        }
        (model, stats)
    }

    pub fn context(&self, units: &[TranslationUnit]) -> GenerateContext {
        let headers = if self.config.headers.is_empty() {
            let mut headers: Vec<PathBuf> = Vec::new();
            for unit in units {
                let header = PathBuf::from(&unit.file);
                if !unit.file.is_empty() && !headers.contains(&header) {
                    headers.push(header);
                }
            }
            headers
        } else {
            self.config.headers.clone()
        };

        GenerateContext::new(&self.config.output_dir)
            .with_headers(headers)
            .with_classes(self.config.classes.clone())
            .with_module(&self.config.module)
            .with_parts(self.config.parts)
    }

    pub fn generate(&self, model: &Model, context: &GenerateContext) -> Result<Vec<OutputUnit>, GenerateError> {
        let generator = self.registry.create(&self.config.generator)?;
        log::info!("running {} generator", generator.name());
        generator.generate(model, context)
    }

    pub fn run(&self, units: &[TranslationUnit]) -> Result<RunSummary, GenerateError> {
        let (model, visit) = self.translate(units);
        let context = self.context(units);
        let output = self.generate(&model, &context)?;
        let written = OutputWriter::new(&context.output_dir).write_all(&output)?;
        Ok(RunSummary {
            visit,
            model: model.stats(),
            written,
        })
    }
}

/// Loads every declaration tree; the first failure aborts
pub fn load_trees(paths: &[PathBuf]) -> Result<Vec<TranslationUnit>, TreeError> {
    paths
        .iter()
        .map(|path| {
            log::debug!("loading {}", path.display());
            TranslationUnit::load(path)
        })
        .collect()
}
