// Sat Oct 17 2026 - Alex

use super::{GenerateContext, GenerateError, Generator};
use crate::model::Model;
use crate::output::OutputUnit;
use serde_json::{json, Value};

pub const MODEL_FILE: &str = "model.json";

/// Dumps the whole model, with type spellings resolved, for inspection
#[derive(Debug, Clone)]
pub struct JsonGenerator {
    pretty_print: bool,
}

impl JsonGenerator {
    pub fn new() -> Self {
        Self { pretty_print: true }
    }

    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    fn build_value(&self, model: &Model, context: &GenerateContext) -> Result<Value, GenerateError> {
        let spellings: Vec<String> = model
            .types
            .iter()
            .map(|(id, _)| model.types.spelling(id))
            .collect();

        Ok(json!({
            "module": context.module,
            "stats": model.stats(),
            "spellings": spellings,
            "model": serde_json::to_value(model)?,
        }))
    }
}

impl Default for JsonGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for JsonGenerator {
    fn name(&self) -> &str {
        "json"
    }

    fn generate(&self, model: &Model, context: &GenerateContext) -> Result<Vec<OutputUnit>, GenerateError> {
        let value = self.build_value(model, context)?;
        let contents = if self.pretty_print {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        Ok(vec![OutputUnit {
            file_name: MODEL_FILE.to_string(),
            contents,
        }])
    }
}
