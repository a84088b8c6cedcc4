// Sat Oct 17 2026 - Alex

pub mod writer;

pub use writer::OutputWriter;

use serde::{Deserialize, Serialize};

/// One generated file, named relative to the output directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputUnit {
    pub file_name: String,
    pub contents: String,
}

impl OutputUnit {
    pub fn new(file_name: &str, contents: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            contents: contents.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}
