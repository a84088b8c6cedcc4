// Sat Oct 17 2026 - Alex

use super::OutputUnit;
use crate::generator::GenerateError;
use std::fs;
use std::path::{Path, PathBuf};

/// Persists generated units below one directory
pub struct OutputWriter {
    output_dir: PathBuf,
    dry_run: bool,
}

impl OutputWriter {
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            dry_run: false,
        }
    }

    /// Resolve paths and log them without touching the disk
    pub fn with_dry_run(mut self, enabled: bool) -> Self {
        self.dry_run = enabled;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes every unit, creating the directory first; returns the written paths
    pub fn write_all(&self, units: &[OutputUnit]) -> Result<Vec<PathBuf>, GenerateError> {
        if !self.dry_run {
            fs::create_dir_all(&self.output_dir).map_err(|source| GenerateError::Io {
                path: self.output_dir.clone(),
                source,
            })?;
        }

        let mut written = Vec::with_capacity(units.len());
        for unit in units {
            let path = self.output_dir.join(&unit.file_name);
            if self.dry_run {
                log::info!("would write {} ({} bytes)", path.display(), unit.contents.len());
            } else {
                fs::write(&path, &unit.contents).map_err(|source| GenerateError::Io {
                    path: path.clone(),
                    source,
                })?;
                log::info!("wrote {}", path.display());
            }
            written.push(path);
        }
        Ok(written)
    }
}
