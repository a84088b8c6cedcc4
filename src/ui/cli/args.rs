// Sat Oct 17 2026 - Alex

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "smokegen")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Generates SMOKE binding tables from C++ declaration trees", long_about = None)]
pub struct Args {
    /// Declaration trees (JSON) produced by the front end
    #[arg(required = true)]
    pub trees: Vec<PathBuf>,

    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long)]
    pub generator: Option<String>,

    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Class to emit; repeat for more. Defaults to every defined class
    #[arg(long = "class")]
    pub classes: Vec<String>,

    #[arg(long)]
    pub parts: Option<usize>,

    #[arg(long)]
    pub module: Option<String>,

    /// Honour signal/slot/property annotations
    #[arg(long)]
    pub qt: bool,

    /// Flatten typedef uses into their targets (`-t false` keeps alias names)
    #[arg(short = 't', long, value_name = "BOOL")]
    pub resolve_typedefs: Option<bool>,

    /// Alias to keep by name even when resolving typedefs; repeat for more
    #[arg(long = "keep-typedef")]
    pub keep_typedefs: Vec<String>,

    #[arg(short, long, default_value = "info")]
    pub log_level: String,

    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(missing) = self.trees.iter().find(|tree| !tree.exists()) {
            return Err(format!("Declaration tree does not exist: {:?}", missing));
        }
        if let Some(config) = &self.config {
            if !config.exists() {
                return Err(format!("Config file does not exist: {:?}", config));
            }
        }
        if self.parts == Some(0) {
            return Err("--parts must be at least 1".to_string());
        }
        Ok(())
    }
}
