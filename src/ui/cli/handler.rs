// Sat Oct 17 2026 - Alex

use super::args::Args;
use crate::config::Config;
use crate::driver::{load_trees, Driver, RunSummary};
use crate::ui::{print_info, print_success, print_warning};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Instant;

pub struct CommandHandler;

impl CommandHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, args: Args) -> anyhow::Result<()> {
        self.setup_logging(&args)?;
        args.validate().map_err(|e| anyhow::anyhow!(e))?;

        let config = self.resolve_config(&args)?;
        config.validate().map_err(|e| anyhow::anyhow!(e))?;

        let start = Instant::now();
        let progress = self.create_progress(args.quiet);

        progress.set_position(10);
        progress.set_message("Loading declaration trees...");
        let units = load_trees(&args.trees)?;
        if !args.quiet {
            print_info(&format!("Loaded {} declaration trees", units.len()));
        }

        progress.set_position(40);
        progress.set_message(format!("Running {} generator...", config.generator));
        let summary = Driver::new(config).run(&units)?;

        progress.set_position(100);
        progress.finish_with_message("Complete!");

        if !args.quiet {
            self.print_summary(&summary, start);
        }
        Ok(())
    }

    fn setup_logging(&self, args: &Args) -> anyhow::Result<()> {
        let level = if args.quiet {
            log::LevelFilter::Error
        } else {
            match args.log_level.to_lowercase().as_str() {
                "trace" => log::LevelFilter::Trace,
                "debug" => log::LevelFilter::Debug,
                "info" => log::LevelFilter::Info,
                "warn" => log::LevelFilter::Warn,
                "error" => log::LevelFilter::Error,
                _ => log::LevelFilter::Info,
            }
        };

        env_logger::Builder::new()
            .filter_level(level)
            .format_timestamp(None)
            .try_init()?;

        Ok(())
    }

    /// File config first, then command-line overrides on top
    fn resolve_config(&self, args: &Args) -> anyhow::Result<Config> {
        let mut config = match &args.config {
            Some(path) => Config::load(path)?,
            None => {
                let default_path = PathBuf::from("smokegen.json");
                if default_path.exists() {
                    Config::load(&default_path)?
                } else {
                    log::debug!("no config file, using defaults");
                    Config::default()
                }
            }
        };

        if let Some(generator) = &args.generator {
            config = config.with_generator(generator);
        }
        if let Some(module) = &args.module {
            config = config.with_module(module);
        }
        if let Some(parts) = args.parts {
            config = config.with_parts(parts);
        }
        if let Some(output) = &args.output {
            config = config.with_output_dir(output.clone());
        }
        if args.qt {
            config = config.with_qt_mode(true);
        }
        if let Some(resolve) = args.resolve_typedefs {
            config = config.with_resolve_typedefs(resolve);
        }
        for name in &args.keep_typedefs {
            config = config.with_unresolved_typedef(name);
        }
        if !args.classes.is_empty() {
            config.classes = args.classes.clone();
        }
        if config.classes.is_empty() && !args.quiet {
            print_warning("No class list given, emitting every defined class");
        }
        Ok(config)
    }

    fn create_progress(&self, quiet: bool) -> ProgressBar {
        if quiet {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(100);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}% {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb.set_message("Initializing...");
        pb
    }

    fn print_summary(&self, summary: &RunSummary, start: Instant) {
        println!();
        println!("{}", "Results Summary".cyan().bold());
        println!("{}", "-".repeat(40).cyan());
        println!("  Classes: {}", summary.model.classes.to_string().green());
        println!("  Enums: {}", summary.model.enums.to_string().green());
        println!("  Functions: {}", summary.model.functions.to_string().green());
        println!("  Typedefs: {}", summary.model.typedefs.to_string().green());
        println!("  Types: {}", summary.model.types.to_string().green());

        let skipped = summary.visit.skipped_methods + summary.visit.skipped_fields + summary.visit.skipped_functions;
        if skipped > 0 {
            println!("  Skipped declarations: {}", skipped.to_string().yellow());
        }
        println!();

        for path in &summary.written {
            print_success(&format!("Wrote {}", path.display()));
        }
        print_success(&format!(
            "Generation complete in {:.2}s",
            start.elapsed().as_secs_f64()
        ));
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}
