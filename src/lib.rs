// Fri Oct 16 2026 - Alex

pub mod config;
pub mod driver;
pub mod generator;
pub mod hierarchy;
pub mod model;
pub mod output;
pub mod tree;
pub mod ui;
pub mod visitor;

pub use config::Config;
pub use driver::{load_trees, Driver, RunSummary};
pub use generator::{GenerateContext, GenerateError, Generator, GeneratorRegistry};
pub use hierarchy::HierarchyClosure;
pub use model::Model;
pub use output::{OutputUnit, OutputWriter};
pub use tree::{TranslationUnit, TreeError};
pub use visitor::{translate, VisitStats, VisitorOptions};
