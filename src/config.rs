use std::path::PathBuf;

use clap::Parser;

use crate::dashboard::RenderOptions;
use crate::model::Category;


/// Build a bowl from the terminal.
#[derive(Debug, Clone, Parser)]
#[command(name = "bowl-builder", version, about)]
pub struct Config {
    /// File holding the saved order
    #[arg(long = "store", env = "BOWL_STORE", default_value = ".bowl/storage.json")]
    pub store_path: PathBuf,

    /// Keep the order in memory only
    #[arg(long)]
    pub ephemeral: bool,

    /// Categories that ask for a portion before adding (repeatable)
    #[arg(long = "portion-category", value_name = "CATEGORY", default_values = ["salsa"])]
    pub portion_categories: Vec<Category>,

    /// Start from a random bowl built from this seed, replacing any saved order
    #[arg(long, value_name = "SEED")]
    pub surprise: Option<u64>,

    /// Draw ingredients as plain text
    #[arg(long)]
    pub no_color: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// More logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions { color: !self.no_color }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(".bowl/storage.json"),
            ephemeral: false,
            portion_categories: vec![Category::Salsa],
            surprise: None,
            no_color: false,
            log_file: None,
            verbose: false,
        }
    }
}
