// src/cli/mod.rs — CLI definition (clap derive)

pub mod batch;
pub mod chat;
pub mod progress;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::infra::config::Config;

#[derive(Parser)]
#[command(name = "sheetchat", about = "Chat with Gemini, or run it over a CSV", version)]
pub struct Cli {
    /// Model name (e.g. gemini-2.0-flash)
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Sampling temperature (0.0-2.0)
    #[arg(long, global = true)]
    pub temperature: Option<f32>,

    /// Nucleus sampling probability (0.0-1.0)
    #[arg(long, global = true)]
    pub top_p: Option<f32>,

    /// Read the system instruction from this file
    #[arg(long, global = true)]
    pub instruction_file: Option<String>,

    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Suppress status output (only emit results)
    #[arg(long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive chat session (default)
    Chat,
    /// Generate a reply for every row of a CSV file
    Batch {
        /// Input CSV; the second column holds the text
        input: PathBuf,
        /// Output CSV (defaults to <input>_result.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Decode the input with this encoding only
        #[arg(long)]
        encoding: Option<String>,
    },
}

impl Cli {
    /// Fold command-line overrides into a loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(ref model) = self.model {
            config.model.name = model.clone();
        }
        if let Some(t) = self.temperature {
            config.model.temperature = t;
        }
        if let Some(p) = self.top_p {
            config.model.top_p = p;
        }
        if let Some(ref path) = self.instruction_file {
            config.prompt.instruction_file = Some(path.clone());
        }
        if let Some(Commands::Batch {
            encoding: Some(ref enc),
            ..
        }) = self.command
        {
            config.sheet.encodings = vec![enc.clone()];
        }
    }
}
