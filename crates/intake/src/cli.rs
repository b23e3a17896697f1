// src/cli.rs
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "intake", version, about = "Patient enrollment form")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Args, Debug, Default, Clone)]
pub struct GlobalOpts {
    /// Key/value store file (overrides `store_file`)
    #[arg(long, global = true, value_name = "FILE")]
    pub store: Option<PathBuf>,

    /// URL of the region option list (overrides `options_url`)
    #[arg(long, global = true, value_name = "URL", conflicts_with = "options_file")]
    pub options_url: Option<String>,

    /// Local option list file (overrides `options_file`)
    #[arg(long, global = true, value_name = "FILE")]
    pub options_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Type a value into one control (tracked fields are remembered)
    Set { control: String, value: String },
    /// Fill the form from a JSON object and run every validator
    Check {
        /// JSON object of control id -> string (text) or bool (checked)
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fill the form from a JSON object and print the summary table
    Review {
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Show the returning-user greeting, if any
    Greet,
    /// Forget every remembered field ("Not <name>?")
    Forget,
    /// Load and print the region options
    Options,
}
