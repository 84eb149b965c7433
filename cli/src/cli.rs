use std::path::PathBuf;

use clap::{Parser, Subcommand};
use morphotag::StrategyKind;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
    /// Log debug output. `RUST_LOG` takes precedence.
    #[clap(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a corpus directory and write annotated projections for every document
    Run(RunArgs),
    /// Annotate a single text and print CONLL-U to stdout
    Annotate(AnnotateArgs),
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    #[clap(short, long, env = "MORPHOTAG_CONFIG")]
    /// Path to a JSON configuration file. Defaults to ./morphotag.json if present.
    pub config: Option<PathBuf>,

    #[clap(short, long)]
    /// Corpus directory, overriding the configured one.
    pub assets: Option<PathBuf>,

    #[clap(short, long = "strategy")]
    /// Strategies to run (`primary`, `escalating`). May be repeated.
    pub strategies: Vec<StrategyKind>,
}

#[derive(Parser, Debug)]
pub struct AnnotateArgs {
    #[clap(short, long, env = "MORPHOTAG_CONFIG")]
    /// Path to a JSON configuration file. Defaults to ./morphotag.json if present.
    pub config: Option<PathBuf>,

    #[clap(short, long, default_value = "primary")]
    pub strategy: StrategyKind,

    #[clap(short, long)]
    /// Include morphological features in the output.
    pub features: bool,

    /// Text to annotate. Read from stdin when omitted.
    pub text: Option<String>,
}
