use clap::Parser;
use cli::{Args, Command};
use command::{annotate::annotate, run::run};
use shell::Shell;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod command;
mod shell;

pub fn run_cli() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut shell = Shell::new();

    match args.command {
        Command::Run(args) => run(&mut shell, args)?,
        Command::Annotate(args) => annotate(&mut shell, args)?,
    }

    Ok(())
}
