use morphotag::{AnnotationPipeline, DocumentStore, FsCorpus, segment::split_sentences};
use termcolor::Color;

use crate::{cli::RunArgs, shell::Shell};

use super::load_config;

pub fn run(shell: &mut Shell, args: RunArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(assets) = args.assets {
        config.assets_path = assets;
    }
    if !args.strategies.is_empty() {
        config.strategies = args.strategies;
    }

    let mut corpus = FsCorpus::open(&config.assets_path)?;
    shell.status(
        "Corpus",
        format!("{} ({} documents)", corpus.path().display(), corpus.ids().len()),
    )?;

    let mut failures = Vec::new();
    for kind in &config.strategies {
        let strategy = config.strategy(*kind)?;
        let analyzer = Box::new(config.primary_analyzer());
        let mut pipeline = AnnotationPipeline::new(&mut corpus, analyzer, split_sentences, strategy);

        shell.status("Running", format!("{kind} strategy"))?;
        let report = pipeline.run()?;
        shell.status(
            "Finished",
            format!(
                "{kind}: {} annotated, {} failed",
                report.processed.len(),
                report.failed.len()
            ),
        )?;

        for (id, error) in report.failed {
            failures.push(format!("{kind}: document {id}: {error}"));
        }
    }

    if failures.is_empty() {
        return Ok(());
    }

    for failure in &failures {
        shell.status_with_color("Failed", failure, Color::Red)?;
    }
    anyhow::bail!("{} document runs failed", failures.len())
}
