use std::io::Read as _;

use morphotag::{AnnotationPipeline, Document, MemoryStore, segment::split_sentences};

use crate::{cli::AnnotateArgs, shell::Shell};

use super::load_config;

pub fn annotate(shell: &mut Shell, args: AnnotateArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;

    let text = match args.text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    if text.trim().is_empty() {
        shell.error("nothing to annotate")?;
        anyhow::bail!("empty input");
    }

    let pipeline = AnnotationPipeline::new(
        MemoryStore::default(),
        Box::new(config.primary_analyzer()),
        split_sentences,
        config.strategy(args.strategy)?,
    );

    let mut document = Document::new(0, text.as_str());
    document.set_sentences(pipeline.annotate_text(&text)?);
    print!("{}", document.to_conllu(args.features));

    Ok(())
}
