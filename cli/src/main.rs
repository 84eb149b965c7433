fn main() -> anyhow::Result<()> {
    morphotag_cli::run_cli()
}
