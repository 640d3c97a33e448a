//! vetsearch - search veterinary appointment exports from the command line

use anyhow::Result;
use clap::Parser;
use tracing::debug;
use vetsearch::SearchConfig;

mod args;
mod output;
mod search;

use args::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let config = match &cli.config {
        Some(path) => SearchConfig::load(path)?,
        None => SearchConfig::default(),
    };

    let spec = search::build_spec(&cli.filters);
    let spec = match search::requested_window(&cli.window, &config) {
        Some(window) => spec.with_pagination(window),
        None => spec,
    };
    debug!(%spec, leaves = spec.leaf_count(), "Search built");

    if cli.explain {
        let window = config.resolve(spec.pagination())?;
        print!("{}", output::explain(&spec, window, cli.output)?);
        if cli.output.is_structured() {
            return Ok(());
        }
    }

    let appointments = search::load_appointments(&cli.data)?;
    let page = search::run(&spec, appointments, config)?;
    print!("{}", output::render(&page, cli.output)?);

    Ok(())
}

/// Logs go to stderr so structured output on stdout stays parseable.
fn init_tracing(verbose: u8) -> Result<()> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(format!("vetsearch={level}").parse()?),
        )
        .init();
    Ok(())
}
