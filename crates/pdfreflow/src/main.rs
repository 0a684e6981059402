use crate::prelude::*;
use clap::Parser;

mod error;
mod extract;
mod info;
mod normalize;
mod prelude;
mod runs;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Extract readable, reflowed text from PDF documents"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "PDFREFLOW_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Extract normalized text from a PDF
    Extract(crate::extract::Options),

    /// Normalize already extracted text (file or stdin)
    Normalize(crate::normalize::Options),

    /// Dump the positioned text runs of every page as JSON
    Runs(crate::runs::Options),

    /// Print document metadata
    Info(crate::info::Options),
}

#[tokio::main]
async fn main() -> Result<()> {
    let app = App::parse();

    // RUST_LOG still wins over the verbosity flag.
    let level = if app.global.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
    color_eyre::install()?;

    match app.command {
        SubCommands::Extract(options) => crate::extract::run(options, app.global).await,
        SubCommands::Normalize(options) => crate::normalize::run(options, app.global).await,
        SubCommands::Runs(options) => crate::runs::run(options, app.global).await,
        SubCommands::Info(options) => crate::info::run(options, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
