use crate::prelude::{println, *};
use std::path::PathBuf;

#[derive(Debug, clap::Args, Clone)]
pub struct Options {
    /// Path to the PDF file
    #[clap(env = "PDFREFLOW_PATH")]
    pub path: PathBuf,
}

pub async fn run(options: Options, _global: crate::Global) -> Result<()> {
    let bytes = read_input(&options.path)?;
    let pages = tokio::task::spawn_blocking(move || pdf::extract(&bytes))
        .await?
        .map_err(|e| eyre!(e))?;

    println!("{}", serde_json::to_string_pretty(&pages)?);
    Ok(())
}
