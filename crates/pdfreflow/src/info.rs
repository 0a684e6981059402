use crate::prelude::{println, *};
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Debug, clap::Args, Clone)]
pub struct Options {
    /// Path to the PDF file
    #[clap(env = "PDFREFLOW_PATH")]
    pub path: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: Options, _global: crate::Global) -> Result<()> {
    let bytes = read_input(&options.path)?;
    let info = pdf::info(&bytes).map_err(|e| eyre!(e))?;

    if options.json || !std::io::stdout().is_terminal() {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    let mut table = new_table();
    table.add_row(prettytable::row!["File", options.path.display()]);
    table.add_row(prettytable::row!["Pages", info.page_count]);
    let fields = [
        ("Title", &info.title),
        ("Author", &info.author),
        ("Creator", &info.creator),
        ("Producer", &info.producer),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            table.add_row(prettytable::row![label, value]);
        }
    }
    table.printstd();

    Ok(())
}
