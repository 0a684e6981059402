use crate::prelude::{println, *};
use std::io::Read;
use std::path::PathBuf;

#[derive(Debug, clap::Args, Clone)]
pub struct Options {
    /// Text file to normalize (reads stdin when omitted)
    pub path: Option<PathBuf>,
}

pub async fn run(options: Options, _global: crate::Global) -> Result<()> {
    let raw = match &options.path {
        Some(path) => {
            let bytes = read_input(path)?;
            String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8(path.display().to_string()))?
        }
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .wrap_err("Cannot read stdin")?;
            buf
        }
    };

    let text = pdfreflow_core::normalize::normalize_text(&raw);
    log::debug!(
        "normalized {} lines into {} lines",
        raw.lines().count(),
        text.lines().count()
    );

    println!("{}", text);
    Ok(())
}
