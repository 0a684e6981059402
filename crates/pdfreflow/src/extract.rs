use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, clap::Args, Clone)]
pub struct Options {
    /// Path to the PDF file
    #[clap(env = "PDFREFLOW_PATH")]
    pub path: PathBuf,

    /// Print the assembled text without line normalization
    #[arg(long, env = "PDFREFLOW_RAW")]
    pub raw: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Write the text to this file instead of stdout
    #[arg(short, long, env = "PDFREFLOW_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Timeout in seconds (no limit when omitted)
    #[arg(short, long, env = "PDFREFLOW_TIMEOUT")]
    pub timeout: Option<u64>,
}

#[derive(Debug, serde::Serialize)]
pub struct ExtractOutput {
    pub path: String,
    pub page_count: usize,
    pub characters: usize,
    pub lines: usize,
    pub text: String,
}

pub async fn run(options: Options, _global: crate::Global) -> Result<()> {
    let bytes = read_input(&options.path)?;
    let extraction = extract_with_timeout(bytes, !options.raw, options.timeout).await?;

    let output = ExtractOutput {
        path: options.path.display().to_string(),
        page_count: extraction.page_count,
        characters: extraction.text.chars().count(),
        lines: extraction.text.lines().count(),
        text: extraction.text,
    };

    if output.text.trim().is_empty() {
        eprintln!(
            "{} no usable text found in {}",
            "warning:".yellow().bold(),
            output.path
        );
    }

    if options.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match &options.output {
        Some(out) => {
            std::fs::write(out, &output.text)
                .wrap_err_with(|| f!("Cannot write {}", out.display()))?;
            log::debug!("wrote {} characters to {}", output.characters, out.display());
        }
        None => output_formatted(&output),
    }

    Ok(())
}

/// Run the pipeline on a worker thread, giving up after `timeout` seconds.
pub async fn extract_with_timeout(
    bytes: Vec<u8>,
    normalize: bool,
    timeout: Option<u64>,
) -> Result<pdf::Extraction> {
    let (tx, rx) = tokio::sync::oneshot::channel();

    // A detached thread, so an abandoned extraction never blocks runtime shutdown.
    std::thread::spawn(move || {
        let _ = tx.send(pdf::extract_document(&bytes, normalize));
    });

    Ok(await_extraction(rx, timeout).await?)
}

/// Wait for the worker's result.
///
/// Every failure, an elapsed timeout or a worker that died without sending
/// included, surfaces as [`pdf::ExtractionFailed`].
async fn await_extraction(
    rx: tokio::sync::oneshot::Receiver<Result<pdf::Extraction, pdf::ExtractionFailed>>,
    timeout: Option<u64>,
) -> Result<pdf::Extraction, pdf::ExtractionFailed> {
    let received = match timeout {
        Some(secs) => match tokio::time::timeout(Duration::from_secs(secs), rx).await {
            Ok(received) => received,
            Err(_) => {
                log::debug!("{}", Error::Timeout(secs));
                return Err(pdf::ExtractionFailed);
            }
        },
        None => rx.await,
    };

    received.map_err(|_| {
        log::debug!("{}", Error::WorkerGone);
        pdf::ExtractionFailed
    })?
}

fn output_formatted(output: &ExtractOutput) {
    // Decorations go to stderr so piped stdout stays plain text.
    if std::io::stdout().is_terminal() {
        eprintln!("\n{}", "=".repeat(80).bright_cyan());
        eprintln!("{}", "PDF TEXT".bright_cyan().bold());
        eprintln!("{}", "=".repeat(80).bright_cyan());
        eprintln!("\n{}: {}", "File".green(), output.path.cyan().underline());
        eprintln!(
            "{}: {}",
            "Pages".green(),
            output.page_count.to_string().bright_yellow()
        );
        eprintln!(
            "{}: {}\n",
            "Characters".green(),
            output.characters.to_string().bright_yellow()
        );
    }

    println!("{}", output.text);
}
