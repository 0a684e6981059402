#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
pub enum Error {
    #[error("Extraction timed out after {0}s")]
    Timeout(u64),

    #[error("{0} is not valid UTF-8 text")]
    InvalidUtf8(String),

    #[error("Extraction worker exited before producing a result")]
    WorkerGone,
}
