//! Unified error type.

use std::path::PathBuf;

/// Infrastructure failures: loading the dataset, binding the port, accepting
/// connections.
///
/// Request-level failures (missing college, unknown college) are not
/// `Error`s. They become HTTP responses through
/// [`LookupError`](crate::lookup::LookupError).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("dataset {}: {source}", path.display())]
    Dataset {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset {} contains no colleges", path.display())]
    EmptyDataset { path: PathBuf },
}
