use thiserror::Error;

/// Failures while loading the catalog document.
#[derive(Debug, Error)]
pub enum DataError {
	/// The document is not valid catalog JSON.
	#[error("catalog parse error: {0}")]
	Parse(#[from] serde_json::Error),
}
