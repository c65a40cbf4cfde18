use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Problems with the input given to the command-line interface.
#[derive(Error, Debug)]
pub enum Error {
	#[error("Unable to read the document file `{}`: {source}", path.display())]
	Io {
		path: PathBuf,
		source: io::Error,
	},

	#[error("The file `{}` does not hold a valid document: {source}", path.display())]
	InvalidDocument {
		path: PathBuf,
		source: serde_json::Error,
	},

	#[error("The document does not define any field for the locale `{0}`")]
	NoFields(String),

	#[error("Invalid log filter `{filter}`: {message}")]
	InvalidLogFilter {
		filter: String,
		message: String,
	},

	#[error("Unable to initialise logging: {0}")]
	Logging(String),
}
