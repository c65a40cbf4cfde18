use thiserror::Error;

use crate::doc::DocumentId;

/// An error originating from the snippet highlighting engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
	/// The analyzer could not tokenize a field or the query
	#[error("Unable to tokenize the field `{field}` for the locale `{locale}`: {message}")]
	TokenizationFailure {
		field: String,
		locale: String,
		message: String,
	},

	/// There is no analyzer registered for the locale
	#[error("There is no analyzer available for the locale `{0}`")]
	UnsupportedLocale(String),

	/// The locale identifier could not be parsed
	#[error("Invalid locale `{0}`, expected a language code optionally followed by a country code, e.g. `ja_JP`")]
	InvalidLocale(String),

	/// A document declared the same field twice for one locale
	#[error("The field `{field}` is declared more than once for the locale `{locale}`")]
	DuplicateField {
		field: String,
		locale: String,
	},

	/// A field required by the caller is absent from the document
	#[error("The field `{field}` does not exist for the locale `{locale}`")]
	FieldNotFound {
		field: String,
		locale: String,
	},

	/// The document does not exist in the index
	#[error("The document `{0}` does not exist")]
	DocumentNotFound(DocumentId),

	/// The analyzer encountered an internal problem
	#[error("There was a problem with the analyzer: {0}")]
	AnalyzerError(String),
}
