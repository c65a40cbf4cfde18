use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use glint_core::doc::{Document, Locale};
use glint_core::idx::ft::analyzer::Analyzers;
use glint_core::idx::ft::assembler::Assembler;

use super::snippet::SnippetArguments;
use crate::err::Error;

#[derive(Args, Debug)]
pub struct HighlightCommandArguments {
	#[arg(help = "Path to a JSON document with an `id` and a list of `fields`")]
	#[arg(short = 'f', long = "file")]
	#[arg(value_parser = super::validator::file_exists)]
	file: PathBuf,
	#[arg(help = "The search query to highlight")]
	#[arg(short = 'q', long = "query")]
	query: String,
	#[arg(help = "The locale of the fields to highlight, e.g. ja_JP")]
	#[arg(env = "GLINT_LOCALE", short = 'l', long = "locale")]
	locale: Locale,
	#[arg(help = "The fields to highlight, every field of the locale when omitted")]
	#[arg(long = "field")]
	fields: Vec<String>,
	#[arg(help = "Fail when a requested field is not defined for the locale")]
	#[arg(long = "require-fields")]
	#[arg(default_value_t = false)]
	require_fields: bool,
	#[command(flatten)]
	#[command(next_help_heading = "Snippets")]
	snippet: SnippetArguments,
}

pub async fn init(
	HighlightCommandArguments {
		file,
		query,
		locale,
		fields,
		require_fields,
		snippet,
	}: HighlightCommandArguments,
) -> Result<()> {
	let doc = read(file).await?;
	let fields: Vec<&str> = if fields.is_empty() {
		doc.field_names(&locale).collect()
	} else {
		fields.iter().map(String::as_str).collect()
	};
	if fields.is_empty() {
		return Err(Error::NoFields(locale.to_string()).into());
	}
	let analyzers = Analyzers::default();
	let params = snippet.params().with_require_fields(require_fields);
	let res = Assembler::new(&analyzers, params).assemble(&doc, &query, &locale, &fields)?;
	info!(
		document = %doc.id(),
		fields = res.len(),
		failures = res.failures().len(),
		"Highlighted document"
	);
	println!("{}", serde_json::to_string_pretty(&res)?);
	Ok(())
}

/// Loads a document from a JSON file
async fn read(path: PathBuf) -> Result<Document, Error> {
	let text = match tokio::fs::read_to_string(&path).await {
		Ok(text) => text,
		Err(source) => {
			return Err(Error::Io {
				path,
				source,
			});
		}
	};
	serde_json::from_str(&text).map_err(|source| Error::InvalidDocument {
		path,
		source,
	})
}

#[cfg(test)]
mod tests {
	use std::path::PathBuf;

	use super::read;
	use crate::err::Error;

	fn write(name: &str, contents: &str) -> PathBuf {
		let path = std::env::temp_dir().join(format!("glint-{}-{name}", std::process::id()));
		std::fs::write(&path, contents).unwrap();
		path
	}

	#[tokio::test]
	async fn read_document() {
		let path = write(
			"doc.json",
			r#"{"id":"1","fields":[{"name":"title","locale":"ja_JP","text":"新規作成"}]}"#,
		);
		let doc = read(path.clone()).await.unwrap();
		assert_eq!(doc.id().as_str(), "1");
		std::fs::remove_file(path).unwrap();
	}

	#[tokio::test]
	async fn read_invalid_document() {
		let path = write("invalid.json", r#"{"fields":[]}"#);
		assert!(matches!(read(path.clone()).await, Err(Error::InvalidDocument { .. })));
		std::fs::remove_file(path).unwrap();
	}

	#[tokio::test]
	async fn read_missing_document() {
		let path = std::env::temp_dir().join("glint-missing-document.json");
		assert!(matches!(read(path).await, Err(Error::Io { .. })));
	}
}
