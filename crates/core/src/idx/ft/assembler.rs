use std::collections::BTreeMap;

use anyhow::{Result, bail};
use serde::{Serialize, Serializer};

use crate::cnf::{
	HIGHLIGHT_TAG_CLOSE, HIGHLIGHT_TAG_OPEN, SNIPPET_MAX_LENGTH, SNIPPET_MERGE_GAP, SNIPPET_SEPARATOR,
};
use crate::doc::{Document, DocumentId, FieldKey, Locale};
use crate::err::Error;
use crate::idx::ft::analyzer::{AnalyzedTerm, Analyzer};
use crate::idx::ft::highlighter::Highlighter;
use crate::idx::ft::locator::{Locator, MatchMode, QueryMode};
use crate::idx::ft::snippet::Extractor;

/// The parameters driving snippet assembly. The defaults come from the
/// process configuration, see [`crate::cnf`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SnippetParams {
	pub max_length: usize,
	pub merge_gap: usize,
	pub open_tag: String,
	pub close_tag: String,
	pub separator: String,
	pub match_mode: MatchMode,
	pub query_mode: QueryMode,
	/// Fail when a requested field is absent instead of omitting it
	pub require_fields: bool,
}

impl Default for SnippetParams {
	fn default() -> Self {
		Self {
			max_length: *SNIPPET_MAX_LENGTH,
			merge_gap: *SNIPPET_MERGE_GAP,
			open_tag: HIGHLIGHT_TAG_OPEN.clone(),
			close_tag: HIGHLIGHT_TAG_CLOSE.clone(),
			separator: SNIPPET_SEPARATOR.clone(),
			match_mode: MatchMode::default(),
			query_mode: QueryMode::default(),
			require_fields: false,
		}
	}
}

impl SnippetParams {
	pub fn with_max_length(mut self, max_length: usize) -> Self {
		self.max_length = max_length;
		self
	}

	pub fn with_merge_gap(mut self, merge_gap: usize) -> Self {
		self.merge_gap = merge_gap;
		self
	}

	pub fn with_tags(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
		self.open_tag = open.into();
		self.close_tag = close.into();
		self
	}

	pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
		self.separator = separator.into();
		self
	}

	pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
		self.match_mode = mode;
		self
	}

	pub fn with_query_mode(mut self, mode: QueryMode) -> Self {
		self.query_mode = mode;
		self
	}

	pub fn with_require_fields(mut self, require: bool) -> Self {
		self.require_fields = require;
		self
	}
}

/// A field rendered with its highlights.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct HighlightedField {
	pub field: String,
	pub locale: Locale,
	pub text: String,
}

/// The highlighted fields of one document, keyed by `field:locale`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct SnippetResult {
	document: DocumentId,
	fields: BTreeMap<String, HighlightedField>,
	#[serde(serialize_with = "serialize_failures", skip_serializing_if = "Vec::is_empty")]
	failures: Vec<Error>,
}

impl SnippetResult {
	fn new(document: DocumentId) -> Self {
		Self {
			document,
			fields: BTreeMap::new(),
			failures: Vec::new(),
		}
	}

	pub fn document(&self) -> &DocumentId {
		&self.document
	}

	/// Returns the rendered text of a field, if it was highlighted.
	pub fn get(&self, field: &str, locale: &Locale) -> Option<&str> {
		self.fields.get(&format!("{field}:{locale}")).map(|f| f.text.as_str())
	}

	pub fn fields(&self) -> impl Iterator<Item = (&str, &HighlightedField)> {
		self.fields.iter().map(|(k, v)| (k.as_str(), v))
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// The fields skipped because they could not be tokenized
	pub fn failures(&self) -> &[Error] {
		&self.failures
	}
}

fn serialize_failures<S: Serializer>(failures: &[Error], s: S) -> Result<S::Ok, S::Error> {
	s.collect_seq(failures.iter().map(ToString::to_string))
}

/// Builds highlighted snippets for the fields of a document.
///
/// Assembly is a pure function of the document, the query, the locale and
/// the parameters. An assembler holds no mutable state and can be shared
/// between threads.
pub struct Assembler<'a> {
	analyzer: &'a dyn Analyzer,
	params: SnippetParams,
}

impl<'a> Assembler<'a> {
	pub fn new(analyzer: &'a dyn Analyzer, params: SnippetParams) -> Self {
		Self {
			analyzer,
			params,
		}
	}

	pub fn params(&self) -> &SnippetParams {
		&self.params
	}

	/// Highlights the requested fields of a document for one locale.
	///
	/// Fields absent for the locale are omitted, unless `require_fields` is
	/// set, in which case the call fails with [`Error::FieldNotFound`]. A field
	/// which cannot be tokenized is skipped and reported in
	/// [`SnippetResult::failures`], the other fields are still rendered.
	pub fn assemble(
		&self,
		doc: &Document,
		query: &str,
		locale: &Locale,
		fields: &[&str],
	) -> Result<SnippetResult> {
		let mut res = SnippetResult::new(doc.id().clone());
		let mut present: Vec<(&str, &str)> = Vec::with_capacity(fields.len());
		for &f in fields {
			if present.iter().any(|(n, _)| *n == f) {
				continue;
			}
			match doc.field(f, locale) {
				Some(text) => present.push((f, text)),
				None if self.params.require_fields => bail!(Error::FieldNotFound {
					field: f.to_string(),
					locale: locale.to_string(),
				}),
				None => trace!(doc = %doc.id(), field = f, %locale, "field not defined"),
			}
		}
		let query = match self.analyzer.analyze(query, locale) {
			Ok(terms) => terms,
			Err(e) => {
				for (f, _) in present {
					res.failures.push(self.failure(f, locale, &e));
				}
				return Ok(res);
			}
		};
		for (f, text) in present {
			match self.field(f, text, &query, locale) {
				Ok(text) => {
					let key = FieldKey::new(f, locale.clone());
					res.fields.insert(key.to_string(), HighlightedField {
						field: key.field,
						locale: key.locale,
						text,
					});
				}
				Err(e) => res.failures.push(self.failure(f, locale, &e)),
			}
		}
		Ok(res)
	}

	fn field(
		&self,
		name: &str,
		text: &str,
		query: &[AnalyzedTerm],
		locale: &Locale,
	) -> Result<String> {
		let terms = self.analyzer.analyze(text, locale)?;
		let spans = Locator::new(self.params.match_mode, self.params.query_mode).locate(&terms, query);
		let snippets =
			Extractor::new(self.params.max_length, self.params.merge_gap).extract(text, &spans);
		debug!(
			field = name,
			%locale,
			terms = terms.len(),
			spans = spans.len(),
			snippets = snippets.len(),
			"assembled field"
		);
		let hl = Highlighter::new(&self.params.open_tag, &self.params.close_tag);
		let rendered: Vec<String> = snippets.iter().map(|s| hl.render(s)).collect();
		Ok(rendered.join(&self.params.separator))
	}

	fn failure(&self, field: &str, locale: &Locale, e: &anyhow::Error) -> Error {
		warn!(field, %locale, "Unable to tokenize field: {e:#}");
		Error::TokenizationFailure {
			field: field.to_string(),
			locale: locale.to_string(),
			message: format!("{e:#}"),
		}
	}
}
