use std::collections::BTreeMap;
use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::doc::Locale;
use crate::err::Error;
use crate::idx::ft::Position;

pub mod filter;
pub mod tokenizer;

use self::filter::Filter;
use self::tokenizer::{Segmenter, Tokenizer};

/// A normalized token together with the character offsets of the text it was
/// produced from. `start..end` always addresses the original field text.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct AnalyzedTerm {
	pub term: String,
	pub start: Position,
	pub end: Position,
}

impl AnalyzedTerm {
	pub fn new(term: impl Into<String>, start: Position, end: Position) -> Self {
		Self {
			term: term.into(),
			start,
			end,
		}
	}
}

/// Turns raw text into an ordered sequence of analyzed terms.
///
/// Implementations must return terms in text order, with non-empty offset
/// ranges expressed in characters. The same analyzer is used for the field
/// text and for the query, so both sides are normalized the same way.
pub trait Analyzer: Send + Sync {
	fn analyze(&self, text: &str, locale: &Locale) -> Result<Vec<AnalyzedTerm>>;
}

/// Analyzer for scripts which separate words with spaces.
#[derive(Clone, Debug)]
pub struct SpaceAnalyzer {
	tokenizers: Vec<Tokenizer>,
	filters: Vec<Filter>,
}

impl Default for SpaceAnalyzer {
	fn default() -> Self {
		Self::new(vec![Tokenizer::Blank, Tokenizer::Class], vec![Filter::Lowercase])
	}
}

impl SpaceAnalyzer {
	pub fn new(tokenizers: Vec<Tokenizer>, filters: Vec<Filter>) -> Self {
		Self {
			tokenizers,
			filters,
		}
	}
}

impl Analyzer for SpaceAnalyzer {
	fn analyze(&self, text: &str, _: &Locale) -> Result<Vec<AnalyzedTerm>> {
		if text.is_empty() {
			return Ok(Vec::new());
		}
		Segmenter::tokenize(&self.tokenizers, text).filter(&self.filters)
	}
}

/// Analyzer for scripts written without spaces between words (Chinese,
/// Japanese, Korean). Runs of ideographic characters are split into one term
/// per character, so `新規作成` yields `新`, `規`, `作` and `成`, and a query
/// matches any contiguous run of characters.
/// Any other run is tokenized like [`SpaceAnalyzer`] does.
#[derive(Clone, Debug)]
pub struct CjkAnalyzer {
	tokenizers: Vec<Tokenizer>,
	filters: Vec<Filter>,
}

impl Default for CjkAnalyzer {
	fn default() -> Self {
		Self::new(vec![Tokenizer::Blank, Tokenizer::Class], vec![Filter::Lowercase])
	}
}

impl CjkAnalyzer {
	/// The `Class` tokenizer is always applied, as it separates ideographic runs
	/// from the surrounding text.
	pub fn new(mut tokenizers: Vec<Tokenizer>, filters: Vec<Filter>) -> Self {
		if !tokenizers.contains(&Tokenizer::Class) {
			tokenizers.push(Tokenizer::Class);
		}
		Self {
			tokenizers,
			filters,
		}
	}
}

impl Analyzer for CjkAnalyzer {
	fn analyze(&self, text: &str, _: &Locale) -> Result<Vec<AnalyzedTerm>> {
		if text.is_empty() {
			return Ok(Vec::new());
		}
		Segmenter::tokenize(&self.tokenizers, text).characters()?.filter(&self.filters)
	}
}

const CJK_LANGUAGES: &[&str] = &["ja", "ko", "zh"];

const SPACE_LANGUAGES: &[&str] = &[
	"ca", "da", "de", "en", "es", "fi", "fr", "hu", "it", "nl", "no", "pl", "pt", "ro", "ru", "sv",
	"tr",
];

/// Selects an analyzer by the language of a locale.
#[derive(Clone)]
pub struct Analyzers {
	by_language: BTreeMap<String, Arc<dyn Analyzer>>,
	fallback: Option<Arc<dyn Analyzer>>,
}

impl Default for Analyzers {
	fn default() -> Self {
		let cjk: Arc<dyn Analyzer> = Arc::new(CjkAnalyzer::default());
		let space: Arc<dyn Analyzer> = Arc::new(SpaceAnalyzer::default());
		let mut az = Self::empty();
		for l in CJK_LANGUAGES {
			az = az.with(l, cjk.clone());
		}
		for l in SPACE_LANGUAGES {
			az = az.with(l, space.clone());
		}
		az
	}
}

impl Debug for Analyzers {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		f.debug_struct("Analyzers")
			.field("languages", &self.by_language.keys().collect::<Vec<_>>())
			.field("fallback", &self.fallback.is_some())
			.finish()
	}
}

impl Analyzers {
	/// A registry without any analyzer, every locale is unsupported.
	pub fn empty() -> Self {
		Self {
			by_language: BTreeMap::new(),
			fallback: None,
		}
	}

	/// Registers (or replaces) the analyzer used for a language code, e.g. `ja`.
	pub fn with(mut self, language: &str, az: Arc<dyn Analyzer>) -> Self {
		self.by_language.insert(language.to_ascii_lowercase(), az);
		self
	}

	/// Sets the analyzer used for languages which are not registered.
	pub fn with_fallback(mut self, az: Arc<dyn Analyzer>) -> Self {
		self.fallback = Some(az);
		self
	}

	pub fn get(&self, locale: &Locale) -> Result<&Arc<dyn Analyzer>> {
		match self.by_language.get(locale.language()).or(self.fallback.as_ref()) {
			Some(az) => Ok(az),
			None => bail!(Error::UnsupportedLocale(locale.to_string())),
		}
	}
}

impl Analyzer for Analyzers {
	fn analyze(&self, text: &str, locale: &Locale) -> Result<Vec<AnalyzedTerm>> {
		self.get(locale)?.analyze(text, locale)
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use super::{AnalyzedTerm, Analyzer, Analyzers, CjkAnalyzer, SpaceAnalyzer};
	use crate::doc::Locale;
	use crate::err::Error;
	use crate::idx::ft::analyzer::filter::Filter;
	use crate::idx::ft::analyzer::tokenizer::Tokenizer;

	fn locale(s: &str) -> Locale {
		s.parse().unwrap()
	}

	fn terms(az: &dyn Analyzer, text: &str, l: &str) -> Vec<(String, u32, u32)> {
		az.analyze(text, &locale(l)).unwrap().into_iter().map(|t| (t.term, t.start, t.end)).collect()
	}

	#[test]
	fn space_analyzer_lowercases_and_keeps_offsets() {
		assert_eq!(
			terms(&SpaceAnalyzer::default(), "Entity  Title!", "en_US"),
			vec![("entity".to_owned(), 0, 6), ("title".to_owned(), 8, 13), ("!".to_owned(), 13, 14)]
		);
	}

	#[test]
	fn space_analyzer_empty_text() {
		assert!(terms(&SpaceAnalyzer::default(), "", "en_US").is_empty());
		assert!(terms(&SpaceAnalyzer::default(), "   ", "en_US").is_empty());
	}

	#[test]
	fn space_analyzer_ascii_filter() {
		let az = SpaceAnalyzer::new(vec![Tokenizer::Blank], vec![Filter::Ascii, Filter::Lowercase]);
		assert_eq!(terms(&az, "Crème Brûlée", "fr_FR"), vec![
			("creme".to_owned(), 0, 5),
			("brulee".to_owned(), 6, 12)
		]);
	}

	#[test]
	fn cjk_analyzer_characters() {
		assert_eq!(
			terms(&CjkAnalyzer::default(), "新規作成", "ja_JP"),
			vec![
				("新".to_owned(), 0, 1),
				("規".to_owned(), 1, 2),
				("作".to_owned(), 2, 3),
				("成".to_owned(), 3, 4),
			]
		);
	}

	#[test]
	fn cjk_analyzer_mixed_scripts() {
		assert_eq!(
			terms(&CjkAnalyzer::default(), "あいう Rust語", "ja_JP"),
			vec![
				("あ".to_owned(), 0, 1),
				("い".to_owned(), 1, 2),
				("う".to_owned(), 2, 3),
				("rust".to_owned(), 4, 8),
				("語".to_owned(), 8, 9),
			]
		);
	}

	#[test]
	fn cjk_analyzer_forces_class_tokenizer() {
		let az = CjkAnalyzer::new(vec![Tokenizer::Blank], vec![]);
		assert_eq!(terms(&az, "日本abc", "ja"), vec![
			("日".to_owned(), 0, 1),
			("本".to_owned(), 1, 2),
			("abc".to_owned(), 2, 5)
		]);
	}

	#[test]
	fn registry_selects_by_language() {
		let az = Analyzers::default();
		assert_eq!(terms(&az, "日本", "ja_JP"), vec![("日".to_owned(), 0, 1), ("本".to_owned(), 1, 2)]);
		assert_eq!(terms(&az, "日本", "en_US"), vec![("日本".to_owned(), 0, 2)]);
		assert_eq!(terms(&az, "新規作成", "en_US"), vec![("新規作成".to_owned(), 0, 4)]);
	}

	#[test]
	fn registry_unsupported_locale() {
		let az = Analyzers::default();
		let err = az.analyze("text", &locale("xx_YY")).unwrap_err();
		assert_eq!(err.downcast_ref::<Error>(), Some(&Error::UnsupportedLocale("xx_YY".to_owned())));
	}

	#[test]
	fn registry_fallback() {
		let az = Analyzers::empty().with_fallback(Arc::new(SpaceAnalyzer::default()));
		assert_eq!(terms(&az, "Hello", "xx"), vec![("hello".to_owned(), 0, 5)]);
	}

	#[test]
	fn analyzed_term_new() {
		assert_eq!(AnalyzedTerm::new("a", 0, 1), AnalyzedTerm {
			term: "a".to_owned(),
			start: 0,
			end: 1,
		});
	}
}
