use std::slice;

use serde::{Deserialize, Serialize};

use crate::idx::ft::Position;
use crate::idx::ft::analyzer::AnalyzedTerm;

/// A contiguous range of characters `start..end` judged to match the query.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct MatchSpan {
	pub start: Position,
	pub end: Position,
}

impl MatchSpan {
	/// # Panics
	///
	/// Panics if the span is empty or reversed, which means the analyzer
	/// produced inconsistent offsets.
	pub fn new(start: Position, end: Position) -> Self {
		assert!(start < end, "invalid match span {start}..{end}");
		Self {
			start,
			end,
		}
	}

	pub fn len(&self) -> Position {
		self.end - self.start
	}

	pub fn is_empty(&self) -> bool {
		self.start == self.end
	}

	pub fn contains(&self, other: &MatchSpan) -> bool {
		self.start <= other.start && other.end <= self.end
	}
}

/// How a single query term is compared with a field term.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
	/// The normalized terms must be equal
	#[default]
	Exact,
	/// The last query term may be a prefix of the field term. The whole field
	/// term is highlighted, so `ent` highlights `entity`.
	Prefix,
}

/// How a query made of several terms is matched.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMode {
	/// The terms must appear contiguously and in order
	#[default]
	Phrase,
	/// Phrase matches, plus every occurrence of an individual query term
	/// which is not already covered by a phrase match
	PhraseOrTerms,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Locator {
	mode: MatchMode,
	query: QueryMode,
}

impl Locator {
	pub fn new(mode: MatchMode, query: QueryMode) -> Self {
		Self {
			mode,
			query,
		}
	}

	/// Finds the spans of the field matching the query, ordered by start
	/// offset. Only maximal spans are returned: a span contained in another
	/// one is dropped, so the result never holds nested or duplicate spans.
	///
	/// Both term sequences must come from the same analyzer.
	pub fn locate(&self, field: &[AnalyzedTerm], query: &[AnalyzedTerm]) -> Vec<MatchSpan> {
		if query.is_empty() || field.is_empty() {
			return Vec::new();
		}
		for t in field {
			assert!(t.start < t.end, "the analyzer produced an empty term `{}` at {}", t.term, t.start);
		}
		let mut spans = self.phrase_spans(field, query);
		if self.query == QueryMode::PhraseOrTerms && query.len() > 1 {
			for q in query {
				spans.extend(self.phrase_spans(field, slice::from_ref(q)));
			}
		}
		let spans = maximal(spans);
		trace!(terms = field.len(), spans = spans.len(), "located matches");
		spans
	}

	fn phrase_spans(&self, field: &[AnalyzedTerm], query: &[AnalyzedTerm]) -> Vec<MatchSpan> {
		let n = query.len();
		let mut spans = Vec::new();
		if field.len() < n {
			return spans;
		}
		for w in field.windows(n) {
			let matched = w.iter().zip(query).enumerate().all(|(i, (f, q))| {
				if i + 1 == n {
					self.term_matches(&f.term, &q.term)
				} else {
					f.term == q.term
				}
			});
			if matched {
				spans.push(MatchSpan::new(w[0].start, w[n - 1].end));
			}
		}
		spans
	}

	fn term_matches(&self, field: &str, query: &str) -> bool {
		match self.mode {
			MatchMode::Exact => field == query,
			MatchMode::Prefix => field.starts_with(query),
		}
	}
}

/// Locates the query with the default exact phrase semantics.
pub fn locate(field: &[AnalyzedTerm], query: &[AnalyzedTerm]) -> Vec<MatchSpan> {
	Locator::default().locate(field, query)
}

fn maximal(mut spans: Vec<MatchSpan>) -> Vec<MatchSpan> {
	// Longest first for a given start, so contained spans follow their container
	spans.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));
	let mut res: Vec<MatchSpan> = Vec::with_capacity(spans.len());
	let mut max_end = 0;
	for s in spans {
		if !res.is_empty() && s.end <= max_end {
			continue;
		}
		max_end = s.end;
		res.push(s);
	}
	res
}
