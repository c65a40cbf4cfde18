use serde::Serialize;

use crate::idx::ft::Position;
use crate::idx::ft::locator::MatchSpan;

/// An excerpt of a field text, with the matches it contains.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Snippet {
	/// Character offset of the window start in the field text
	pub start: Position,
	/// Character offset of the window end in the field text
	pub end: Position,
	pub text: String,
	/// The matches inside the window, relative to the window start
	pub spans: Vec<MatchSpan>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Extractor {
	max_length: usize,
	merge_gap: usize,
}

impl Extractor {
	/// `max_length` is the nominal window size in characters. Two windows
	/// separated by at most `merge_gap` characters become one snippet.
	pub fn new(max_length: usize, merge_gap: usize) -> Self {
		Self {
			max_length,
			merge_gap,
		}
	}

	/// Cuts the windows around the matches of a field, in text order.
	///
	/// Without any match, a single window at the start of the text is
	/// returned. A match longer than `max_length` gets a window of its own
	/// size, matches are never truncated.
	///
	/// # Panics
	///
	/// Panics if a span ends beyond the text.
	pub fn extract(&self, text: &str, spans: &[MatchSpan]) -> Vec<Snippet> {
		// Byte offset of every character, plus the end of the text
		let bounds: Vec<usize> =
			text.char_indices().map(|(b, _)| b).chain(std::iter::once(text.len())).collect();
		let len = (bounds.len() - 1) as Position;
		if spans.is_empty() {
			let end = len.min(self.window_size());
			return vec![Self::snippet(text, &bounds, (0, end), &[])];
		}
		let mut windows: Vec<(Position, Position)> = spans
			.iter()
			.map(|s| {
				assert!(s.end <= len, "match span {}..{} exceeds the text length {len}", s.start, s.end);
				self.window(s, len)
			})
			.collect();
		windows.sort_unstable();
		let mut merged: Vec<(Position, Position)> = Vec::with_capacity(windows.len());
		for w in windows {
			match merged.last_mut() {
				Some(last) if w.0 as usize <= (last.1 as usize).saturating_add(self.merge_gap) => {
					trace!(from = w.0, to = w.1, into_from = last.0, into_to = last.1, "merging window");
					last.1 = last.1.max(w.1);
				}
				_ => merged.push(w),
			}
		}
		merged.into_iter().map(|w| Self::snippet(text, &bounds, w, spans)).collect()
	}

	/// The window size in characters. Larger sizes than a position can hold
	/// cover the whole text anyway.
	fn window_size(&self) -> Position {
		Position::try_from(self.max_length).unwrap_or(Position::MAX)
	}

	/// A window centered on the span, clamped to the text
	fn window(&self, s: &MatchSpan, len: Position) -> (Position, Position) {
		let size = s.len().max(self.window_size());
		let extra = size - s.len();
		let left = extra / 2;
		let start = s.start.saturating_sub(left);
		let end = start.saturating_add(size).min(len);
		(end.saturating_sub(size), end)
	}

	fn snippet(text: &str, bounds: &[usize], w: (Position, Position), spans: &[MatchSpan]) -> Snippet {
		let spans = spans
			.iter()
			.filter(|s| s.start < w.1 && s.end > w.0)
			.map(|s| MatchSpan::new(s.start.max(w.0) - w.0, s.end.min(w.1) - w.0))
			.collect();
		Snippet {
			start: w.0,
			end: w.1,
			text: text[bounds[w.0 as usize]..bounds[w.1 as usize]].to_owned(),
			spans,
		}
	}
}

/// Extracts snippets with zero-gap window merging.
pub fn extract(text: &str, spans: &[MatchSpan], max_length: usize) -> Vec<Snippet> {
	Extractor::new(max_length, 0).extract(text, spans)
}

#[cfg(test)]
mod tests {
	use super::{Extractor, Snippet, extract};
	use crate::idx::ft::locator::MatchSpan;

	fn span(s: u32, e: u32) -> MatchSpan {
		MatchSpan::new(s, e)
	}

	#[test]
	fn no_match_yields_prefix() {
		let res = extract("entity content", &[], 6);
		assert_eq!(res, vec![Snippet {
			start: 0,
			end: 6,
			text: "entity".to_owned(),
			spans: vec![],
		}]);
	}

	#[test]
	fn no_match_short_text() {
		let res = extract("新規作成", &[], 100);
		assert_eq!(res.len(), 1);
		assert_eq!(res[0].text, "新規作成");
		assert_eq!(extract("", &[], 100)[0].text, "");
	}

	#[test]
	fn whole_text_when_shorter_than_window() {
		let res = extract("entity title", &[span(7, 12)], 100);
		assert_eq!(res, vec![Snippet {
			start: 0,
			end: 12,
			text: "entity title".to_owned(),
			spans: vec![span(7, 12)],
		}]);
	}

	#[test]
	fn window_is_centered_on_the_match() {
		let text = "0123456789abcdefghij";
		let res = extract(text, &[span(10, 12)], 6);
		assert_eq!(res[0].start, 8);
		assert_eq!(res[0].end, 14);
		assert_eq!(res[0].text, "89abcd");
		assert_eq!(res[0].spans, vec![span(2, 4)]);
	}

	#[test]
	fn window_is_shifted_at_text_bounds() {
		let text = "0123456789";
		let res = extract(text, &[span(0, 1)], 4);
		assert_eq!((res[0].start, res[0].end), (0, 4));
		let res = extract(text, &[span(9, 10)], 4);
		assert_eq!((res[0].start, res[0].end), (6, 10));
		assert_eq!(res[0].spans, vec![span(3, 4)]);
	}

	#[test]
	fn long_match_is_never_truncated() {
		let text = "abc entity title def";
		let res = extract(text, &[span(4, 16)], 5);
		assert_eq!(res.len(), 1);
		assert_eq!(res[0].text, "entity title");
		assert_eq!(res[0].spans, vec![span(0, 12)]);
	}

	#[test]
	fn distant_matches_yield_separate_snippets() {
		let text = "aa bbbbbbbbbbbbbbbbbbbb aa";
		let res = extract(text, &[span(0, 2), span(24, 26)], 4);
		assert_eq!(res.len(), 2);
		assert_eq!(res[0].text, "aa b");
		assert_eq!(res[1].text, "b aa");
		assert_eq!(res[1].spans, vec![span(2, 4)]);
	}

	#[test]
	fn overlapping_windows_merge_transitively() {
		let text = "x a x b x c x";
		let res = extract(text, &[span(2, 3), span(6, 7), span(10, 11)], 5);
		assert_eq!(res.len(), 1);
		assert_eq!(res[0].text, "x a x b x c x");
		assert_eq!(res[0].spans, vec![span(2, 3), span(6, 7), span(10, 11)]);
	}

	#[test]
	fn merge_gap_defaults_to_touching_windows_only() {
		let text = "ab cd ef";
		// Windows 0..2 and 3..5 have a gap of one character
		assert_eq!(extract(text, &[span(0, 2), span(3, 5)], 2).len(), 2);
		// Windows 0..2 and 2..4 touch
		assert_eq!(extract(text, &[span(0, 2), span(2, 4)], 2).len(), 1);
		assert_eq!(Extractor::new(2, 1).extract(text, &[span(0, 2), span(3, 5)]).len(), 1);
	}

	#[test]
	fn multibyte_windows_fall_on_characters() {
		let text = "あいうえお 日本語";
		let res = extract(text, &[span(6, 9)], 5);
		assert_eq!(res[0].text, "お 日本語");
		assert_eq!((res[0].start, res[0].end), (4, 9));
		assert_eq!(res[0].spans, vec![span(2, 5)]);
	}

	#[test]
	#[cfg(target_pointer_width = "64")]
	fn oversized_window_covers_the_text() {
		let res = extract("entity title", &[], 1 << 32);
		assert_eq!(res[0].text, "entity title");
		let res = extract("entity title", &[span(7, 12)], 1 << 32);
		assert_eq!((res[0].start, res[0].end), (0, 12));
	}

	#[test]
	fn unbounded_merge_gap_merges_everything() {
		let text = "ab cd ef gh";
		let res = Extractor::new(2, usize::MAX).extract(text, &[span(0, 2), span(9, 11)]);
		assert_eq!(res.len(), 1);
		assert_eq!(res[0].text, text);
	}

	#[test]
	#[should_panic(expected = "exceeds the text length")]
	fn span_beyond_text_is_fatal() {
		extract("abc", &[span(2, 9)], 10);
	}
}
