use crate::idx::ft::locator::MatchSpan;
use crate::idx::ft::snippet::Snippet;

/// Wraps the matches of a snippet with an opening and a closing marker.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Highlighter {
	prefix: Vec<char>,
	suffix: Vec<char>,
}

impl Highlighter {
	pub fn new(prefix: &str, suffix: &str) -> Self {
		Self {
			prefix: prefix.chars().collect(),
			suffix: suffix.chars().collect(),
		}
	}

	/// Renders the snippet text with markers around each match. Touching or
	/// overlapping matches share a single pair of markers, so the output never
	/// holds a closing marker immediately followed by an opening one. The text
	/// outside the markers is left untouched.
	///
	/// # Panics
	///
	/// Panics if a span ends beyond the snippet text.
	pub fn render(&self, snippet: &Snippet) -> String {
		let mut v: Vec<char> = snippet.text.chars().collect();
		let l = v.len();
		// Insert from the end, so the offsets of the remaining spans stay valid
		for m in merge(&snippet.spans).iter().rev() {
			let (s, e) = (m.start as usize, m.end as usize);
			assert!(e <= l, "position overflow: {e} - len: {l}");
			v.splice(e..e, self.suffix.iter().copied());
			v.splice(s..s, self.prefix.iter().copied());
		}
		v.into_iter().collect()
	}
}

/// Renders a snippet with the given markers.
pub fn render(snippet: &Snippet, open_tag: &str, close_tag: &str) -> String {
	Highlighter::new(open_tag, close_tag).render(snippet)
}

/// Coalesces touching or overlapping spans, ordered by start offset
fn merge(spans: &[MatchSpan]) -> Vec<MatchSpan> {
	let mut sorted = spans.to_vec();
	sorted.sort_unstable();
	let mut res: Vec<MatchSpan> = Vec::with_capacity(sorted.len());
	for s in sorted {
		match res.last_mut() {
			Some(last) if s.start <= last.end => last.end = last.end.max(s.end),
			_ => res.push(s),
		}
	}
	res
}
