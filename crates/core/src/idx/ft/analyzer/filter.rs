use std::borrow::Cow;

use deunicode::deunicode;
use serde::{Deserialize, Serialize};

/// A normalization step applied to every token. Filters rewrite the text of a
/// term but never its offsets, so highlights always land on the original text.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
	/// Transliterates to ASCII, e.g. `café` becomes `cafe`
	Ascii,
	Lowercase,
	Uppercase,
}

impl Filter {
	pub(super) fn apply_filter<'a>(&self, c: Cow<'a, str>) -> Cow<'a, str> {
		match self {
			Filter::Ascii => {
				if c.is_ascii() {
					c
				} else {
					Cow::Owned(deunicode(&c))
				}
			}
			Filter::Lowercase => {
				if c.chars().any(char::is_uppercase) {
					Cow::Owned(c.to_lowercase())
				} else {
					c
				}
			}
			Filter::Uppercase => {
				if c.chars().any(char::is_lowercase) {
					Cow::Owned(c.to_uppercase())
				} else {
					c
				}
			}
		}
	}
}
