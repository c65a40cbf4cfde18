use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::err::Error;
use crate::idx::ft::Position;
use crate::idx::ft::analyzer::AnalyzedTerm;
use crate::idx::ft::analyzer::filter::Filter;

/// The rules used to split text into tokens. Several tokenizers can be
/// combined: a character starts a new token as soon as one of them says so.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tokenizer {
	/// Splits on whitespace
	Blank,
	/// Splits when the case changes from lower to upper, e.g. `camelCase`
	Camel,
	/// Splits when the character class changes (letters, digits, punctuation, ideographs)
	Class,
	/// Every punctuation character is a token of its own
	Punct,
}

pub(super) struct Tokens<'a> {
	/// The input string
	i: &'a str,
	/// The final list of tokens
	t: Vec<Token>,
}

impl<'a> Tokens<'a> {
	#[cfg(test)]
	pub(super) fn get_token_string(&self, t: &Token) -> Result<&'a str> {
		t.get_str(self.i)
	}

	#[cfg(test)]
	pub(super) fn list(&self) -> &Vec<Token> {
		&self.t
	}

	/// Splits every token made only of characters from non-segmented scripts
	/// into one token per character, so that any run of characters can be
	/// matched as a phrase.
	pub(super) fn characters(self) -> Result<Tokens<'a>> {
		let mut tks = Vec::with_capacity(self.t.len());
		for tk in self.t {
			let s = tk.get_str(self.i)?;
			if tk.len() < 2
				|| !s.chars().all(|c| matches!(CharacterClass::from(c), CharacterClass::Ideographic))
			{
				tks.push(tk);
				continue;
			}
			for (n, (b, c)) in s.char_indices().enumerate() {
				let p = tk.chars.0 + n as Position;
				let b = tk.bytes.0 + b as Position;
				tks.push(Token {
					chars: (p, p + 1),
					bytes: (b, b + c.len_utf8() as Position),
				});
			}
		}
		Ok(Tokens {
			i: self.i,
			t: tks,
		})
	}

	/// Runs the filters over every token, producing the analyzed terms. A
	/// token which a filter reduces to an empty string is dropped.
	pub(super) fn filter(self, filters: &[Filter]) -> Result<Vec<AnalyzedTerm>> {
		let mut terms = Vec::with_capacity(self.t.len());
		for tk in &self.t {
			if tk.is_empty() {
				continue;
			}
			let mut c = std::borrow::Cow::Borrowed(tk.get_str(self.i)?);
			for f in filters {
				c = f.apply_filter(c);
			}
			if c.is_empty() {
				continue;
			}
			terms.push(AnalyzedTerm {
				term: c.into_owned(),
				start: tk.chars.0,
				end: tk.chars.1,
			});
		}
		Ok(terms)
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct Token {
	/// Start and end character offsets
	chars: (Position, Position),
	/// Start and end byte offsets
	bytes: (Position, Position),
}

impl Token {
	fn len(&self) -> Position {
		self.chars.1 - self.chars.0
	}

	fn is_empty(&self) -> bool {
		self.chars.0 == self.chars.1
	}

	fn get_str<'a>(&self, i: &'a str) -> Result<&'a str> {
		let s = self.bytes.0 as usize;
		let e = self.bytes.1 as usize;
		let l = i.len();
		if s >= l || e > l {
			bail!(Error::AnalyzerError(format!(
				"Unable to extract the token. The offset position ({s},{e}) is out of range ({l})."
			)));
		}
		match i.get(s..e) {
			Some(t) => Ok(t),
			None => bail!(Error::AnalyzerError(format!(
				"Unable to extract the token. The offset position ({s},{e}) is not on a character boundary."
			))),
		}
	}
}

pub(super) struct Segmenter {
	splitters: Vec<Splitter>,
}

impl Segmenter {
	fn new(t: &[Tokenizer]) -> Self {
		Self {
			splitters: t.iter().map(|t| (*t).into()).collect(),
		}
	}

	fn character_role(&mut self, c: char) -> CharacterRole {
		let cl: CharacterClass = c.into();
		// If a character class is not supported, we can safely ignore the character
		if !cl.is_valid() {
			return CharacterRole::NotTokenizable;
		}
		// At this stage, by default, we consider a character being part of the current
		// token
		let mut r = CharacterRole::PartOfCurrentToken;
		for s in &mut self.splitters {
			match s.character_role(cl) {
				// If a tokenizer considers the character being an isolated token we can immediately
				// return
				CharacterRole::IsolatedToken => return CharacterRole::IsolatedToken,
				// The character is part of a new token
				CharacterRole::StartsNewToken => r = CharacterRole::StartsNewToken,
				// If a tokenizer considers the character being not tokenizable we can immediately
				// return
				CharacterRole::NotTokenizable => return CharacterRole::NotTokenizable,
				// We keep the character being part of the current token
				CharacterRole::PartOfCurrentToken => {}
			}
		}
		r
	}

	pub(super) fn tokenize<'a>(t: &[Tokenizer], i: &'a str) -> Tokens<'a> {
		let mut w = Segmenter::new(t);
		let mut last_char_pos = 0;
		let mut last_byte_pos = 0;
		let mut current_char_pos = 0;
		let mut current_byte_pos = 0;
		let mut previous_character_role = CharacterRole::PartOfCurrentToken;
		let mut t = Vec::new();
		for c in i.chars() {
			let char_len = c.len_utf8() as Position;
			let cr = w.character_role(c);
			// if the new character is not part of the current token,
			if !matches!(cr, CharacterRole::PartOfCurrentToken)
				|| matches!(previous_character_role, CharacterRole::IsolatedToken)
			{
				// we add a new token (if there is a pending one)
				if last_char_pos < current_char_pos {
					t.push(Token {
						chars: (last_char_pos, current_char_pos),
						bytes: (last_byte_pos, current_byte_pos),
					});
				}
				last_char_pos = current_char_pos;
				last_byte_pos = current_byte_pos;
				// If the character is not valid for indexing (space, control...)
				// Then we increase the last position to the next character
				if matches!(cr, CharacterRole::NotTokenizable) {
					last_char_pos += 1;
					last_byte_pos += char_len;
				}
			}
			previous_character_role = cr;
			current_char_pos += 1;
			current_byte_pos += char_len;
		}
		// Do we have a pending token?
		if current_char_pos != last_char_pos {
			t.push(Token {
				chars: (last_char_pos, current_char_pos),
				bytes: (last_byte_pos, current_byte_pos),
			});
		}
		Tokens {
			i,
			t,
		}
	}
}

struct Splitter {
	t: Tokenizer,
	state: CharacterClass,
}

/// Define the character class
#[derive(Clone, Copy)]
enum CharacterClass {
	Unknown,
	Whitespace,
	// True if uppercase
	Alphabetic(bool),
	// Scripts written without spaces between words
	Ideographic,
	Numeric,
	Punctuation,
	Other,
}

impl From<char> for CharacterClass {
	fn from(c: char) -> Self {
		if is_ideographic(c) {
			Self::Ideographic
		} else if c.is_alphabetic() {
			Self::Alphabetic(c.is_uppercase())
		} else if c.is_numeric() {
			Self::Numeric
		} else if c.is_whitespace() {
			Self::Whitespace
		} else if c.is_ascii_punctuation() {
			Self::Punctuation
		} else {
			Self::Other
		}
	}
}

impl CharacterClass {
	/// Te be valid a character is either alphanumeric, ideographic, punctuation or
	/// whitespace
	fn is_valid(&self) -> bool {
		matches!(
			self,
			Self::Alphabetic(_)
				| Self::Ideographic
				| Self::Numeric
				| Self::Punctuation
				| Self::Whitespace
		)
	}
}

/// Han, kana and hangul characters, plus the iteration and prolonged sound marks
fn is_ideographic(c: char) -> bool {
	matches!(c,
		'\u{1100}'..='\u{11FF}'
		| '\u{3005}'
		| '\u{3040}'..='\u{30FF}'
		| '\u{3130}'..='\u{318F}'
		| '\u{31F0}'..='\u{31FF}'
		| '\u{3400}'..='\u{4DBF}'
		| '\u{4E00}'..='\u{9FFF}'
		| '\u{AC00}'..='\u{D7AF}'
		| '\u{F900}'..='\u{FAFF}'
		| '\u{FF66}'..='\u{FF9F}'
		| '\u{20000}'..='\u{2FFFF}'
	)
}

/// Defines the role of a character in the tokenization process
enum CharacterRole {
	/// The character is a token on its own
	IsolatedToken,
	/// The character is the first character of a new token
	StartsNewToken,
	/// The character can't be part of a token and should be ignored
	NotTokenizable,
	/// The character is part of the current token
	PartOfCurrentToken,
}

impl From<Tokenizer> for Splitter {
	fn from(t: Tokenizer) -> Self {
		Self {
			t,
			state: CharacterClass::Unknown,
		}
	}
}

impl Splitter {
	fn character_role(&mut self, cl: CharacterClass) -> CharacterRole {
		match &self.t {
			Tokenizer::Blank => self.blank_role(cl),
			Tokenizer::Camel => self.camel_role(cl),
			Tokenizer::Class => self.class_role(cl),
			Tokenizer::Punct => self.punct_role(cl),
		}
	}

	fn blank_role(&self, cl: CharacterClass) -> CharacterRole {
		if matches!(cl, CharacterClass::Whitespace) {
			CharacterRole::NotTokenizable
		} else {
			CharacterRole::PartOfCurrentToken
		}
	}

	fn class_role(&mut self, cl: CharacterClass) -> CharacterRole {
		let r = match (cl, self.state) {
			(CharacterClass::Alphabetic(_), CharacterClass::Alphabetic(_))
			| (CharacterClass::Ideographic, CharacterClass::Ideographic)
			| (CharacterClass::Numeric, CharacterClass::Numeric)
			| (CharacterClass::Punctuation, CharacterClass::Punctuation) => {
				CharacterRole::PartOfCurrentToken
			}
			(CharacterClass::Other, _)
			| (CharacterClass::Whitespace, _)
			| (CharacterClass::Unknown, _) => CharacterRole::NotTokenizable,
			(_, _) => CharacterRole::StartsNewToken,
		};
		self.state = cl;
		r
	}

	fn punct_role(&self, cl: CharacterClass) -> CharacterRole {
		match cl {
			CharacterClass::Whitespace
			| CharacterClass::Alphabetic(_)
			| CharacterClass::Ideographic
			| CharacterClass::Numeric => CharacterRole::PartOfCurrentToken,
			CharacterClass::Punctuation => CharacterRole::IsolatedToken,
			CharacterClass::Other | CharacterClass::Unknown => CharacterRole::NotTokenizable,
		}
	}

	fn camel_role(&mut self, cl: CharacterClass) -> CharacterRole {
		let r = match cl {
			CharacterClass::Alphabetic(next_upper) => {
				if let CharacterClass::Alphabetic(previous_upper) = self.state {
					if next_upper && !previous_upper {
						CharacterRole::StartsNewToken
					} else {
						CharacterRole::PartOfCurrentToken
					}
				} else {
					CharacterRole::StartsNewToken
				}
			}
			CharacterClass::Ideographic => {
				if matches!(self.state, CharacterClass::Ideographic) {
					CharacterRole::PartOfCurrentToken
				} else {
					CharacterRole::StartsNewToken
				}
			}
			CharacterClass::Numeric | CharacterClass::Punctuation => {
				CharacterRole::PartOfCurrentToken
			}
			CharacterClass::Other | CharacterClass::Whitespace | CharacterClass::Unknown => {
				CharacterRole::NotTokenizable
			}
		};
		self.state = cl;
		r
	}
}

#[cfg(test)]
mod tests {
	use super::{Segmenter, Token, Tokenizer};
	use crate::idx::ft::analyzer::filter::Filter;

	fn test_analyzer(tokenizers: &[Tokenizer], filters: &[Filter], input: &str, expected: &[&str]) {
		let terms = Segmenter::tokenize(tokenizers, input).filter(filters).unwrap();
		let res: Vec<&str> = terms.iter().map(|t| t.term.as_str()).collect();
		assert_eq!(&res, expected);
	}

	#[test]
	fn test_tokenize_blank_class() {
		test_analyzer(
			&[Tokenizer::Blank, Tokenizer::Class],
			&[Filter::Lowercase],
			"Abc12345xYZ DL1809 item123456 978-3-16-148410-0 1HGCM82633A123456",
			&[
				"abc", "12345", "xyz", "dl", "1809", "item", "123456", "978", "-", "3", "-", "16",
				"-", "148410", "-", "0", "1", "hgcm", "82633", "a", "123456",
			],
		);
	}

	#[test]
	fn test_tokenize_source_code() {
		test_analyzer(
			&[Tokenizer::Blank, Tokenizer::Class, Tokenizer::Camel, Tokenizer::Punct],
			&[Filter::Lowercase],
			r#"struct MyRectangle {
    // specified by corners
    top_left: Point,
}"#,
			&[
				"struct", "my", "rectangle", "{", "/", "/", "specified", "by", "corners", "top",
				"_", "left", ":", "point", ",", "}",
			],
		);
	}

	#[test]
	fn test_tokenize_punct() {
		test_analyzer(
			&[Tokenizer::Punct],
			&[],
			";anD pAss...leaving Memories-",
			&[";", "anD pAss", ".", ".", ".", "leaving Memories", "-"],
		);
	}

	#[test]
	fn test_tokenize_ideographic_class() {
		test_analyzer(
			&[Tokenizer::Blank, Tokenizer::Class],
			&[Filter::Lowercase],
			"新規作成Abc 日本語。テスト",
			&["新規作成", "abc", "日本語", "テスト"],
		);
	}

	#[test]
	fn test_offsets_are_characters() {
		let tokens = Segmenter::tokenize(&[Tokenizer::Blank], "あいうえお 日本語");
		assert_eq!(
			tokens.list(),
			&vec![
				Token {
					chars: (0, 5),
					bytes: (0, 15),
				},
				Token {
					chars: (6, 9),
					bytes: (16, 25),
				},
			]
		);
	}

	#[test]
	fn test_characters() {
		let tokens = Segmenter::tokenize(&[Tokenizer::Blank, Tokenizer::Class], "新規作成 xy 語")
			.characters()
			.unwrap();
		let terms: Vec<(String, u32, u32)> = tokens
			.filter(&[])
			.unwrap()
			.into_iter()
			.map(|t| (t.term, t.start, t.end))
			.collect();
		assert_eq!(
			terms,
			vec![
				("新".to_owned(), 0, 1),
				("規".to_owned(), 1, 2),
				("作".to_owned(), 2, 3),
				("成".to_owned(), 3, 4),
				("xy".to_owned(), 5, 7),
				("語".to_owned(), 8, 9),
			]
		);
	}

	#[test]
	fn test_characters_keep_byte_offsets() {
		let tokens = Segmenter::tokenize(&[Tokenizer::Blank], "あい").characters().unwrap();
		assert_eq!(
			tokens.list(),
			&vec![
				Token {
					chars: (0, 1),
					bytes: (0, 3),
				},
				Token {
					chars: (1, 2),
					bytes: (3, 6),
				},
			]
		);
	}

	#[test]
	fn test_get_token_string_out_of_range() {
		let tokens = Segmenter::tokenize(&[Tokenizer::Blank], "abc");
		let bad = Token {
			chars: (0, 9),
			bytes: (0, 9),
		};
		assert!(tokens.get_token_string(&bad).is_err());
	}
}
