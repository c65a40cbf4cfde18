use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::err::Error;

/// A language, optionally narrowed to a country, e.g. `ja_JP` or `en`.
///
/// Both `_` and `-` are accepted as separators when parsing. The language is
/// stored lowercased and the country uppercased, so `EN-us` and `en_US`
/// compare equal.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale {
	language: String,
	country: Option<String>,
}

impl Locale {
	pub fn language(&self) -> &str {
		&self.language
	}

	pub fn country(&self) -> Option<&str> {
		self.country.as_deref()
	}
}

impl FromStr for Locale {
	type Err = Error;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let invalid = || Error::InvalidLocale(s.to_owned());
		let mut parts = s.trim().split(['_', '-']);
		let language = parts.next().ok_or_else(invalid)?;
		if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic())
		{
			return Err(invalid());
		}
		let country = match parts.next() {
			None => None,
			Some(c)
				if (c.len() == 2 && c.chars().all(|c| c.is_ascii_alphabetic()))
					|| (c.len() == 3 && c.chars().all(|c| c.is_ascii_digit())) =>
			{
				Some(c.to_ascii_uppercase())
			}
			Some(_) => return Err(invalid()),
		};
		if parts.next().is_some() {
			return Err(invalid());
		}
		Ok(Self {
			language: language.to_ascii_lowercase(),
			country,
		})
	}
}

impl TryFrom<String> for Locale {
	type Error = Error;

	fn try_from(s: String) -> Result<Self, Self::Error> {
		s.parse()
	}
}

impl From<Locale> for String {
	fn from(l: Locale) -> Self {
		l.to_string()
	}
}

impl Display for Locale {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		match &self.country {
			Some(c) => write!(f, "{}_{c}", self.language),
			None => f.write_str(&self.language),
		}
	}
}
