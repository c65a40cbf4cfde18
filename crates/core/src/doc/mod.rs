//! Documents are tables of `(field, locale) -> text`.
//!
//! A field is either defined for a locale or absent. There is no implicit
//! fallback to a default locale: looking up `title` in `fr_FR` on a document
//! which only carries `title` in `en_US` yields nothing.

mod locale;

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub use self::locale::Locale;
use crate::err::Error;

/// The identifier of a document, as assigned by the store which owns it.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<String> for DocumentId {
	fn from(s: String) -> Self {
		Self(s)
	}
}

impl From<&str> for DocumentId {
	fn from(s: &str) -> Self {
		Self(s.to_owned())
	}
}

impl Display for DocumentId {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// The address of a piece of text inside a document.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FieldKey {
	pub field: String,
	pub locale: Locale,
}

impl FieldKey {
	pub fn new(field: impl Into<String>, locale: Locale) -> Self {
		Self {
			field: field.into(),
			locale,
		}
	}
}

/// Renders as `field:locale`, the key used in snippet results.
impl Display for FieldKey {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		write!(f, "{}:{}", self.field, self.locale)
	}
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDocument", into = "RawDocument")]
pub struct Document {
	id: DocumentId,
	fields: BTreeMap<FieldKey, String>,
}

impl Document {
	pub fn builder(id: impl Into<DocumentId>) -> DocumentBuilder {
		DocumentBuilder {
			id: id.into(),
			fields: Vec::new(),
		}
	}

	pub fn id(&self) -> &DocumentId {
		&self.id
	}

	/// Returns the text of a field in the given locale, if it is defined.
	pub fn field(&self, field: &str, locale: &Locale) -> Option<&str> {
		self.fields.get(&FieldKey::new(field, locale.clone())).map(String::as_str)
	}

	/// Iterates over every field of the document, ordered by name then locale.
	pub fn fields(&self) -> impl Iterator<Item = (&FieldKey, &str)> {
		self.fields.iter().map(|(k, v)| (k, v.as_str()))
	}

	/// Iterates over the names of the fields defined for a locale.
	pub fn field_names<'a>(&'a self, locale: &'a Locale) -> impl Iterator<Item = &'a str> + 'a {
		self.fields.keys().filter(move |k| &k.locale == locale).map(|k| k.field.as_str())
	}
}

pub struct DocumentBuilder {
	id: DocumentId,
	fields: Vec<(FieldKey, String)>,
}

impl DocumentBuilder {
	pub fn field(mut self, field: impl Into<String>, locale: Locale, text: impl Into<String>) -> Self {
		self.fields.push((FieldKey::new(field, locale), text.into()));
		self
	}

	/// Builds the document, rejecting any `(field, locale)` pair declared twice.
	pub fn build(self) -> Result<Document> {
		Ok(self.try_build()?)
	}

	fn try_build(self) -> Result<Document, Error> {
		let mut fields = BTreeMap::new();
		for (key, text) in self.fields {
			if fields.contains_key(&key) {
				return Err(Error::DuplicateField {
					field: key.field,
					locale: key.locale.to_string(),
				});
			}
			fields.insert(key, text);
		}
		Ok(Document {
			id: self.id,
			fields,
		})
	}
}

#[derive(Serialize, Deserialize)]
struct RawField {
	name: String,
	locale: Locale,
	text: String,
}

#[derive(Serialize, Deserialize)]
struct RawDocument {
	id: DocumentId,
	#[serde(default)]
	fields: Vec<RawField>,
}

impl TryFrom<RawDocument> for Document {
	type Error = Error;

	fn try_from(raw: RawDocument) -> Result<Self, Error> {
		let mut b = Document::builder(raw.id);
		for f in raw.fields {
			b = b.field(f.name, f.locale, f.text);
		}
		b.try_build()
	}
}

impl From<Document> for RawDocument {
	fn from(doc: Document) -> Self {
		Self {
			id: doc.id,
			fields: doc
				.fields
				.into_iter()
				.map(|(k, text)| RawField {
					name: k.field,
					locale: k.locale,
					text,
				})
				.collect(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::{Document, FieldKey, Locale};
	use crate::err::Error;

	fn locale(s: &str) -> Locale {
		s.parse().unwrap()
	}

	#[test]
	fn field_lookup_has_no_locale_fallback() {
		let doc = Document::builder("1")
			.field("title", locale("en_US"), "entity title")
			.build()
			.unwrap();
		assert_eq!(doc.field("title", &locale("en_US")), Some("entity title"));
		assert_eq!(doc.field("title", &locale("en")), None);
		assert_eq!(doc.field("title", &locale("ja_JP")), None);
		assert_eq!(doc.field("content", &locale("en_US")), None);
	}

	#[test]
	fn duplicate_fields_are_rejected() {
		let err = Document::builder("1")
			.field("title", locale("ja_JP"), "a")
			.field("title", locale("ja-jp"), "b")
			.build()
			.unwrap_err();
		assert_eq!(
			err.downcast_ref::<Error>(),
			Some(&Error::DuplicateField {
				field: "title".to_owned(),
				locale: "ja_JP".to_owned(),
			})
		);
	}

	#[test]
	fn field_key_display() {
		assert_eq!(FieldKey::new("title", locale("ja_JP")).to_string(), "title:ja_JP");
	}

	#[test]
	fn json_round_trip() {
		let json = r#"{"id":"42","fields":[
			{"name":"title","locale":"ja_JP","text":"新規作成"},
			{"name":"content","locale":"ja_JP","text":"新規作成"},
			{"name":"title","locale":"en_US","text":"entity title"}
		]}"#;
		let doc: Document = serde_json::from_str(json).unwrap();
		assert_eq!(doc.id().as_str(), "42");
		assert_eq!(doc.field_names(&locale("ja_JP")).collect::<Vec<_>>(), vec!["content", "title"]);
		let back: Document = serde_json::from_str(&serde_json::to_string(&doc).unwrap()).unwrap();
		assert_eq!(back, doc);
	}

	#[test]
	fn json_duplicate_field_fails() {
		let json = r#"{"id":"1","fields":[
			{"name":"title","locale":"en_US","text":"a"},
			{"name":"title","locale":"en_US","text":"b"}
		]}"#;
		assert!(serde_json::from_str::<Document>(json).is_err());
	}
}
