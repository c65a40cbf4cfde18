//! The search collaborators of the highlighting engine.
//!
//! Resolving which documents match a query is not the job of the snippet
//! assembler. A [`Searcher`] does it beforehand, and the hits are then
//! highlighted independently of each other.

use std::collections::BTreeMap;

use anyhow::{Result, bail};
use parking_lot::RwLock;
use rayon::prelude::*;

use crate::doc::{Document, DocumentId, Locale};
use crate::err::Error;
use crate::idx::ft::analyzer::{AnalyzedTerm, Analyzer, Analyzers};
use crate::idx::ft::assembler::{Assembler, SnippetResult};
use crate::idx::ft::locator::Locator;

/// Resolves the documents matching a query in a locale.
pub trait Searcher: Send + Sync {
	fn search(&self, query: &str, locale: &Locale) -> Result<Vec<Document>>;
}

/// A store of documents which can be created and removed.
pub trait ArticleStore: Send + Sync {
	/// Inserts a document, replacing any document with the same id
	fn add(&self, doc: Document) -> Result<()>;

	fn get(&self, id: &DocumentId) -> Result<Document>;

	/// Removes every listed document in one call, returning how many existed
	fn delete_many(&self, ids: &[DocumentId]) -> Result<usize>;

	fn len(&self) -> usize;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// An in-memory index. A document matches a query when one of its fields in
/// the requested locale holds a match.
pub struct MemoryIndex {
	docs: RwLock<BTreeMap<DocumentId, Document>>,
	analyzers: Analyzers,
	locator: Locator,
}

impl Default for MemoryIndex {
	fn default() -> Self {
		Self::new(Analyzers::default())
	}
}

impl MemoryIndex {
	pub fn new(analyzers: Analyzers) -> Self {
		Self {
			docs: RwLock::new(BTreeMap::new()),
			analyzers,
			locator: Locator::default(),
		}
	}

	/// Sets the matching semantics used to select documents
	pub fn with_locator(mut self, locator: Locator) -> Self {
		self.locator = locator;
		self
	}

	pub fn analyzers(&self) -> &Analyzers {
		&self.analyzers
	}

	fn matches(&self, doc: &Document, query: &[AnalyzedTerm], locale: &Locale) -> Result<bool> {
		for (key, text) in doc.fields() {
			if &key.locale != locale {
				continue;
			}
			let terms = self.analyzers.analyze(text, locale)?;
			if !self.locator.locate(&terms, query).is_empty() {
				return Ok(true);
			}
		}
		Ok(false)
	}
}

impl Searcher for MemoryIndex {
	fn search(&self, query: &str, locale: &Locale) -> Result<Vec<Document>> {
		let query = self.analyzers.analyze(query, locale)?;
		if query.is_empty() {
			return Ok(Vec::new());
		}
		let docs = self.docs.read();
		let mut hits = Vec::new();
		for doc in docs.values() {
			if self.matches(doc, &query, locale)? {
				hits.push(doc.clone());
			}
		}
		debug!(%locale, hits = hits.len(), total = docs.len(), "searched the index");
		Ok(hits)
	}
}

impl ArticleStore for MemoryIndex {
	fn add(&self, doc: Document) -> Result<()> {
		trace!(id = %doc.id(), "adding document");
		self.docs.write().insert(doc.id().clone(), doc);
		Ok(())
	}

	fn get(&self, id: &DocumentId) -> Result<Document> {
		match self.docs.read().get(id) {
			Some(doc) => Ok(doc.clone()),
			None => bail!(Error::DocumentNotFound(id.clone())),
		}
	}

	fn delete_many(&self, ids: &[DocumentId]) -> Result<usize> {
		let mut docs = self.docs.write();
		let removed = ids.iter().filter(|id| docs.remove(*id).is_some()).count();
		debug!(requested = ids.len(), removed, "deleted documents");
		Ok(removed)
	}

	fn len(&self) -> usize {
		self.docs.read().len()
	}
}

/// Searches, then highlights every hit in parallel. The results are ordered
/// by document id, whatever order the searcher returned the hits in.
pub fn highlight_hits(
	searcher: &dyn Searcher,
	assembler: &Assembler,
	query: &str,
	locale: &Locale,
	fields: &[&str],
) -> Result<Vec<SnippetResult>> {
	let mut hits = searcher.search(query, locale)?;
	hits.sort_by(|a, b| a.id().cmp(b.id()));
	hits.par_iter().map(|doc| assembler.assemble(doc, query, locale, fields)).collect()
}
