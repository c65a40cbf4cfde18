//! Creates throwaway articles, and removes them again once they are no longer
//! needed.

use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use parking_lot::Mutex;

use crate::doc::{Document, DocumentId, Locale};
use crate::idx::search::ArticleStore;

/// Creates demo articles with a `title`, a `description` and a `content`
/// field, remembering their ids so they can all be deleted at once.
#[derive(Debug, Default)]
pub struct ArticleDemoDataCreator {
	sequence: AtomicU64,
	created: Mutex<Vec<DocumentId>>,
}

impl ArticleDemoDataCreator {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds an article to the store, with every field set in one locale.
	pub fn create_article(
		&self,
		store: &dyn ArticleStore,
		title: &str,
		description: &str,
		content: &str,
		locale: &Locale,
	) -> Result<Document> {
		let n = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
		let id = DocumentId::from(format!("article-{n}"));
		let doc = Document::builder(id.clone())
			.field("title", locale.clone(), title)
			.field("description", locale.clone(), description)
			.field("content", locale.clone(), content)
			.build()?;
		store.add(doc.clone())?;
		self.created.lock().push(id);
		Ok(doc)
	}

	/// The ids of the articles created and not yet deleted
	pub fn created(&self) -> Vec<DocumentId> {
		self.created.lock().clone()
	}

	/// Deletes every article created so far with a single bulk call.
	pub fn delete(&self, store: &dyn ArticleStore) -> Result<usize> {
		let ids = std::mem::take(&mut *self.created.lock());
		if ids.is_empty() {
			return Ok(0);
		}
		match store.delete_many(&ids) {
			Ok(n) => {
				info!("Deleted {n} demo articles");
				Ok(n)
			}
			Err(e) => {
				// Keep the ids, so that the deletion can be retried
				self.created.lock().extend(ids);
				Err(e)
			}
		}
	}
}
