use std::sync::LazyLock;

/// The maximum number of characters a snippet window spans (defaults to 100)
pub static SNIPPET_MAX_LENGTH: LazyLock<usize> =
	lazy_env_parse!("GLINT_SNIPPET_MAX_LENGTH", usize, 100);

/// The number of characters allowed between two snippet windows for them to be merged
/// (defaults to 0, only touching or overlapping windows are merged)
pub static SNIPPET_MERGE_GAP: LazyLock<usize> = lazy_env_parse!("GLINT_SNIPPET_MERGE_GAP", usize, 0);

/// The marker inserted before highlighted text
pub static HIGHLIGHT_TAG_OPEN: LazyLock<String> =
	lazy_env_parse!("GLINT_HIGHLIGHT_TAG_OPEN", String, || "<hl>".to_owned());

/// The marker inserted after highlighted text
pub static HIGHLIGHT_TAG_CLOSE: LazyLock<String> =
	lazy_env_parse!("GLINT_HIGHLIGHT_TAG_CLOSE", String, || "</hl>".to_owned());

/// The separator used when a field yields more than one snippet
pub static SNIPPET_SEPARATOR: LazyLock<String> =
	lazy_env_parse!("GLINT_SNIPPET_SEPARATOR", String, || " ".to_owned());
