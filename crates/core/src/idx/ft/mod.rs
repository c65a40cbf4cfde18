pub mod analyzer;
pub mod assembler;
pub mod highlighter;
pub mod locator;
pub mod snippet;

/// A character offset inside a field text
pub type Position = u32;
