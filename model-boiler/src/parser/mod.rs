//! Parser module for extracting declarations from Swift source text.
//!
//! This module contains:
//! - Comment-free source buffer with span helpers
//! - Declaration splitter for nested types
//! - Stored property scanner
//! - Identifier word splitting

pub mod scanner;
pub mod source;
pub mod splitter;
pub mod words;

pub use scanner::DeclarationScanner;
pub use source::SourceText;
pub use splitter::DeclarationSplitter;
