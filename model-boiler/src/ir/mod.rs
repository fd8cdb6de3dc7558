//! Intermediate Representation (IR) module.
//!
//! This module defines the transient data structures that flow through one
//! generation call: declaration fragments produced by the splitter, property
//! declarations produced by the scanner, and resolved fields consumed by the
//! emitter. Nothing here outlives a single call.

pub mod fragment;
pub mod property;

pub use fragment::{DeclarationFragment, DeclarationKind, Span};
pub use property::{PropertyDeclaration, ResolvedField};
