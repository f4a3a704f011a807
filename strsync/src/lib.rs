#![forbid(unsafe_code)]
//! Tooling for Android `strings.xml` translation files.
//!
//! Two transformations are provided, both pure functions over an in-memory
//! [`Document`] tree:
//!
//! - [`normalize`]: rewrites the whitespace of strings containing inline
//!   markup so the resource compiler does not glue words together.
//! - [`synchronize`]: reshapes a translation after its master document,
//!   keeping existing translations and marking missing ones as `NEW` comments.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use strsync::{Document, synchronize, traits::Parser};
//!
//! let master = Document::read_from("res/values/strings.xml")?;
//! let translation = Document::read_from("res/values-de/strings.xml")?;
//! synchronize(&master, &translation)?.write_to("res/values-de/strings.xml")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod document;
pub mod error;
pub mod options;
pub mod sync;
pub mod traits;
pub mod whitespace;
mod xml;

// Re-export most used types for easy consumption
pub use crate::{
    document::{Comment, Document, Element, EntryKind, Node, ResourceNode},
    error::Error,
    options::SyncOptions,
    sync::{SyncReport, synchronize, synchronize_with},
    traits::Parser,
    whitespace::{FixReport, is_normalized, normalize, normalize_with_report},
};
