//! Statement option vocabulary
//!
//! Typed forms of the cursor, concurrency, holdability, and isolation
//! parameters that richer client contracts attach to statement creation.
//! The engine only honors the defaults; the rest exist so callers written
//! against a fuller contract can still express their requests and get a
//! predictable answer.

use serde::{Deserialize, Serialize};

/// Result-set cursor traversal mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorType {
    /// Rows are consumed front to back, once
    #[default]
    ForwardOnly,
    /// Scrollable, insensitive to concurrent changes
    ScrollInsensitive,
    /// Scrollable, sensitive to concurrent changes
    ScrollSensitive,
}

/// Result-set concurrency mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Concurrency {
    /// Rows cannot be updated in place
    #[default]
    ReadOnly,
    /// Rows may be updated in place
    Updatable,
}

/// Cursor holdability across commit boundaries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Holdability {
    /// Cursors stay open over commit
    #[default]
    HoldCursorsOverCommit,
    /// Cursors close at commit
    CloseCursorsAtCommit,
}

/// Transaction isolation level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum IsolationLevel {
    /// No transaction boundaries at all — the engine's only mode
    #[default]
    None,
    ReadUncommitted,
    ReadCommitted,
    RepeatableRead,
    Serializable,
}

/// Whether a prepared statement should hand auto-generated keys back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratedKeys {
    /// Request generated keys in the result
    Return,
    /// Explicitly decline generated keys
    None,
}

/// Options attached to statement creation and preparation.
///
/// # Examples
///
/// ```
/// use taos_conn::connection::{Concurrency, CursorType, StatementOptions};
///
/// let options = StatementOptions::new()
///     .cursor(CursorType::ForwardOnly)
///     .concurrency(Concurrency::ReadOnly);
/// assert_eq!(options, StatementOptions::default());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementOptions {
    /// Cursor traversal mode
    pub cursor: CursorType,
    /// Concurrency mode
    pub concurrency: Concurrency,
    /// Holdability across commit boundaries
    pub holdability: Holdability,
}

impl StatementOptions {
    /// Default options: forward-only, read-only, hold cursors over commit
    pub fn new() -> Self {
        Self::default()
    }

    /// Set cursor traversal mode
    pub fn cursor(mut self, cursor: CursorType) -> Self {
        self.cursor = cursor;
        self
    }

    /// Set concurrency mode
    pub fn concurrency(mut self, concurrency: Concurrency) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Set holdability
    pub fn holdability(mut self, holdability: Holdability) -> Self {
        self.holdability = holdability;
        self
    }
}

/// A named or unnamed transaction savepoint.
///
/// Only part of the vocabulary for interface compatibility — the engine has
/// no savepoints, and every savepoint operation on a connection is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Savepoint {
    name: Option<String>,
}

impl Savepoint {
    /// An unnamed savepoint
    pub fn unnamed() -> Self {
        Self { name: None }
    }

    /// A named savepoint
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    /// The savepoint name, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}
