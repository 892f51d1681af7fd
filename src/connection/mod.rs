//! Connection management
//!
//! This module handles:
//! * Connection configuration
//! * Connection lifecycle (open, close, liveness)
//! * Operation-support classification and guard enforcement
//! * The engine-binding seam

mod conn;
mod engine;
mod options;
mod state;
mod support;

pub use conn::{Connection, ConnectionConfig};
pub use engine::Engine;
pub use options::{
    Concurrency, CursorType, GeneratedKeys, Holdability, IsolationLevel, Savepoint,
    StatementOptions,
};
pub use state::{ConnectionState, StateCell};
pub use support::{Operation, Support};
