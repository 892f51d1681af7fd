//! # taos-conn
//!
//! Connection string parsing and connection lifecycle for TDengine clients.
//!
//! This crate is the front half of a client driver: it turns a `taos://`
//! connection address into a normalized [`ConnectionConfig`], and it wraps an
//! established engine session in a [`Connection`] handle that decides, for
//! every operation, whether the request may proceed at all. The wire
//! transport, query execution, and result decoding live behind the
//! [`Engine`] trait and are not part of this crate.
//!
//! ## Address format
//!
//! ```text
//! taos://[host][:port][/[database]][?key=value&key=value...]
//! ```
//!
//! `tsdb://` is an alias; both schemes match case-insensitively. Every
//! segment is optional, and an empty segment means absent, not empty.
//!
//! ## Example
//!
//! ```
//! use std::collections::HashMap;
//!
//! let mut seed = HashMap::new();
//! seed.insert("user".to_string(), "root".to_string());
//!
//! let config = taos_conn::parse_with(
//!     "taos://127.0.0.1:6030/db?user=ignored&charset=UTF-8",
//!     seed,
//! )?;
//! assert_eq!(config.host.as_deref(), Some("127.0.0.1"));
//! assert_eq!(config.user(), Some("root")); // seed wins
//! assert_eq!(config.charset(), Some("UTF-8"));
//! # Ok::<(), taos_conn::Error>(())
//! ```

pub mod client;
pub mod connection;
pub mod error;
pub(crate) mod metrics;

pub use client::{accepts_scheme, parse, parse_with};
pub use connection::{
    Connection, ConnectionConfig, ConnectionState, Engine, GeneratedKeys, Holdability,
    IsolationLevel, Operation, Savepoint, StatementOptions, Support,
};
pub use error::{Error, Result};
