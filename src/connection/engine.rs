//! Engine binding seam
//!
//! The connection handle never talks to the wire itself. Everything that
//! reaches the engine goes through this trait, implemented by the transport
//! layer. The handle only decides *whether* a request may proceed; the
//! binding decides *how* it is carried out.

use crate::connection::StatementOptions;
use crate::Result;
use std::time::Duration;

/// Binding to a live engine session.
///
/// The associated types are opaque to the connection layer: statements,
/// prepared statements, and the metadata handle are produced here and handed
/// straight back to the caller.
#[allow(async_fn_in_trait)]
pub trait Engine {
    /// Executable statement handle
    type Statement;

    /// Parameterized prepared-statement handle
    type Prepared;

    /// Metadata collaborator handle
    type Metadata;

    /// Create an executable statement.
    async fn create_statement(&mut self, options: StatementOptions) -> Result<Self::Statement>;

    /// Prepare a parameterized statement.
    async fn prepare(&mut self, sql: &str, options: StatementOptions) -> Result<Self::Prepared>;

    /// Probe the engine session.
    ///
    /// The binding owns the timeout: the connection layer passes it through
    /// without applying any deadline of its own.
    async fn ping(&mut self, timeout: Duration) -> Result<()>;

    /// Metadata collaborator for this session.
    fn metadata(&self) -> Self::Metadata;
}
