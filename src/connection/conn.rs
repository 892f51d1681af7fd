//! Core connection type

use super::engine::Engine;
use super::options::{GeneratedKeys, Holdability, IsolationLevel, Savepoint, StatementOptions};
use super::state::{ConnectionState, StateCell};
use super::support::{Operation, Support};
use crate::client::address::keys;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Connection configuration
///
/// The normalized result of address parsing, or built directly through the
/// fluent methods. A field is `None` when the source supplied no value for
/// it — never empty-but-present. Immutable once a connection is constructed
/// from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Engine host; absent means "use default resolution"
    pub host: Option<String>,
    /// Engine port; absent or 0 means "use default"
    pub port: Option<u16>,
    /// Database selected at connect time
    pub database: Option<String>,
    /// Named options, well-known and engine-specific alike
    pub options: HashMap<String, String>,
}

impl ConnectionConfig {
    /// Empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set database name
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Add a named option
    pub fn option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Login user, if configured
    pub fn user(&self) -> Option<&str> {
        self.options.get(keys::USER).map(String::as_str)
    }

    /// Login password, if configured
    pub fn password(&self) -> Option<&str> {
        self.options.get(keys::PASSWORD).map(String::as_str)
    }

    /// Client character set, if configured
    pub fn charset(&self) -> Option<&str> {
        self.options.get(keys::CHARSET).map(String::as_str)
    }

    /// Client locale, if configured
    pub fn locale(&self) -> Option<&str> {
        self.options.get(keys::LOCALE).map(String::as_str)
    }

    /// Client time zone, if configured
    pub fn timezone(&self) -> Option<&str> {
        self.options.get(keys::TIME_ZONE).map(String::as_str)
    }
}

/// A logical connection to the engine.
///
/// Every operation runs the same two-step dispatch: the closed gate first,
/// then the operation's [`Support`] class. Operations the engine has no
/// equivalent for fail with [`Error::Unsupported`] whenever the handle is
/// open; compatibility no-ops succeed with a fixed value and mutate nothing.
///
/// The handle owns its catalog name and a client-info map; everything else
/// lives behind the [`Engine`] binding.
pub struct Connection<E: Engine> {
    engine: E,
    config: ConnectionConfig,
    state: StateCell,
    catalog: Mutex<Option<String>>,
    client_info: Mutex<HashMap<String, String>>,
}

impl<E: Engine> Connection<E> {
    /// Construct a handle over an established engine binding.
    ///
    /// The handle starts open, with the active catalog seeded from the
    /// configured database.
    pub fn new(engine: E, config: ConnectionConfig) -> Self {
        tracing::debug!(
            host = config.host.as_deref().unwrap_or("<default>"),
            database = config.database.as_deref().unwrap_or("<none>"),
            "connection handle constructed"
        );
        crate::metrics::counters::connection_opened();

        let catalog = Mutex::new(config.database.clone());
        Self {
            engine,
            config,
            state: StateCell::new(),
            catalog,
            client_info: Mutex::new(HashMap::new()),
        }
    }

    /// Configuration this connection was built from
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Current connection state
    pub fn state(&self) -> ConnectionState {
        self.state.state()
    }

    /// Whether the handle has been closed
    pub fn is_closed(&self) -> bool {
        self.state.is_closed()
    }

    /// Close the handle.
    ///
    /// Idempotent: the second and later calls are no-ops. The engine session
    /// itself is torn down when the handle drops; its close is idempotent and
    /// safe to race against in-flight requests at the transport layer.
    pub fn close(&self) {
        if self.state.close() {
            tracing::debug!("connection closed");
            crate::metrics::counters::connection_closed();
        }
    }

    /// Closed gate: the universal first check of every operation.
    fn gate(&self, op: Operation) -> Result<()> {
        if self.state.is_closed() {
            crate::metrics::counters::operation_rejected(op.name(), "closed");
            return Err(Error::ConnectionClosed);
        }
        Ok(())
    }

    /// Gate, then dispatch on the operation's support class.
    fn guard(&self, op: Operation) -> Result<()> {
        self.gate(op)?;
        match op.support() {
            Support::Unsupported => Err(self.unsupported(op)),
            Support::Implemented | Support::NoOp => Ok(()),
        }
    }

    fn unsupported(&self, op: Operation) -> Error {
        crate::metrics::counters::operation_rejected(op.name(), "unsupported");
        Error::Unsupported(op)
    }

    /// Gate, then reject: the whole story of an unsupported operation.
    fn reject<T>(&self, op: Operation) -> Result<T> {
        self.guard(op)?;
        Err(Error::Unsupported(op))
    }

    // --- statements ---

    /// Create an executable statement with default options.
    pub async fn create_statement(&mut self) -> Result<E::Statement> {
        self.create_statement_with(StatementOptions::default()).await
    }

    /// Create an executable statement with explicit options.
    pub async fn create_statement_with(
        &mut self,
        options: StatementOptions,
    ) -> Result<E::Statement> {
        self.guard(Operation::CreateStatement)?;
        self.engine.create_statement(options).await
    }

    /// Prepare a parameterized statement with default options.
    pub async fn prepare(&mut self, sql: &str) -> Result<E::Prepared> {
        self.prepare_with(sql, StatementOptions::default()).await
    }

    /// Prepare a parameterized statement with explicit options.
    pub async fn prepare_with(
        &mut self,
        sql: &str,
        options: StatementOptions,
    ) -> Result<E::Prepared> {
        self.guard(Operation::Prepare)?;
        self.engine.prepare(sql, options).await
    }

    /// Prepare a statement, stating whether generated keys should be
    /// returned.
    ///
    /// The engine cannot hand generated keys back: requesting them fails
    /// with [`Error::Unsupported`]. Explicitly declining them falls through
    /// to an ordinary default-options prepare.
    pub async fn prepare_returning_keys(
        &mut self,
        sql: &str,
        keys: GeneratedKeys,
    ) -> Result<E::Prepared> {
        self.guard(Operation::PrepareWithGeneratedKeys)?;
        match keys {
            GeneratedKeys::Return => Err(self.unsupported(Operation::PrepareWithGeneratedKeys)),
            GeneratedKeys::None => self.engine.prepare(sql, StatementOptions::default()).await,
        }
    }

    /// Prepare a statement returning generated columns selected by index.
    pub fn prepare_returning_column_indexes(
        &self,
        _sql: &str,
        _columns: &[u32],
    ) -> Result<E::Prepared> {
        self.reject(Operation::PrepareWithColumnIndexes)
    }

    /// Prepare a statement returning generated columns selected by name.
    pub fn prepare_returning_column_names(
        &self,
        _sql: &str,
        _columns: &[&str],
    ) -> Result<E::Prepared> {
        self.reject(Operation::PrepareWithColumnNames)
    }

    /// Prepare a stored-procedure call. The engine has no stored procedures.
    pub fn prepare_call(&self, _sql: &str) -> Result<E::Prepared> {
        self.reject(Operation::PrepareCall)
    }

    /// Prepare a stored-procedure call with explicit options.
    pub fn prepare_call_with(&self, _sql: &str, _options: StatementOptions) -> Result<E::Prepared> {
        self.reject(Operation::PrepareCall)
    }

    /// Translate a statement into the engine's native grammar.
    ///
    /// The engine consumes statements as written; the input comes back
    /// unchanged.
    pub fn native_sql<'a>(&self, sql: &'a str) -> Result<&'a str> {
        self.guard(Operation::NativeSql)?;
        Ok(sql)
    }

    // --- transaction compatibility surface ---

    /// Auto-commit mode. The engine commits every statement; always `true`.
    pub fn auto_commit(&self) -> Result<bool> {
        self.guard(Operation::AutoCommit)?;
        Ok(true)
    }

    /// Accepted for compatibility; the engine has no other mode.
    pub fn set_auto_commit(&self, _auto_commit: bool) -> Result<()> {
        self.guard(Operation::SetAutoCommit)?;
        Ok(())
    }

    /// Accepted for compatibility; there is no transaction to commit.
    pub fn commit(&self) -> Result<()> {
        self.guard(Operation::Commit)?;
        Ok(())
    }

    /// Accepted for compatibility; there is no transaction to roll back.
    pub fn rollback(&self) -> Result<()> {
        self.guard(Operation::Rollback)?;
        Ok(())
    }

    /// Read-only mode. The engine rejects writes through this interface;
    /// always `true`.
    pub fn read_only(&self) -> Result<bool> {
        self.guard(Operation::ReadOnly)?;
        Ok(true)
    }

    /// Accepted for compatibility.
    pub fn set_read_only(&self, _read_only: bool) -> Result<()> {
        self.guard(Operation::SetReadOnly)?;
        Ok(())
    }

    /// Transaction isolation. Always [`IsolationLevel::None`].
    pub fn transaction_isolation(&self) -> Result<IsolationLevel> {
        self.guard(Operation::TransactionIsolation)?;
        Ok(IsolationLevel::None)
    }

    /// Accepted for compatibility; the engine has no isolation levels.
    pub fn set_transaction_isolation(&self, _level: IsolationLevel) -> Result<()> {
        self.guard(Operation::SetTransactionIsolation)?;
        Ok(())
    }

    /// Cursor holdability. Always [`Holdability::HoldCursorsOverCommit`].
    pub fn holdability(&self) -> Result<Holdability> {
        self.guard(Operation::Holdability)?;
        Ok(Holdability::HoldCursorsOverCommit)
    }

    /// Accepted for compatibility.
    pub fn set_holdability(&self, _holdability: Holdability) -> Result<()> {
        self.guard(Operation::SetHoldability)?;
        Ok(())
    }

    /// Set an unnamed savepoint. The engine has no savepoints.
    pub fn savepoint(&self) -> Result<Savepoint> {
        self.reject(Operation::Savepoint)
    }

    /// Set a named savepoint. The engine has no savepoints.
    pub fn savepoint_named(&self, _name: &str) -> Result<Savepoint> {
        self.reject(Operation::Savepoint)
    }

    /// Roll back to a savepoint. The engine has no savepoints.
    pub fn rollback_to(&self, _savepoint: &Savepoint) -> Result<()> {
        self.reject(Operation::RollbackToSavepoint)
    }

    /// Release a savepoint. The engine has no savepoints.
    pub fn release_savepoint(&self, _savepoint: &Savepoint) -> Result<()> {
        self.reject(Operation::ReleaseSavepoint)
    }

    // --- type surface ---

    /// Custom type-name mappings. The engine has no user-defined types.
    pub fn type_map(&self) -> Result<HashMap<String, String>> {
        self.reject(Operation::TypeMap)
    }

    /// Install custom type-name mappings. The engine has no user-defined
    /// types.
    pub fn set_type_map(&self, _map: HashMap<String, String>) -> Result<()> {
        self.reject(Operation::SetTypeMap)
    }

    /// Construct an engine array value. The engine has no array constructor.
    pub fn create_array(&self, _type_name: &str, _elements: &[Value]) -> Result<Value> {
        self.reject(Operation::CreateArray)
    }

    /// Construct an engine struct value. The engine has no struct
    /// constructor.
    pub fn create_struct(&self, _type_name: &str, _attributes: &[Value]) -> Result<Value> {
        self.reject(Operation::CreateStruct)
    }

    // --- catalog, schema, warnings ---

    /// Active catalog name.
    pub fn catalog(&self) -> Result<Option<String>> {
        self.guard(Operation::Catalog)?;
        Ok(self.catalog.lock().expect("catalog lock poisoned").clone())
    }

    /// Change the active catalog name on the handle.
    pub fn set_catalog(&self, catalog: &str) -> Result<()> {
        self.guard(Operation::SetCatalog)?;
        *self.catalog.lock().expect("catalog lock poisoned") = Some(catalog.to_string());
        Ok(())
    }

    /// Active schema. The engine has no schemas; always absent.
    pub fn schema(&self) -> Result<Option<String>> {
        self.guard(Operation::Schema)?;
        Ok(None)
    }

    /// Accepted for compatibility; the engine has no schemas.
    pub fn set_schema(&self, _schema: &str) -> Result<()> {
        self.guard(Operation::SetSchema)?;
        Ok(())
    }

    /// Pending warnings. The engine reports none through this interface.
    pub fn warnings(&self) -> Result<Option<String>> {
        self.guard(Operation::Warnings)?;
        Ok(None)
    }

    /// Accepted for compatibility; there are never warnings to clear.
    pub fn clear_warnings(&self) -> Result<()> {
        self.guard(Operation::ClearWarnings)?;
        Ok(())
    }

    /// Accepted for compatibility; closing the handle is the real way out.
    pub fn abort(&self) -> Result<()> {
        self.guard(Operation::Abort)?;
        Ok(())
    }

    // --- liveness and metadata ---

    /// Metadata collaborator for this session.
    pub fn metadata(&self) -> Result<E::Metadata> {
        self.guard(Operation::Metadata)?;
        Ok(self.engine.metadata())
    }

    /// Probe whether the engine session is still usable.
    ///
    /// The timeout is handed to the binding untouched; a failed probe maps
    /// to `Ok(false)`, not an error.
    pub async fn is_valid(&mut self, timeout: Duration) -> Result<bool> {
        self.guard(Operation::IsValid)?;
        Ok(self.engine.ping(timeout).await.is_ok())
    }

    /// Engine-side network timeout. The engine exposes no such knob.
    pub fn network_timeout(&self) -> Result<u64> {
        self.reject(Operation::NetworkTimeout)
    }

    /// Set the engine-side network timeout.
    ///
    /// The argument is validated after the closed gate and before the
    /// rejection: a negative timeout is the caller's bug and reported as
    /// such.
    pub fn set_network_timeout(&self, milliseconds: i64) -> Result<()> {
        self.gate(Operation::SetNetworkTimeout)?;
        if milliseconds < 0 {
            return Err(Error::invalid_argument(format!(
                "network timeout must be non-negative, got {milliseconds}"
            )));
        }
        Err(self.unsupported(Operation::SetNetworkTimeout))
    }

    // --- client info ---

    /// Client-info value for `name`.
    pub fn client_info(&self, name: &str) -> Result<Option<String>> {
        self.guard(Operation::ClientInfo)?;
        Ok(self
            .client_info
            .lock()
            .expect("client info lock poisoned")
            .get(name)
            .cloned())
    }

    /// Snapshot of the whole client-info map.
    pub fn client_info_all(&self) -> Result<HashMap<String, String>> {
        self.guard(Operation::ClientInfo)?;
        Ok(self
            .client_info
            .lock()
            .expect("client info lock poisoned")
            .clone())
    }

    /// Set one client-info entry.
    pub fn set_client_info(&self, name: &str, value: &str) -> Result<()> {
        self.guard(Operation::SetClientInfo)?;
        self.client_info
            .lock()
            .expect("client info lock poisoned")
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    /// Merge a table of client-info entries into the map.
    pub fn set_client_info_all(&self, entries: HashMap<String, String>) -> Result<()> {
        self.guard(Operation::SetClientInfo)?;
        self.client_info
            .lock()
            .expect("client info lock poisoned")
            .extend(entries);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullEngine;

    impl Engine for NullEngine {
        type Statement = ();
        type Prepared = ();
        type Metadata = ();

        async fn create_statement(&mut self, _options: StatementOptions) -> Result<()> {
            Ok(())
        }

        async fn prepare(&mut self, _sql: &str, _options: StatementOptions) -> Result<()> {
            Ok(())
        }

        async fn ping(&mut self, _timeout: Duration) -> Result<()> {
            Ok(())
        }

        fn metadata(&self) {}
    }

    fn open_connection() -> Connection<NullEngine> {
        Connection::new(NullEngine, ConnectionConfig::new().database("db"))
    }

    #[test]
    fn test_config_fluent_construction() {
        let config = ConnectionConfig::new()
            .host("localhost")
            .port(6030)
            .database("log")
            .option("user", "root")
            .option("password", "taosdata");

        assert_eq!(config.host, Some("localhost".to_string()));
        assert_eq!(config.port, Some(6030));
        assert_eq!(config.database, Some("log".to_string()));
        assert_eq!(config.user(), Some("root"));
        assert_eq!(config.password(), Some("taosdata"));
        assert_eq!(config.charset(), None);
    }

    #[test]
    fn test_catalog_seeded_from_database() {
        let conn = open_connection();
        assert_eq!(conn.catalog().unwrap(), Some("db".to_string()));

        conn.set_catalog("other").unwrap();
        assert_eq!(conn.catalog().unwrap(), Some("other".to_string()));
    }

    #[test]
    fn test_close_is_idempotent_and_terminal() {
        let conn = open_connection();
        assert!(!conn.is_closed());
        assert_eq!(conn.state(), ConnectionState::Open);

        conn.close();
        conn.close();

        assert!(conn.is_closed());
        assert_eq!(conn.state(), ConnectionState::Closed);
        assert!(matches!(
            conn.commit().unwrap_err(),
            Error::ConnectionClosed
        ));
    }

    #[test]
    fn test_closed_gate_wins_over_unsupported() {
        let conn = open_connection();
        conn.close();
        assert!(matches!(
            conn.savepoint().unwrap_err(),
            Error::ConnectionClosed
        ));
    }

    #[test]
    fn test_network_timeout_check_order() {
        let conn = open_connection();
        assert!(matches!(
            conn.set_network_timeout(-1).unwrap_err(),
            Error::InvalidArgument(_)
        ));
        assert!(matches!(
            conn.set_network_timeout(0).unwrap_err(),
            Error::Unsupported(Operation::SetNetworkTimeout)
        ));

        conn.close();
        assert!(matches!(
            conn.set_network_timeout(-1).unwrap_err(),
            Error::ConnectionClosed
        ));
    }

    #[test]
    fn test_generated_keys_variant_gate() {
        let mut conn = open_connection();
        let err = tokio_test::block_on(
            conn.prepare_returning_keys("insert into t values (?, ?)", GeneratedKeys::Return),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::Unsupported(Operation::PrepareWithGeneratedKeys)
        ));

        tokio_test::block_on(
            conn.prepare_returning_keys("insert into t values (?, ?)", GeneratedKeys::None),
        )
        .unwrap();
    }

    #[test]
    fn test_noop_surface_fixed_values() {
        let conn = open_connection();
        assert!(conn.auto_commit().unwrap());
        assert!(conn.read_only().unwrap());
        assert_eq!(conn.transaction_isolation().unwrap(), IsolationLevel::None);
        assert_eq!(
            conn.holdability().unwrap(),
            Holdability::HoldCursorsOverCommit
        );
        assert_eq!(conn.schema().unwrap(), None);
        assert_eq!(conn.warnings().unwrap(), None);
        assert_eq!(conn.native_sql("select 1").unwrap(), "select 1");
    }

    #[test]
    fn test_client_info_round_trip() {
        let conn = open_connection();
        conn.set_client_info("app", "bench").unwrap();
        assert_eq!(conn.client_info("app").unwrap(), Some("bench".to_string()));
        assert_eq!(conn.client_info("missing").unwrap(), None);
    }
}
