//! Operation support classification
//!
//! Every public operation on a connection handle is listed here together
//! with its support class. The guard in `conn.rs` is written once against
//! this table instead of repeating a liveness check per method: the closed
//! check always runs first, then `Unsupported` operations are rejected
//! uniformly, and `Implemented` / `NoOp` operations fall through to their
//! method bodies.

/// Support class of an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Support {
    /// Performs a real effect on the handle or the engine
    Implemented,

    /// The engine has no equivalent; rejected with a stable error, always
    Unsupported,

    /// Accepted for interface compatibility; succeeds with a fixed value and
    /// mutates nothing
    NoOp,
}

/// A public operation on the connection handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateStatement,
    Prepare,
    PrepareWithGeneratedKeys,
    PrepareWithColumnIndexes,
    PrepareWithColumnNames,
    PrepareCall,
    NativeSql,
    AutoCommit,
    SetAutoCommit,
    Commit,
    Rollback,
    Close,
    IsClosed,
    Metadata,
    ReadOnly,
    SetReadOnly,
    Catalog,
    SetCatalog,
    TransactionIsolation,
    SetTransactionIsolation,
    Warnings,
    ClearWarnings,
    TypeMap,
    SetTypeMap,
    Holdability,
    SetHoldability,
    Savepoint,
    RollbackToSavepoint,
    ReleaseSavepoint,
    CreateArray,
    CreateStruct,
    Schema,
    SetSchema,
    Abort,
    IsValid,
    ClientInfo,
    SetClientInfo,
    NetworkTimeout,
    SetNetworkTimeout,
}

impl Operation {
    /// Support class of this operation.
    ///
    /// `PrepareWithGeneratedKeys` is `Implemented` here because its rejection
    /// depends on the requested variant, not on the operation itself; the
    /// method body applies that gate.
    pub fn support(self) -> Support {
        use Operation::*;

        match self {
            CreateStatement | Prepare | PrepareWithGeneratedKeys | Close | IsClosed | Metadata
            | Catalog | SetCatalog | IsValid | ClientInfo | SetClientInfo => Support::Implemented,

            PrepareWithColumnIndexes | PrepareWithColumnNames | PrepareCall | TypeMap
            | SetTypeMap | Savepoint | RollbackToSavepoint | ReleaseSavepoint | CreateArray
            | CreateStruct | NetworkTimeout | SetNetworkTimeout => Support::Unsupported,

            NativeSql | AutoCommit | SetAutoCommit | Commit | Rollback | ReadOnly | SetReadOnly
            | TransactionIsolation | SetTransactionIsolation | Warnings | ClearWarnings
            | Holdability | SetHoldability | Schema | SetSchema | Abort => Support::NoOp,
        }
    }

    /// Stable operation name, used in error messages and metric labels.
    pub fn name(self) -> &'static str {
        use Operation::*;

        match self {
            CreateStatement => "create_statement",
            Prepare => "prepare",
            PrepareWithGeneratedKeys => "prepare_returning_keys",
            PrepareWithColumnIndexes => "prepare_returning_column_indexes",
            PrepareWithColumnNames => "prepare_returning_column_names",
            PrepareCall => "prepare_call",
            NativeSql => "native_sql",
            AutoCommit => "auto_commit",
            SetAutoCommit => "set_auto_commit",
            Commit => "commit",
            Rollback => "rollback",
            Close => "close",
            IsClosed => "is_closed",
            Metadata => "metadata",
            ReadOnly => "read_only",
            SetReadOnly => "set_read_only",
            Catalog => "catalog",
            SetCatalog => "set_catalog",
            TransactionIsolation => "transaction_isolation",
            SetTransactionIsolation => "set_transaction_isolation",
            Warnings => "warnings",
            ClearWarnings => "clear_warnings",
            TypeMap => "type_map",
            SetTypeMap => "set_type_map",
            Holdability => "holdability",
            SetHoldability => "set_holdability",
            Savepoint => "savepoint",
            RollbackToSavepoint => "rollback_to_savepoint",
            ReleaseSavepoint => "release_savepoint",
            CreateArray => "create_array",
            CreateStruct => "create_struct",
            Schema => "schema",
            SetSchema => "set_schema",
            Abort => "abort",
            IsValid => "is_valid",
            ClientInfo => "client_info",
            SetClientInfo => "set_client_info",
            NetworkTimeout => "network_timeout",
            SetNetworkTimeout => "set_network_timeout",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transactional_surface_is_unsupported() {
        for op in [
            Operation::PrepareCall,
            Operation::Savepoint,
            Operation::RollbackToSavepoint,
            Operation::ReleaseSavepoint,
            Operation::TypeMap,
            Operation::SetTypeMap,
            Operation::CreateArray,
            Operation::CreateStruct,
            Operation::PrepareWithColumnIndexes,
            Operation::PrepareWithColumnNames,
            Operation::NetworkTimeout,
            Operation::SetNetworkTimeout,
        ] {
            assert_eq!(op.support(), Support::Unsupported, "{op}");
        }
    }

    #[test]
    fn test_compat_surface_is_noop() {
        for op in [
            Operation::AutoCommit,
            Operation::SetAutoCommit,
            Operation::Commit,
            Operation::Rollback,
            Operation::ReadOnly,
            Operation::SetReadOnly,
            Operation::TransactionIsolation,
            Operation::SetTransactionIsolation,
            Operation::Holdability,
            Operation::SetHoldability,
            Operation::Schema,
            Operation::SetSchema,
            Operation::Warnings,
            Operation::ClearWarnings,
            Operation::Abort,
            Operation::NativeSql,
        ] {
            assert_eq!(op.support(), Support::NoOp, "{op}");
        }
    }

    #[test]
    fn test_statement_and_lifecycle_surface_is_implemented() {
        for op in [
            Operation::CreateStatement,
            Operation::Prepare,
            Operation::PrepareWithGeneratedKeys,
            Operation::Close,
            Operation::IsClosed,
            Operation::Metadata,
            Operation::Catalog,
            Operation::SetCatalog,
            Operation::IsValid,
            Operation::ClientInfo,
            Operation::SetClientInfo,
        ] {
            assert_eq!(op.support(), Support::Implemented, "{op}");
        }
    }

    #[test]
    fn test_names_are_unique() {
        let ops = [
            Operation::CreateStatement,
            Operation::Prepare,
            Operation::PrepareWithGeneratedKeys,
            Operation::PrepareWithColumnIndexes,
            Operation::PrepareWithColumnNames,
            Operation::PrepareCall,
            Operation::NativeSql,
            Operation::AutoCommit,
            Operation::SetAutoCommit,
            Operation::Commit,
            Operation::Rollback,
            Operation::Close,
            Operation::IsClosed,
            Operation::Metadata,
            Operation::ReadOnly,
            Operation::SetReadOnly,
            Operation::Catalog,
            Operation::SetCatalog,
            Operation::TransactionIsolation,
            Operation::SetTransactionIsolation,
            Operation::Warnings,
            Operation::ClearWarnings,
            Operation::TypeMap,
            Operation::SetTypeMap,
            Operation::Holdability,
            Operation::SetHoldability,
            Operation::Savepoint,
            Operation::RollbackToSavepoint,
            Operation::ReleaseSavepoint,
            Operation::CreateArray,
            Operation::CreateStruct,
            Operation::Schema,
            Operation::SetSchema,
            Operation::Abort,
            Operation::IsValid,
            Operation::ClientInfo,
            Operation::SetClientInfo,
            Operation::NetworkTimeout,
            Operation::SetNetworkTimeout,
        ];
        let names: std::collections::HashSet<_> = ops.iter().map(|op| op.name()).collect();
        assert_eq!(names.len(), ops.len());
    }
}
