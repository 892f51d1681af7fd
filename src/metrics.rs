//! Metric helpers built on the `metrics` facade.
//!
//! Recording is the embedder's concern; without an installed recorder these
//! calls are no-ops.

/// Counter metrics
pub mod counters {
    /// A connection handle was constructed
    pub fn connection_opened() {
        metrics::counter!("taos_conn_connections_opened_total").increment(1);
    }

    /// A connection handle transitioned to closed
    pub fn connection_closed() {
        metrics::counter!("taos_conn_connections_closed_total").increment(1);
    }

    /// An operation was rejected by the guard
    pub fn operation_rejected(operation: &'static str, reason: &'static str) {
        metrics::counter!(
            "taos_conn_operations_rejected_total",
            "operation" => operation,
            "reason" => reason
        )
        .increment(1);
    }
}
