//! Store health overview for administrators.

use tracing::warn;

use crate::store::{KNOWN_TABLES, Store, TableStatus};

/// Existence and row count of every table the portal uses, in listing order.
///
/// A table that cannot be counted is reported as missing.
pub async fn table_statuses<S: Store>(store: &S) -> Vec<TableStatus> {
    let mut statuses = Vec::with_capacity(KNOWN_TABLES.len());
    for table in KNOWN_TABLES {
        let status = match store.count(table).await {
            Ok(count) => TableStatus {
                name: table.to_string(),
                exists: true,
                record_count: Some(count),
            },
            Err(e) => {
                warn!(table, error = %e, "Error checking table");
                TableStatus {
                    name: table.to_string(),
                    exists: false,
                    record_count: None,
                }
            }
        };
        statuses.push(status);
    }
    statuses
}
