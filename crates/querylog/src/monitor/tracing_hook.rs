use super::config::ProxyConfig;
use super::types::QueryLogEntry;
use crate::sql::clip_to_bytes;

fn truncate_sql(config: &ProxyConfig, sql: &str) -> String {
    match config.max_sql_length {
        Some(max) if sql.len() > max => format!("{}...", clip_to_bytes(sql, max)),
        _ => sql.to_string(),
    }
}

/// Emit the `tracing` events for one recorded query.
///
/// Debug events are gated by [`ProxyConfig::tracing_enabled`]; the slow-query
/// warning only by the threshold.
pub(super) fn emit_recorded(config: &ProxyConfig, entry: &QueryLogEntry, is_slow: bool) {
    if !config.tracing_enabled && !is_slow {
        return;
    }

    let sql = truncate_sql(config, entry.query());
    let query_type = entry.query_type();

    if config.tracing_enabled {
        tracing::debug!(
            target: "querylog.sql",
            query_type = ?query_type,
            duration_ms = entry.duration_ms(),
            sql = %sql,
        );
    }

    if is_slow {
        tracing::warn!(
            target: "querylog.sql",
            query_type = ?query_type,
            duration_ms = entry.duration_ms(),
            sql = %sql,
            "slow query"
        );
    }
}
