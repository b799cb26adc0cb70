use anyhow::{Context, Result};
use rusqlite::Connection;

struct Migration {
    version: &'static str,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: "001",
    name: "sessions",
    sql: include_str!("migrations/001_sessions.sql"),
}];

pub fn run_migrations(conn: &Connection) -> Result<()> {
    apply_pending(conn, MIGRATIONS)
}

fn apply_pending(conn: &Connection, migrations: &[Migration]) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            applied_at TEXT NOT NULL
        )",
    )
    .context("Failed to create schema_migrations table")?;

    let applied = applied_versions(conn)?;
    migrations
        .iter()
        .filter(|migration| !applied.iter().any(|version| version == migration.version))
        .try_for_each(|migration| apply(conn, migration))
}

fn applied_versions(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT version FROM schema_migrations ORDER BY version")?;
    let versions = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<String>, _>>()?;
    Ok(versions)
}

/// Run one migration and record it in a single transaction, so a failure
/// leaves neither the schema change nor its bookkeeping row behind.
fn apply(conn: &Connection, migration: &Migration) -> Result<()> {
    tracing::info!(
        version = migration.version,
        "Applying session store migration {}",
        migration.name
    );

    let failed = || format!("Failed to apply migration {}: {}", migration.version, migration.name);
    let tx = conn.unchecked_transaction().with_context(failed)?;
    tx.execute_batch(migration.sql).with_context(failed)?;
    tx.execute(
        "INSERT INTO schema_migrations (version, name, applied_at) VALUES (?, ?, ?)",
        (migration.version, migration.name, chrono::Utc::now().to_rfc3339()),
    )
    .with_context(failed)?;
    tx.commit().with_context(failed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_exists(conn: &Connection, name: &str) -> bool {
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?",
            [name],
            |row| row.get::<_, i64>(0),
        )
        .unwrap()
            == 1
    }

    #[test]
    fn creates_sessions_table() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        assert!(table_exists(&conn, "sessions"));
        assert_eq!(applied_versions(&conn).unwrap(), vec!["001"]);
    }

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        assert_eq!(applied_versions(&conn).unwrap(), vec!["001"]);
    }

    #[test]
    fn failed_migration_leaves_nothing_behind() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        let broken = [Migration {
            version: "002",
            name: "broken",
            sql: "CREATE TABLE partial (x TEXT); INSERT INTO missing VALUES (1);",
        }];
        assert!(apply_pending(&conn, &broken).is_err());

        assert!(!table_exists(&conn, "partial"));
        assert_eq!(applied_versions(&conn).unwrap(), vec!["001"]);
    }

    #[test]
    fn recording_failure_rolls_back_the_schema_change() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();

        // Same version as an applied migration: the bookkeeping insert fails.
        let clash = [Migration {
            version: "001",
            name: "clash",
            sql: "CREATE TABLE clash (x TEXT);",
        }];
        assert!(clash.iter().try_for_each(|m| apply(&conn, m)).is_err());

        assert!(!table_exists(&conn, "clash"));
        assert_eq!(applied_versions(&conn).unwrap(), vec!["001"]);
    }
}
