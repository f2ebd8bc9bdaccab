//! SQL schema initialization.
//!
//! This module defines the database schema for SQLite storage.

use rusqlite::Connection;

use crate::error::Result;

/// Schema version for migration tracking.
pub const SCHEMA_VERSION: u32 = 1;

/// Initialize the database schema.
///
/// Creates all tables and indexes if they don't exist.
/// This function is idempotent - calling it multiple times is safe.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    // Enable WAL mode for better concurrent read/write performance
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    // Create schema version table
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        )",
        [],
    )?;

    // Check current version
    let current_version: Option<u32> = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .ok();

    match current_version {
        None => {
            // Fresh database - create all tables
            create_tables(conn)?;
            conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                [SCHEMA_VERSION],
            )?;
        }
        Some(version) if version < SCHEMA_VERSION => {
            // No migrations yet; bump the recorded version.
            conn.execute("UPDATE schema_version SET version = ?1", [SCHEMA_VERSION])?;
        }
        Some(_) => {
            // Current version is up to date
        }
    }

    Ok(())
}

/// Create all database tables.
fn create_tables(conn: &Connection) -> Result<()> {
    // Tasks table
    conn.execute(
        "CREATE TABLE IF NOT EXISTS tasks (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner TEXT NOT NULL,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            content_ref TEXT,
            status TEXT NOT NULL DEFAULT 'draft',
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_tasks_owner ON tasks(owner)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_tasks_status ON tasks(status)",
        [],
    )?;

    // Targets table: one row per (task, platform)
    conn.execute(
        "CREATE TABLE IF NOT EXISTS task_targets (
            task_id INTEGER NOT NULL REFERENCES tasks(id),
            platform TEXT NOT NULL,
            views TEXT NOT NULL,
            due_date TEXT,
            PRIMARY KEY (task_id, platform)
        )",
        [],
    )?;

    // Costs table: exactly one row per task (upsert semantics)
    conn.execute(
        "CREATE TABLE IF NOT EXISTS task_costs (
            task_id INTEGER PRIMARY KEY REFERENCES tasks(id),
            amount INTEGER NOT NULL,
            payment_method TEXT NOT NULL DEFAULT 'bank_transfer',
            is_paid INTEGER NOT NULL DEFAULT 0,
            paid_at INTEGER,
            metadata TEXT
        )",
        [],
    )?;

    // Application promises: committed reach per (application, platform)
    conn.execute(
        "CREATE TABLE IF NOT EXISTS application_promises (
            application_id INTEGER NOT NULL,
            task_id INTEGER NOT NULL REFERENCES tasks(id),
            influencer TEXT NOT NULL,
            platform TEXT NOT NULL,
            promised_views INTEGER NOT NULL,
            earnings INTEGER NOT NULL,
            PRIMARY KEY (application_id, platform)
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_promises_task ON application_promises(task_id)",
        [],
    )?;

    Ok(())
}
