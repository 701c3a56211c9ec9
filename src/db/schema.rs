use rusqlite::Connection;

use crate::error::SantaResult;

/// Initialize the database schema. Creates all tables if they don't exist.
pub fn initialize(conn: &Connection) -> SantaResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS families (
            code TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            event_date TEXT,
            max_budget INTEGER,
            created_at TEXT NOT NULL,
            updated_at TEXT
        );

        CREATE TABLE IF NOT EXISTS participants (
            family_code TEXT NOT NULL REFERENCES families(code) ON DELETE CASCADE,
            id TEXT NOT NULL,
            name TEXT NOT NULL,
            added_at TEXT NOT NULL,
            PRIMARY KEY (family_code, id)
        );

        CREATE TABLE IF NOT EXISTS assignment_sets (
            family_code TEXT PRIMARY KEY NOT NULL REFERENCES families(code) ON DELETE CASCADE,
            generated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS assignments (
            family_code TEXT NOT NULL REFERENCES assignment_sets(family_code) ON DELETE CASCADE,
            position INTEGER NOT NULL,
            giver_id TEXT NOT NULL,
            receiver_id TEXT NOT NULL,
            PRIMARY KEY (family_code, giver_id)
        );

        CREATE TABLE IF NOT EXISTS wishlists (
            family_code TEXT NOT NULL,
            owner_id TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            PRIMARY KEY (family_code, owner_id),
            FOREIGN KEY (family_code, owner_id)
                REFERENCES participants(family_code, id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS gifts (
            family_code TEXT NOT NULL,
            owner_id TEXT NOT NULL,
            position INTEGER NOT NULL,
            id TEXT NOT NULL,
            name TEXT NOT NULL,
            link TEXT,
            image TEXT,
            PRIMARY KEY (family_code, owner_id, id),
            FOREIGN KEY (family_code, owner_id)
                REFERENCES wishlists(family_code, owner_id) ON DELETE CASCADE
        );

        PRAGMA foreign_keys = ON;
        ",
    )?;
    Ok(())
}

/// Create an in-memory connection for testing.
pub fn test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    initialize(&conn).unwrap();
    conn
}
