//! Database schema initialization

use rusqlite::params;

use super::{Store, SCHEMA_VERSION};
use crate::core::error::Result;

impl Store {
    /// Create the schema. Idempotent; safe to run against an already
    /// initialized database.
    pub fn initialize(&mut self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            -- Schema version tracking
            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY
            );

            -- FOIA requests
            CREATE TABLE IF NOT EXISTS requests (
                request_id      TEXT PRIMARY KEY,
                tracking_number TEXT NOT NULL UNIQUE,
                requester_name  TEXT NOT NULL,
                requester_email TEXT NOT NULL,
                agency          TEXT NOT NULL,
                subject         TEXT NOT NULL,
                description     TEXT NOT NULL,
                fee_waived      INTEGER NOT NULL DEFAULT 0,
                status          TEXT NOT NULL DEFAULT 'submitted',
                submitted_at    TEXT NOT NULL,
                due_at          TEXT NOT NULL,
                fulfilled_at    TEXT,
                assigned_to     TEXT
            );
            CREATE INDEX IF NOT EXISTS idx_requests_status ON requests(status);
            CREATE INDEX IF NOT EXISTS idx_requests_agency ON requests(agency);
            CREATE INDEX IF NOT EXISTS idx_requests_due_at ON requests(due_at);

            -- Fulfillment packages (at most one per request)
            CREATE TABLE IF NOT EXISTS fulfillments (
                package_id       TEXT PRIMARY KEY,
                request_id       TEXT NOT NULL,
                documents        TEXT NOT NULL DEFAULT '[]',
                redactions       TEXT NOT NULL DEFAULT '[]',
                exemptions_cited TEXT NOT NULL DEFAULT '[]',
                response_letter  TEXT NOT NULL DEFAULT '',
                created_at       TEXT NOT NULL,
                fulfilled_by     TEXT NOT NULL DEFAULT 'system',
                FOREIGN KEY (request_id) REFERENCES requests(request_id)
            );
            CREATE INDEX IF NOT EXISTS idx_fulfillments_request ON fulfillments(request_id);

            -- Denial decisions
            CREATE TABLE IF NOT EXISTS denials (
                denial_id       TEXT PRIMARY KEY,
                request_id      TEXT NOT NULL,
                reason          TEXT NOT NULL,
                exemptions      TEXT NOT NULL DEFAULT '[]',
                denied_by       TEXT NOT NULL,
                denied_at       TEXT NOT NULL,
                FOREIGN KEY (request_id) REFERENCES requests(request_id)
            );
            CREATE INDEX IF NOT EXISTS idx_denials_request ON denials(request_id);

            -- Appeals against denials
            CREATE TABLE IF NOT EXISTS appeals (
                appeal_id       TEXT PRIMARY KEY,
                request_id      TEXT NOT NULL,
                grounds         TEXT NOT NULL,
                appellant       TEXT NOT NULL,
                submitted_at    TEXT NOT NULL,
                status          TEXT NOT NULL DEFAULT 'pending',
                decision        TEXT,
                decided_at      TEXT,
                FOREIGN KEY (request_id) REFERENCES requests(request_id)
            );
            CREATE INDEX IF NOT EXISTS idx_appeals_request ON appeals(request_id);
            CREATE INDEX IF NOT EXISTS idx_appeals_status ON appeals(status);

            -- Internal case notes
            CREATE TABLE IF NOT EXISTS notes (
                note_id         TEXT PRIMARY KEY,
                request_id      TEXT NOT NULL,
                author          TEXT NOT NULL,
                content         TEXT NOT NULL,
                created_at      TEXT NOT NULL,
                FOREIGN KEY (request_id) REFERENCES requests(request_id)
            );
            CREATE INDEX IF NOT EXISTS idx_notes_request ON notes(request_id);
            "#,
        )?;

        self.conn.execute(
            "INSERT OR REPLACE INTO schema_version (version) VALUES (?1)",
            params![SCHEMA_VERSION],
        )?;

        Ok(())
    }

    /// Drop every table and recreate the schema, discarding all records
    pub fn reinitialize(&mut self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            PRAGMA foreign_keys=OFF;
            DROP TABLE IF EXISTS schema_version;
            DROP TABLE IF EXISTS notes;
            DROP TABLE IF EXISTS appeals;
            DROP TABLE IF EXISTS denials;
            DROP TABLE IF EXISTS fulfillments;
            DROP TABLE IF EXISTS requests;
            PRAGMA foreign_keys=ON;
            "#,
        )?;
        self.initialize()
    }
}

#[cfg(test)]
mod tests {
    use crate::core::store::Store;

    #[test]
    fn test_initialize_is_idempotent() {
        let mut store = Store::open_in_memory().unwrap();
        store.initialize().unwrap();
        store.initialize().unwrap();
        assert!(store.is_initialized().unwrap());
    }

    #[test]
    fn test_reinitialize_discards_records() {
        let mut store = Store::open_in_memory().unwrap();
        store
            .conn()
            .execute_batch(
                "INSERT INTO requests (request_id, tracking_number, requester_name, \
                 requester_email, agency, subject, description, submitted_at, due_at) \
                 VALUES ('REQ-X', 'FOIA-2026-AAAAAA', 'n', 'e', 'EPA', 's', 'd', \
                 '2026-01-01T00:00:00.000000Z', '2026-01-21T00:00:00.000000Z')",
            )
            .unwrap();

        store.reinitialize().unwrap();
        let count: i64 = store
            .conn()
            .query_row("SELECT COUNT(*) FROM requests", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
