use crate::domain::error::DomainError;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), DomainError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS signals (
            id TEXT PRIMARY KEY,
            ticker TEXT NOT NULL,
            evaluated_at TEXT NOT NULL,
            close REAL NOT NULL,
            sma REAL NOT NULL,
            rsi REAL NOT NULL,
            trend TEXT,
            rsi_zone TEXT NOT NULL,
            signal TEXT NOT NULL,
            sma_window INTEGER NOT NULL,
            rsi_window INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_signals_ticker ON signals(ticker);
        CREATE INDEX IF NOT EXISTS idx_signals_evaluated ON signals(evaluated_at);
        "
    ).map_err(|e| DomainError::Database(format!("Migration failed: {e}")))
}
