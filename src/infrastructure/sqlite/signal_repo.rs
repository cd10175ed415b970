use crate::domain::entities::signal_record::SignalRecord;
use crate::domain::error::DomainError;
use crate::domain::indicators::signal::{RsiZone, Trend};
use crate::domain::ports::signal_repository::*;
use crate::domain::values::ticker::Ticker;
use chrono::{DateTime, SecondsFormat};
use rusqlite::{params, Connection};
use std::sync::Mutex;

const COLUMNS: &str = "id, ticker, evaluated_at, close, sma, rsi, trend, rsi_zone, signal, sma_window, rsi_window";

pub struct SqliteSignalRepo {
    conn: Mutex<Connection>,
}

impl SqliteSignalRepo {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    fn row_to_record(row: &rusqlite::Row) -> Result<SignalRecord, rusqlite::Error> {
        let ticker_str: String = row.get(1)?;
        let evaluated_str: String = row.get(2)?;
        let trend_str: Option<String> = row.get(6)?;
        let zone_str: String = row.get(7)?;
        let signal_str: String = row.get(8)?;
        let sma_window: i64 = row.get(9)?;
        let rsi_window: i64 = row.get(10)?;

        let invalid = |col: usize, msg: String| {
            rusqlite::Error::FromSqlConversionFailure(
                col,
                rusqlite::types::Type::Text,
                msg.into(),
            )
        };

        Ok(SignalRecord {
            id: row.get(0)?,
            ticker: Ticker::new(&ticker_str).map_err(|e| invalid(1, e))?,
            evaluated_at: DateTime::parse_from_rfc3339(&evaluated_str)
                .map(|dt| dt.with_timezone(&chrono::Utc))
                .map_err(|e| invalid(2, e.to_string()))?,
            close: row.get(3)?,
            sma: row.get(4)?,
            rsi: row.get(5)?,
            trend: trend_str.and_then(|s| serde_json::from_value::<Trend>(s.into()).ok()),
            rsi_zone: serde_json::from_value::<RsiZone>(zone_str.into())
                .map_err(|e| invalid(7, e.to_string()))?,
            signal: signal_str.parse().map_err(|e: String| invalid(8, e))?,
            sma_window: sma_window.max(0) as usize,
            rsi_window: rsi_window.max(0) as usize,
        })
    }
}

fn enum_text<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(String::from))
        .unwrap_or_default()
}

impl SignalRepository for SqliteSignalRepo {
    fn add_signal(&self, record: &SignalRecord) -> Result<(), DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        conn.execute(
            &format!("INSERT INTO signals ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"),
            params![
                record.id,
                record.ticker.as_str(),
                record.evaluated_at.to_rfc3339_opts(SecondsFormat::Micros, true),
                record.close,
                record.sma,
                record.rsi,
                record.trend.as_ref().map(enum_text),
                enum_text(&record.rsi_zone),
                record.signal.to_string(),
                record.sma_window as i64,
                record.rsi_window as i64,
            ],
        ).map_err(|e| DomainError::Database(format!("Failed to add signal: {e}")))?;
        Ok(())
    }

    fn list_signals(&self, filter: &SignalFilter) -> Result<Vec<SignalRecord>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut sql = format!("SELECT {COLUMNS} FROM signals WHERE 1=1");
        let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

        if let Some(ticker) = &filter.ticker {
            sql.push_str(&format!(" AND ticker = ?{}", param_values.len() + 1));
            param_values.push(Box::new(ticker.as_str().to_string()));
        }
        if let Some(since) = &filter.since {
            sql.push_str(&format!(" AND evaluated_at >= ?{}", param_values.len() + 1));
            param_values.push(Box::new(since.to_rfc3339_opts(SecondsFormat::Micros, true)));
        }
        sql.push_str(" ORDER BY evaluated_at DESC");
        if let Some(limit) = filter.limit {
            sql.push_str(&format!(" LIMIT ?{}", param_values.len() + 1));
            param_values.push(Box::new(limit as i64));
        }

        let params_refs: Vec<&dyn rusqlite::types::ToSql> =
            param_values.iter().map(|p| p.as_ref()).collect();
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let records = stmt
            .query_map(params_refs.as_slice(), Self::row_to_record)
            .map_err(|e| DomainError::Database(e.to_string()))?
            .filter_map(|r| match r {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!("skipping unreadable signal row: {e}");
                    None
                }
            })
            .collect();
        Ok(records)
    }

    fn get_signal(&self, id: &str) -> Result<Option<SignalRecord>, DomainError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut stmt = conn
            .prepare(&format!("SELECT {COLUMNS} FROM signals WHERE id = ?1"))
            .map_err(|e| DomainError::Database(e.to_string()))?;
        let mut rows = stmt
            .query_map(params![id], Self::row_to_record)
            .map_err(|e| DomainError::Database(e.to_string()))?;
        rows.next()
            .transpose()
            .map_err(|e| DomainError::Database(e.to_string()))
    }
}
