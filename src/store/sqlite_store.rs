//! SQLite store for survey responses
//!
//! One wide row per submission: fingerprint, one nullable INTEGER column per question,
//! creation time.

use super::store_backend::{ResponseStore, StoreError, StoredResponse};
use crate::sqlite_pragma::apply_optimized_pragmas;
use crate::survey::{QuestionKey, SurveyData};
use async_trait::async_trait;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection};
use std::path::Path;

pub struct SqliteResponseStore {
    conn: Connection,
}

impl SqliteResponseStore {
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        // Ensure parent directory exists
        if let Some(parent) = db_path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StoreError::Io(std::io::Error::new(
                        e.kind(),
                        format!("Failed to create database directory {}: {}", parent.display(), e),
                    ))
                })?;
            }
        }

        let conn = Connection::open(db_path.as_ref())?;
        apply_optimized_pragmas(&conn)?;

        let answer_columns: Vec<String> = QuestionKey::ALL
            .iter()
            .map(|key| format!("{} INTEGER", key.column()))
            .collect();

        conn.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS survey_responses (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    fingerprint_hash TEXT NOT NULL,
                    {},
                    created_at INTEGER NOT NULL
                )",
                answer_columns.join(",\n                    ")
            ),
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_fingerprint ON survey_responses(fingerprint_hash)",
            [],
        )?;

        log::info!(
            "✅ SQLite response store initialized: {}",
            db_path.as_ref().display()
        );

        Ok(Self { conn })
    }

    fn insert_response(&self, response: &StoredResponse) -> Result<(), StoreError> {
        let columns: Vec<&str> = QuestionKey::ALL.iter().map(|key| key.column()).collect();
        let placeholders: Vec<String> = (1..=columns.len() + 2)
            .map(|i| format!("?{}", i))
            .collect();

        let mut values = Vec::with_capacity(columns.len() + 2);
        values.push(Value::Text(response.fingerprint_hash.clone()));
        for answer in response.answers.answers() {
            values.push(match answer {
                Some(v) => Value::Integer(i64::from(v)),
                None => Value::Null,
            });
        }
        values.push(Value::Integer(response.created_at));

        self.conn.execute(
            &format!(
                "INSERT INTO survey_responses (fingerprint_hash, {}, created_at) VALUES ({})",
                columns.join(", "),
                placeholders.join(", ")
            ),
            params_from_iter(values.iter()),
        )?;

        log::debug!(
            "📝 Stored response from {} ({} answers)",
            response.fingerprint_hash,
            response.answers.answered_count()
        );

        Ok(())
    }

    fn load_answers(&self) -> Result<Vec<SurveyData>, StoreError> {
        let columns: Vec<&str> = QuestionKey::ALL.iter().map(|key| key.column()).collect();
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM survey_responses ORDER BY id ASC",
            columns.join(", ")
        ))?;

        let rows = stmt.query_map([], |row| {
            let mut data = SurveyData::default();
            for (index, key) in QuestionKey::ALL.iter().enumerate() {
                data.set_answer(*key, row.get::<_, Option<u8>>(index)?);
            }
            Ok(data)
        })?;

        let mut answers = Vec::new();
        for row in rows {
            answers.push(row?);
        }

        log::debug!("📥 Loaded {} responses from SQLite", answers.len());
        Ok(answers)
    }

    fn response_count(&self) -> Result<u64, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM survey_responses", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn fingerprint_exists(&self, fingerprint_hash: &str) -> Result<bool, StoreError> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM survey_responses WHERE fingerprint_hash = ?1)",
            params![fingerprint_hash],
            |row| row.get(0),
        )?;
        Ok(exists)
    }
}

#[async_trait]
impl ResponseStore for SqliteResponseStore {
    async fn insert(&mut self, response: &StoredResponse) -> Result<(), StoreError> {
        self.insert_response(response)
    }

    async fn load_all(&mut self) -> Result<Vec<SurveyData>, StoreError> {
        self.load_answers()
    }

    async fn count(&mut self) -> Result<u64, StoreError> {
        self.response_count()
    }

    async fn has_fingerprint(&mut self, fingerprint_hash: &str) -> Result<bool, StoreError> {
        self.fingerprint_exists(fingerprint_hash)
    }

    fn backend_type(&self) -> &'static str {
        "SQLite"
    }
}
