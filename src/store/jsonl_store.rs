//! JSONL store for survey responses - one StoredResponse per line, append-only

use super::store_backend::{ResponseStore, StoreError, StoredResponse};
use crate::survey::SurveyData;
use async_trait::async_trait;
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

pub struct JsonlResponseStore {
    path: PathBuf,
}

impl JsonlResponseStore {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Touch the file so reads before the first insert see an empty store
        OpenOptions::new().create(true).append(true).open(&path)?;

        log::info!("📝 Writing survey responses to: {}", path.display());

        Ok(Self { path })
    }

    fn append(&self, response: &StoredResponse) -> Result<(), StoreError> {
        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        let mut writer = BufWriter::new(file);

        let json = serde_json::to_string(response)?;
        writeln!(writer, "{}", json)?;
        writer.flush()?;

        Ok(())
    }

    /// Parse every line, skipping (and logging) lines that do not parse
    fn read_responses(&self) -> Result<Vec<StoredResponse>, StoreError> {
        let file = fs::File::open(&self.path)?;
        let mut responses = Vec::new();

        for (line_number, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str::<StoredResponse>(&line) {
                Ok(response) => responses.push(response),
                Err(e) => log::warn!(
                    "Skipping malformed response at {}:{}: {}",
                    self.path.display(),
                    line_number + 1,
                    e
                ),
            }
        }

        Ok(responses)
    }
}

#[async_trait]
impl ResponseStore for JsonlResponseStore {
    async fn insert(&mut self, response: &StoredResponse) -> Result<(), StoreError> {
        self.append(response)
    }

    async fn load_all(&mut self) -> Result<Vec<SurveyData>, StoreError> {
        let answers: Vec<SurveyData> = self
            .read_responses()?
            .into_iter()
            .map(|response| response.answers)
            .collect();

        log::debug!("📥 Loaded {} responses from JSONL", answers.len());
        Ok(answers)
    }

    async fn count(&mut self) -> Result<u64, StoreError> {
        Ok(self.read_responses()?.len() as u64)
    }

    async fn has_fingerprint(&mut self, fingerprint_hash: &str) -> Result<bool, StoreError> {
        Ok(self
            .read_responses()?
            .iter()
            .any(|response| response.fingerprint_hash == fingerprint_hash))
    }

    fn backend_type(&self) -> &'static str {
        "JSONL"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::survey::QuestionKey;
    use tempfile::tempdir;

    fn create_test_response(fingerprint: &str, stress: u8) -> StoredResponse {
        let mut answers = SurveyData::default();
        answers.set_answer(QuestionKey::StressLevel, Some(stress));
        StoredResponse {
            fingerprint_hash: fingerprint.to_string(),
            created_at: 1700000000,
            answers,
        }
    }

    #[tokio::test]
    async fn test_append_and_load() {
        let dir = tempdir().unwrap();
        let mut store = JsonlResponseStore::new(dir.path().join("responses.jsonl")).unwrap();

        assert!(store.load_all().await.unwrap().is_empty());

        store.insert(&create_test_response("fp1", 2)).await.unwrap();
        store.insert(&create_test_response("fp2", 6)).await.unwrap();

        let loaded = store.load_all().await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].stress_level, Some(2));
        assert_eq!(loaded[1].stress_level, Some(6));
        assert_eq!(store.count().await.unwrap(), 2);
        assert!(store.has_fingerprint("fp2").await.unwrap());
        assert!(!store.has_fingerprint("fp3").await.unwrap());
    }

    #[tokio::test]
    async fn test_skips_malformed_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("responses.jsonl");
        let mut store = JsonlResponseStore::new(&path).unwrap();

        store.insert(&create_test_response("fp1", 3)).await.unwrap();
        {
            let mut file = OpenOptions::new().append(true).open(&path).unwrap();
            writeln!(file, "{{\"invalid\": \"json").unwrap();
            writeln!(file).unwrap();
        }
        store.insert(&create_test_response("fp2", 4)).await.unwrap();

        let loaded = store.load_all().await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].stress_level, Some(4));
    }

    #[tokio::test]
    async fn test_line_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("responses.jsonl");
        let mut store = JsonlResponseStore::new(&path).unwrap();

        store.insert(&create_test_response("fp1", 5)).await.unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(contents.trim()).unwrap();
        assert_eq!(parsed["fingerprint_hash"], "fp1");
        assert_eq!(parsed["created_at"], 1700000000);
        assert_eq!(parsed["answers"]["stressLevel"], 5);
    }
}
