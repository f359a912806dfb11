use chrono::{Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Leaderboard capacity; save keeps only the best entries.
pub const MAX_RECORDS: usize = 20;

const SCORES_FILE: &str = "scores.json";

/// One persisted leaderboard entry. Field order fixes the JSON key order for
/// compatibility with existing score files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreRecord {
    pub name: String,
    pub attempts: u32,
    pub time_taken: f64,
    pub difficulty: String,
    pub timestamp: i64,
}

pub trait ScoreStore {
    /// Read all records, best first. Absent or unreadable backing data yields
    /// an empty list; no error is surfaced.
    fn load(&self) -> Vec<ScoreRecord>;

    /// Append a record stamped with the current epoch time, re-sort ascending
    /// by (attempts, time_taken), truncate to `MAX_RECORDS`, and persist the
    /// full list.
    fn save(&self, name: &str, attempts: u32, time_taken: f64, difficulty: &str)
        -> io::Result<()>;

    /// Print the leaderboard, 1-indexed, with a distinct message when empty.
    fn show(&self, out: &mut dyn Write) -> io::Result<()> {
        let scores = self.load();
        if scores.is_empty() {
            writeln!(out, "\nNo leaderboard yet - be the first!\n")?;
            return Ok(());
        }
        writeln!(out, "\n--- Leaderboard (best first) ---")?;
        for (i, s) in scores.iter().enumerate() {
            writeln!(
                out,
                "{}. {:<12} | attempts: {:>2} | time: {:>5}s | {:<6} | {}",
                i + 1,
                s.name,
                s.attempts,
                s.time_taken,
                s.difficulty,
                format_local_timestamp(s.timestamp),
            )?;
        }
        writeln!(out, "-------------------------------\n")?;
        Ok(())
    }
}

fn format_local_timestamp(epoch_secs: i64) -> String {
    Local
        .timestamp_opt(epoch_secs, 0)
        .single()
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| epoch_secs.to_string())
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// File-backed score store.
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    /// Default store next to the program, compatible with existing
    /// `scores.json` files.
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(SCORES_FILE),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileScoreStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> Vec<ScoreRecord> {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(scores) = serde_json::from_slice::<Vec<ScoreRecord>>(&bytes) {
                return scores;
            }
        }
        Vec::new()
    }

    fn save(
        &self,
        name: &str,
        attempts: u32,
        time_taken: f64,
        difficulty: &str,
    ) -> io::Result<()> {
        let mut scores = self.load();
        scores.push(ScoreRecord {
            name: name.to_string(),
            attempts,
            time_taken: round2(time_taken),
            difficulty: difficulty.to_string(),
            timestamp: Utc::now().timestamp(),
        });
        scores.sort_by(|a, b| {
            a.attempts.cmp(&b.attempts).then(
                a.time_taken
                    .partial_cmp(&b.time_taken)
                    .unwrap_or(Ordering::Equal),
            )
        });
        scores.truncate(MAX_RECORDS);
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let data = serde_json::to_vec_pretty(&scores).unwrap_or_default();
        fs::write(&self.path, data)
    }
}
