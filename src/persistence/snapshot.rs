//! Progress snapshot format
//!
//! JSON object with camelCase keys. A game-over snapshot keeps only the high
//! score and timestamp; the progress fields are omitted entirely.

use serde::{Deserialize, Serialize};

use super::StoreError;

/// Persisted run progress
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lives: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level_score: Option<u64>,
    #[serde(default)]
    pub high_score: u64,
    /// Unix milliseconds when written
    #[serde(rename = "ts", default)]
    pub timestamp: u64,
}

/// Resumable progress extracted from a full snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub score: u64,
    pub lives: u32,
    pub level: u32,
    pub level_score: u64,
}

impl ProgressSnapshot {
    /// Snapshot written on level completion
    pub fn full(
        score: u64,
        lives: u32,
        level: u32,
        level_score: u64,
        high_score: u64,
        timestamp: u64,
    ) -> Self {
        Self {
            score: Some(score),
            lives: Some(lives),
            level: Some(level),
            level_score: Some(level_score),
            high_score,
            timestamp,
        }
    }

    /// Snapshot written on game over
    pub fn high_score_only(high_score: u64, timestamp: u64) -> Self {
        Self {
            high_score,
            timestamp,
            ..Default::default()
        }
    }

    /// Progress to resume from, if every progress field is present
    pub fn progress(&self) -> Option<Progress> {
        Some(Progress {
            score: self.score?,
            lives: self.lives?,
            level: self.level?,
            level_score: self.level_score?,
        })
    }

    /// Reject snapshots a run could not sensibly resume from
    pub fn validate(&self) -> Result<(), StoreError> {
        let present = [
            self.score.is_some(),
            self.lives.is_some(),
            self.level.is_some(),
            self.level_score.is_some(),
        ];
        let Some(progress) = self.progress() else {
            return if present.iter().any(|p| *p) {
                Err(StoreError::Invalid("partial progress"))
            } else {
                Ok(())
            };
        };
        if progress.level == 0 {
            return Err(StoreError::Invalid("level must be at least 1"));
        }
        if progress.lives == 0 {
            return Err(StoreError::Invalid("no lives left"));
        }
        if progress.level_score > progress.score {
            return Err(StoreError::Invalid("level score exceeds score"));
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse and validate
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_score_only_omits_progress() {
        let json = ProgressSnapshot::high_score_only(1200, 42).to_json().unwrap();
        assert_eq!(json, r#"{"highScore":1200,"ts":42}"#);
    }

    #[test]
    fn test_full_snapshot_keys() {
        let json = ProgressSnapshot::full(600, 2, 2, 100, 800, 7)
            .to_json()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["score"], 600);
        assert_eq!(value["lives"], 2);
        assert_eq!(value["level"], 2);
        assert_eq!(value["levelScore"], 100);
        assert_eq!(value["highScore"], 800);
        assert_eq!(value["ts"], 7);
    }

    #[test]
    fn test_parse_original_save() {
        let snapshot = ProgressSnapshot::from_json(
            r#"{"score":500,"lives":3,"level":1,"levelScore":500,"highScore":500,"ts":1700000000000}"#,
        )
        .unwrap();
        let progress = snapshot.progress().unwrap();
        assert_eq!(progress.level, 1);
        assert_eq!(progress.level_score, 500);
        assert_eq!(snapshot.timestamp, 1_700_000_000_000);
    }

    #[test]
    fn test_rejects_corrupt_data() {
        assert!(matches!(
            ProgressSnapshot::from_json("{not json"),
            Err(StoreError::Json(_))
        ));
        assert!(matches!(
            ProgressSnapshot::from_json(r#"{"score":10,"highScore":10}"#),
            Err(StoreError::Invalid(_))
        ));
        assert!(matches!(
            ProgressSnapshot::from_json(
                r#"{"score":10,"lives":0,"level":1,"levelScore":0,"highScore":10}"#
            ),
            Err(StoreError::Invalid(_))
        ));
        assert!(matches!(
            ProgressSnapshot::from_json(
                r#"{"score":10,"lives":2,"level":1,"levelScore":20,"highScore":10}"#
            ),
            Err(StoreError::Invalid(_))
        ));
        assert!(ProgressSnapshot::from_json(r#"{"score":-5}"#).is_err());
    }
}
