use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::{errors::AppResult, models::domain::StageKey, repositories::ScoreStore};

/// Correct-answer counts by stage. Absent stages read as zero.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StageScores(BTreeMap<StageKey, u32>);

impl StageScores {
    pub fn get(&self, stage: StageKey) -> u32 {
        self.0.get(&stage).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StageKey, u32)> + '_ {
        self.0.iter().map(|(stage, value)| (*stage, *value))
    }
}

impl FromIterator<(StageKey, u32)> for StageScores {
    fn from_iter<I: IntoIterator<Item = (StageKey, u32)>>(iter: I) -> Self {
        StageScores(iter.into_iter().collect())
    }
}

/// Carries completed stage scores across stage screens of one learner
/// session. Every screen gets its own handle; they share the store.
#[derive(Clone)]
pub struct ScoreCarrier {
    session_id: String,
    store: Arc<dyn ScoreStore>,
}

impl ScoreCarrier {
    pub fn new(session_id: impl Into<String>, store: Arc<dyn ScoreStore>) -> Self {
        Self {
            session_id: session_id.into(),
            store,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Overwrites whatever was carried for the stage before.
    pub async fn set_score(&self, stage: StageKey, value: u32) -> AppResult<()> {
        self.store.put(&self.session_id, stage, value).await
    }

    pub async fn get_score(&self, stage: StageKey) -> AppResult<u32> {
        Ok(self
            .store
            .get(&self.session_id, stage)
            .await?
            .unwrap_or(0))
    }

    /// Every known stage, zero where nothing was carried.
    pub async fn get_all(&self) -> AppResult<StageScores> {
        let stored = self.store.snapshot(&self.session_id).await?;
        Ok(StageKey::ALL
            .iter()
            .map(|stage| (*stage, stored.get(stage).copied().unwrap_or(0)))
            .collect())
    }
}
