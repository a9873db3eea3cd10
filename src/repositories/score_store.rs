use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::{broadcast, RwLock};

use crate::{errors::AppResult, models::domain::StageKey};

const EVENT_CAPACITY: usize = 64;

/// Published whenever a stage score is written.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScoreEvent {
    pub session_id: String,
    pub stage: StageKey,
    pub value: u32,
}

/// Session-scoped storage behind the score carrier.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    async fn put(&self, session_id: &str, stage: StageKey, value: u32) -> AppResult<()>;
    async fn get(&self, session_id: &str, stage: StageKey) -> AppResult<Option<u32>>;
    async fn snapshot(&self, session_id: &str) -> AppResult<HashMap<StageKey, u32>>;
    async fn clear(&self, session_id: &str) -> AppResult<()>;
    fn subscribe(&self) -> broadcast::Receiver<ScoreEvent>;
}

/// Keeps scores in process memory; they do not outlive the server.
pub struct InMemoryScoreStore {
    scores: RwLock<HashMap<String, HashMap<StageKey, u32>>>,
    events: broadcast::Sender<ScoreEvent>,
}

impl InMemoryScoreStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            scores: RwLock::new(HashMap::new()),
            events,
        }
    }
}

impl Default for InMemoryScoreStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScoreStore for InMemoryScoreStore {
    async fn put(&self, session_id: &str, stage: StageKey, value: u32) -> AppResult<()> {
        {
            let mut scores = self.scores.write().await;
            scores
                .entry(session_id.to_string())
                .or_default()
                .insert(stage, value);
        }

        // No subscribers is not an error.
        let _ = self.events.send(ScoreEvent {
            session_id: session_id.to_string(),
            stage,
            value,
        });
        Ok(())
    }

    async fn get(&self, session_id: &str, stage: StageKey) -> AppResult<Option<u32>> {
        let scores = self.scores.read().await;
        Ok(scores
            .get(session_id)
            .and_then(|by_stage| by_stage.get(&stage))
            .copied())
    }

    async fn snapshot(&self, session_id: &str) -> AppResult<HashMap<StageKey, u32>> {
        let scores = self.scores.read().await;
        Ok(scores.get(session_id).cloned().unwrap_or_default())
    }

    async fn clear(&self, session_id: &str) -> AppResult<()> {
        self.scores.write().await.remove(session_id);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<ScoreEvent> {
        self.events.subscribe()
    }
}
