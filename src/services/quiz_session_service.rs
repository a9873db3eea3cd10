use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, Mutex, RwLock};
use uuid::Uuid;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    models::{
        domain::{ExamSection, LooseId, StageKey},
        dto::response::{
            AnswerRecorded, ResultView, ReviewOutcome, ScoresView, SessionCreated, StageView,
        },
    },
    repositories::{ScoreEvent, ScoreStore},
    services::{
        content_service::ContentService,
        result_aggregator::ResultAggregator,
        score_carrier::ScoreCarrier,
        stage_session::StageSession,
    },
};

type SharedStage = Arc<Mutex<StageSession>>;

struct LearnerSession {
    last_seen: DateTime<Utc>,
    stages: HashMap<StageKey, SharedStage>,
}

/// Learner sessions and the stage screens open in them.
pub struct QuizSessionService {
    content: Arc<ContentService>,
    scores: Arc<dyn ScoreStore>,
    sessions: RwLock<HashMap<String, LearnerSession>>,
    fetch_timeout: Option<Duration>,
    session_ttl: chrono::Duration,
    derive_reading_maxima: bool,
}

impl QuizSessionService {
    pub fn new(content: Arc<ContentService>, scores: Arc<dyn ScoreStore>, config: &Config) -> Self {
        Self {
            content,
            scores,
            sessions: RwLock::new(HashMap::new()),
            fetch_timeout: config.content_fetch_timeout(),
            session_ttl: config.session_ttl(),
            derive_reading_maxima: config.derive_maxima_from_content,
        }
    }

    /// Score writes from every session, as they happen.
    pub fn subscribe_scores(&self) -> broadcast::Receiver<ScoreEvent> {
        self.scores.subscribe()
    }

    pub async fn create_session(&self) -> AppResult<SessionCreated> {
        let now = Utc::now();
        self.purge_expired(now).await?;

        let session_id = Uuid::new_v4().to_string();
        self.sessions.write().await.insert(
            session_id.clone(),
            LearnerSession {
                last_seen: now,
                stages: HashMap::new(),
            },
        );

        log::info!("Created learner session {}", session_id);
        Ok(SessionCreated {
            session_id,
            expires_at: now + self.session_ttl,
        })
    }

    /// Opens a fresh stage screen, replacing any earlier one for the same
    /// stage, and waits for its content.
    ///
    /// A failed or timed-out fetch is not an error here: the screen ends up
    /// `Failed` and the view reports why.
    pub async fn open_stage(&self, session_id: &str, set_id: &str, stage: StageKey) -> AppResult<StageView> {
        let carrier = ScoreCarrier::new(session_id, self.scores.clone());
        let screen = Arc::new(Mutex::new(StageSession::new(stage, set_id, carrier)));

        {
            let mut sessions = self.sessions.write().await;
            let session = self.live_session(&mut sessions, session_id)?;
            session.stages.insert(stage, screen.clone());
        }

        log::info!("Session {} opened {} of set {}", session_id, stage, set_id);

        let fetched = match self.fetch_timeout {
            Some(limit) => tokio::time::timeout(limit, self.content.load_part(set_id, stage))
                .await
                .unwrap_or_else(|_| {
                    Err(AppError::Timeout(format!(
                        "Loading {} of set {} took longer than {}s",
                        stage,
                        set_id,
                        limit.as_secs()
                    )))
                }),
            None => self.content.load_part(set_id, stage).await,
        };

        // A re-open in the meantime replaced this screen; the result only
        // lands on the screen that asked for it.
        let mut screen = screen.lock().await;
        match fetched {
            Ok(part) => {
                screen.loaded(part);
            }
            Err(err) => {
                log::warn!("Session {} failed to load {} of set {}: {}", session_id, stage, set_id, err);
                screen.load_failed(err.to_string());
            }
        }

        Ok(StageView::from_session(&screen))
    }

    pub async fn stage_view(&self, session_id: &str, stage: StageKey) -> AppResult<StageView> {
        let screen = self.stage_screen(session_id, stage).await?;
        let screen = screen.lock().await;
        Ok(StageView::from_session(&screen))
    }

    pub async fn record_answer(
        &self,
        session_id: &str,
        stage: StageKey,
        question_id: LooseId,
        value: LooseId,
    ) -> AppResult<AnswerRecorded> {
        let screen = self.stage_screen(session_id, stage).await?;
        let mut screen = screen.lock().await;

        log::debug!("Session {} answers {} on {} with {}", session_id, question_id, stage, value);
        let accepted = screen.record_answer(question_id, value);

        Ok(AnswerRecorded {
            accepted,
            view: StageView::from_session(&screen),
        })
    }

    /// Reviews the stage if every item is answered; otherwise leaves it as
    /// it was.
    pub async fn review(&self, session_id: &str, stage: StageKey) -> AppResult<ReviewOutcome> {
        let screen = self.stage_screen(session_id, stage).await?;
        let mut screen = screen.lock().await;

        let reviewed = screen.review().await?;

        Ok(ReviewOutcome {
            reviewed,
            view: StageView::from_session(&screen),
        })
    }

    pub async fn scores(&self, session_id: &str) -> AppResult<ScoresView> {
        self.touch(session_id).await?;

        let carrier = ScoreCarrier::new(session_id, self.scores.clone());
        let scores = carrier.get_all().await?.iter().collect();

        Ok(ScoresView {
            session_id: session_id.to_string(),
            scores,
        })
    }

    pub async fn results(&self, session_id: &str, section: ExamSection, set_id: &str) -> AppResult<ResultView> {
        self.touch(session_id).await?;

        let carrier = ScoreCarrier::new(session_id, self.scores.clone());
        let scores = carrier.get_all().await?;
        let maxima = self
            .content
            .section_maxima(section, set_id, self.derive_reading_maxima)
            .await?;

        let summary = ResultAggregator::summarize(&scores, &maxima);
        log::info!(
            "Session {} finished {} of set {}: {}/{} ({:?})",
            session_id,
            section,
            set_id,
            summary.total,
            summary.max_total,
            summary.tier
        );

        Ok(ResultView::new(set_id, section, summary))
    }

    async fn stage_screen(&self, session_id: &str, stage: StageKey) -> AppResult<SharedStage> {
        let mut sessions = self.sessions.write().await;
        let session = self.live_session(&mut sessions, session_id)?;
        session.stages.get(&stage).cloned().ok_or_else(|| {
            AppError::NotFound(format!("Stage '{}' is not open in session '{}'", stage, session_id))
        })
    }

    async fn touch(&self, session_id: &str) -> AppResult<()> {
        let mut sessions = self.sessions.write().await;
        self.live_session(&mut sessions, session_id)?;
        Ok(())
    }

    /// Looks a session up and extends its lifetime. Expired sessions read as
    /// missing until the next purge removes them.
    fn live_session<'a>(
        &self,
        sessions: &'a mut HashMap<String, LearnerSession>,
        session_id: &str,
    ) -> AppResult<&'a mut LearnerSession> {
        let now = Utc::now();
        let session = sessions
            .get_mut(session_id)
            .filter(|session| now - session.last_seen <= self.session_ttl)
            .ok_or_else(|| AppError::NotFound(format!("Session '{}' not found", session_id)))?;

        session.last_seen = now;
        Ok(session)
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> AppResult<()> {
        let expired: Vec<String> = {
            let mut sessions = self.sessions.write().await;
            let expired: Vec<String> = sessions
                .iter()
                .filter(|(_, session)| now - session.last_seen > self.session_ttl)
                .map(|(id, _)| id.clone())
                .collect();
            for id in &expired {
                sessions.remove(id);
            }
            expired
        };

        for id in &expired {
            self.scores.clear(id).await?;
        }
        if !expired.is_empty() {
            log::info!("Purged {} expired learner sessions", expired.len());
        }
        Ok(())
    }

    #[cfg(test)]
    async fn backdate(&self, session_id: &str, by: chrono::Duration) {
        if let Some(session) = self.sessions.write().await.get_mut(session_id) {
            session.last_seen -= by;
        }
    }
}
