use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        InMemoryScoreStore, ListeningSetRepository, MongoListeningSetRepository,
        MongoReadingSetRepository, MongoWritingTaskRepository, ReadingSetRepository, ScoreStore,
        WritingTaskRepository,
    },
    services::{ContentService, QuizSessionService},
};

#[derive(Clone)]
pub struct AppState {
    pub content_service: Arc<ContentService>,
    pub session_service: Arc<QuizSessionService>,
    pub db: Option<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let reading = Arc::new(MongoReadingSetRepository::new(&db, &config.reading_collection));
        reading.ensure_indexes().await?;
        let listening = Arc::new(MongoListeningSetRepository::new(&db, &config.listening_collection));
        let writing = Arc::new(MongoWritingTaskRepository::new(&db, &config.writing_collection));

        let mut state = Self::from_parts(
            config,
            reading,
            listening,
            writing,
            Arc::new(InMemoryScoreStore::new()),
        );
        state.db = Some(db);
        Ok(state)
    }

    /// Wires services over the given stores, without a database handle.
    pub fn from_parts(
        config: Config,
        reading: Arc<dyn ReadingSetRepository>,
        listening: Arc<dyn ListeningSetRepository>,
        writing: Arc<dyn WritingTaskRepository>,
        scores: Arc<dyn ScoreStore>,
    ) -> Self {
        let content_service = Arc::new(ContentService::new(reading, listening, writing));
        let session_service = Arc::new(QuizSessionService::new(
            content_service.clone(),
            scores,
            &config,
        ));

        Self {
            content_service,
            session_service,
            db: None,
            config: Arc::new(config),
        }
    }
}
