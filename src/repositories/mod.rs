pub mod listening_set_repository;
pub mod reading_set_repository;
pub mod score_store;
pub mod writing_task_repository;

pub use listening_set_repository::{ListeningSetRepository, MongoListeningSetRepository};
pub use reading_set_repository::{MongoReadingSetRepository, ReadingSetRepository};
pub use score_store::{InMemoryScoreStore, ScoreEvent, ScoreStore};
pub use writing_task_repository::{MongoWritingTaskRepository, WritingTaskRepository};

#[cfg(test)]
pub use listening_set_repository::MockListeningSetRepository;
#[cfg(test)]
pub use reading_set_repository::MockReadingSetRepository;
#[cfg(test)]
pub use writing_task_repository::MockWritingTaskRepository;
