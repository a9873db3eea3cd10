use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::{ExamSection, ListeningSet, Part, ReadingSet, StageKey, WritingTask},
    repositories::{ListeningSetRepository, ReadingSetRepository, WritingTaskRepository},
    services::result_aggregator::StageMaxima,
};

/// Read access to exam content, plus authoring of reading sets.
pub struct ContentService {
    reading: Arc<dyn ReadingSetRepository>,
    listening: Arc<dyn ListeningSetRepository>,
    writing: Arc<dyn WritingTaskRepository>,
}

impl ContentService {
    pub fn new(
        reading: Arc<dyn ReadingSetRepository>,
        listening: Arc<dyn ListeningSetRepository>,
        writing: Arc<dyn WritingTaskRepository>,
    ) -> Self {
        Self {
            reading,
            listening,
            writing,
        }
    }

    pub async fn get_reading_set(&self, id: &str) -> AppResult<ReadingSet> {
        self.reading
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reading set with id '{}' not found", id)))
    }

    pub async fn list_reading_sets(&self, offset: i64, limit: i64) -> AppResult<(Vec<ReadingSet>, i64)> {
        self.reading.list(offset, limit).await
    }

    pub async fn create_reading_set(&self, set: ReadingSet) -> AppResult<ReadingSet> {
        Self::check_reading_set(&set)?;
        let created = self.reading.create(set).await?;
        log::info!("Created reading set {}", created.display_id);
        Ok(created)
    }

    pub async fn update_reading_set(&self, id: &str, set: ReadingSet) -> AppResult<ReadingSet> {
        Self::check_reading_set(&set)?;
        let updated = self.reading.update(id, set).await?;
        log::info!("Updated reading set {}", updated.display_id);
        Ok(updated)
    }

    pub async fn delete_reading_set(&self, id: &str) -> AppResult<()> {
        self.reading.delete(id).await?;
        log::info!("Deleted reading set {}", id);
        Ok(())
    }

    pub async fn get_listening_set(&self, id: &str) -> AppResult<ListeningSet> {
        self.listening
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Listening set with id '{}' not found", id)))
    }

    pub async fn list_listening_sets(&self) -> AppResult<Vec<ListeningSet>> {
        self.listening.list().await
    }

    pub async fn get_writing_task(&self, id: &str) -> AppResult<WritingTask> {
        self.writing
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Writing task with id '{}' not found", id)))
    }

    pub async fn list_writing_tasks(&self) -> AppResult<Vec<WritingTask>> {
        self.writing.list().await
    }

    /// Fetches the part a stage screen works on. Broken answer keys are
    /// logged and left for the evaluator to judge.
    pub async fn load_part(&self, set_id: &str, stage: StageKey) -> AppResult<Part> {
        let part = match stage.section() {
            ExamSection::Reading => self.get_reading_set(set_id).await?.part(stage),
            ExamSection::Listening => self.get_listening_set(set_id).await?.part(stage),
        }
        .ok_or_else(|| AppError::NotFound(format!("Stage '{}' not found in set '{}'", stage, set_id)))?;

        for issue in part.answer_key_issues() {
            log::warn!("Set {} {}: {}", set_id, stage, issue);
        }

        Ok(part)
    }

    /// Maxima for the result screen of a section.
    ///
    /// Reading uses the fixed exam maxima unless `derive_reading` is set;
    /// listening is always counted from the loaded set.
    pub async fn section_maxima(
        &self,
        section: ExamSection,
        set_id: &str,
        derive_reading: bool,
    ) -> AppResult<StageMaxima> {
        let parts: Vec<(StageKey, Part)> = match section {
            ExamSection::Reading if !derive_reading => return Ok(StageMaxima::reading_defaults()),
            ExamSection::Reading => {
                let set = self.get_reading_set(set_id).await?;
                section
                    .stages()
                    .iter()
                    .filter_map(|stage| set.part(*stage).map(|part| (*stage, part)))
                    .collect()
            }
            ExamSection::Listening => {
                let set = self.get_listening_set(set_id).await?;
                section
                    .stages()
                    .iter()
                    .filter_map(|stage| set.part(*stage).map(|part| (*stage, part)))
                    .collect()
            }
        };

        Ok(StageMaxima::derived_from(
            parts.iter().map(|(stage, part)| (*stage, part)),
        ))
    }

    fn check_reading_set(set: &ReadingSet) -> AppResult<()> {
        if set.display_id <= 0 {
            return Err(AppError::ValidationError(format!(
                "Reading set id must be positive, got {}",
                set.display_id
            )));
        }
        if set.title.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Reading set needs a title (thema)".to_string(),
            ));
        }

        let issues = set.answer_key_issues();
        if !issues.is_empty() {
            return Err(AppError::ValidationError(format!(
                "Reading set {} has broken answer keys: {}",
                set.display_id,
                issues.join("; ")
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::part::{Heading, MatchingBlock, TextBlock};
    use crate::models::domain::LooseId;
    use crate::repositories::{
        MockListeningSetRepository, MockReadingSetRepository, MockWritingTaskRepository,
    };

    fn service_with_reading(reading: MockReadingSetRepository) -> ContentService {
        ContentService::new(
            Arc::new(reading),
            Arc::new(MockListeningSetRepository::new()),
            Arc::new(MockWritingTaskRepository::new()),
        )
    }

    fn matching_set(key: &str) -> ReadingSet {
        let mut set = ReadingSet::new(3, "Reisen", "Travel");
        set.reading.part1 = vec![MatchingBlock {
            headings: Some(vec![Heading { id: LooseId::from("a"), text: "Urlaub".to_string() }]),
            texts: Some(vec![TextBlock {
                id: LooseId::Number(1),
                text: "Am Meer...".to_string(),
                answer: Some(LooseId::from(key)),
                explanation: String::new(),
            }]),
            ..MatchingBlock::default()
        }];
        set
    }

    #[tokio::test]
    async fn test_get_reading_set_not_found() {
        let mut reading = MockReadingSetRepository::new();
        reading.expect_find_by_id().returning(|_| Ok(None));

        let result = service_with_reading(reading).get_reading_set("42").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_load_part_returns_stage_part() {
        let mut reading = MockReadingSetRepository::new();
        reading
            .expect_find_by_id()
            .withf(|id| id == "3")
            .returning(|_| Ok(Some(matching_set("a"))));

        let part = service_with_reading(reading)
            .load_part("3", StageKey::Part1)
            .await
            .unwrap();

        assert_eq!(part.item_count(), 1);
    }

    #[tokio::test]
    async fn test_load_part_propagates_repository_errors() {
        let mut reading = MockReadingSetRepository::new();
        reading
            .expect_find_by_id()
            .returning(|_| Err(AppError::DatabaseError("connection reset".to_string())));

        let result = service_with_reading(reading).load_part("3", StageKey::Part2).await;

        assert!(matches!(result, Err(AppError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_broken_answer_keys() {
        let mut reading = MockReadingSetRepository::new();
        reading.expect_create().never();

        let result = service_with_reading(reading)
            .create_reading_set(matching_set("z"))
            .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_create_accepts_consistent_set() {
        let mut reading = MockReadingSetRepository::new();
        reading.expect_create().times(1).returning(Ok);

        let created = service_with_reading(reading)
            .create_reading_set(matching_set("a"))
            .await
            .unwrap();

        assert_eq!(created.display_id, 3);
    }

    #[tokio::test]
    async fn test_reading_maxima_are_fixed_unless_derived() {
        let mut reading = MockReadingSetRepository::new();
        reading
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(matching_set("a"))));
        let service = service_with_reading(reading);

        let fixed = service
            .section_maxima(ExamSection::Reading, "3", false)
            .await
            .unwrap();
        let derived = service
            .section_maxima(ExamSection::Reading, "3", true)
            .await
            .unwrap();

        assert_eq!(fixed, StageMaxima::reading_defaults());
        assert_eq!(derived.get(StageKey::Part1), 1);
        assert_eq!(derived.get(StageKey::Part3), 0);
    }
}
