use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::domain::part::{one_or_many, ChoiceBlock, ChoiceQuestion, Part};
use crate::models::domain::stage::{ExamSection, StageKey};

/// Listening exam (`HÖREN`): three lists of multiple-choice questions.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ListeningSet {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<ObjectId>,
    #[serde(rename = "teil1", default, deserialize_with = "one_or_many")]
    pub part1: Vec<ChoiceQuestion>,
    #[serde(rename = "teil2", default, deserialize_with = "one_or_many")]
    pub part2: Vec<ChoiceQuestion>,
    #[serde(rename = "teil3", default, deserialize_with = "one_or_many")]
    pub part3: Vec<ChoiceQuestion>,
}

impl ListeningSet {
    pub fn part(&self, stage: StageKey) -> Option<Part> {
        let questions = match stage {
            StageKey::ListeningPart1 => &self.part1,
            StageKey::ListeningPart2 => &self.part2,
            StageKey::ListeningPart3 => &self.part3,
            _ => return None,
        };

        Some(Part::MultipleChoice(vec![ChoiceBlock {
            questions: Some(questions.clone()),
            ..ChoiceBlock::default()
        }]))
    }

    pub fn answer_key_issues(&self) -> Vec<String> {
        ExamSection::Listening
            .stages()
            .iter()
            .filter_map(|stage| self.part(*stage).map(|part| (*stage, part)))
            .flat_map(|(stage, part)| {
                part.answer_key_issues()
                    .into_iter()
                    .map(move |issue| format!("{}: {}", stage, issue))
            })
            .collect()
    }
}
