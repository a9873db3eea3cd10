use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::domain::part::{
    one_or_many, ChoiceBlock, MatchingBlock, OrderingBlock, Part, SituationBlock,
};
use crate::models::domain::stage::{ExamSection, StageKey};

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ReadingParts {
    #[serde(rename = "teil1", default, deserialize_with = "one_or_many")]
    pub part1: Vec<MatchingBlock>,
    #[serde(rename = "teil2", default, deserialize_with = "one_or_many")]
    pub part2: Vec<ChoiceBlock>,
    #[serde(rename = "teil3", default, deserialize_with = "one_or_many")]
    pub part3: Vec<SituationBlock>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct LanguageParts {
    #[serde(rename = "teil1", default, deserialize_with = "one_or_many")]
    pub part1: Vec<ChoiceBlock>,
    #[serde(rename = "teil2", default, deserialize_with = "one_or_many")]
    pub part2: Vec<OrderingBlock>,
}

/// A themed reading exam with its language-building parts (`LESEN`).
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ReadingSet {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<ObjectId>,
    #[serde(rename = "id", default)]
    pub display_id: i64,
    #[serde(rename = "thema", default)]
    pub title: String,
    #[serde(rename = "themaTr", default)]
    pub translated_title: String,
    #[serde(rename = "teile", default)]
    pub reading: ReadingParts,
    #[serde(rename = "sprachb", default)]
    pub language: LanguageParts,
}

impl ReadingSet {
    pub fn new(display_id: i64, title: &str, translated_title: &str) -> Self {
        ReadingSet {
            object_id: None,
            display_id,
            title: title.to_string(),
            translated_title: translated_title.to_string(),
            reading: ReadingParts::default(),
            language: LanguageParts::default(),
        }
    }

    pub fn part(&self, stage: StageKey) -> Option<Part> {
        match stage {
            StageKey::Part1 => Some(Part::Matching(self.reading.part1.clone())),
            StageKey::Part2 => Some(Part::MultipleChoice(self.reading.part2.clone())),
            StageKey::Part3 => Some(Part::SituationMatching(self.reading.part3.clone())),
            StageKey::LanguagePart1 => Some(Part::MultipleChoice(self.language.part1.clone())),
            StageKey::LanguagePart2 => Some(Part::Ordering(self.language.part2.clone())),
            _ => None,
        }
    }

    /// Answer-key problems across every stage, prefixed with the stage key.
    pub fn answer_key_issues(&self) -> Vec<String> {
        ExamSection::Reading
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
