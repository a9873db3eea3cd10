use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::domain::ids::LooseId;

/// A learner's in-progress answers for one stage, keyed by the canonical
/// form of the question id.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AnswerMap(BTreeMap<String, LooseId>);

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites any earlier answer for the same question.
    pub fn record(&mut self, question_id: &LooseId, value: LooseId) {
        self.0.insert(question_id.canonical(), value);
    }

    /// The recorded answer, ignoring blank entries.
    pub fn answer_for(&self, question_id: &LooseId) -> Option<&LooseId> {
        self.0
            .get(&question_id.canonical())
            .filter(|value| !value.is_blank())
    }

    pub fn has_answer(&self, question_id: &LooseId) -> bool {
        self.answer_for(question_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(LooseId, LooseId)> for AnswerMap {
    fn from_iter<I: IntoIterator<Item = (LooseId, LooseId)>>(iter: I) -> Self {
        let mut answers = AnswerMap::new();
        for (question_id, value) in iter {
            answers.record(&question_id, value);
        }
        answers
    }
}
