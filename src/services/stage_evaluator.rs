use serde::Serialize;

use crate::models::domain::{ids_equal, AnswerMap, LooseId, Part};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Correct,
    Incorrect,
    Unanswered,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QuestionResult {
    pub question_id: LooseId,
    pub verdict: Verdict,
    pub submitted: Option<LooseId>,
    pub expected: Option<LooseId>,
    pub explanation: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StageEvaluation {
    pub correct_count: u32,
    pub item_count: u32,
    pub results: Vec<QuestionResult>,
}

impl StageEvaluation {
    fn from_results(results: Vec<QuestionResult>) -> Self {
        let correct_count = results
            .iter()
            .filter(|r| r.verdict == Verdict::Correct)
            .count() as u32;

        StageEvaluation {
            correct_count,
            item_count: results.len() as u32,
            results,
        }
    }

    pub fn result_for(&self, question_id: &LooseId) -> Option<&QuestionResult> {
        self.results
            .iter()
            .find(|r| ids_equal(&r.question_id, question_id))
    }
}

pub struct StageEvaluator;

impl StageEvaluator {
    /// Scores a part against the learner's answers.
    ///
    /// Pure: the same inputs always give the same evaluation. Items whose
    /// answer key cannot be satisfied (missing key, missing options, a key
    /// pointing at nothing) are judged incorrect instead of failing the
    /// whole part.
    pub fn evaluate(part: &Part, answers: &AnswerMap) -> StageEvaluation {
        let results = match part {
            Part::Matching(blocks) => blocks
                .iter()
                .flat_map(|block| {
                    block.texts.iter().flatten().map(move |text| {
                        let usable_key = text.answer.as_ref().filter(|key| block.has_heading(key));
                        Self::judge(&text.id, answers, usable_key, text.answer.as_ref(), &text.explanation)
                    })
                })
                .collect(),
            Part::MultipleChoice(blocks) => blocks
                .iter()
                .flat_map(|block| block.questions.iter().flatten())
                .map(|question| {
                    let usable_key = question.keyed_option().map(|option| option.value());
                    Self::judge(
                        &question.id,
                        answers,
                        usable_key,
                        usable_key.or(question.answer.as_ref()),
                        &question.explanation,
                    )
                })
                .collect(),
            Part::SituationMatching(blocks) => blocks
                .iter()
                .flat_map(|block| {
                    block.advertisements.iter().flatten().map(move |ad| {
                        let usable_key = ad.answer.as_ref().filter(|key| block.has_situation(key));
                        Self::judge(&ad.id, answers, usable_key, ad.answer.as_ref(), &ad.explanation)
                    })
                })
                .collect(),
            Part::Ordering(blocks) => blocks
                .iter()
                .flat_map(|block| block.options.iter().flatten())
                .map(|item| {
                    Self::judge(&item.id, answers, item.answer.as_ref(), item.answer.as_ref(), &item.explanation)
                })
                .collect(),
        };

        StageEvaluation::from_results(results)
    }

    fn judge(
        question_id: &LooseId,
        answers: &AnswerMap,
        usable_key: Option<&LooseId>,
        expected: Option<&LooseId>,
        explanation: &str,
    ) -> QuestionResult {
        let submitted = answers.answer_for(question_id).cloned();

        let verdict = match (&submitted, usable_key) {
            (None, _) => Verdict::Unanswered,
            (Some(value), Some(key)) if ids_equal(value, key) => Verdict::Correct,
            _ => Verdict::Incorrect,
        };

        QuestionResult {
            question_id: question_id.clone(),
            verdict,
            submitted,
            expected: expected.cloned(),
            explanation: explanation.to_string(),
        }
    }
}
