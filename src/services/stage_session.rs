use serde::Serialize;
use uuid::Uuid;

use crate::{
    errors::AppResult,
    models::domain::{ids_equal, AnswerMap, LooseId, Part, StageKey},
    services::{
        score_carrier::ScoreCarrier,
        stage_evaluator::{StageEvaluation, StageEvaluator},
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageState {
    Loading,
    Answering,
    Reviewed,
    Failed,
}

/// State of one stage screen: its part, the answers given so far and,
/// once reviewed, the frozen evaluation.
///
/// `Loading -> Answering -> Reviewed`, or `Loading -> Failed`. Neither
/// `Reviewed` nor `Failed` is ever left; re-opening the stage creates a new
/// session.
pub struct StageSession {
    screen_id: Uuid,
    stage: StageKey,
    exercise_set_id: String,
    state: StageState,
    part: Option<Part>,
    answers: AnswerMap,
    evaluation: Option<StageEvaluation>,
    failure: Option<String>,
    carrier: ScoreCarrier,
}

impl StageSession {
    pub fn new(stage: StageKey, exercise_set_id: &str, carrier: ScoreCarrier) -> Self {
        Self {
            screen_id: Uuid::new_v4(),
            stage,
            exercise_set_id: exercise_set_id.to_string(),
            state: StageState::Loading,
            part: None,
            answers: AnswerMap::new(),
            evaluation: None,
            failure: None,
            carrier,
        }
    }

    pub fn screen_id(&self) -> Uuid {
        self.screen_id
    }

    pub fn stage(&self) -> StageKey {
        self.stage
    }

    pub fn exercise_set_id(&self) -> &str {
        &self.exercise_set_id
    }

    pub fn state(&self) -> StageState {
        self.state
    }

    pub fn part(&self) -> Option<&Part> {
        self.part.as_ref()
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn evaluation(&self) -> Option<&StageEvaluation> {
        self.evaluation.as_ref()
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Content arrived. Only has an effect while loading.
    pub fn loaded(&mut self, part: Part) -> bool {
        if self.state != StageState::Loading {
            return false;
        }
        self.part = Some(part);
        self.state = StageState::Answering;
        true
    }

    /// Content could not be fetched. Only has an effect while loading.
    pub fn load_failed(&mut self, reason: impl Into<String>) -> bool {
        if self.state != StageState::Loading {
            return false;
        }
        self.failure = Some(reason.into());
        self.state = StageState::Failed;
        true
    }

    /// Records an answer for an item of this part. Ignored unless answering
    /// or when the id names no item of the part.
    pub fn record_answer(&mut self, question_id: LooseId, value: LooseId) -> bool {
        if self.state != StageState::Answering {
            log::debug!(
                "Ignoring answer for {} on {} in state {:?}",
                question_id,
                self.stage,
                self.state
            );
            return false;
        }

        let known = self
            .part
            .as_ref()
            .is_some_and(|part| part.item_ids().iter().any(|id| ids_equal(id, &question_id)));
        if !known {
            log::debug!("Ignoring answer for unknown item {} on {}", question_id, self.stage);
            return false;
        }

        self.answers.record(&question_id, value);
        true
    }

    /// True while answering once every item of the part has an answer.
    pub fn can_review(&self) -> bool {
        if self.state != StageState::Answering {
            return false;
        }
        self.part.as_ref().is_some_and(|part| {
            part.item_ids()
                .iter()
                .all(|id| self.answers.has_answer(id))
        })
    }

    /// Scores the stage, carries the score forward and freezes the answers.
    ///
    /// Returns `Ok(false)` without doing anything when the stage cannot be
    /// reviewed yet. If carrying the score fails the stage stays answerable.
    pub async fn review(&mut self) -> AppResult<bool> {
        if !self.can_review() {
            return Ok(false);
        }
        let Some(part) = self.part.as_ref() else {
            return Ok(false);
        };

        let evaluation = StageEvaluator::evaluate(part, &self.answers);
        self.carrier
            .set_score(self.stage, evaluation.correct_count)
            .await?;

        log::info!(
            "Session {} reviewed {}: {}/{} correct",
            self.carrier.session_id(),
            self.stage,
            evaluation.correct_count,
            evaluation.item_count
        );

        self.evaluation = Some(evaluation);
        self.state = StageState::Reviewed;
        Ok(true)
    }
}
