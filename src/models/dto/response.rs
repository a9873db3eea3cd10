use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    models::domain::{
        ids_equal,
        part::{ChoiceOption, OrderingBlock, PartVariant},
        AnswerMap, ExamSection, LooseId, Part, ReadingSet, StageKey,
    },
    services::{
        result_aggregator::{FeedbackTier, ResultSummary, StageLine},
        stage_evaluator::QuestionResult,
        stage_session::{StageSession, StageState},
    },
};

const MIN_ORDERING_POSITIONS: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct SessionCreated {
    pub session_id: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceView {
    pub value: LooseId,
    pub label: String,
}

impl From<&ChoiceOption> for ChoiceView {
    fn from(option: &ChoiceOption) -> Self {
        ChoiceView {
            value: option.value().clone(),
            label: option.label(),
        }
    }
}

/// One answerable item. The explanation stays hidden until the stage is
/// reviewed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemView {
    pub id: LooseId,
    pub prompt: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ChoiceView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// A block of items. `choices` is the pool shared by every item of the
/// block: headings, situations or ordering positions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BlockView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<ChoiceView>,
    pub items: Vec<ItemView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub summary: Vec<String>,
}

/// Where the learner goes after a reviewed stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NextTarget {
    Stage { set_id: String, stage: StageKey },
    Result { set_id: String, section: ExamSection },
}

#[derive(Debug, Clone, Serialize)]
pub struct StageView {
    pub screen_id: Uuid,
    pub set_id: String,
    pub stage: StageKey,
    pub section: ExamSection,
    pub state: StageState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<PartVariant>,
    pub blocks: Vec<BlockView>,
    pub answers: AnswerMap,
    pub ready_to_review: bool,
    pub item_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_count: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub results: Vec<QuestionResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<NextTarget>,
}

impl StageView {
    pub fn from_session(session: &StageSession) -> Self {
        let stage = session.stage();
        let reviewed = session.state() == StageState::Reviewed;
        let evaluation = session.evaluation();

        let next = reviewed.then(|| match stage.next() {
            Some(next_stage) => NextTarget::Stage {
                set_id: session.exercise_set_id().to_string(),
                stage: next_stage,
            },
            None => NextTarget::Result {
                set_id: session.exercise_set_id().to_string(),
                section: stage.section(),
            },
        });

        StageView {
            screen_id: session.screen_id(),
            set_id: session.exercise_set_id().to_string(),
            stage,
            section: stage.section(),
            state: session.state(),
            error: session.failure().map(str::to_string),
            variant: session.part().map(Part::variant),
            blocks: session
                .part()
                .map(|part| block_views(part, reviewed))
                .unwrap_or_default(),
            answers: session.answers().clone(),
            ready_to_review: session.can_review(),
            item_count: session.part().map(Part::item_count).unwrap_or(0),
            correct_count: evaluation.map(|e| e.correct_count),
            results: evaluation.map(|e| e.results.clone()).unwrap_or_default(),
            next,
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.trim().is_empty()).then(|| value.to_string())
}

fn block_views(part: &Part, reviewed: bool) -> Vec<BlockView> {
    let explanation = |text: &str| reviewed.then(|| text.to_string());

    match part {
        Part::Matching(blocks) => blocks
            .iter()
            .map(|block| BlockView {
                title: non_empty(&block.title),
                photo: block.photo.clone(),
                choices: block
                    .headings
                    .iter()
                    .flatten()
                    .map(|heading| ChoiceView {
                        value: heading.id.clone(),
                        label: heading.text.clone(),
                    })
                    .collect(),
                items: block
                    .texts
                    .iter()
                    .flatten()
                    .map(|text| ItemView {
                        id: text.id.clone(),
                        prompt: text.text.clone(),
                        options: Vec::new(),
                        explanation: explanation(&text.explanation),
                    })
                    .collect(),
                ..BlockView::default()
            })
            .collect(),
        Part::MultipleChoice(blocks) => blocks
            .iter()
            .map(|block| BlockView {
                title: non_empty(&block.title),
                photo: block.photo.clone(),
                text: non_empty(&block.text),
                items: block
                    .questions
                    .iter()
                    .flatten()
                    .map(|question| ItemView {
                        id: question.id.clone(),
                        prompt: question.text.clone(),
                        options: question.options.iter().flatten().map(ChoiceView::from).collect(),
                        explanation: explanation(&question.explanation),
                    })
                    .collect(),
                summary: if reviewed { block.summary.clone() } else { Vec::new() },
                ..BlockView::default()
            })
            .collect(),
        Part::SituationMatching(blocks) => blocks
            .iter()
            .map(|block| BlockView {
                title: non_empty(&block.title),
                choices: block
                    .situations
                    .iter()
                    .flatten()
                    .map(|situation| ChoiceView {
                        value: situation.id.clone(),
                        label: situation.text.clone(),
                    })
                    .collect(),
                items: block
                    .advertisements
                    .iter()
                    .flatten()
                    .map(|ad| ItemView {
                        id: ad.id.clone(),
                        prompt: ad.text.clone(),
                        options: Vec::new(),
                        explanation: explanation(&ad.explanation),
                    })
                    .collect(),
                ..BlockView::default()
            })
            .collect(),
        Part::Ordering(blocks) => {
            let choices = ordering_positions(blocks);

            blocks
                .iter()
                .map(|block| BlockView {
                    text: non_empty(&block.text),
                    choices: choices.clone(),
                    items: block
                        .options
                        .iter()
                        .flatten()
                        .map(|item| ItemView {
                            id: item.id.clone(),
                            prompt: item.text.clone(),
                            options: Vec::new(),
                            explanation: explanation(&item.explanation),
                        })
                        .collect(),
                    ..BlockView::default()
                })
                .collect()
        }
    }
}

/// Positions 0 up to the longest block's option count, never fewer than ten,
/// followed by any stored key outside that range.
fn ordering_positions(blocks: &[OrderingBlock]) -> Vec<ChoiceView> {
    let longest = blocks
        .iter()
        .map(|block| block.options.as_ref().map_or(0, Vec::len))
        .max()
        .unwrap_or(0);

    let mut positions: Vec<LooseId> = (0..longest.max(MIN_ORDERING_POSITIONS) as i64)
        .map(LooseId::Number)
        .collect();
    for key in blocks
        .iter()
        .flat_map(|block| block.options.iter().flatten())
        .filter_map(|item| item.answer.as_ref())
    {
        if !positions.iter().any(|position| ids_equal(position, key)) {
            positions.push(key.clone());
        }
    }

    positions
        .into_iter()
        .map(|value| ChoiceView {
            label: value.to_string(),
            value,
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerRecorded {
    pub accepted: bool,
    pub view: StageView,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewOutcome {
    pub reviewed: bool,
    pub view: StageView,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoresView {
    pub session_id: String,
    pub scores: HashMap<StageKey, u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultView {
    pub set_id: String,
    pub section: ExamSection,
    pub stages: Vec<StageLine>,
    pub total: u32,
    pub max_total: u32,
    pub percentage: f64,
    pub tier: FeedbackTier,
    pub message: &'static str,
    pub overview_path: &'static str,
}

impl ResultView {
    pub fn new(set_id: &str, section: ExamSection, summary: ResultSummary) -> Self {
        ResultView {
            set_id: set_id.to_string(),
            section,
            stages: summary.stages,
            total: summary.total,
            max_total: summary.max_total,
            percentage: summary.percentage,
            tier: summary.tier,
            message: summary.tier.message(),
            overview_path: section.overview_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ReadingSetListResponse {
    pub items: Vec<ReadingSet>,
    pub total: i64,
    pub offset: i64,
    pub limit: i64,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}
