use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::models::domain::LooseId;

fn not_blank(id: &LooseId) -> Result<(), ValidationError> {
    if id.is_blank() {
        return Err(ValidationError::new("blank_id"));
    }
    Ok(())
}

/// A learner's pick for one item. An empty `value` clears the answer.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecordAnswerRequest {
    #[validate(custom(function = "not_blank"))]
    pub question_id: LooseId,

    pub value: LooseId,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PaginationParams {
    #[validate(range(min = 0))]
    pub offset: Option<i64>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            offset: Some(0),
            limit: Some(20),
        }
    }
}

impl PaginationParams {
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).min(100)
    }
}
