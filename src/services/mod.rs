pub mod content_service;
pub mod quiz_session_service;
pub mod result_aggregator;
pub mod score_carrier;
pub mod stage_evaluator;
pub mod stage_session;

pub use content_service::ContentService;
pub use quiz_session_service::QuizSessionService;
pub use result_aggregator::{FeedbackTier, ResultAggregator, ResultSummary, StageMaxima};
pub use score_carrier::{ScoreCarrier, StageScores};
pub use stage_evaluator::{StageEvaluation, StageEvaluator, Verdict};
pub use stage_session::{StageSession, StageState};
