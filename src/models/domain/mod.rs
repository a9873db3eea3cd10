pub mod answer_map;
pub mod ids;
pub mod listening_set;
pub mod part;
pub mod reading_set;
pub mod stage;
pub mod writing_task;
pub use answer_map::AnswerMap;
pub use ids::{ids_equal, LooseId};
pub use listening_set::ListeningSet;
pub use part::Part;
pub use reading_set::ReadingSet;
pub use stage::{ExamSection, StageKey};
pub use writing_task::WritingTask;
