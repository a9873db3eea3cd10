use std::fmt;

use serde::{Deserialize, Serialize};

/// Exam section a stage belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExamSection {
    #[serde(alias = "lesen")]
    Reading,
    #[serde(alias = "horen", alias = "hören")]
    Listening,
}

impl ExamSection {
    pub fn stages(&self) -> &'static [StageKey] {
        match self {
            ExamSection::Reading => &[
                StageKey::Part1,
                StageKey::Part2,
                StageKey::Part3,
                StageKey::LanguagePart1,
                StageKey::LanguagePart2,
            ],
            ExamSection::Listening => &[
                StageKey::ListeningPart1,
                StageKey::ListeningPart2,
                StageKey::ListeningPart3,
            ],
        }
    }

    /// Path segment of the overview screen the learner returns to.
    pub fn overview_path(&self) -> &'static str {
        match self {
            ExamSection::Reading => "/lesen",
            ExamSection::Listening => "/horen",
        }
    }
}

impl fmt::Display for ExamSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExamSection::Reading => f.write_str("reading"),
            ExamSection::Listening => f.write_str("listening"),
        }
    }
}

/// One scored stage of the exam flow, also the key under which its score is
/// carried.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StageKey {
    #[serde(alias = "teil1")]
    Part1,
    #[serde(alias = "teil2")]
    Part2,
    #[serde(alias = "teil3")]
    Part3,
    #[serde(alias = "sprachteil1", alias = "spteil1")]
    LanguagePart1,
    #[serde(alias = "sprachteil2", alias = "spteil2")]
    LanguagePart2,
    #[serde(alias = "horen_teil1")]
    ListeningPart1,
    #[serde(alias = "horen_teil2")]
    ListeningPart2,
    #[serde(alias = "horen_teil3")]
    ListeningPart3,
}

impl StageKey {
    pub const ALL: [StageKey; 8] = [
        StageKey::Part1,
        StageKey::Part2,
        StageKey::Part3,
        StageKey::LanguagePart1,
        StageKey::LanguagePart2,
        StageKey::ListeningPart1,
        StageKey::ListeningPart2,
        StageKey::ListeningPart3,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StageKey::Part1 => "part1",
            StageKey::Part2 => "part2",
            StageKey::Part3 => "part3",
            StageKey::LanguagePart1 => "languagePart1",
            StageKey::LanguagePart2 => "languagePart2",
            StageKey::ListeningPart1 => "listeningPart1",
            StageKey::ListeningPart2 => "listeningPart2",
            StageKey::ListeningPart3 => "listeningPart3",
        }
    }

    pub fn section(&self) -> ExamSection {
        match self {
            StageKey::ListeningPart1 | StageKey::ListeningPart2 | StageKey::ListeningPart3 => {
                ExamSection::Listening
            }
            _ => ExamSection::Reading,
        }
    }

    /// The stage that follows in the same section, `None` for the last one.
    pub fn next(&self) -> Option<StageKey> {
        let stages = self.section().stages();
        let position = stages.iter().position(|s| s == self)?;
        stages.get(position + 1).copied()
    }
}

impl fmt::Display for StageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_keys_use_camel_case_names() {
        let json = serde_json::to_string(&StageKey::LanguagePart1).unwrap();
        assert_eq!(json, "\"languagePart1\"");
        assert_eq!(StageKey::LanguagePart2.as_str(), "languagePart2");
    }

    #[test]
    fn german_aliases_are_accepted() {
        let stage: StageKey = serde_json::from_str("\"sprachteil2\"").unwrap();
        assert_eq!(stage, StageKey::LanguagePart2);

        let stage: StageKey = serde_json::from_str("\"horen_teil3\"").unwrap();
        assert_eq!(stage, StageKey::ListeningPart3);

        let section: ExamSection = serde_json::from_str("\"lesen\"").unwrap();
        assert_eq!(section, ExamSection::Reading);
    }

    #[test]
    fn reading_stages_follow_each_other() {
        assert_eq!(StageKey::Part1.next(), Some(StageKey::Part2));
        assert_eq!(StageKey::Part3.next(), Some(StageKey::LanguagePart1));
        assert_eq!(StageKey::LanguagePart2.next(), None);
        assert_eq!(StageKey::ListeningPart1.next(), Some(StageKey::ListeningPart2));
        assert_eq!(StageKey::ListeningPart3.next(), None);
    }

    #[test]
    fn every_stage_belongs_to_its_section_list() {
        for stage in StageKey::ALL {
            assert!(stage.section().stages().contains(&stage));
        }
    }
}
