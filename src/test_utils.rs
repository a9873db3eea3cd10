#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::part::{
        Advertisement, ChoiceBlock, ChoiceOption, ChoiceQuestion, Heading, MatchingBlock,
        OrderingBlock, OrderingItem, Situation, SituationBlock, TextBlock,
    };
    use crate::models::domain::{LooseId, ReadingSet};

    fn option(id: &str, text: &str) -> ChoiceOption {
        ChoiceOption {
            id: LooseId::from(id),
            text: Some(text.to_string()),
            code: None,
        }
    }

    /// A small but complete reading set whose answer keys all resolve.
    pub fn sample_reading_set() -> ReadingSet {
        let mut set = ReadingSet::new(7, "Arbeit und Beruf", "Work and career");

        set.reading.part1 = vec![MatchingBlock {
            title: "Lesen Teil 1".to_string(),
            photo: None,
            headings: Some(vec![
                Heading { id: LooseId::from("a"), text: "Neue Arbeitszeiten".to_string() },
                Heading { id: LooseId::from("b"), text: "Streik im Hafen".to_string() },
            ]),
            texts: Some(vec![
                TextBlock {
                    id: LooseId::Number(1),
                    text: "Ab Mai beginnt die Schicht eine Stunde später.".to_string(),
                    answer: Some(LooseId::from("a")),
                    explanation: "Es geht um die Arbeitszeit.".to_string(),
                },
                TextBlock {
                    id: LooseId::Number(2),
                    text: "Die Hafenarbeiter legen die Arbeit nieder.".to_string(),
                    answer: Some(LooseId::from("b")),
                    explanation: "Hafenarbeiter streiken.".to_string(),
                },
            ]),
        }];

        set.reading.part2 = vec![ChoiceBlock {
            title: "Lesen Teil 2".to_string(),
            text: "Frau Berger arbeitet seit zehn Jahren im Homeoffice.".to_string(),
            questions: Some(vec![ChoiceQuestion {
                id: LooseId::Number(6),
                text: "Frau Berger arbeitet ...".to_string(),
                options: Some(vec![option("a", "im Büro."), option("b", "zu Hause.")]),
                answer: Some(LooseId::from("b")),
                explanation: "Homeoffice heißt zu Hause.".to_string(),
            }]),
            ..ChoiceBlock::default()
        }];

        set.reading.part3 = vec![SituationBlock {
            title: "Lesen Teil 3".to_string(),
            situations: Some(vec![
                Situation { id: LooseId::Number(11), text: "Sie suchen einen Nebenjob.".to_string() },
                Situation { id: LooseId::Number(12), text: "Sie möchten Spanisch lernen.".to_string() },
            ]),
            advertisements: Some(vec![Advertisement {
                id: LooseId::from("x"),
                text: "Aushilfe für Wochenenden gesucht.".to_string(),
                answer: Some(LooseId::Number(11)),
                explanation: "Wochenendarbeit ist ein Nebenjob.".to_string(),
            }]),
        }];

        set.language.part1 = vec![ChoiceBlock {
            text: "Ich freue mich ___ Ihre Antwort.".to_string(),
            questions: Some(vec![ChoiceQuestion {
                id: LooseId::Number(21),
                text: "Lücke 21".to_string(),
                options: Some(vec![option("a", "auf"), option("b", "über")]),
                answer: Some(LooseId::from("a")),
                explanation: "sich freuen auf + Zukunft".to_string(),
            }]),
            ..ChoiceBlock::default()
        }];

        set.language.part2 = vec![OrderingBlock {
            text: "Liebe Kollegen, ___ danke ich ___.".to_string(),
            options: Some(vec![
                OrderingItem {
                    id: LooseId::from("A"),
                    text: "herzlich".to_string(),
                    answer: Some(LooseId::Number(0)),
                    explanation: String::new(),
                },
                OrderingItem {
                    id: LooseId::from("B"),
                    text: "Ihnen".to_string(),
                    answer: Some(LooseId::Number(1)),
                    explanation: String::new(),
                },
            ]),
        }];

        set
    }
}

#[cfg(test)]
pub mod test_helpers {
    use std::sync::Arc;

    use crate::{
        app_state::AppState,
        config::Config,
        repositories::{
            InMemoryScoreStore, MockListeningSetRepository, MockReadingSetRepository,
            MockWritingTaskRepository,
        },
    };

    /// App state over the given reading repository; the other stores are
    /// mocks without expectations.
    pub fn state_with_reading(reading: MockReadingSetRepository) -> Arc<AppState> {
        Arc::new(AppState::from_parts(
            Config::test_config(),
            Arc::new(reading),
            Arc::new(MockListeningSetRepository::new()),
            Arc::new(MockWritingTaskRepository::new()),
            Arc::new(InMemoryScoreStore::new()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_sample_reading_set_is_consistent() {
        let set = sample_reading_set();
        assert_eq!(set.display_id, 7);
        assert!(set.answer_key_issues().is_empty());
    }
}
