use serde::{Deserialize, Deserializer, Serialize};

use crate::models::domain::ids::{ids_equal, LooseId};

/// Accepts a single block object, an array of blocks, or null.
pub(crate) fn one_or_many<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany<T> {
        Many(Vec<T>),
        One(T),
    }

    Ok(match Option::<OneOrMany<T>>::deserialize(deserializer)? {
        Some(OneOrMany::Many(items)) => items,
        Some(OneOrMany::One(item)) => vec![item],
        None => Vec::new(),
    })
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Heading {
    pub id: LooseId,
    #[serde(default)]
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TextBlock {
    pub id: LooseId,
    #[serde(default)]
    pub text: String,
    #[serde(rename = "antwort", default)]
    pub answer: Option<LooseId>,
    #[serde(rename = "fazit", default)]
    pub explanation: String,
}

/// Reading part 1: texts are matched to one of the block's headings.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct MatchingBlock {
    #[serde(rename = "titel", default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(rename = "Überschriften", default, skip_serializing_if = "Option::is_none")]
    pub headings: Option<Vec<Heading>>,
    #[serde(rename = "Texte", default, skip_serializing_if = "Option::is_none")]
    pub texts: Option<Vec<TextBlock>>,
}

impl MatchingBlock {
    pub fn has_heading(&self, id: &LooseId) -> bool {
        self.headings
            .iter()
            .flatten()
            .any(|heading| ids_equal(&heading.id, id))
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ChoiceOption {
    pub id: LooseId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Listening content keys its answers by this code instead of the id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<LooseId>,
}

impl ChoiceOption {
    /// The value a learner submits when picking this option.
    pub fn value(&self) -> &LooseId {
        self.code.as_ref().unwrap_or(&self.id)
    }

    pub fn label(&self) -> String {
        self.text.clone().unwrap_or_else(|| self.id.canonical())
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ChoiceQuestion {
    pub id: LooseId,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<ChoiceOption>>,
    #[serde(rename = "antwort", default)]
    pub answer: Option<LooseId>,
    #[serde(rename = "begründung", default)]
    pub explanation: String,
}

impl ChoiceQuestion {
    /// The option the answer key points at, if the key is usable.
    pub fn keyed_option(&self) -> Option<&ChoiceOption> {
        let key = self.answer.as_ref()?;
        self.options
            .iter()
            .flatten()
            .find(|option| ids_equal(option.value(), key))
    }
}

/// Reading part 2, language part 1 and every listening part.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ChoiceBlock {
    #[serde(rename = "titel", default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(rename = "fragen", default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<ChoiceQuestion>>,
    #[serde(
        rename = "fazit",
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub summary: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Situation {
    pub id: LooseId,
    #[serde(default)]
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Advertisement {
    pub id: LooseId,
    #[serde(default)]
    pub text: String,
    #[serde(rename = "antwort", default)]
    pub answer: Option<LooseId>,
    #[serde(rename = "fazit", default)]
    pub explanation: String,
}

/// Reading part 3: advertisements are matched to situations.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct SituationBlock {
    #[serde(rename = "titel", default)]
    pub title: String,
    #[serde(rename = "situationen", default, skip_serializing_if = "Option::is_none")]
    pub situations: Option<Vec<Situation>>,
    #[serde(rename = "anzeigen", default, skip_serializing_if = "Option::is_none")]
    pub advertisements: Option<Vec<Advertisement>>,
}

impl SituationBlock {
    pub fn has_situation(&self, id: &LooseId) -> bool {
        self.situations
            .iter()
            .flatten()
            .any(|situation| ids_equal(&situation.id, id))
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct OrderingItem {
    pub id: LooseId,
    #[serde(default)]
    pub text: String,
    #[serde(rename = "antwort", default)]
    pub answer: Option<LooseId>,
    #[serde(rename = "begründung", default)]
    pub explanation: String,
}

/// Language part 2: every option carries its own position key.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct OrderingBlock {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<OrderingItem>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PartVariant {
    Matching,
    MultipleChoice,
    SituationMatching,
    Ordering,
}

/// The question material of one stage, by variant.
#[derive(Clone, Debug, PartialEq)]
pub enum Part {
    Matching(Vec<MatchingBlock>),
    MultipleChoice(Vec<ChoiceBlock>),
    SituationMatching(Vec<SituationBlock>),
    Ordering(Vec<OrderingBlock>),
}

impl Part {
    pub fn variant(&self) -> PartVariant {
        match self {
            Part::Matching(_) => PartVariant::Matching,
            Part::MultipleChoice(_) => PartVariant::MultipleChoice,
            Part::SituationMatching(_) => PartVariant::SituationMatching,
            Part::Ordering(_) => PartVariant::Ordering,
        }
    }

    /// Ids of every question, text block or option that needs an answer.
    pub fn item_ids(&self) -> Vec<LooseId> {
        match self {
            Part::Matching(blocks) => blocks
                .iter()
                .flat_map(|b| b.texts.iter().flatten().map(|t| t.id.clone()))
                .collect(),
            Part::MultipleChoice(blocks) => blocks
                .iter()
                .flat_map(|b| b.questions.iter().flatten().map(|q| q.id.clone()))
                .collect(),
            Part::SituationMatching(blocks) => blocks
                .iter()
                .flat_map(|b| b.advertisements.iter().flatten().map(|a| a.id.clone()))
                .collect(),
            Part::Ordering(blocks) => blocks
                .iter()
                .flat_map(|b| b.options.iter().flatten().map(|o| o.id.clone()))
                .collect(),
        }
    }

    /// Number of scorable items, the natural maximum score of the part.
    pub fn item_count(&self) -> usize {
        self.item_ids().len()
    }

    /// Describes answer keys that cannot be satisfied by any submission.
    pub fn answer_key_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        match self {
            Part::Matching(blocks) => {
                for block in blocks {
                    if block.headings.as_ref().is_none_or(|h| h.is_empty()) {
                        issues.push(format!("block '{}' has no headings", block.title));
                    }
                    for text in block.texts.iter().flatten() {
                        match &text.answer {
                            None => issues.push(format!("text {} has no answer key", text.id)),
                            Some(key) if !block.has_heading(key) => issues.push(format!(
                                "text {} references unknown heading '{}'",
                                text.id, key
                            )),
                            Some(_) => {}
                        }
                    }
                }
            }
            Part::MultipleChoice(blocks) => {
                for question in blocks.iter().flat_map(|b| b.questions.iter().flatten()) {
                    if question.options.as_ref().is_none_or(|o| o.is_empty()) {
                        issues.push(format!("question {} has no options", question.id));
                    } else if question.keyed_option().is_none() {
                        issues.push(format!(
                            "question {} answer key matches no option",
                            question.id
                        ));
                    }
                }
            }
            Part::SituationMatching(blocks) => {
                for block in blocks {
                    for ad in block.advertisements.iter().flatten() {
                        match &ad.answer {
                            None => issues.push(format!("advertisement {} has no answer key", ad.id)),
                            Some(key) if !block.has_situation(key) => issues.push(format!(
                                "advertisement {} references unknown situation '{}'",
                                ad.id, key
                            )),
                            Some(_) => {}
                        }
                    }
                }
            }
            Part::Ordering(blocks) => {
                for item in blocks.iter().flat_map(|b| b.options.iter().flatten()) {
                    if item.answer.is_none() {
                        issues.push(format!("option {} has no position key", item.id));
                    }
                }
            }
        }
        issues
    }
}
