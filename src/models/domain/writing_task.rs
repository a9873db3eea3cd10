use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct WritingPoint {
    #[serde(default)]
    pub id: i64,
    #[serde(rename = "frage", default)]
    pub prompt: String,
    #[serde(rename = "antwort", default)]
    pub model_answer: String,
}

/// Writing task (`SCHREIBEN`), served as content only and never scored.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct WritingTask {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<ObjectId>,
    #[serde(rename = "id", default)]
    pub display_id: i64,
    #[serde(rename = "themaName", default)]
    pub topic: String,
    #[serde(rename = "punkt1", default)]
    pub point1: WritingPoint,
    #[serde(rename = "punkt2", default)]
    pub point2: WritingPoint,
    #[serde(rename = "punkt3", default)]
    pub point3: WritingPoint,
}
