use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateExamRequest {
    #[serde(default = "default_question_count")]
    pub question_count: i64,
    /// all, simple, medium, hard
    #[serde(default = "default_difficulty_mode")]
    pub difficulty_mode: String,
    /// random, unreviewed, important
    #[serde(default = "default_question_mode")]
    pub question_mode: String,
    /// Minutes; 0 means untimed.
    #[serde(default)]
    pub time_limit: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamQuestion {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    pub answer: Option<String>,
    pub difficulty: i64,
    pub subject_id: Option<i64>,
    pub subject_name: Option<String>,
    pub question_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamPaper {
    pub exam_id: Option<i64>,
    pub question_count: i64,
    pub time_limit: i64,
    pub questions: Vec<ExamQuestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitExamRequest {
    pub question_ids: Vec<i64>,
    /// Keyed by question id (stringified, matching the wire format).
    pub answers: HashMap<String, String>,
    /// Seconds spent.
    #[serde(default)]
    pub time_used: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamDetailItem {
    pub question_id: i64,
    pub question_title: String,
    pub my_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamReport {
    pub score: i64,
    pub total: i64,
    pub accuracy: f64,
    pub correct_count: i64,
    pub wrong_count: i64,
    pub unanswered_count: i64,
    pub time_used: i64,
    pub details: Vec<ExamDetailItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveWrongQuestionRequest {
    pub question_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_reason: Option<String>,
}

fn default_question_count() -> i64 {
    20
}
fn default_difficulty_mode() -> String {
    "all".into()
}
fn default_question_mode() -> String {
    "random".into()
}
