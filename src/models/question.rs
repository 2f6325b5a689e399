use serde::{Deserialize, Serialize};

/// A subject grouping wrong questions, with display color and icon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub icon: String,
    pub sort_order: i64,
    #[serde(default)]
    pub question_count: i64,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSubjectRequest {
    pub name: String,
    #[serde(default = "default_subject_color")]
    pub color: String,
    #[serde(default = "default_subject_icon")]
    pub icon: String,
    #[serde(default)]
    pub sort_order: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSubjectRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<i64>,
}

/// List-view projection of a wrong-question record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionBrief {
    pub id: i64,
    pub title: String,
    pub subject_id: Option<i64>,
    pub subject_name: Option<String>,
    pub subject_color: Option<String>,
    pub difficulty: i64,
    pub question_type: String,
    pub review_status: i64,
    pub mastery_status: Option<String>,
    pub error_reason: Option<String>,
    pub created_at: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Full wrong-question record as returned by the detail endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionDetail {
    #[serde(flatten)]
    pub brief: QuestionBrief,
    pub content: Option<String>,
    pub answer: Option<String>,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
    #[serde(default)]
    pub review_count: i64,
    pub last_review_at: Option<String>,
    pub next_review_at: Option<String>,
    #[serde(default)]
    pub is_important: bool,
    #[serde(default)]
    pub is_mastered: bool,
    #[serde(default)]
    pub error_images: Vec<String>,
    #[serde(default)]
    pub answer_images: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOption {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub option_key: String,
    pub option_text: String,
    #[serde(default)]
    pub is_correct: bool,
    #[serde(default)]
    pub sort_order: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateQuestionRequest {
    pub title: String,
    pub question_type: String,
    pub difficulty: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_reason: Option<String>,
    #[serde(default)]
    pub review_status: i64,
    #[serde(default)]
    pub is_important: bool,
    #[serde(default)]
    pub is_mastered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<QuestionOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_images: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateQuestionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_status: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_important: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_mastered: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<QuestionOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer_images: Option<Vec<String>>,
}

/// Filters accepted by the paginated question list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionListQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    pub keyword: Option<String>,
    pub subject_id: Option<i64>,
    pub difficulty: Option<i64>,
    pub question_type: Option<String>,
    pub review_status: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionPage {
    pub list: Vec<QuestionBrief>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

fn default_subject_color() -> String {
    "#4299e1".into()
}
fn default_subject_icon() -> String {
    "fas fa-book".into()
}
fn default_page() -> i64 {
    1
}
fn default_page_size() -> i64 {
    10
}
