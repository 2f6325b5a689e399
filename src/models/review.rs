use serde::{Deserialize, Serialize};

/// Counters shown at the top of the review center.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewStats {
    pub today_count: i64,
    pub pending_count: i64,
    pub reviewed_count: i64,
    pub streak_days: i64,
}

/// How the review queue is selected and ordered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewMode {
    Pending,
    Important,
    Random,
    Difficulty,
}

impl ReviewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewMode::Pending => "pending",
            ReviewMode::Important => "important",
            ReviewMode::Random => "random",
            ReviewMode::Difficulty => "difficulty",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewListQuery {
    pub mode: Option<ReviewMode>,
    pub subject_id: Option<i64>,
    pub difficulty: Option<i64>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    /// Random-draw cap; when set the server ignores pagination.
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewItem {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    pub answer: Option<String>,
    pub error_reason: Option<String>,
    pub difficulty: i64,
    pub review_count: i64,
    pub last_review_at: Option<String>,
    pub subject_id: Option<i64>,
    pub subject_name: Option<String>,
    pub mastery_status: Option<String>,
}

/// Paginated or plain review queue, depending on whether `limit` was used.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReviewList {
    Page {
        list: Vec<ReviewItem>,
        total: i64,
        page: i64,
        page_size: i64,
    },
    Items(Vec<ReviewItem>),
}

/// Self-assessment submitted after reviewing one question.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewOutcome {
    Forgot,
    Hard,
    Mastered,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitReviewResponse {
    pub review_count: i64,
    pub last_review_at: String,
    pub review_status: i64,
    pub mastery_status: Option<String>,
}
