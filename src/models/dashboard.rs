use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_count: i64,
    pub subject_count: i64,
    pub reviewed_count: i64,
    pub pending_count: i64,
    pub review_rate: f64,
    pub week_reviewed_count: i64,
}

/// One slice of the per-subject distribution chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectSlice {
    pub name: String,
    pub value: i64,
    pub color: String,
}

/// Review counts for the trailing seven days, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewTrend {
    pub dates: Vec<String>,
    pub counts: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterySlice {
    pub name: String,
    pub value: i64,
    pub status: String,
}
