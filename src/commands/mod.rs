pub mod ai_commands;
pub mod auth_commands;
pub mod dashboard_commands;
pub mod exam_commands;
pub mod profile_commands;
pub mod question_commands;
pub mod review_commands;
pub mod settings_commands;
pub mod subject_commands;
