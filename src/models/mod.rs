pub mod chat;
pub mod dashboard;
pub mod exam;
pub mod question;
pub mod review;
pub mod settings;
pub mod user;
