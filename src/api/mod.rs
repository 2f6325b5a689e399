pub mod auth;
pub mod chat;
pub mod client;
pub mod dashboard;
pub mod exams;
pub mod profile;
pub mod questions;
pub mod reviews;
pub mod subjects;
pub mod upload;
