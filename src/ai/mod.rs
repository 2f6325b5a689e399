pub mod stream;
pub mod transcript;
