pub mod handlers;
pub mod prompts;
pub mod questions;
pub mod scoring;
pub mod summary;
