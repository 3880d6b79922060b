pub mod document;
pub mod email;
pub mod extractor;
pub mod handlers;
