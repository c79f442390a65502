//! 텍스트 정제 및 바이그램 추출

pub mod bigram;
pub mod sanitizer;

pub use bigram::Bigram;
pub use sanitizer::{sanitize, sanitize_value, text_from_value};
