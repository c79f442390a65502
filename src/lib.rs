//! 바이그램 빈도 기반 가비지 텍스트 판별기
//!
//! 정상 텍스트 코퍼스에서 인접 문자쌍 빈도를 학습하고, 입력 텍스트의 문자쌍이
//! 그 분포에 얼마나 잘 맞는지로 가비지 여부를 판정합니다.
//!
//! ```
//! use gibberish::{detect, Detector};
//!
//! assert!(!detect("Hi"));
//! assert!(detect("nakjsfnzgfaekjajdgli"));
//!
//! let detector = Detector::new();
//! let result = detector.analyze("it is nice to meet you");
//! assert!(!result.is_gibberish);
//! ```

pub mod config;
pub mod core;
pub mod detection;
pub mod error;
pub mod ngram;

pub use self::core::{sanitize, sanitize_value, text_from_value};
pub use detection::{detect, DetectionResult, Detector};
pub use error::{GibberishError, Result};
pub use ngram::{
    calculate_threshold, default_model, is_valid_matrix, is_valid_model, score, train, Model,
    ThresholdStrategy,
};
