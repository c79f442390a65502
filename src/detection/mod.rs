//! 가비지 텍스트 판별 모듈

mod detector;

pub use detector::{classify, detect, detect_with, DetectionResult, Detector};
