//! 바이그램 빈도 모델
//!
//! 정상 텍스트의 인접 문자쌍 빈도를 학습하고, 입력 텍스트가 그 분포에
//! 얼마나 잘 맞는지 스코어링합니다.
//!
//! # 개요
//!
//! 1. **학습**: 코퍼스 → 정제 → 바이그램 빈도 테이블
//! 2. **보정**: 정상/비정상 예시 라인의 스코어 통계 (baseline)
//! 3. **스코어링**: 입력 텍스트의 바이그램 빈도 평균
//! 4. **임계값**: baseline에서 판정 기준값 계산
//!
//! # 사용 예시
//!
//! ```
//! use gibberish::ngram::{score, train, calculate_threshold};
//!
//! let corpus = "the rain in spain stays mainly in the plain";
//! let model = train(corpus, "the rain in spain", "qzxj wvkp").unwrap();
//!
//! let threshold = calculate_threshold(&model);
//! let fit = score("mainly in the plain", &model, true).unwrap();
//! assert!(fit > threshold);
//! ```

mod baseline;
mod builder;
mod config;
mod model;
mod pretrained;
mod scorer;
mod threshold;

// 공개 인터페이스
pub use baseline::calibrate;
pub use builder::{build_table, train, train_value, LineSet};
pub use config::DetectorConfig;
pub use model::{is_valid_matrix, is_valid_model, Baseline, BigramTable, Model, Stats};
pub use pretrained::default_model;
pub use scorer::{score, score_value, TableSource};
pub use threshold::{calculate_threshold, ThresholdFn, ThresholdStrategy};
