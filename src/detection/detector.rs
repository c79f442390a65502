//! 가비지 텍스트 판별기
//!
//! 정제 → 바이그램 스코어 → 임계값 비교 순서로 입력이 가비지인지 판정합니다.
//! 스코어가 임계값 이하이면 가비지로 판정합니다.

use serde_json::Value;

use crate::core::sanitizer::{sanitize, text_from_value};
use crate::error::Result;
use crate::ngram::{score, DetectorConfig, Model, ThresholdStrategy};

/// 스코어와 임계값으로 가비지 여부 판정
///
/// 문자쌍이 없는 입력 (`None`)은 정상임을 입증할 수 없으므로 항상 가비지로 판정합니다.
pub fn classify(score: Option<f64>, threshold: f64) -> bool {
    match score {
        Some(score) => score <= threshold,
        None => true,
    }
}

/// 모델과 임계값 전략을 직접 지정하여 판정
///
/// # Errors
/// 임계값 전략이 유한하지 않은 값을 반환하면 `ConfigError`
pub fn detect_with(
    text: &str,
    model: &Model,
    strategy: &ThresholdStrategy,
    use_cache: bool,
) -> Result<bool> {
    let threshold = strategy.resolve(model)?;
    let fit = score(&sanitize(text), model, use_cache);
    Ok(classify(fit, threshold))
}

/// 기본 모델로 가비지 여부 판정
///
/// # Examples
/// ```
/// use gibberish::detect;
///
/// assert!(!detect("Hello, how are you? it is nice to meet you."));
/// assert!(detect("nakjsfnzgfaekjajdgli"));
/// assert!(detect(""));
/// ```
pub fn detect(text: &str) -> bool {
    Detector::new().is_gibberish(text)
}

/// 가비지 텍스트 판별기
#[derive(Debug, Clone, Default)]
pub struct Detector {
    config: DetectorConfig,
}

impl Detector {
    /// 기본 설정으로 판별기 생성 (내장 모델, midpoint 임계값, 캐시 사용)
    pub fn new() -> Self {
        Self::default()
    }

    /// 설정을 지정하여 판별기 생성
    pub fn with_config(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// 모델만 지정하여 판별기 생성
    pub fn with_model(model: Model) -> Result<Self> {
        let config = DetectorConfig::new(model, ThresholdStrategy::default(), true)?;
        Ok(Self::with_config(config))
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// 현재 설정의 임계값 반환
    pub fn threshold(&self) -> f64 {
        self.config.threshold()
    }

    /// 텍스트의 바이그램 스코어 반환 (문자쌍이 없으면 None)
    pub fn score(&self, text: &str) -> Option<f64> {
        score(&sanitize(text), self.config.model(), self.config.use_cache())
    }

    /// 텍스트가 가비지인지 판정
    pub fn is_gibberish(&self, text: &str) -> bool {
        classify(self.score(text), self.threshold())
    }

    /// 판정 근거를 포함한 분석 결과
    pub fn analyze(&self, text: &str) -> DetectionResult {
        let sanitized = sanitize(text);
        let fit = score(&sanitized, self.config.model(), self.config.use_cache());
        let threshold = self.threshold();

        DetectionResult {
            original: text.to_string(),
            sanitized,
            score: fit,
            threshold,
            is_gibberish: classify(fit, threshold),
        }
    }

    /// 모델을 호출 단위로 대체하여 판정
    ///
    /// 대체 모델은 사용 전에 구조 검증을 거치며, 현재 임계값 전략이 그 모델에 적용됩니다.
    ///
    /// # Errors
    /// - 대체 모델 구조 오류 → `ModelValidationError`
    /// - 임계값이 유한하지 않음 → `ConfigError`
    pub fn detect_with_override(&self, text: &str, model_override: Option<&Value>) -> Result<bool> {
        match model_override {
            None => Ok(self.is_gibberish(text)),
            Some(candidate) => {
                let model = Model::from_json_value(candidate)?;
                detect_with(text, &model, self.config.strategy(), self.config.use_cache())
            }
        }
    }

    /// 타입이 정해지지 않은 입력 판정
    ///
    /// # Errors
    /// 입력이 문자열(또는 null/false/0)이 아니면 `InputTypeError`
    pub fn detect_value(&self, text: &Value, model_override: Option<&Value>) -> Result<bool> {
        let text = text_from_value(text)?;
        self.detect_with_override(&text, model_override)
    }
}

/// 판정 결과
#[derive(Debug, Clone)]
pub struct DetectionResult {
    /// 원본 입력
    pub original: String,
    /// 정제된 텍스트
    pub sanitized: String,
    /// 바이그램 스코어 (문자쌍이 없으면 None)
    pub score: Option<f64>,
    /// 판정 임계값
    pub threshold: f64,
    /// 최종 판정: 가비지인지
    pub is_gibberish: bool,
}
