//! 판별기 설정
//!
//! 모델, 임계값 전략, 캐시 사용 여부를 묶은 불변 설정값입니다.
//! 설정을 바꾸면 기존 값을 수정하지 않고 검증을 거친 새 값을 만듭니다.

use std::sync::Arc;

use serde_json::Value;

use crate::core::sanitizer::value_kind;
use crate::error::{GibberishError, Result};

use super::model::Model;
use super::pretrained::shared_default_model;
use super::threshold::{calculate_threshold, ThresholdStrategy};

/// 판별기 설정
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// 판별에 사용할 모델
    model: Arc<Model>,
    /// 임계값 계산 전략
    strategy: ThresholdStrategy,
    /// 호출 단위 조회 캐시 사용 여부
    use_cache: bool,
    /// 생성 시점에 계산해 둔 임계값
    threshold: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        let model = shared_default_model();
        let threshold = calculate_threshold(&model);
        Self {
            model,
            strategy: ThresholdStrategy::Midpoint,
            use_cache: true,
            threshold,
        }
    }
}

impl DetectorConfig {
    /// 설정 생성 및 검증
    ///
    /// # Errors
    /// 임계값 전략이 유한하지 않은 값을 반환하면 `ConfigError`
    pub fn new(model: Model, strategy: ThresholdStrategy, use_cache: bool) -> Result<Self> {
        Self::from_shared(Arc::new(model), strategy, use_cache)
    }

    /// 공유 모델로 설정 생성
    pub fn from_shared(
        model: Arc<Model>,
        strategy: ThresholdStrategy,
        use_cache: bool,
    ) -> Result<Self> {
        let threshold = strategy.resolve(&model)?;
        Ok(Self {
            model,
            strategy,
            use_cache,
            threshold,
        })
    }

    /// 모델을 교체한 새 설정
    pub fn with_model(self, model: Model) -> Result<Self> {
        Self::new(model, self.strategy, self.use_cache)
    }

    /// 임계값 전략을 교체한 새 설정
    pub fn with_threshold(self, strategy: ThresholdStrategy) -> Result<Self> {
        Self::from_shared(self.model, strategy, self.use_cache)
    }

    /// 캐시 사용 여부를 바꾼 새 설정
    pub fn with_cache(self, use_cache: bool) -> Self {
        Self { use_cache, ..self }
    }

    /// JSON 객체에서 설정 생성
    ///
    /// ```json
    /// { "model": { "matrix": [...], "baseline": {...} }, "threshold": "midpoint", "useCache": true }
    /// ```
    ///
    /// 모든 항목은 선택이며 빠진 항목은 기본값을 사용합니다.
    ///
    /// # Errors
    /// - 모델 구조 오류 → `ModelValidationError`
    /// - 임계값 전략이 이름 문자열이 아니거나 알 수 없는 이름 → `ConfigError`
    /// - `useCache`가 불리언이 아님, 알 수 없는 항목 → `ConfigError`
    pub fn from_json_value(value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            GibberishError::ConfigError(format!(
                "설정은 객체여야 합니다 ({})",
                value_kind(value)
            ))
        })?;

        if let Some(key) = object
            .keys()
            .find(|k| !matches!(k.as_str(), "model" | "threshold" | "useCache"))
        {
            return Err(GibberishError::ConfigError(format!(
                "알 수 없는 설정 항목: {}",
                key
            )));
        }

        let model = match object.get("model") {
            Some(model) => Arc::new(Model::from_json_value(model)?),
            None => shared_default_model(),
        };

        let strategy = match object.get("threshold") {
            Some(strategy) => ThresholdStrategy::from_value(strategy)?,
            None => ThresholdStrategy::default(),
        };

        let use_cache = match object.get("useCache") {
            Some(Value::Bool(flag)) => *flag,
            Some(other) => {
                return Err(GibberishError::ConfigError(format!(
                    "useCache는 불리언이어야 합니다 ({})",
                    value_kind(other)
                )))
            }
            None => true,
        };

        Self::from_shared(model, strategy, use_cache)
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn strategy(&self) -> &ThresholdStrategy {
        &self.strategy
    }

    pub fn use_cache(&self) -> bool {
        self.use_cache
    }

    /// 판정 임계값
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}
