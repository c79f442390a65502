//! 임계값 전략
//!
//! 모델의 baseline에서 판정 임계값을 계산하는 방법을 정의합니다.
//! 이름이 있는 기본 전략들과 사용자 정의 함수를 함께 지원합니다.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::core::sanitizer::value_kind;
use crate::error::{GibberishError, Result};

use super::model::Model;

/// 사용자 정의 임계값 함수 (`Model → f64`, 부작용 없음)
pub type ThresholdFn = dyn Fn(&Model) -> f64 + Send + Sync;

/// 기본 임계값: `(good.min + bad.max) / 2`
pub fn calculate_threshold(model: &Model) -> f64 {
    let baseline = model.baseline();
    (baseline.good.min + baseline.bad.max) / 2.0
}

/// 임계값 계산 전략
#[derive(Clone, Default)]
pub enum ThresholdStrategy {
    /// `(good.min + bad.max) / 2`
    #[default]
    Midpoint,
    /// `(good.avg + bad.avg) / 2`
    AverageMidpoint,
    /// 사용자 정의 함수
    Custom(Arc<ThresholdFn>),
}

impl ThresholdStrategy {
    /// 사용자 정의 함수로 전략 생성
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&Model) -> f64 + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// 이름으로 전략 선택 (`"midpoint"`, `"average-midpoint"`)
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "midpoint" => Ok(Self::Midpoint),
            "average-midpoint" => Ok(Self::AverageMidpoint),
            other => Err(GibberishError::ConfigError(format!(
                "알 수 없는 임계값 전략: {:?} (midpoint, average-midpoint 중 선택)",
                other
            ))),
        }
    }

    /// JSON 값에서 전략 선택 (문자열 이름만 허용)
    pub fn from_value(value: &Value) -> Result<Self> {
        match value.as_str() {
            Some(name) => Self::from_name(name),
            None => Err(GibberishError::ConfigError(format!(
                "임계값 전략은 이름 문자열이어야 합니다 ({})",
                value_kind(value)
            ))),
        }
    }

    /// 전략 이름
    pub fn name(&self) -> &'static str {
        match self {
            Self::Midpoint => "midpoint",
            Self::AverageMidpoint => "average-midpoint",
            Self::Custom(_) => "custom",
        }
    }

    /// 임계값 계산 (검증 없음)
    pub fn compute(&self, model: &Model) -> f64 {
        match self {
            Self::Midpoint => calculate_threshold(model),
            Self::AverageMidpoint => {
                let baseline = model.baseline();
                (baseline.good.avg + baseline.bad.avg) / 2.0
            }
            Self::Custom(f) => f(model),
        }
    }

    /// 임계값 계산 및 검증
    ///
    /// # Errors
    /// 결과가 NaN/무한대이면 `ConfigError`
    pub fn resolve(&self, model: &Model) -> Result<f64> {
        let threshold = self.compute(model);
        if !threshold.is_finite() {
            return Err(GibberishError::ConfigError(format!(
                "임계값 전략 '{}'이(가) 유한하지 않은 값을 반환했습니다: {}",
                self.name(),
                threshold
            )));
        }
        Ok(threshold)
    }
}

impl fmt::Debug for ThresholdStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ThresholdStrategy({})", self.name())
    }
}
