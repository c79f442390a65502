//! Baseline 보정
//!
//! 정상/비정상 예시 라인을 스코어링하여 최솟값, 최댓값, 평균으로 요약합니다.

use crate::error::{GibberishError, Result};

use super::model::{BigramTable, Stats};
use super::scorer::score;

/// 라인 집합의 스코어 통계 계산
///
/// 문자쌍이 없는 라인 (정제 후 한 글자 이하)은 가장 낮은 적합도인 0으로 계산합니다.
///
/// # Errors
/// 라인 집합이 비어 있으면 `CalibrationError`
pub fn calibrate<S: AsRef<str>>(lines: &[S], table: &BigramTable) -> Result<Stats> {
    if lines.is_empty() {
        return Err(GibberishError::CalibrationError(
            "빈 라인 집합은 보정할 수 없습니다".into(),
        ));
    }

    let scores: Vec<f64> = lines
        .iter()
        .map(|line| score(line.as_ref(), table, true).unwrap_or(0.0))
        .collect();

    let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let avg = scores.iter().sum::<f64>() / scores.len() as f64;

    Ok(Stats { min, max, avg })
}
