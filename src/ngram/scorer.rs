//! 바이그램 적합도 스코어링
//!
//! 텍스트의 인접 문자쌍이 학습 코퍼스에서 얼마나 자주 관측되었는지의 평균을 계산합니다.
//! 테이블에 없는 쌍은 0으로 계산되며 분모에는 그대로 포함됩니다.
//! 관측되지 않은 쌍이 많을수록 스코어가 낮아지는 것이 판별의 근거입니다.

use std::collections::HashMap;

use serde_json::Value;

use crate::core::bigram::{self, Bigram};
use crate::core::sanitizer::text_from_value;
use crate::error::Result;

use super::model::{BigramTable, Model};

/// 스코어링에 사용할 바이그램 테이블을 제공하는 타입
///
/// 테이블 자체 또는 전체 모델을 그대로 넘길 수 있게 합니다.
pub trait TableSource {
    fn bigram_table(&self) -> &BigramTable;
}

impl TableSource for BigramTable {
    fn bigram_table(&self) -> &BigramTable {
        self
    }
}

impl TableSource for Model {
    fn bigram_table(&self) -> &BigramTable {
        self.table()
    }
}

/// 텍스트의 바이그램 적합도 계산
///
/// `use_cache`가 켜져 있으면 호출 내부에서만 사는 조회 캐시를 사용합니다.
/// 캐시는 결과에 영향을 주지 않습니다.
///
/// # Returns
/// 바이그램 빈도의 평균. 정제 후 문자쌍이 하나도 없으면 (빈 문자열, 한 글자) `None`
///
/// # Examples
/// ```
/// use gibberish::{score, train};
///
/// let model = train("abab", "ab", "zz").unwrap();
/// assert_eq!(score("ab", &model, true), Some(2.0));
/// assert_eq!(score("zz", model.table(), false), Some(0.0));
/// assert_eq!(score("a", &model, true), None);
/// ```
pub fn score<T>(text: &str, source: &T, use_cache: bool) -> Option<f64>
where
    T: TableSource + ?Sized,
{
    let table = source.bigram_table();
    let pairs = bigram::extract(text);

    if pairs.is_empty() {
        return None;
    }

    // 빈도는 u64 전 범위가 유효하므로 합계는 f64로 누적 (정수 합은 오버플로 가능)
    let total_weight: f64 = if use_cache {
        let mut cache: HashMap<Bigram, u64> = HashMap::new();
        pairs
            .iter()
            .map(|&pair| *cache.entry(pair).or_insert_with(|| table.count(pair)) as f64)
            .sum()
    } else {
        pairs.iter().map(|&pair| table.count(pair) as f64).sum()
    };

    Some(total_weight / pairs.len() as f64)
}

/// 타입이 정해지지 않은 입력의 스코어 계산
///
/// # Errors
/// 입력이 문자열(또는 null/false/0)이 아니면 `InputTypeError`
pub fn score_value<T>(text: &Value, source: &T, use_cache: bool) -> Result<Option<f64>>
where
    T: TableSource + ?Sized,
{
    let text = text_from_value(text)?;
    Ok(score(&text, source, use_cache))
}
