//! 바이그램 모델 및 직렬화
//!
//! 학습 결과물인 `Model`(바이그램 빈도 테이블 + baseline 통계)과
//! JSON 직렬화 형식, 구조 검증기를 정의합니다.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::bigram::{self, Bigram};
use crate::core::sanitizer::value_kind;
use crate::error::{GibberishError, Result};

/// 바이그램 빈도 테이블
///
/// 모든 빈도는 1 이상입니다. `record`로만 증가하므로 생성 이후 불변식이 유지됩니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BigramTable {
    counts: HashMap<Bigram, u64>,
}

impl BigramTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 바이그램 관측 1회 기록 (처음 보는 쌍은 1부터 시작)
    pub fn record(&mut self, bigram: Bigram) {
        *self.counts.entry(bigram).or_insert(0) += 1;
    }

    /// 바이그램 빈도 조회
    pub fn get(&self, bigram: Bigram) -> Option<u64> {
        self.counts.get(&bigram).copied()
    }

    /// 바이그램 빈도 조회 (없으면 0)
    pub fn count(&self, bigram: Bigram) -> u64 {
        self.get(bigram).unwrap_or(0)
    }

    /// 서로 다른 바이그램 수
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// 전체 관측 횟수 (u64 범위를 넘으면 `u64::MAX`에서 포화)
    pub fn total(&self) -> u64 {
        self.counts
            .values()
            .fold(0u64, |acc, &count| acc.saturating_add(count))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Bigram, u64)> + '_ {
        self.counts.iter().map(|(k, v)| (*k, *v))
    }

    /// 빈도 내림차순, 같은 빈도는 키 오름차순으로 정렬된 항목
    ///
    /// 직렬화 출력을 결정적으로 만들기 위해서만 사용합니다.
    fn sorted_entries(&self) -> Vec<(Bigram, u64)> {
        let mut entries: Vec<(Bigram, u64)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries
    }
}

impl FromIterator<Bigram> for BigramTable {
    fn from_iter<I: IntoIterator<Item = Bigram>>(iter: I) -> Self {
        let mut table = Self::new();
        for bigram in iter {
            table.record(bigram);
        }
        table
    }
}

/// 스코어 통계 (최솟값, 최댓값, 평균)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

impl Stats {
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.avg.is_finite()
    }
}

/// 정상/비정상 예시 라인의 스코어 통계
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Baseline {
    pub good: Stats,
    pub bad: Stats,
}

/// 학습된 바이그램 모델
///
/// 학습 또는 로드 이후에는 불변이며, 동기화 없이 여러 스레드에서 공유할 수 있습니다.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    table: BigramTable,
    baseline: Baseline,
}

/// 직렬화 형식의 matrix 항목
#[derive(Serialize)]
struct MatrixEntry {
    x: String,
    y: u64,
}

/// 직렬화 형식
///
/// ```json
/// {
///   "matrix": [ { "x": "th", "y": 362 }, { "x": "he", "y": 281 } ],
///   "baseline": {
///     "good": { "min": 63.6, "max": 161.8, "avg": 127.3 },
///     "bad": { "min": 0.3, "max": 38.5, "avg": 9.7 }
///   }
/// }
/// ```
#[derive(Serialize)]
struct ModelRecord {
    matrix: Vec<MatrixEntry>,
    baseline: Baseline,
}

impl Model {
    /// 테이블과 baseline으로 모델 생성
    ///
    /// # Errors
    /// baseline 값 중 NaN/무한대가 있으면 `ModelValidationError`
    pub fn new(table: BigramTable, baseline: Baseline) -> Result<Self> {
        if !baseline.good.is_finite() || !baseline.bad.is_finite() {
            return Err(GibberishError::ModelValidationError(
                "baseline 값은 유한한 실수여야 합니다".into(),
            ));
        }
        Ok(Self { table, baseline })
    }

    pub fn table(&self) -> &BigramTable {
        &self.table
    }

    pub fn baseline(&self) -> &Baseline {
        &self.baseline
    }

    /// 정상 라인 최솟값이 비정상 라인 최댓값보다 큰지 확인
    pub fn is_well_calibrated(&self) -> bool {
        self.baseline.good.min > self.baseline.bad.max
    }

    /// JSON 파일에서 모델 로드
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let reader = BufReader::new(file);

        let value: Value = serde_json::from_reader(reader)
            .map_err(|e| GibberishError::ParseError(e.to_string()))?;

        let model = Self::from_json_value(&value)?;
        log::info!(
            "모델 로드 완료: {} (바이그램 {}개)",
            path.display(),
            model.table.len()
        );
        Ok(model)
    }

    /// JSON 문자열에서 모델 로드
    pub fn from_json(json_str: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json_str)
            .map_err(|e| GibberishError::ParseError(e.to_string()))?;

        Self::from_json_value(&value)
    }

    /// serde_json::Value에서 모델 생성 (구조 검증 포함)
    pub fn from_json_value(value: &Value) -> Result<Self> {
        if !value.is_object() {
            return Err(GibberishError::ModelValidationError(format!(
                "모델은 객체여야 합니다 ({})",
                value_kind(value)
            )));
        }

        let matrix = value
            .get("matrix")
            .ok_or_else(|| GibberishError::ModelValidationError("matrix 필드가 없습니다".into()))?;
        let table = parse_matrix(matrix)?;

        let baseline = value.get("baseline").ok_or_else(|| {
            GibberishError::ModelValidationError("baseline 필드가 없습니다".into())
        })?;
        let baseline = parse_baseline(baseline)?;

        Self::new(table, baseline)
    }

    fn to_record(&self) -> ModelRecord {
        let matrix = self
            .table
            .sorted_entries()
            .into_iter()
            .map(|(bigram, count)| MatrixEntry {
                x: bigram::to_key(bigram),
                y: count,
            })
            .collect();

        ModelRecord {
            matrix,
            baseline: self.baseline,
        }
    }

    /// 직렬화 형식의 JSON 값
    pub fn to_json_value(&self) -> Result<Value> {
        serde_json::to_value(self.to_record())
            .map_err(|e| GibberishError::ParseError(e.to_string()))
    }

    /// 직렬화 형식의 JSON 문자열 (pretty)
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.to_record())
            .map_err(|e| GibberishError::ParseError(e.to_string()))
    }

    /// JSON 파일로 저장
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_json()?)?;
        log::info!("모델 저장 완료: {}", path.display());
        Ok(())
    }
}

/// matrix 배열 파싱: `[{ "x": "th", "y": 12 }, ...]`
fn parse_matrix(value: &Value) -> Result<BigramTable> {
    let entries = value.as_array().ok_or_else(|| {
        GibberishError::ModelValidationError(format!(
            "matrix는 배열이어야 합니다 ({})",
            value_kind(value)
        ))
    })?;

    let mut counts = HashMap::with_capacity(entries.len());

    for (i, entry) in entries.iter().enumerate() {
        let key = entry.get("x").and_then(|v| v.as_str()).ok_or_else(|| {
            GibberishError::ModelValidationError(format!("matrix[{}].x 문자열이 없습니다", i))
        })?;
        let bigram = bigram::from_key(key).ok_or_else(|| {
            GibberishError::ModelValidationError(format!(
                "matrix[{}].x 키는 정확히 2글자여야 합니다: {:?}",
                i, key
            ))
        })?;

        let count = entry
            .get("y")
            .and_then(|v| v.as_u64())
            .filter(|&c| c > 0)
            .ok_or_else(|| {
                GibberishError::ModelValidationError(format!(
                    "matrix[{}].y 빈도값은 양의 정수여야 합니다",
                    i
                ))
            })?;

        if counts.insert(bigram, count).is_some() {
            return Err(GibberishError::ModelValidationError(format!(
                "중복된 바이그램 키: {:?}",
                key
            )));
        }
    }

    Ok(BigramTable { counts })
}

fn parse_stats(value: &Value, name: &str) -> Result<Stats> {
    let read = |field: &str| -> Result<f64> {
        value
            .get(field)
            .and_then(|v| v.as_f64())
            .filter(|v| v.is_finite())
            .ok_or_else(|| {
                GibberishError::ModelValidationError(format!(
                    "baseline.{}.{} 값은 유한한 실수여야 합니다",
                    name, field
                ))
            })
    };

    Ok(Stats {
        min: read("min")?,
        max: read("max")?,
        avg: read("avg")?,
    })
}

fn parse_baseline(value: &Value) -> Result<Baseline> {
    let good = value.get("good").ok_or_else(|| {
        GibberishError::ModelValidationError("baseline.good 필드가 없습니다".into())
    })?;
    let bad = value.get("bad").ok_or_else(|| {
        GibberishError::ModelValidationError("baseline.bad 필드가 없습니다".into())
    })?;

    Ok(Baseline {
        good: parse_stats(good, "good")?,
        bad: parse_stats(bad, "bad")?,
    })
}

/// matrix 구조 검증 (각 키는 2글자, 각 빈도는 양의 정수)
pub fn is_valid_matrix(candidate: &Value) -> bool {
    parse_matrix(candidate).is_ok()
}

/// 모델 구조 검증 (matrix + 유한한 baseline 통계)
pub fn is_valid_model(candidate: &Value) -> bool {
    Model::from_json_value(candidate).is_ok()
}
