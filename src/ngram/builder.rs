//! 바이그램 빈도 모델 학습
//!
//! 코퍼스에서 바이그램 빈도 테이블을 만들고, 정상/비정상 예시 라인으로
//! baseline을 보정하여 완성된 `Model`을 생성합니다.

use serde_json::Value;

use crate::core::bigram;
use crate::core::sanitizer::{text_from_value, value_kind};
use crate::error::{GibberishError, Result};

use super::baseline::calibrate;
use super::model::{Baseline, BigramTable, Model};

/// 보정용 예시 라인 집합
///
/// 줄바꿈으로 구분된 하나의 문자열 또는 문자열 목록에서 만들 수 있습니다.
/// 각 라인은 앞뒤 공백이 제거되며, 공백뿐인 라인은 어느 형태로 만들든 제외됩니다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSet {
    lines: Vec<String>,
}

impl LineSet {
    /// 줄바꿈으로 구분된 문자열에서 생성
    pub fn from_text(text: &str) -> Self {
        Self::from_lines(text.lines())
    }

    /// 문자열 목록에서 생성 (공백뿐인 라인은 제외)
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            lines: lines
                .into_iter()
                .map(|line| line.as_ref().trim().to_owned())
                .filter(|line| !line.is_empty())
                .collect(),
        }
    }

    /// JSON 값에서 생성 (문자열 또는 문자열 배열만 허용)
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::String(text) => Ok(Self::from_text(text)),
            Value::Array(items) => {
                let mut lines = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    let line = item.as_str().ok_or_else(|| {
                        GibberishError::InputTypeError(format!(
                            "라인 [{}]은(는) 문자열이어야 합니다 ({})",
                            i,
                            value_kind(item)
                        ))
                    })?;
                    lines.push(line);
                }
                Ok(Self::from_lines(lines))
            }
            other => Err(GibberishError::InputTypeError(format!(
                "라인 집합은 문자열 또는 문자열 배열이어야 합니다 ({})",
                value_kind(other)
            ))),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<&str> for LineSet {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl From<String> for LineSet {
    fn from(text: String) -> Self {
        Self::from_text(&text)
    }
}

impl From<Vec<String>> for LineSet {
    fn from(lines: Vec<String>) -> Self {
        Self::from_lines(lines)
    }
}

impl From<Vec<&str>> for LineSet {
    fn from(lines: Vec<&str>) -> Self {
        Self::from_lines(lines)
    }
}

impl From<&[&str]> for LineSet {
    fn from(lines: &[&str]) -> Self {
        Self::from_lines(lines)
    }
}

impl<const N: usize> From<[&str; N]> for LineSet {
    fn from(lines: [&str; N]) -> Self {
        Self::from_lines(lines)
    }
}

/// 코퍼스에서 바이그램 빈도 테이블 생성
///
/// 정제 → 소문자 변환 → 인접 문자쌍 집계 순서로 처리합니다.
/// 정제 후 길이가 1 이하이면 빈 테이블이 됩니다.
pub fn build_table(corpus: &str) -> BigramTable {
    bigram::extract(corpus).into_iter().collect()
}

/// 모델 학습
///
/// 입력 세 개에 대한 순수 함수이며 결정적입니다.
///
/// # Errors
/// 정상/비정상 라인 집합 중 하나라도 비어 있으면 `CalibrationError`
///
/// # Examples
/// ```
/// use gibberish::train;
///
/// let corpus = "the cat sat on the mat and the dog sat on the log";
/// let model = train(corpus, "the cat sat\nthe dog sat", ["xqzv", "jjkq"]).unwrap();
/// assert!(model.table().count(('t', 'h')) > 0);
/// ```
pub fn train<G, B>(corpus: &str, good_lines: G, bad_lines: B) -> Result<Model>
where
    G: Into<LineSet>,
    B: Into<LineSet>,
{
    let good_lines = good_lines.into();
    let bad_lines = bad_lines.into();

    let table = build_table(corpus);
    log::debug!(
        "바이그램 테이블 생성: 종류 {}개, 관측 {}회",
        table.len(),
        table.total()
    );

    let good = calibrate(good_lines.lines(), &table)?;
    log::debug!("정상 라인 {}개 보정: {:?}", good_lines.len(), good);
    let bad = calibrate(bad_lines.lines(), &table)?;
    log::debug!("비정상 라인 {}개 보정: {:?}", bad_lines.len(), bad);

    let model = Model::new(table, Baseline { good, bad })?;

    if model.is_well_calibrated() {
        log::info!(
            "학습 완료: 바이그램 {}개, good.min={:.3} > bad.max={:.3}",
            model.table().len(),
            good.min,
            bad.max
        );
    } else {
        log::warn!(
            "정상/비정상 라인 구분이 불충분합니다: good.min={:.3} <= bad.max={:.3}",
            good.min,
            bad.max
        );
    }

    Ok(model)
}

/// 타입이 정해지지 않은 입력으로 모델 학습
///
/// # Errors
/// - 코퍼스가 문자열(또는 null/false/0)이 아니면 `InputTypeError`
/// - 라인 집합이 문자열/문자열 배열이 아니면 `InputTypeError`
pub fn train_value(corpus: &Value, good_lines: &Value, bad_lines: &Value) -> Result<Model> {
    let corpus = text_from_value(corpus)?;
    let good_lines = LineSet::from_value(good_lines)?;
    let bad_lines = LineSet::from_value(bad_lines)?;
    train(&corpus, good_lines, bad_lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_table_counts() {
        let table = build_table("abab");
        assert_eq!(table.count(('a', 'b')), 2);
        assert_eq!(table.count(('b', 'a')), 1);
        assert_eq!(table.len(), 2);
        // L-1 관측
        assert_eq!(table.total(), 3);
    }

    #[test]
    fn test_build_table_lowercase_and_spaces() {
        let table = build_table("Ab, AB");
        // "Ab AB" → "ab ab"
        assert_eq!(table.count(('a', 'b')), 2);
        assert_eq!(table.count(('b', ' ')), 1);
        assert_eq!(table.count((' ', 'a')), 1);
        assert_eq!(table.count(('A', 'B')), 0);
    }

    #[test]
    fn test_build_table_short_corpus() {
        assert!(build_table("").is_empty());
        assert!(build_table("a").is_empty());
        assert!(build_table("7.").is_empty());
    }

    #[test]
    fn test_line_set_from_text() {
        let set = LineSet::from("  first line \n\n second\r\n   \nthird");
        assert_eq!(set.lines(), &["first line", "second", "third"]);
    }

    #[test]
    fn test_line_set_from_lines() {
        let set = LineSet::from(vec![" a ", "b"]);
        assert_eq!(set.lines(), &["a", "b"]);
        let set = LineSet::from(["x"]);
        assert_eq!(set.len(), 1);

        // 빈 라인은 문자열 형태와 동일하게 제외
        let set = LineSet::from(vec!["the cat", "", "  ", "the dog"]);
        assert_eq!(set, LineSet::from("the cat\n\n  \nthe dog"));
    }

    #[test]
    fn test_train_ignores_blank_lines_in_both_forms() {
        let corpus = "the cat sat on the mat and the dog sat on the log";
        let from_text = train(corpus, "the cat\n\nthe dog", "qxz").unwrap();
        let from_lines = train(corpus, vec!["the cat", "", "the dog"], "qxz").unwrap();

        assert_eq!(from_text, from_lines);
        assert!(from_lines.baseline().good.min > 0.0);
    }

    #[test]
    fn test_line_set_from_value() {
        assert_eq!(LineSet::from_value(&json!("a\nb")).unwrap().len(), 2);
        assert_eq!(LineSet::from_value(&json!(["a", "b", "c"])).unwrap().len(), 3);

        for value in [json!(["a", 1]), json!({"a": "b"}), json!(null), json!(3)] {
            assert!(
                matches!(
                    LineSet::from_value(&value),
                    Err(GibberishError::InputTypeError(_))
                ),
                "값: {}",
                value
            );
        }
    }

    #[test]
    fn test_train_empty_line_set() {
        let result = train("hello there", Vec::<String>::new(), "xq");
        assert!(matches!(result, Err(GibberishError::CalibrationError(_))));

        let result = train("hello there", "hello", "\n  \n");
        assert!(matches!(result, Err(GibberishError::CalibrationError(_))));

        let result = train("hello there", "hello", vec!["", "   "]);
        assert!(matches!(result, Err(GibberishError::CalibrationError(_))));
    }

    #[test]
    fn test_train_deterministic() {
        let corpus = "the quick brown fox jumps over the lazy dog";
        let a = train(corpus, "the fox", "zzqx").unwrap();
        let b = train(corpus, "the fox", "zzqx").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_train_poorly_calibrated_does_not_fail() {
        // 비정상 라인이 코퍼스와 같으면 구분 불가하지만 에러는 아님
        let model = train("abcabc", "zz", "abc").unwrap();
        assert!(!model.is_well_calibrated());
    }

    #[test]
    fn test_train_value_rejects_structures() {
        let result = train_value(&json!({"text": "x"}), &json!("a"), &json!("b"));
        assert!(matches!(result, Err(GibberishError::InputTypeError(_))));

        let model = train_value(&json!("hello world"), &json!(["hello"]), &json!("qq")).unwrap();
        assert!(model.table().count(('l', 'l')) > 0);
    }
}
