//! 텍스트 정제
//!
//! 임의의 텍스트를 바이그램 집계에 적합한 정규화된 문자열로 변환합니다.
//! 대소문자는 보존하며, 소문자 변환은 바이그램 추출 시점에 수행합니다.
//!
//! # 정제 단계
//!
//! 1. 줄바꿈/탭 → 공백
//! 2. 문장 부호 (`! ? .`) → 공백 (문장 경계를 단어 경계와 동일하게 취급)
//! 3. 연속 공백 축약
//! 4. NFD 분해 후 결합 문자 제거, 남은 비ASCII 문자 제거
//! 5. 숫자 및 구두점 제거
//!
//! 악센트가 있는 라틴 문자는 ASCII 골격만 남고, 라틴 문자가 아닌 문자는 모두 사라집니다.

use serde_json::Value;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::error::{GibberishError, Result};

/// 제거 대상 구두점 (백슬래시는 포함되지 않음)
const STRIPPED_PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[]^_`{|}~";

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\t' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

fn is_sentence_terminator(c: char) -> bool {
    matches!(c, '!' | '?' | '.')
}

fn is_stripped(c: char) -> bool {
    c.is_ascii_digit() || STRIPPED_PUNCTUATION.contains(c)
}

/// 2개 이상 연속된 공백을 하나로 축약
fn collapse_spaces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_space = false;

    for c in text.chars() {
        if c == ' ' {
            if prev_space {
                continue;
            }
            prev_space = true;
        } else {
            prev_space = false;
        }
        out.push(c);
    }

    out
}

/// 텍스트를 정규화된 문자열로 정제
///
/// 순수 함수이며 멱등입니다: `sanitize(&sanitize(x)) == sanitize(x)`
///
/// # Examples
/// ```
/// use gibberish::sanitize;
///
/// assert_eq!(sanitize("Héllo,\tWörld!"), "Hello World ");
/// assert_eq!(sanitize(""), "");
/// ```
pub fn sanitize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let spaced: String = text
        .chars()
        .map(|c| {
            if is_line_break(c) || is_sentence_terminator(c) {
                ' '
            } else {
                c
            }
        })
        .collect();
    let collapsed = collapse_spaces(&spaced);

    let stripped: String = collapsed
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(char::is_ascii)
        .filter(|c| !is_stripped(*c))
        .collect();

    // 제거 단계에서 새로 생긴 연속 공백 ("a - b" → "a  b")
    collapse_spaces(&stripped)
}

/// JSON 값의 종류 이름 (에러 메시지용)
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// 타입이 정해지지 않은 입력에서 텍스트 추출
///
/// - `null`, `false`, `0`, `""` → 빈 문자열
/// - 문자열 → 그대로
/// - 그 외 (배열, 객체, `true`, 0이 아닌 숫자) → `InputTypeError`
pub fn text_from_value(value: &Value) -> Result<String> {
    match value {
        Value::Null | Value::Bool(false) => Ok(String::new()),
        Value::Number(n) if n.as_f64() == Some(0.0) => Ok(String::new()),
        Value::String(s) => Ok(s.clone()),
        other => Err(GibberishError::InputTypeError(format!(
            "문자열이 필요하지만 {}이(가) 전달되었습니다",
            value_kind(other)
        ))),
    }
}

/// 타입이 정해지지 않은 입력을 정제
pub fn sanitize_value(value: &Value) -> Result<String> {
    Ok(sanitize(&text_from_value(value)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_line_breaks_and_tabs() {
        assert_eq!(sanitize("a\nb\r\nc\td"), "a b c d");
        assert_eq!(sanitize("one\u{2028}two"), "one two");
    }

    #[test]
    fn test_sentence_terminators() {
        assert_eq!(sanitize("Stop. Go! Why?"), "Stop Go Why ");
        assert_eq!(sanitize("end."), "end ");
    }

    #[test]
    fn test_collapse_spaces() {
        assert_eq!(sanitize("a    b"), "a b");
        // 구두점 제거 후 생긴 공백도 축약
        assert_eq!(sanitize("a - b"), "a b");
        assert_eq!(sanitize("x 123 y"), "x y");
    }

    #[test]
    fn test_diacritics_stripped() {
        assert_eq!(sanitize("café"), "cafe");
        assert_eq!(sanitize("Ångström naïve"), "Angstrom naive");
    }

    #[test]
    fn test_non_latin_dropped() {
        assert_eq!(sanitize("안녕"), "");
        assert_eq!(sanitize("hi 日本 there"), "hi there");
    }

    #[test]
    fn test_digits_and_punctuation() {
        assert_eq!(sanitize("It's 42 (really)"), "Its really");
        assert_eq!(sanitize("a@b#c$d%e"), "abcde");
        // 백슬래시는 제거 대상이 아님
        assert_eq!(sanitize("a\\b"), "a\\b");
    }

    #[test]
    fn test_case_preserved() {
        assert_eq!(sanitize("HeLLo"), "HeLLo");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "",
            "Hello, how are you? it is nice to meet you.",
            "a - b -- c",
            "  leading and trailing  ",
            "Crème brûlée 日本語 !!! ???",
            "tab\tnew\nline\r\n",
            "1 2 3 . . .",
            "x\u{0301}\u{0301}y",
        ];
        for input in inputs {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "입력: {:?}", input);
        }
    }

    #[test]
    fn test_text_from_value_falsy() {
        assert_eq!(text_from_value(&json!(null)).unwrap(), "");
        assert_eq!(text_from_value(&json!(false)).unwrap(), "");
        assert_eq!(text_from_value(&json!(0)).unwrap(), "");
        assert_eq!(text_from_value(&json!("")).unwrap(), "");
        assert_eq!(text_from_value(&json!("abc")).unwrap(), "abc");
    }

    #[test]
    fn test_text_from_value_rejects_structures() {
        for value in [json!(["a"]), json!({"a": 1}), json!(true), json!(7)] {
            let result = text_from_value(&value);
            assert!(
                matches!(result, Err(GibberishError::InputTypeError(_))),
                "값: {}",
                value
            );
        }
    }

    #[test]
    fn test_sanitize_value() {
        assert_eq!(sanitize_value(&json!("Hi, you!")).unwrap(), "Hi you ");
        assert!(sanitize_value(&json!([1, 2])).is_err());
    }
}
