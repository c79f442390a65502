//! 바이그램 추출
//!
//! 학습과 스코어링이 동일한 방식으로 인접 문자쌍을 얻도록 공유하는 유틸리티

use super::sanitizer::sanitize;

/// 인접한 두 문자 (첫 번째 문자, 두 번째 문자)
pub type Bigram = (char, char);

/// 정제된 텍스트를 소문자로 바꾸고 인접 문자쌍을 순서대로 반환
///
/// 폭 2, 간격 1의 창을 그대로 밀어가며 추출합니다 (공백 포함).
/// 길이가 L이면 최대 L-1개의 쌍이 나옵니다.
pub fn bigrams(sanitized: &str) -> Vec<Bigram> {
    let chars: Vec<char> = sanitized.chars().map(|c| c.to_ascii_lowercase()).collect();
    chars.windows(2).map(|w| (w[0], w[1])).collect()
}

/// 원문을 정제한 뒤 바이그램 추출
pub fn extract(text: &str) -> Vec<Bigram> {
    bigrams(&sanitize(text))
}

/// 바이그램을 직렬화용 2글자 키로 변환
pub fn to_key(bigram: Bigram) -> String {
    let (first, second) = bigram;
    let mut key = String::with_capacity(2);
    key.push(first);
    key.push(second);
    key
}

/// 2글자 키를 바이그램으로 변환 (정확히 2글자가 아니면 None)
pub fn from_key(key: &str) -> Option<Bigram> {
    let mut chars = key.chars();
    let first = chars.next()?;
    let second = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    Some((first, second))
}
