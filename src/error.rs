//! 에러 타입
//!
//! 입력/모델/설정/보정 단계에서 발생하는 모든 에러를 하나의 열거형으로 묶습니다.
//! 모든 에러는 발생 지점에서 즉시 반환되며 재시도하지 않습니다.

use thiserror::Error;

/// 가비지 텍스트 판별기 에러
#[derive(Debug, Error)]
pub enum GibberishError {
    /// 문자열이 아닌 입력 (배열, 객체 등) 또는 길이 제한 초과
    #[error("입력 타입 오류: {0}")]
    InputTypeError(String),
    /// 모델 구조 오류 (키 길이, 빈도값, baseline 필드)
    #[error("모델 검증 오류: {0}")]
    ModelValidationError(String),
    /// 설정 오류 (임계값 전략, 캐시 플래그, 설정 파일)
    #[error("설정 오류: {0}")]
    ConfigError(String),
    /// 빈 라인 집합으로 보정 시도
    #[error("보정 오류: {0}")]
    CalibrationError(String),
    /// 파일 읽기/쓰기 실패
    #[error("파일 읽기 오류: {0}")]
    IoError(#[from] std::io::Error),
    /// JSON 파싱 실패
    #[error("JSON 파싱 오류: {0}")]
    ParseError(String),
}

pub type Result<T> = std::result::Result<T, GibberishError>;
