//! 설정 파일 로드/저장 (JSON)

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{GibberishError, Result};
use crate::ngram::{DetectorConfig, Model, ThresholdStrategy};

/// 판별기 실행 설정
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// 모델 파일 경로 (없으면 내장 기본 모델)
    #[serde(default)]
    pub model_path: Option<String>,
    /// 임계값 전략 이름
    #[serde(default = "default_threshold")]
    pub threshold: String,
    /// 호출 단위 조회 캐시 사용 여부
    #[serde(default = "default_use_cache")]
    pub use_cache: bool,
    /// 입력 최대 길이 (바이트)
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize,
}

fn default_threshold() -> String {
    "midpoint".to_string()
}

fn default_use_cache() -> bool {
    true
}

fn default_max_input_bytes() -> usize {
    64 * 1024
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model_path: None,
            threshold: default_threshold(),
            use_cache: default_use_cache(),
            max_input_bytes: default_max_input_bytes(),
        }
    }
}

impl Settings {
    /// 설정값으로 판별기 설정 생성 (모델 파일이 지정되어 있으면 로드)
    pub fn detector_config(&self) -> Result<DetectorConfig> {
        let strategy = ThresholdStrategy::from_name(&self.threshold)?;
        match &self.model_path {
            Some(path) => DetectorConfig::new(Model::load(path)?, strategy, self.use_cache),
            None => Ok(DetectorConfig::default()
                .with_threshold(strategy)?
                .with_cache(self.use_cache)),
        }
    }

    /// 입력 길이 제한 검사
    pub fn check_input(&self, text: &str) -> Result<()> {
        if text.len() > self.max_input_bytes {
            return Err(GibberishError::InputTypeError(format!(
                "입력이 너무 깁니다: {}바이트 (최대 {}바이트)",
                text.len(),
                self.max_input_bytes
            )));
        }
        Ok(())
    }
}

/// 설정 파일 경로: $XDG_CONFIG_HOME/gibberish/config.json (없으면 ~/.config)
pub fn config_path() -> PathBuf {
    let absolute_dir = |var: &str| {
        std::env::var(var)
            .ok()
            .map(PathBuf::from)
            .filter(|p| p.is_absolute() && p.is_dir())
    };

    let base = absolute_dir("XDG_CONFIG_HOME")
        .or_else(|| absolute_dir("HOME").map(|home| home.join(".config")))
        // HOME 미설정이거나 유효하지 않으면 /var/tmp 폴백
        .unwrap_or_else(|| PathBuf::from("/var/tmp"));

    base.join("gibberish").join("config.json")
}

/// 설정 문자열 파싱 (타입 오류는 `ConfigError`)
pub fn parse_config(content: &str) -> Result<Settings> {
    serde_json::from_str(content).map_err(|e| GibberishError::ConfigError(e.to_string()))
}

/// 지정한 경로에서 설정 로드
pub fn load_config_from<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// 설정 파일 로드 (파일 없거나 파싱 실패 시 기본값)
pub fn load_config() -> Settings {
    let path = config_path();
    match load_config_from(&path) {
        Ok(settings) => settings,
        Err(GibberishError::IoError(e)) if e.kind() == ErrorKind::NotFound => Settings::default(),
        Err(e) => {
            log::warn!("설정 파일을 읽을 수 없어 기본값 사용: {} ({})", path.display(), e);
            Settings::default()
        }
    }
}

/// 지정한 경로에 설정 저장
pub fn save_config_to<P: AsRef<Path>>(path: P, settings: &Settings) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| GibberishError::ConfigError(format!("직렬화 실패: {}", e)))?;
    fs::write(path, json)?;
    Ok(())
}

/// 설정 파일 저장
pub fn save_config(settings: &Settings) -> Result<()> {
    save_config_to(config_path(), settings)
}
