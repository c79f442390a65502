//! 내장 기본 모델
//!
//! `data/corpus.txt`, `data/good.txt`, `data/bad.txt`로 학습한 모델을
//! 바이너리에 포함하고 처음 사용할 때 한 번만 파싱합니다.

use std::sync::Arc;

use lazy_static::lazy_static;

use super::model::Model;

const DEFAULT_MODEL_JSON: &str = include_str!("../../data/default_model.json");

lazy_static! {
    static ref DEFAULT_MODEL: Arc<Model> = Arc::new(
        // 내장 데이터이므로 파싱 실패는 빌드 데이터 오류
        Model::from_json(DEFAULT_MODEL_JSON).expect("내장 기본 모델 형식 오류")
    );
}

/// 내장 기본 모델
pub fn default_model() -> &'static Model {
    &DEFAULT_MODEL
}

pub(crate) fn shared_default_model() -> Arc<Model> {
    Arc::clone(&DEFAULT_MODEL)
}
