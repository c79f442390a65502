//! gibberish - 바이그램 기반 가비지 텍스트 판별 CLI

use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use gibberish::config::{config_path, load_config, save_config, Settings};
use gibberish::ngram::train;
use gibberish::Detector;

#[derive(Parser)]
#[command(name = "gibberish", version, about = "바이그램 빈도 기반 가비지 텍스트 판별기")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 코퍼스와 예시 라인으로 모델 학습
    Train {
        /// 학습 코퍼스 파일
        #[arg(long)]
        corpus: PathBuf,
        /// 정상 예시 라인 파일 (한 줄에 하나)
        #[arg(long)]
        good: PathBuf,
        /// 비정상 예시 라인 파일 (한 줄에 하나)
        #[arg(long)]
        bad: PathBuf,
        /// 모델 출력 경로 (없으면 표준 출력)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// 텍스트의 바이그램 스코어 출력
    Score {
        #[command(flatten)]
        options: DetectOptions,
        /// 입력 텍스트 (없으면 표준 입력에서 한 줄씩)
        texts: Vec<String>,
    },
    /// 가비지 여부 판정 (가비지가 하나라도 있으면 종료 코드 1)
    Detect {
        #[command(flatten)]
        options: DetectOptions,
        /// 입력 텍스트 (없으면 표준 입력에서 한 줄씩)
        texts: Vec<String>,
    },
    /// 설정 파일 관리
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args)]
struct DetectOptions {
    /// 모델 파일 (설정 파일 값보다 우선)
    #[arg(long)]
    model: Option<String>,
    /// 임계값 전략: midpoint, average-midpoint
    #[arg(long)]
    threshold: Option<String>,
    /// 조회 캐시 사용 안 함
    #[arg(long)]
    no_cache: bool,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// 현재 설정 출력
    Show,
    /// 설정 파일 경로 출력
    Path,
    /// 설정 변경 후 저장
    Set {
        #[arg(long)]
        model_path: Option<String>,
        #[arg(long)]
        threshold: Option<String>,
        #[arg(long)]
        use_cache: Option<bool>,
        #[arg(long)]
        max_input_bytes: Option<usize>,
    },
}

fn main() -> ExitCode {
    // 로깅 초기화 (error/warn만 출력)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("오류: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Command::Train {
            corpus,
            good,
            bad,
            output,
        } => run_train(&corpus, &good, &bad, output.as_deref()),
        Command::Score { options, texts } => run_score(options, texts),
        Command::Detect { options, texts } => run_detect(options, texts),
        Command::Config { action } => run_config(action),
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("파일 읽기 실패: {}", path.display()))
}

fn run_train(corpus: &Path, good: &Path, bad: &Path, output: Option<&Path>) -> Result<ExitCode> {
    let corpus = read_file(corpus)?;
    let good = read_file(good)?;
    let bad = read_file(bad)?;

    let model = train(&corpus, good.as_str(), bad.as_str()).context("모델 학습 실패")?;
    let baseline = model.baseline();
    eprintln!(
        "바이그램 {}개, good {:?}, bad {:?}",
        model.table().len(),
        baseline.good,
        baseline.bad
    );
    if !model.is_well_calibrated() {
        eprintln!("경고: good.min <= bad.max (예시 라인을 다시 골라주세요)");
    }

    match output {
        Some(path) => model
            .save(path)
            .with_context(|| format!("모델 저장 실패: {}", path.display()))?,
        None => println!("{}", model.to_json()?),
    }

    Ok(ExitCode::SUCCESS)
}

/// 설정 파일 + 명령행 옵션으로 판별기와 설정 생성
fn build_detector(options: DetectOptions) -> Result<(Detector, Settings)> {
    let mut settings = load_config();
    if let Some(model) = options.model {
        settings.model_path = Some(model);
    }
    if let Some(threshold) = options.threshold {
        settings.threshold = threshold;
    }
    if options.no_cache {
        settings.use_cache = false;
    }

    let config = settings
        .detector_config()
        .context("판별기 설정 생성 실패")?;
    Ok((Detector::with_config(config), settings))
}

fn read_inputs(texts: Vec<String>) -> Result<Vec<String>> {
    if !texts.is_empty() {
        return Ok(texts);
    }
    io::stdin()
        .lock()
        .lines()
        .collect::<io::Result<Vec<_>>>()
        .context("표준 입력 읽기 실패")
}

fn run_score(options: DetectOptions, texts: Vec<String>) -> Result<ExitCode> {
    let (detector, settings) = build_detector(options)?;

    for text in read_inputs(texts)? {
        settings.check_input(&text)?;
        match detector.score(&text) {
            Some(score) => println!("{:.4}\t{}", score, text),
            None => println!("-\t{}", text),
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn run_detect(options: DetectOptions, texts: Vec<String>) -> Result<ExitCode> {
    let (detector, settings) = build_detector(options)?;
    log::debug!("임계값: {:.4}", detector.threshold());

    let mut any_gibberish = false;
    for text in read_inputs(texts)? {
        settings.check_input(&text)?;
        let verdict = detector.is_gibberish(&text);
        any_gibberish |= verdict;
        println!("{}\t{}", if verdict { "gibberish" } else { "ok" }, text);
    }

    Ok(if any_gibberish {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}

fn run_config(action: ConfigAction) -> Result<ExitCode> {
    match action {
        ConfigAction::Show => {
            println!("{}", serde_json::to_string_pretty(&load_config())?);
        }
        ConfigAction::Path => {
            println!("{}", config_path().display());
        }
        ConfigAction::Set {
            model_path,
            threshold,
            use_cache,
            max_input_bytes,
        } => {
            let mut settings = load_config();
            if let Some(path) = model_path {
                settings.model_path = Some(path);
            }
            if let Some(threshold) = threshold {
                settings.threshold = threshold;
            }
            if let Some(flag) = use_cache {
                settings.use_cache = flag;
            }
            if let Some(limit) = max_input_bytes {
                settings.max_input_bytes = limit;
            }

            // 저장 전에 검증
            settings
                .detector_config()
                .context("설정 검증 실패")?;
            save_config(&settings).context("설정 저장 실패")?;
            println!("저장 완료: {}", config_path().display());
        }
    }

    Ok(ExitCode::SUCCESS)
}
