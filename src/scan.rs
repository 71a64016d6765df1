//! 폴더 일괄 변환 모듈
//!
//! 입력 폴더 바로 아래의 Parquet 파일들을 찾아 하나씩 순서대로 변환합니다.
//! 하위 폴더는 탐색하지 않습니다.
//!
//! 각 파일의 변환은 독립적으로 처리되어, 한 파일이 실패해도 나머지 파일의
//! 변환은 계속 진행됩니다.

use std::fmt::Display;
use std::path::PathBuf;
use tracing::{error, info, warn};
use walkdir::WalkDir;

use crate::config::DirLayout;
use crate::converter::{convert_with_progress, ConvertOptions, ConvertReport, Progress};
use crate::error::{ConvertError, Result};
use crate::pattern::PatternMatcher;
use crate::resolver::resolve;
use crate::stats::ScanSummary;

/// 폴더 일괄 변환 옵션
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// 파일별 변환 옵션
    pub convert: ConvertOptions,
    /// 파일 이름 glob 패턴
    pub pattern: Option<String>,
}

impl ScanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// 파일별 변환 옵션 설정
    pub fn with_convert(mut self, convert: ConvertOptions) -> Self {
        self.convert = convert;
        self
    }

    /// 파일 이름 패턴 설정
    pub fn with_pattern(mut self, pattern: Option<String>) -> Self {
        self.pattern = pattern;
        self
    }
}

/// 단일 파일 변환 작업
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub source: PathBuf,
    pub dest: PathBuf,
    pub options: ConvertOptions,
}

impl ConversionJob {
    pub fn new(source: impl Into<PathBuf>, dest: impl Into<PathBuf>, options: ConvertOptions) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
            options,
        }
    }

    /// 디렉토리 규칙으로 출력 경로를 계산한 작업 생성
    pub fn from_layout(source: PathBuf, layout: &DirLayout, options: ConvertOptions) -> Self {
        let dest = resolve(&source, layout);
        Self::new(source, dest, options)
    }

    /// 작업 실행
    pub fn run(&self) -> Result<ConvertReport> {
        self.run_with_progress(|_| {})
    }

    /// 진행 상황 콜백과 함께 작업 실행
    pub fn run_with_progress<F>(&self, on_progress: F) -> Result<ConvertReport>
    where
        F: FnMut(Progress),
    {
        convert_with_progress(&self.source, &self.dest, &self.options, on_progress)
    }
}

/// 파일별 변환 결과
#[derive(Debug)]
pub struct FileOutcome {
    pub job: ConversionJob,
    pub result: Result<ConvertReport>,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// 입력 폴더 바로 아래의 변환 대상 파일 수집 (경로순 정렬)
///
/// # Errors
/// 입력 폴더가 없으면 `ConvertError::InputDirNotFound`
pub fn scan_sources(layout: &DirLayout, matcher: &PatternMatcher) -> Result<Vec<PathBuf>> {
    if !layout.source_dir.is_dir() {
        return Err(ConvertError::InputDirNotFound {
            path: layout.source_dir.clone(),
        });
    }

    let files = WalkDir::new(&layout.source_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(readable)
        .filter(|e| e.path().is_file())
        .filter(|e| matcher.matches(e.path()))
        .map(|e| e.into_path())
        .collect();

    Ok(files)
}

/// 읽을 수 없는 폴더 항목은 경고를 남기고 건너뜀
fn readable<T, E: Display>(entry: std::result::Result<T, E>) -> Option<T> {
    match entry {
        Ok(entry) => Some(entry),
        Err(e) => {
            warn!("폴더 항목을 읽을 수 없어 건너뜁니다: {}", e);
            None
        }
    }
}

/// 변환 작업 목록 생성 (실제 변환 없음)
pub fn plan(layout: &DirLayout, options: &ScanOptions) -> Result<Vec<ConversionJob>> {
    let matcher = PatternMatcher::new(&layout.source_ext, options.pattern.as_deref())?;

    let jobs = scan_sources(layout, &matcher)?
        .into_iter()
        .map(|source| ConversionJob::from_layout(source, layout, options.convert))
        .collect();

    Ok(jobs)
}

/// 입력 폴더의 모든 Parquet 파일 변환
///
/// 입력 폴더가 없거나 대상 파일이 없으면 로그만 남기고 빈 결과를 반환합니다.
///
/// # Errors
/// 파일 이름 패턴이 잘못된 경우에만 에러를 반환합니다.
pub fn convert_all(layout: &DirLayout, options: &ScanOptions) -> Result<ScanSummary> {
    convert_all_with(layout, options, |_| {})
}

/// 파일 하나가 끝날 때마다 `on_file`을 호출하는 [`convert_all`]
pub fn convert_all_with<F>(
    layout: &DirLayout,
    options: &ScanOptions,
    mut on_file: F,
) -> Result<ScanSummary>
where
    F: FnMut(&FileOutcome),
{
    let jobs = match plan(layout, options) {
        Ok(jobs) => jobs,
        Err(ConvertError::InputDirNotFound { path }) => {
            error!("입력 폴더가 존재하지 않습니다: {}", path.display());
            return Ok(ScanSummary::new(0));
        }
        Err(e) => return Err(e),
    };

    if jobs.is_empty() {
        warn!(
            "입력 폴더에 .{} 파일이 없습니다: {}",
            layout.source_ext,
            layout.source_dir.display()
        );
        return Ok(ScanSummary::new(0));
    }

    info!("변환할 파일 {}개를 찾았습니다", jobs.len());

    let mut summary = ScanSummary::new(jobs.len());
    for job in jobs {
        info!("변환 중: {} -> {}", job.source.display(), job.dest.display());

        let result = job.run();
        if let Err(ref e) = result {
            error!(source = %job.source.display(), "변환 실패: {}", e);
        }

        let outcome = FileOutcome { job, result };
        on_file(&outcome);
        summary.record(outcome);
    }

    Ok(summary)
}
