//! Parquet → JSONL 변환 모듈
//!
//! 원본 테이블을 한 번에, 또는 지정한 행 수 단위 배치로 읽어
//! 레코드당 한 줄의 JSON으로 출력 파일에 기록합니다.
//!
//! 배치 크기는 메모리 사용량에만 영향을 주며, 출력 결과는 배치 여부와
//! 관계없이 항상 동일합니다.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{ConvertError, Result};
use crate::record::Record;
use crate::source::{ParquetSource, TableSource};

/// 변환 옵션
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// 배치당 행 수 (None이면 파일 전체를 한 번에 읽음)
    pub batch_size: Option<usize>,
}

impl ConvertOptions {
    /// 기본 옵션 생성 (배치 없음)
    pub fn new() -> Self {
        Self::default()
    }

    /// 배치 크기 설정
    pub fn with_batch_size(mut self, batch_size: Option<usize>) -> Self {
        self.batch_size = batch_size;
        self
    }
}

/// 변환 결과
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertReport {
    /// 기록한 레코드 수
    pub records: usize,
    /// 기록한 바이트 수 (개행 포함)
    pub bytes_written: u64,
}

/// 진행 상황 (누적 행 수 / 전체 행 수)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub rows_done: usize,
    pub rows_total: usize,
}

/// Parquet 파일을 JSONL 파일로 변환
///
/// # Arguments
/// * `source` - 원본 Parquet 파일 경로
/// * `dest` - 출력 JSONL 파일 경로 (상위 폴더는 자동 생성, 기존 내용은 덮어씀)
/// * `options` - 변환 옵션
///
/// # Errors
/// 원본이 없으면 출력 파일을 건드리지 않고 `SourceNotFound`를 반환합니다.
/// 읽기/쓰기 도중의 에러는 그대로 전달되며, 이 경우 출력 파일은
/// 일부만 기록된 상태로 남을 수 있습니다.
pub fn convert(source: &Path, dest: &Path, options: &ConvertOptions) -> Result<ConvertReport> {
    convert_with_progress(source, dest, options, |_| {})
}

/// 진행 상황 콜백을 받는 [`convert`]
pub fn convert_with_progress<F>(
    source: &Path,
    dest: &Path,
    options: &ConvertOptions,
    on_progress: F,
) -> Result<ConvertReport>
where
    F: FnMut(Progress),
{
    let table = ParquetSource::open(source)?;

    info!(source = %table.path().display(), dest = %dest.display(), "Parquet 파일 변환 시작");
    let report = convert_table(&table, dest, options, on_progress)?;
    info!(
        records = report.records,
        "변환 완료: {} -> {}",
        table.path().display(),
        dest.display()
    );

    Ok(report)
}

/// 임의의 [`TableSource`]를 JSONL 파일로 변환
pub fn convert_table<S, F>(
    table: &S,
    dest: &Path,
    options: &ConvertOptions,
    mut on_progress: F,
) -> Result<ConvertReport>
where
    S: TableSource + ?Sized,
    F: FnMut(Progress),
{
    match options.batch_size {
        Some(0) => Err(ConvertError::InvalidBatchSize),

        None => {
            let records = table.read_all()?;
            let mut writer = JsonlWriter::create(dest)?;
            writer.write_records(&records)?;

            let total = records.len();
            info!("{}개 레코드를 JSONL로 변환했습니다", total);
            on_progress(Progress {
                rows_done: total,
                rows_total: total,
            });

            writer.finish()
        }

        Some(batch_size) => {
            let total = table.row_count()?;
            let mut writer = JsonlWriter::create(dest)?;
            let mut offset = 0;

            while offset < total {
                let chunk = table.read_range(offset, batch_size)?;
                if chunk.is_empty() {
                    return Err(ConvertError::Truncated { offset, total });
                }

                writer.write_records(&chunk)?;
                offset += chunk.len();

                let done = offset.min(total);
                info!("{}/{} 행 처리", done, total);
                on_progress(Progress {
                    rows_done: done,
                    rows_total: total,
                });
            }

            writer.finish()
        }
    }
}

/// 줄 단위 JSON 출력기
struct JsonlWriter {
    path: PathBuf,
    inner: BufWriter<File>,
    report: ConvertReport,
}

impl JsonlWriter {
    /// 상위 폴더를 만든 뒤 출력 파일 생성 (기존 내용 삭제)
    fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ConvertError::write(path, e))?;
        }

        let file = File::create(path).map_err(|e| ConvertError::write(path, e))?;

        Ok(Self {
            path: path.to_path_buf(),
            inner: BufWriter::new(file),
            report: ConvertReport::default(),
        })
    }

    fn write_records(&mut self, records: &[Record]) -> Result<()> {
        for record in records {
            // serde_json은 비ASCII 문자를 이스케이프하지 않고 UTF-8 그대로 출력
            let line =
                serde_json::to_string(record).map_err(|e| ConvertError::write(&self.path, e))?;
            writeln!(self.inner, "{}", line).map_err(|e| ConvertError::write(&self.path, e))?;

            self.report.records += 1;
            self.report.bytes_written += line.len() as u64 + 1; // +1 for newline
        }
        Ok(())
    }

    fn finish(mut self) -> Result<ConvertReport> {
        self.inner
            .flush()
            .map_err(|e| ConvertError::write(&self.path, e))?;
        Ok(self.report)
    }
}
