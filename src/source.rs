//! 테이블 소스 모듈
//!
//! 변환기가 의존하는 최소한의 읽기 인터페이스(`TableSource`)와
//! Parquet 구현체(`ParquetSource`)를 제공합니다.

use parquet::arrow::arrow_reader::{ParquetRecordBatchReader, ParquetRecordBatchReaderBuilder};
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};
use crate::record::{batch_to_records, Record};

/// 전체 읽기 시 Arrow 배치 크기
const READ_BATCH_ROWS: usize = 8192;

/// 행 단위로 레코드를 읽을 수 있는 테이블
///
/// 모든 구현체는 원본 행 순서를 그대로 유지해야 합니다.
pub trait TableSource {
    /// 전체 행 수 (컬럼 데이터를 읽지 않아도 되는 경우 메타데이터만 사용)
    fn row_count(&self) -> Result<usize>;

    /// `offset` 번째 행부터 최대 `limit` 개의 행 읽기
    fn read_range(&self, offset: usize, limit: usize) -> Result<Vec<Record>>;

    /// 모든 행 읽기
    fn read_all(&self) -> Result<Vec<Record>>;
}

/// Parquet 파일 기반 테이블 소스
///
/// 읽을 때마다 파일을 새로 열고, 범위 읽기는 리더의 offset/limit을 사용합니다.
#[derive(Debug, Clone)]
pub struct ParquetSource {
    path: PathBuf,
}

impl ParquetSource {
    /// Parquet 소스 열기
    ///
    /// # Errors
    /// 파일이 존재하지 않으면 `ConvertError::SourceNotFound`
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Err(ConvertError::SourceNotFound { path });
        }
        Ok(Self { path })
    }

    /// 원본 파일 경로
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn builder(&self) -> Result<ParquetRecordBatchReaderBuilder<File>> {
        let file = File::open(&self.path).map_err(|e| ConvertError::decode(&self.path, e))?;
        ParquetRecordBatchReaderBuilder::try_new(file)
            .map_err(|e| ConvertError::decode(&self.path, e))
    }

    fn collect(&self, reader: ParquetRecordBatchReader) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        for batch in reader {
            let batch = batch.map_err(|e| ConvertError::decode(&self.path, e))?;
            records.extend(
                batch_to_records(&batch).map_err(|e| ConvertError::decode(&self.path, e))?,
            );
        }
        Ok(records)
    }
}

impl TableSource for ParquetSource {
    fn row_count(&self) -> Result<usize> {
        let builder = self.builder()?;
        let rows = builder.metadata().file_metadata().num_rows();
        usize::try_from(rows).map_err(|e| ConvertError::decode(&self.path, e))
    }

    fn read_range(&self, offset: usize, limit: usize) -> Result<Vec<Record>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let reader = self
            .builder()?
            .with_offset(offset)
            .with_limit(limit)
            .with_batch_size(limit.min(READ_BATCH_ROWS))
            .build()
            .map_err(|e| ConvertError::decode(&self.path, e))?;

        self.collect(reader)
    }

    fn read_all(&self) -> Result<Vec<Record>> {
        let reader = self
            .builder()?
            .with_batch_size(READ_BATCH_ROWS)
            .build()
            .map_err(|e| ConvertError::decode(&self.path, e))?;

        self.collect(reader)
    }
}
