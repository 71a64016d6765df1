//! 에러 타입 정의 모듈
//!
//! pqconvert에서 발생할 수 있는 모든 에러 타입을 정의합니다.

use std::path::PathBuf;
use thiserror::Error;

/// pqconvert에서 발생할 수 있는 에러 타입
#[derive(Error, Debug)]
pub enum ConvertError {
    /// 원본 Parquet 파일이 존재하지 않음 (출력 파일은 건드리지 않음)
    #[error("원본 파일을 찾을 수 없습니다: {path}")]
    SourceNotFound { path: PathBuf },

    /// 입력 폴더가 존재하지 않음
    #[error("입력 폴더를 찾을 수 없습니다: {path}")]
    InputDirNotFound { path: PathBuf },

    /// Parquet 읽기/디코딩 실패
    #[error("Parquet 읽기 실패 ({file}): {reason}")]
    Decode { file: PathBuf, reason: String },

    /// 메타데이터의 행 수보다 실제 데이터가 먼저 끝남
    #[error("원본 데이터가 {offset}/{total} 행에서 끊겼습니다")]
    Truncated { offset: usize, total: usize },

    /// 출력 파일 생성/쓰기 실패
    #[error("파일 쓰기 실패 ({file}): {reason}")]
    Write { file: PathBuf, reason: String },

    /// 배치 크기가 0
    #[error("배치 크기는 1 이상이어야 합니다")]
    InvalidBatchSize,

    /// 유효하지 않은 패턴
    #[error("유효하지 않은 패턴: {pattern}")]
    InvalidPattern { pattern: String },
}

impl ConvertError {
    pub(crate) fn decode(file: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ConvertError::Decode {
            file: file.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn write(file: impl Into<PathBuf>, reason: impl ToString) -> Self {
        ConvertError::Write {
            file: file.into(),
            reason: reason.to_string(),
        }
    }
}

/// pqconvert 결과 타입 별칭
pub type Result<T> = std::result::Result<T, ConvertError>;
