//! pqconvert - PARQUET TO JSONL CONVERTER
//!
//! Parquet 파일을 JSONL (JSON Lines) 파일로 변환하는 CLI 도구입니다.
//!
//! # 주요 기능
//!
//! - 📦 **배치 변환**: 지정한 행 수 단위로 읽어 메모리 사용량 제한
//! - 📂 **폴더 규칙**: `input/` 아래 파일을 `output/` 아래 같은 구조로 변환
//! - 🛡️ **실패 격리**: 폴더 일괄 변환 시 한 파일의 실패가 나머지에 영향 없음
//! - 🔍 **패턴 필터링**: glob 형식의 파일 이름 필터링
//! - 🧪 **드라이런 모드**: 실제 변환 없이 처리될 파일 목록 미리 확인
//! - 🌏 **유니코드 보존**: 비ASCII 문자를 이스케이프 없이 UTF-8 그대로 출력
//!
//! # 예제
//!
//! ```bash
//! # 단일 파일 변환 (data/sales.jsonl 생성)
//! pqconvert data/sales.parquet
//!
//! # 배치 변환
//! pqconvert input/2024/sales.parquet --batch-size 10000
//!
//! # input/ 폴더 전체 변환
//! pqconvert
//! ```

pub mod cli;
pub mod config;
pub mod converter;
pub mod error;
pub mod pattern;
pub mod record;
pub mod resolver;
pub mod scan;
pub mod source;
pub mod stats;

// Re-exports for convenient access
pub use cli::{Args, RunMode};
pub use config::DirLayout;
pub use converter::{convert, convert_table, ConvertOptions, ConvertReport, Progress};
pub use error::{ConvertError, Result};
pub use pattern::PatternMatcher;
pub use record::Record;
pub use resolver::resolve;
pub use scan::{convert_all, plan, ConversionJob, FileOutcome, ScanOptions};
pub use source::{ParquetSource, TableSource};
pub use stats::{format_bytes, ScanSummary};
