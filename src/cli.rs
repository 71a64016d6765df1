//! CLI 인자 파싱 모듈
//!
//! clap을 사용한 명령줄 인자 정의 및 파싱을 담당합니다.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{DirLayout, DEFAULT_DEST_DIR, DEFAULT_SOURCE_DIR};
use crate::converter::ConvertOptions;
use crate::scan::ScanOptions;

/// 실행 모드
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunMode {
    /// 입력 폴더 전체 변환
    Bulk,
    /// 단일 파일 변환
    Single(PathBuf),
}

/// pqconvert CLI 인자 구조체
#[derive(Parser, Debug)]
#[command(
    name = "pqconvert",
    author = "YourName <your@email.com>",
    version,
    about = "PARQUET TO JSONL CONVERTER - Parquet 파일을 JSONL로 변환하는 CLI 도구",
    long_about = r#"
PARQUET TO JSONL CONVERTER
==========================

Parquet 파일의 각 행을 한 줄의 JSON 객체로 변환합니다.

특징:
  • 배치 단위 읽기로 대용량 파일도 일정한 메모리로 변환
  • input/ 폴더 구조를 output/ 폴더에 그대로 반영
  • 폴더 일괄 변환 시 파일별 실패 격리 및 요약 통계
  • 유니코드 문자를 이스케이프 없이 UTF-8 그대로 출력

예제:
  pqconvert data/sales.parquet
  pqconvert data/sales.parquet -o out/sales.jsonl --batch-size 10000
  pqconvert
  pqconvert input --pattern "sales_*" --dry-run
  pqconvert --input-dir raw --output-dir converted
"#
)]
pub struct Args {
    /// 변환할 Parquet 파일 경로 (생략하거나 입력 폴더 이름이면 폴더 일괄 변환)
    pub input: Option<PathBuf>,

    /// 생성될 JSONL 파일 경로 (단일 파일 변환 시, 기본값: 입력 경로에서 계산)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 배치당 행 수 (기본값: 파일 전체를 한 번에 읽음)
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// 입력 폴더
    #[arg(long, default_value = DEFAULT_SOURCE_DIR)]
    pub input_dir: PathBuf,

    /// 출력 폴더
    #[arg(long, default_value = DEFAULT_DEST_DIR)]
    pub output_dir: PathBuf,

    /// 파일 이름 패턴 필터 (glob 형식, 폴더 일괄 변환 시)
    #[arg(short, long)]
    pub pattern: Option<String>,

    /// 실제 변환 없이 처리될 파일 목록만 표시
    #[arg(long)]
    pub dry_run: bool,

    /// 상세 출력 모드
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// 실행 모드 결정
    pub fn mode(&self) -> RunMode {
        match &self.input {
            None => RunMode::Bulk,
            Some(path) if self.layout().is_source_dir(path) => RunMode::Bulk,
            Some(path) => RunMode::Single(path.clone()),
        }
    }

    /// 폴더 일괄 변환에서 무시되는 `-o/--output`이 지정되었는지 확인
    pub fn output_ignored(&self) -> bool {
        self.output.is_some() && self.mode() == RunMode::Bulk
    }

    /// 디렉토리 규칙
    pub fn layout(&self) -> DirLayout {
        DirLayout::new()
            .with_source_dir(&self.input_dir)
            .with_dest_dir(&self.output_dir)
    }

    /// 파일별 변환 옵션
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions::new().with_batch_size(self.batch_size)
    }

    /// 폴더 일괄 변환 옵션
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions::new()
            .with_convert(self.convert_options())
            .with_pattern(self.pattern.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("pqconvert").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_no_input_is_bulk() {
        let args = parse(&[]);
        assert_eq!(args.mode(), RunMode::Bulk);
        assert_eq!(args.layout(), DirLayout::default());
        assert_eq!(args.convert_options().batch_size, None);
    }

    #[test]
    fn test_input_token_is_bulk() {
        assert_eq!(parse(&["input"]).mode(), RunMode::Bulk);
        assert_eq!(parse(&["raw", "--input-dir", "raw"]).mode(), RunMode::Bulk);
        assert_eq!(parse(&["./input"]).mode(), RunMode::Bulk);
        assert_eq!(parse(&["./input/"]).mode(), RunMode::Bulk);
    }

    #[test]
    fn test_output_ignored_in_bulk_mode() {
        assert!(parse(&["-o", "out.jsonl"]).output_ignored());
        assert!(parse(&["./input", "-o", "out.jsonl"]).output_ignored());
        assert!(!parse(&[]).output_ignored());
        assert!(!parse(&["data/a.parquet", "-o", "out.jsonl"]).output_ignored());
    }

    #[test]
    fn test_single_file() {
        let args = parse(&["data/a.parquet", "-o", "out.jsonl", "--batch-size", "500"]);
        assert_eq!(args.mode(), RunMode::Single(PathBuf::from("data/a.parquet")));
        assert_eq!(args.output, Some(PathBuf::from("out.jsonl")));
        assert_eq!(args.convert_options().batch_size, Some(500));
    }

    #[test]
    fn test_scan_options() {
        let args = parse(&["--pattern", "sales_*", "--batch-size", "10", "--dry-run"]);
        let options = args.scan_options();
        assert_eq!(options.pattern.as_deref(), Some("sales_*"));
        assert_eq!(options.convert.batch_size, Some(10));
        assert!(args.dry_run);
    }

    #[test]
    fn test_invalid_batch_size() {
        let result = Args::try_parse_from(["pqconvert", "a.parquet", "--batch-size", "abc"]);
        assert!(result.is_err());
    }
}
