//! 디렉토리 규칙 설정 모듈
//!
//! 입력/출력 폴더 이름과 확장자를 한곳에서 관리합니다.
//! 경로 변환과 폴더 일괄 변환은 모두 이 설정을 인자로 받습니다.

use std::path::{Component, Path, PathBuf};

/// 기본 입력 폴더 이름
pub const DEFAULT_SOURCE_DIR: &str = "input";
/// 기본 출력 폴더 이름
pub const DEFAULT_DEST_DIR: &str = "output";
/// 원본 파일 확장자
pub const SOURCE_EXT: &str = "parquet";
/// 출력 파일 확장자
pub const DEST_EXT: &str = "jsonl";

/// 입력 → 출력 디렉토리 매핑 규칙
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirLayout {
    /// 원본 파일이 위치한 폴더
    pub source_dir: PathBuf,
    /// 변환 결과가 저장될 폴더
    pub dest_dir: PathBuf,
    /// 변환 대상 확장자 (점 제외)
    pub source_ext: String,
    /// 출력 확장자 (점 제외)
    pub dest_ext: String,
}

impl Default for DirLayout {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            dest_dir: PathBuf::from(DEFAULT_DEST_DIR),
            source_ext: SOURCE_EXT.to_string(),
            dest_ext: DEST_EXT.to_string(),
        }
    }
}

impl DirLayout {
    /// 기본 규칙 (`input` → `output`, `.parquet` → `.jsonl`)
    pub fn new() -> Self {
        Self::default()
    }

    /// 입력 폴더 설정
    pub fn with_source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = dir.into();
        self
    }

    /// 출력 폴더 설정
    pub fn with_dest_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dest_dir = dir.into();
        self
    }

    /// 출력 확장자 설정
    pub fn with_dest_ext(mut self, ext: impl Into<String>) -> Self {
        self.dest_ext = ext.into();
        self
    }

    /// 주어진 인자가 입력 폴더 자체를 가리키는지 확인 (`./input` == `input`)
    pub fn is_source_dir(&self, path: &Path) -> bool {
        normalized(path) == self.source_components()
    }

    /// `.` 요소를 제외한 입력 폴더 경로 요소
    pub(crate) fn source_components(&self) -> Vec<Component<'_>> {
        normalized(&self.source_dir)
    }

    /// 파일 확장자가 원본 확장자인지 확인 (대소문자 무시)
    pub fn has_source_ext(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .map(|s| s.eq_ignore_ascii_case(&self.source_ext))
            .unwrap_or(false)
    }
}

fn normalized(path: &Path) -> Vec<Component<'_>> {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let layout = DirLayout::default();
        assert_eq!(layout.source_dir, PathBuf::from("input"));
        assert_eq!(layout.dest_dir, PathBuf::from("output"));
        assert_eq!(layout.source_ext, "parquet");
        assert_eq!(layout.dest_ext, "jsonl");
    }

    #[test]
    fn test_builder() {
        let layout = DirLayout::new()
            .with_source_dir("raw")
            .with_dest_dir("converted")
            .with_dest_ext("ndjson");

        assert_eq!(layout.source_dir, PathBuf::from("raw"));
        assert_eq!(layout.dest_dir, PathBuf::from("converted"));
        assert_eq!(layout.dest_ext, "ndjson");
        assert!(layout.is_source_dir(Path::new("raw")));
        assert!(!layout.is_source_dir(Path::new("input")));
    }

    #[test]
    fn test_is_source_dir_ignores_dot_prefix() {
        let layout = DirLayout::default();
        assert!(layout.is_source_dir(Path::new("input")));
        assert!(layout.is_source_dir(Path::new("./input")));
        assert!(layout.is_source_dir(Path::new("./input/")));
        assert!(!layout.is_source_dir(Path::new("./input/a.parquet")));

        let current = DirLayout::new().with_source_dir(".");
        assert!(current.is_source_dir(Path::new("./")));
        assert!(!current.is_source_dir(Path::new("input")));
    }

    #[test]
    fn test_has_source_ext() {
        let layout = DirLayout::default();
        assert!(layout.has_source_ext(Path::new("input/a.parquet")));
        assert!(layout.has_source_ext(Path::new("input/A.PARQUET")));
        assert!(!layout.has_source_ext(Path::new("input/a.csv")));
        assert!(!layout.has_source_ext(Path::new("input/parquet")));
    }
}
