//! 변환 대상 파일 선별 모듈
//!
//! 확장자와 glob 패턴으로 폴더 안의 변환 대상 파일을 고릅니다.

use glob::Pattern;
use std::path::Path;

use crate::error::{ConvertError, Result};

/// 변환 대상 파일 매처
pub struct PatternMatcher {
    extension: String,
    pattern: Option<Pattern>,
}

impl PatternMatcher {
    /// 새 매처 생성
    ///
    /// # Arguments
    /// * `extension` - 대상 확장자 (점 제외, 대소문자 무시)
    /// * `pattern` - 파일 이름 glob 패턴 (None이면 확장자만 검사)
    ///
    /// # Examples
    /// ```
    /// use pqconvert::pattern::PatternMatcher;
    /// use std::path::Path;
    ///
    /// let matcher = PatternMatcher::new("parquet", Some("sales_*")).unwrap();
    /// assert!(matcher.matches(Path::new("input/sales_2024.parquet")));
    /// assert!(!matcher.matches(Path::new("input/users.parquet")));
    /// assert!(!matcher.matches(Path::new("input/sales_2024.csv")));
    /// ```
    pub fn new(extension: &str, pattern: Option<&str>) -> Result<Self> {
        let pattern = pattern
            .map(|p| {
                Pattern::new(p).map_err(|_| ConvertError::InvalidPattern {
                    pattern: p.to_string(),
                })
            })
            .transpose()?;

        Ok(Self {
            extension: extension.to_string(),
            pattern,
        })
    }

    /// 파일이 변환 대상인지 확인
    pub fn matches(&self, path: &Path) -> bool {
        let has_extension = path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.eq_ignore_ascii_case(&self.extension))
            .unwrap_or(false);

        has_extension
            && path
                .file_name()
                .and_then(|s| s.to_str())
                .map(|name| self.matches_name(name))
                .unwrap_or(false)
    }

    fn matches_name(&self, file_name: &str) -> bool {
        match &self.pattern {
            Some(p) => p.matches(file_name),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_only() {
        let matcher = PatternMatcher::new("parquet", None).unwrap();
        assert!(matcher.matches(Path::new("a.parquet")));
        assert!(matcher.matches(Path::new("input/B.PARQUET")));
        assert!(!matcher.matches(Path::new("a.jsonl")));
        assert!(!matcher.matches(Path::new("parquet")));
    }

    #[test]
    fn test_wildcard_pattern() {
        let matcher = PatternMatcher::new("parquet", Some("*_2024_*")).unwrap();
        assert!(matcher.matches(Path::new("sales_2024_q1.parquet")));
        assert!(!matcher.matches(Path::new("sales_2023_q1.parquet")));
    }

    #[test]
    fn test_bracket_pattern() {
        let matcher = PatternMatcher::new("parquet", Some("part-[0-9].parquet")).unwrap();
        assert!(matcher.matches(Path::new("part-3.parquet")));
        assert!(!matcher.matches(Path::new("part-x.parquet")));
    }

    #[test]
    fn test_pattern_does_not_bypass_extension() {
        let matcher = PatternMatcher::new("parquet", Some("*")).unwrap();
        assert!(!matcher.matches(Path::new("notes.txt")));
    }

    #[test]
    fn test_invalid_pattern() {
        let result = PatternMatcher::new("parquet", Some("[invalid"));
        assert!(matches!(result, Err(ConvertError::InvalidPattern { .. })));
    }
}
