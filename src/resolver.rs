//! 출력 경로 결정 모듈
//!
//! 입력 파일 경로로부터 JSONL 출력 경로를 계산합니다.
//!
//! - 경로 중간에 입력 폴더(`input`)가 있으면 해당 부분을 출력 폴더(`output`)로
//!   바꾸고 나머지 하위 경로는 그대로 유지합니다.
//! - 그렇지 않으면 같은 위치에서 확장자만 `.jsonl`로 바꿉니다.

use std::path::{Component, Path, PathBuf};
use tracing::warn;

use crate::config::DirLayout;

/// 입력 경로에 대응하는 출력 경로 계산
///
/// 부수 효과 없는 순수 함수이며 항상 경로를 반환합니다.
///
/// # Examples
/// ```
/// use pqconvert::config::DirLayout;
/// use pqconvert::resolver::resolve;
/// use std::path::{Path, PathBuf};
///
/// let layout = DirLayout::default();
/// assert_eq!(
///     resolve(Path::new("input/a/b.parquet"), &layout),
///     PathBuf::from("output/a/b.jsonl")
/// );
/// assert_eq!(
///     resolve(Path::new("data/x.parquet"), &layout),
///     PathBuf::from("data/x.jsonl")
/// );
/// ```
pub fn resolve(path: &Path, layout: &DirLayout) -> PathBuf {
    if let Some(mapped) = map_into_dest(path, layout) {
        return mapped.with_extension(&layout.dest_ext);
    }

    if !layout.has_source_ext(path) {
        warn!(
            path = %path.display(),
            "입력 파일의 확장자가 .{}이(가) 아닙니다",
            layout.source_ext
        );
    }

    path.with_extension(&layout.dest_ext)
}

/// 입력 폴더 구간을 출력 폴더로 치환
///
/// 입력 폴더 뒤에 최소 한 개의 경로 요소가 남아 있어야 합니다.
fn map_into_dest(path: &Path, layout: &DirLayout) -> Option<PathBuf> {
    let parts: Vec<Component> = path.components().collect();
    let needle = layout.source_components();

    if needle.is_empty() {
        return map_relative_into_dest(&parts, layout);
    }
    if parts.len() <= needle.len() {
        return None;
    }

    // 마지막 요소(파일 이름)는 입력 폴더로 취급하지 않음
    let head = &parts[..parts.len() - 1];
    let start = head
        .windows(needle.len())
        .position(|window| window == needle.as_slice())?;

    let mut out = PathBuf::new();
    out.extend(&parts[..start]);
    out.push(&layout.dest_dir);
    out.extend(&parts[start + needle.len()..]);
    Some(out)
}

/// 입력 폴더가 현재 폴더(`.`)인 경우 상대 경로 전체를 출력 폴더 아래로 옮김
///
/// 절대 경로나 `..`이 포함된 경로는 현재 폴더 아래로 볼 수 없으므로 제외합니다.
fn map_relative_into_dest(parts: &[Component], layout: &DirLayout) -> Option<PathBuf> {
    let rest: Vec<&Component> = parts
        .iter()
        .skip_while(|c| matches!(c, Component::CurDir))
        .collect();

    if rest.is_empty() || !rest.iter().all(|c| matches!(c, Component::Normal(_))) {
        return None;
    }

    let mut out = layout.dest_dir.clone();
    out.extend(rest);
    Some(out)
}
