//! Window title classification for GameMaker IDE windows.

use crate::constants::{PROJECT_SUFFIX_MARKERS, START_PAGE_TITLES};

/// Cut the project name from an IDE window title.
///
/// Returns the text before the last occurrence of whichever suffix marker
/// appears furthest into the title, or an empty string when no marker is
/// found past the first character.
pub fn extract_project_title(title: &str) -> String {
    if title.trim().is_empty() {
        return String::new();
    }

    let position = PROJECT_SUFFIX_MARKERS
        .iter()
        .filter_map(|marker| title.rfind(marker))
        .max();

    match position {
        Some(end) if end > 0 => title.get(..end).unwrap_or_default().to_string(),
        _ => String::new(),
    }
}

/// Whether the title belongs to an IDE window showing its start page.
pub fn is_start_page_title(title: &str) -> bool {
    START_PAGE_TITLES.iter().any(|page| title.contains(page))
}

/// Strip the control characters some window systems leave in titles.
pub fn sanitize_window_title(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_modern_title() {
        assert_eq!(extract_project_title("Alpha - GameMaker"), "Alpha");
        assert_eq!(
            extract_project_title("My Game - GameMaker - GameMaker"),
            "My Game - GameMaker"
        );
    }

    #[test]
    fn test_extract_legacy_title() {
        assert_eq!(
            extract_project_title("Platformer.project.gmx  -  Studio"),
            "Platformer"
        );
        // The modern marker can also match inside a legacy title; the later one is used.
        assert_eq!(
            extract_project_title("Platformer.project.gmx  - GameMaker: Studio"),
            "Platformer.project.gmx "
        );
    }

    #[test]
    fn test_extract_uses_later_marker() {
        // Both markers present: the one further right wins.
        let title = "Old.project.gmx  - Port - GameMaker";
        assert_eq!(extract_project_title(title), "Old.project.gmx  - Port");
    }

    #[test]
    fn test_extract_without_marker_is_empty() {
        assert_eq!(extract_project_title("Untitled"), "");
        assert_eq!(extract_project_title(""), "");
        assert_eq!(extract_project_title("   "), "");
    }

    #[test]
    fn test_extract_marker_at_start_is_empty() {
        assert_eq!(extract_project_title(" - GameMaker"), "");
    }

    #[test]
    fn test_extract_is_case_sensitive() {
        assert_eq!(extract_project_title("Alpha - gamemaker"), "");
    }

    #[test]
    fn test_extract_is_deterministic() {
        let title = "Beta - GameMaker";
        assert_eq!(extract_project_title(title), extract_project_title(title));
    }

    #[test]
    fn test_start_page_titles() {
        assert!(is_start_page_title("Start Page - GameMaker"));
        assert!(is_start_page_title("<new game>  - GameMaker: Studio"));
        assert!(!is_start_page_title("Alpha - GameMaker"));
        assert!(!is_start_page_title("start page - gamemaker"));
        assert!(!is_start_page_title(""));
    }

    #[test]
    fn test_sanitize_window_title() {
        assert_eq!(sanitize_window_title("Alpha - GameMaker\n"), "Alpha - GameMaker");
        assert_eq!(sanitize_window_title("\tA\r\nB"), "AB");
        assert_eq!(sanitize_window_title("no change"), "no change");
    }
}
