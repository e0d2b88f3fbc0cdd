//! Parsers for model responses used during behavior inference.
//!
//! Model text is untrusted: it may follow the requested format exactly,
//! loosely, or not at all. Both parsers here degrade to empty results on
//! arbitrary input instead of failing.

use crate::behavior::model::Category;

/// Sections of a `PERMISSIONS:` / `APIS:` response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Permissions,
    Apis,
}

/// Extracts expected permissions and APIs from a behavior response.
///
/// Line-by-line scan: a header line opens its section and captures the
/// remainder of that line; later unlabeled non-empty lines append to the
/// active section; a new header switches sections. Tokens are
/// comma-split and trimmed.
pub fn parse_behavior_response(text: &str) -> (Vec<String>, Vec<String>) {
    let mut permissions = Vec::new();
    let mut apis = Vec::new();
    let mut section = Section::None;

    for line in text.lines() {
        let trimmed = line.trim();
        if let Some(rest) = strip_header(trimmed, "PERMISSIONS:") {
            section = Section::Permissions;
            push_tokens(&mut permissions, rest);
        } else if let Some(rest) = strip_header(trimmed, "APIS:") {
            section = Section::Apis;
            push_tokens(&mut apis, rest);
        } else if !trimmed.is_empty() {
            match section {
                Section::Permissions => push_tokens(&mut permissions, trimmed),
                Section::Apis => push_tokens(&mut apis, trimmed),
                Section::None => {}
            }
        }
    }

    (permissions, apis)
}

/// Finds the first closed-vocabulary token contained in a category
/// response, scanning the vocabulary in declaration order.
pub fn parse_category_response(text: &str) -> Option<Category> {
    let upper = text.to_uppercase();
    Category::ALL
        .iter()
        .find(|category| upper.contains(category.as_str()))
        .copied()
}

fn strip_header<'a>(line: &'a str, header: &str) -> Option<&'a str> {
    match line.get(..header.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(header) => Some(line[header.len()..].trim()),
        _ => None,
    }
}

fn push_tokens(into: &mut Vec<String>, raw: &str) {
    into.extend(
        raw.split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_conforming_response() {
        let (permissions, apis) = parse_behavior_response(
            "PERMISSIONS: CAMERA, WRITE_EXTERNAL_STORAGE\nAPIS: android.hardware.Camera, MediaStore",
        );
        assert_eq!(permissions, vec!["CAMERA", "WRITE_EXTERNAL_STORAGE"]);
        assert_eq!(apis, vec!["android.hardware.Camera", "MediaStore"]);
    }

    #[test]
    fn headers_are_case_insensitive() {
        let (permissions, apis) = parse_behavior_response("permissions: INTERNET\napis: MediaPlayer");
        assert_eq!(permissions, vec!["INTERNET"]);
        assert_eq!(apis, vec!["MediaPlayer"]);
    }

    #[test]
    fn unlabeled_lines_continue_the_active_section() {
        let (permissions, apis) = parse_behavior_response(
            "PERMISSIONS: INTERNET,\nREAD_CONTACTS, CAMERA\nAPIS:\nHttpURLConnection",
        );
        assert_eq!(permissions, vec!["INTERNET", "READ_CONTACTS", "CAMERA"]);
        assert_eq!(apis, vec!["HttpURLConnection"]);
    }

    #[test]
    fn text_before_any_header_is_ignored() {
        let (permissions, apis) = parse_behavior_response(
            "Sure, here is the breakdown you asked for.\nPERMISSIONS: INTERNET",
        );
        assert_eq!(permissions, vec!["INTERNET"]);
        assert!(apis.is_empty());
    }

    #[test]
    fn malformed_text_yields_empty_sections() {
        let (permissions, apis) = parse_behavior_response("no structure whatsoever");
        assert!(permissions.is_empty());
        assert!(apis.is_empty());
    }

    #[test]
    fn blank_and_whitespace_tokens_are_dropped() {
        let (permissions, _) = parse_behavior_response("PERMISSIONS: , INTERNET , ,");
        assert_eq!(permissions, vec!["INTERNET"]);
    }

    #[test]
    fn category_token_is_found_anywhere_in_response() {
        assert_eq!(
            parse_category_response("The application is clearly a GAME."),
            Some(Category::Game)
        );
        assert_eq!(parse_category_response("finance"), Some(Category::Finance));
    }

    #[test]
    fn category_search_follows_vocabulary_order() {
        // Both tokens present; CAMERA is earlier in the vocabulary.
        assert_eq!(
            parse_category_response("CAMERA or maybe UTILITY"),
            Some(Category::Camera)
        );
    }

    #[test]
    fn unknown_category_text_yields_none() {
        assert_eq!(parse_category_response("no idea"), None);
    }
}
