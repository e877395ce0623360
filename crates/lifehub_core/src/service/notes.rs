//! Note list projections: markdown previews, tag input, category filters.

use crate::model::note::Note;
use once_cell::sync::Lazy;
use regex::Regex;

const PREVIEW_MAX_CHARS: usize = 100;

static MARKDOWN_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*]\(([^)]+)\)").expect("valid image regex"));
static MARKDOWN_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"));
static MARKDOWN_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\*_`#>~\-\[\]\(\)!]+"#).expect("valid markdown symbol regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Text and image shown for a note in list views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownPreview {
    pub text: Option<String>,
    /// Path of the first markdown image.
    pub image: Option<String>,
}

/// Strips markdown from `content` into a short plain-text excerpt.
pub fn derive_markdown_preview(content: &str) -> MarkdownPreview {
    let image = MARKDOWN_IMAGE_RE
        .captures(content)
        .and_then(|caps| caps.get(1).map(|m| m.as_str().trim().to_string()))
        .filter(|value| !value.is_empty());

    let without_images = MARKDOWN_IMAGE_RE.replace_all(content, " ");
    let without_links = MARKDOWN_LINK_RE.replace_all(&without_images, "$1");
    let without_symbols = MARKDOWN_SYMBOL_RE.replace_all(&without_links, " ");
    let normalized = WHITESPACE_RE.replace_all(&without_symbols, " ");
    let trimmed = normalized.trim();

    MarkdownPreview {
        text: (!trimmed.is_empty())
            .then(|| trimmed.chars().take(PREVIEW_MAX_CHARS).collect()),
        image,
    }
}

/// Splits comma-separated form input into trimmed, non-empty tags.
///
/// Order and duplicates are kept as typed.
pub fn parse_tag_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Inverse of [`parse_tag_list`] for edit forms.
pub fn join_tags(tags: &[String]) -> String {
    tags.join(", ")
}

/// Distinct non-empty categories in first-seen order.
pub fn note_categories(notes: &[Note]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for category in notes.iter().filter_map(|note| note.category.as_deref()) {
        if !category.is_empty() && !categories.iter().any(|seen| seen == category) {
            categories.push(category.to_string());
        }
    }
    categories
}

/// Notes whose title or content contains `term` (case-insensitive) and,
/// when `category` is given, whose category matches exactly.
pub fn filter_notes<'a>(notes: &'a [Note], term: &str, category: Option<&str>) -> Vec<&'a Note> {
    let term = term.to_lowercase();
    notes
        .iter()
        .filter(|note| {
            note.title.to_lowercase().contains(&term) || note.content.to_lowercase().contains(&term)
        })
        .filter(|note| category.map_or(true, |wanted| note.category.as_deref() == Some(wanted)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{derive_markdown_preview, filter_notes, join_tags, note_categories, parse_tag_list};
    use crate::model::note::Note;

    #[test]
    fn preview_extracts_first_image_path() {
        let preview = derive_markdown_preview("x ![a](one.png) y ![b](two.png)");
        assert_eq!(preview.image.as_deref(), Some("one.png"));
    }

    #[test]
    fn preview_strips_markdown_symbols_and_limits_length() {
        let source = format!(
            "# title\n\n- [link](https://example.com)\n**bold** `code` {}",
            "x".repeat(200)
        );
        let text = derive_markdown_preview(&source).text.unwrap();
        assert!(text.starts_with("title link bold code"));
        assert!(!text.contains('#'));
        assert!(!text.contains('*'));
        assert_eq!(text.chars().count(), 100);
    }

    #[test]
    fn blank_content_has_no_preview_text() {
        assert_eq!(derive_markdown_preview("  ** ").text, None);
    }

    #[test]
    fn tag_input_is_split_and_trimmed() {
        assert_eq!(parse_tag_list(" a, b,,c , "), vec!["a", "b", "c"]);
        assert!(parse_tag_list("").is_empty());
        assert_eq!(join_tags(&parse_tag_list("work,ideas")), "work, ideas");
    }

    #[test]
    fn notes_filter_by_term_and_category() {
        let mut recipe = Note::new("Soup", "Boil water");
        recipe.category = Some("cooking".to_string());
        let mut plan = Note::new("Sprint plan", "Ship the soup tracker");
        plan.category = Some("work".to_string());
        let notes = vec![recipe, plan, Note::new("Loose", "")];

        assert_eq!(note_categories(&notes), vec!["cooking", "work"]);
        assert_eq!(filter_notes(&notes, "SOUP", None).len(), 2);
        let work = filter_notes(&notes, "soup", Some("work"));
        assert_eq!(work.len(), 1);
        assert_eq!(work[0].title, "Sprint plan");
    }
}
