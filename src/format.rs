//! Section body formatting.
//!
//! A section body is free text plus an optional link list. How it is rendered
//! depends on the section's [`FieldTypes`]:
//!
//! - `bullet`: one `\item` per non-empty line, user typed list markers removed
//! - `references`: contact blocks, see [`crate::references`]
//! - anything else: the escaped text as one paragraph
//!
//! With `hyperlink` set, a second list with one `\href` per usable link follows
//! the body, separated by a blank line. An empty result means the caller must
//! leave out the section heading as well.

use crate::escape::{escape_latex, protect_line_start, sanitize_url};
use crate::model::{FieldType, FieldTypes, LinkEntry};
use crate::references::render_references;

const LIST_MARKERS: [char; 4] = ['•', '◦', '▪', '‣'];
const SPACED_LIST_MARKERS: [char; 3] = ['-', '*', '–'];

pub fn format_content(content: &str, field_types: FieldTypes, links: &[LinkEntry]) -> String {
    let body = if field_types.contains(FieldType::Bullet) {
        bullet_list(content)
    } else if field_types.contains(FieldType::References) {
        render_references(content)
    } else {
        escape_latex(content.trim())
    };

    let link_list = if field_types.contains(FieldType::Hyperlink) {
        link_list(links)
    } else {
        String::new()
    };

    match (body.is_empty(), link_list.is_empty()) {
        (true, true) => String::new(),
        (false, true) => body,
        (true, false) => link_list,
        (false, false) => format!("{body}\n\n{link_list}"),
    }
}

/// `itemize` over the non-empty lines of `content`, or nothing.
pub fn bullet_list(content: &str) -> String {
    let items = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(strip_list_marker)
        .filter(|line| !line.is_empty())
        .map(|line| format!("  \\item {}", protect_line_start(escape_latex(line))))
        .collect::<Vec<_>>();

    itemize(&items)
}

/// `itemize` with one hyperlink per link that has both a label and a usable URL.
pub fn link_list(links: &[LinkEntry]) -> String {
    let items = links
        .iter()
        .filter_map(|link| {
            let label = link.label.trim();
            if label.is_empty() {
                return None;
            }
            let url = sanitize_url(&link.url)?;
            Some(format!("  \\item \\href{{{url}}}{{{}}}", escape_latex(label)))
        })
        .collect::<Vec<_>>();

    itemize(&items)
}

pub(crate) fn itemize(items: &[String]) -> String {
    if items.is_empty() {
        return String::new();
    }
    format!(
        "\\begin{{itemize}}\n{}\n\\end{{itemize}}",
        items.join("\n")
    )
}

/// Remove one leading list marker the user may have typed themselves.
fn strip_list_marker(line: &str) -> &str {
    if let Some(rest) = line.strip_prefix(LIST_MARKERS) {
        return rest.trim_start();
    }
    if let Some(rest) = line.strip_prefix(SPACED_LIST_MARKERS)
        && rest.starts_with(char::is_whitespace)
    {
        return rest.trim_start();
    }
    line
}
