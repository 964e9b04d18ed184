use tracing::debug;

use crate::entries::{EducationStyle, ExperienceStyle, render_education, render_experience};
use crate::escape::escape_latex;
use crate::format::format_content;
use crate::model::{CustomSection, ResumeDocument, SectionKey};

/// Layout hooks shared by the built-in and custom section renderers.
///
/// `heading` receives the escaped title and the section key (`None` for
/// custom sections). `wrap` receives the non-empty body and may put a group
/// or environment around it.
#[derive(Debug, Clone, Copy)]
pub struct SectionLayout {
    pub heading: fn(Option<SectionKey>, &str) -> String,
    pub wrap: fn(Option<SectionKey>, String) -> String,
    pub experience: ExperienceStyle,
    pub education: EducationStyle,
}

/// Body of a built-in section, independent of visibility.
pub fn section_body(doc: &ResumeDocument, key: SectionKey, layout: &SectionLayout) -> String {
    match key {
        SectionKey::Experience => render_experience(&doc.experience, &layout.experience),
        SectionKey::Education => render_education(&doc.education, &layout.education),
        _ => format_content(doc.section_content(key), doc.field_types(key), doc.links(key)),
    }
}

/// Heading plus body, or `None` when the section is hidden or has nothing to show.
pub fn render_section(
    doc: &ResumeDocument,
    key: SectionKey,
    layout: &SectionLayout,
) -> Option<String> {
    if doc.is_hidden(key) {
        debug!(section = %key, "skipping hidden section");
        return None;
    }

    let body = section_body(doc, key, layout);
    if body.is_empty() {
        debug!(section = %key, "skipping empty section");
        return None;
    }

    let heading = (layout.heading)(Some(key), &escape_latex(doc.heading(key).trim()));
    Some(format!("{heading}\n{}", (layout.wrap)(Some(key), body)))
}

/// Every renderable section of `keys`, in order, separated by blank lines.
pub fn render_sections(doc: &ResumeDocument, keys: &[SectionKey], layout: &SectionLayout) -> String {
    keys.iter()
        .filter_map(|key| render_section(doc, *key, layout))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// User-defined sections with a heading and a non-empty body, in order.
pub fn render_custom_sections(sections: &[CustomSection], layout: &SectionLayout) -> String {
    sections
        .iter()
        .filter_map(|section| {
            let heading = section.heading.trim();
            if heading.is_empty() {
                return None;
            }
            let body = format_content(&section.content, section.field_types, &section.links);
            if body.is_empty() {
                return None;
            }
            Some(format!(
                "{}\n{}",
                (layout.heading)(None, &escape_latex(heading)),
                (layout.wrap)(None, body)
            ))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
