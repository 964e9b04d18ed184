//! Grayscale, dense single column with a photo frame beside the header.
//!
//! Education and achievements share a two column row when either is present.

use super::{Identity, contact_parts, grouped, join_present, styled};
use crate::entries::{EducationStyle, EntryHeader, ExperienceStyle};
use crate::model::{ResumeDocument, SectionKey};
use crate::sections::{SectionLayout, render_custom_sections, render_section, render_sections};

const LEAD: [SectionKey; 4] = [
    SectionKey::Summary,
    SectionKey::Football,
    SectionKey::Skills,
    SectionKey::Experience,
];

const TAIL: [SectionKey; 4] = [
    SectionKey::Portfolio,
    SectionKey::PersonalAttributes,
    SectionKey::Languages,
    SectionKey::References,
];

const LAYOUT: SectionLayout = SectionLayout {
    heading,
    wrap,
    experience: ExperienceStyle {
        header: entry_header,
        list_open: "\\begin{itemize}",
        separator: "\n\n\\vspace{3pt}\n\n",
    },
    education: EducationStyle {
        header: entry_header,
        activities,
        separator: "\n\n\\vspace{3pt}\n\n",
    },
};

fn heading(_key: Option<SectionKey>, title: &str) -> String {
    format!("\\section*{{{title}}}")
}

fn wrap(key: Option<SectionKey>, body: String) -> String {
    let body = format!("{{\\footnotesize\\color{{textgray}}\n{body}\n}}");
    match key {
        Some(SectionKey::Football) => {
            format!("\\begin{{multicols}}{{2}}\n{body}\n\\end{{multicols}}")
        }
        _ => body,
    }
}

fn entry_header(h: &EntryHeader<'_>) -> String {
    let lead = join_present(
        [styled("textbf", h.title), h.organization.to_string()],
        ", ",
    );
    join_present([lead, styled("textit", h.dates)], " \\hfill ")
}

fn activities(text: &str) -> String {
    format!("\\par\\textit{{Activities: {text}}}")
}

fn header(identity: &Identity) -> String {
    let [phone, email, location, portfolio, social] = contact_parts(identity);
    let lines = join_present(
        [
            grouped(
                "\\LARGE\\bfseries\\color{darkgray}",
                &styled("MakeUppercase", &identity.name),
            ),
            grouped("\\color{headergray}", &identity.headline(|title| title.to_string())),
            grouped(
                "\\footnotesize\\color{textgray}",
                &join_present([phone, email, location], " \\quad "),
            ),
            grouped(
                "\\footnotesize\\color{textgray}",
                &join_present([portfolio, social], " \\quad "),
            ),
        ],
        "\\\\[3pt]\n",
    );
    format!(
        "\\begin{{minipage}}[c]{{0.75\\textwidth}}\n{lines}\n\\end{{minipage}}\n\
         \\hfill\n\
         \\fbox{{\\begin{{minipage}}[c][2.6cm][c]{{2.2cm}}\\centering\\color{{headergray}}\\Huge\\faUser\\end{{minipage}}}}"
    )
}

fn paired_row(doc: &ResumeDocument) -> String {
    let row = join_present(
        [
            render_section(doc, SectionKey::Education, &LAYOUT).unwrap_or_default(),
            render_section(doc, SectionKey::Achievements, &LAYOUT).unwrap_or_default(),
        ],
        "\n\n\\columnbreak\n\n",
    );
    if row.is_empty() {
        return row;
    }
    format!("\\begin{{multicols}}{{2}}\n{row}\n\\end{{multicols}}")
}

pub(super) fn body(doc: &ResumeDocument) -> String {
    join_present(
        [
            header(&Identity::new(doc)),
            render_sections(doc, &LEAD, &LAYOUT),
            paired_row(doc),
            render_sections(doc, &TAIL, &LAYOUT),
            render_custom_sections(&doc.custom_sections, &LAYOUT),
        ],
        "\n\n",
    )
}
