//! Single column, centred header, blue rules under each heading.

use super::{Identity, contact_parts, grouped, join_present, section_icon, styled, unwrapped};
use crate::entries::{EducationStyle, EntryHeader, ExperienceStyle};
use crate::model::{ResumeDocument, SectionKey};
use crate::sections::{SectionLayout, render_custom_sections, render_sections};

const ORDER: [SectionKey; 10] = [
    SectionKey::Summary,
    SectionKey::Football,
    SectionKey::Skills,
    SectionKey::Experience,
    SectionKey::Education,
    SectionKey::Achievements,
    SectionKey::Portfolio,
    SectionKey::PersonalAttributes,
    SectionKey::Languages,
    SectionKey::References,
];

const LAYOUT: SectionLayout = SectionLayout {
    heading,
    wrap: unwrapped,
    experience: ExperienceStyle {
        header: experience_header,
        list_open: "\\begin{itemize}",
        separator: "\n\n",
    },
    education: EducationStyle {
        header: education_header,
        activities,
        separator: "\n\n\\vspace{3pt}\n\n",
    },
};

fn heading(key: Option<SectionKey>, title: &str) -> String {
    format!("\\section*{{{}\\ {title}}}", section_icon(key))
}

fn experience_header(h: &EntryHeader<'_>) -> String {
    let lead = join_present(
        [styled("textbf", h.title), styled("textit", h.organization)],
        " -- ",
    );
    join_present([lead, styled("textbf", h.dates)], " \\hfill ")
}

fn education_header(h: &EntryHeader<'_>) -> String {
    let lead = join_present(
        [styled("textbf", h.title), h.organization.to_string()],
        " -- ",
    );
    join_present([lead, styled("textbf", h.dates)], " \\hfill ")
}

fn activities(text: &str) -> String {
    format!("\\par\\textit{{Activities: {text}}}")
}

fn header(identity: &Identity) -> String {
    let [phone, email, location, portfolio, social] = contact_parts(identity);
    let lines = [
        grouped("\\large", &styled("textbf", &identity.name)),
        identity.headline(|title| format!("\\textbf{{{title}}}")),
        join_present([phone, email, location], " \\quad "),
        join_present([portfolio, social], " \\quad "),
    ];
    let block = join_present(lines, "\\\\[2pt]\n");
    if block.is_empty() {
        return block;
    }
    format!("\\begin{{center}}\n{block}\n\\end{{center}}\n\\vspace{{-2pt}}")
}

pub(super) fn body(doc: &ResumeDocument) -> String {
    join_present(
        [
            header(&Identity::new(doc)),
            render_sections(doc, &ORDER, &LAYOUT),
            render_custom_sections(&doc.custom_sections, &LAYOUT),
        ],
        "\n\n",
    )
}
