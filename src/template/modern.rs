//! Two columns: career story on the left, skills and extras on the right.

use super::{Identity, contact_parts, grouped, join_present, section_icon, styled, unwrapped};
use crate::entries::{EducationStyle, EntryHeader, ExperienceStyle};
use crate::model::{ResumeDocument, SectionKey};
use crate::sections::{SectionLayout, render_custom_sections, render_sections};

const LEFT: [SectionKey; 3] = [
    SectionKey::Summary,
    SectionKey::Experience,
    SectionKey::Football,
];

const RIGHT: [SectionKey; 7] = [
    SectionKey::Achievements,
    SectionKey::Skills,
    SectionKey::Education,
    SectionKey::References,
    SectionKey::Languages,
    SectionKey::Portfolio,
    SectionKey::PersonalAttributes,
];

const LAYOUT: SectionLayout = SectionLayout {
    heading,
    wrap: unwrapped,
    experience: ExperienceStyle {
        header: entry_header,
        list_open: "\\begin{itemize}",
        separator: "\n\n\\vspace{4pt}\n\n",
    },
    education: EducationStyle {
        header: entry_header,
        activities,
        separator: "\n\n\\vspace{4pt}\n\n",
    },
};

fn heading(key: Option<SectionKey>, title: &str) -> String {
    format!("\\section*{{{}\\ {title}}}", section_icon(key))
}

// Title on its own line, organisation and dates below it.
fn entry_header(h: &EntryHeader<'_>) -> String {
    let second = join_present(
        [
            styled("textcolor{primaryblue}", &styled("textbf", h.organization)),
            styled("textit", h.dates),
        ],
        " \\hfill ",
    );
    join_present([styled("textbf", h.title), second], "\\\\\n")
}

fn activities(text: &str) -> String {
    format!("\\par{{\\small\\textit{{Activities: {text}}}}}")
}

fn header(identity: &Identity) -> String {
    let [phone, email, location, portfolio, social] = contact_parts(identity);
    let lines = [
        grouped(
            "\\Huge\\bfseries\\color{darkblue}",
            &styled("MakeUppercase", &identity.name),
        ),
        grouped(
            "\\large\\color{primaryblue}",
            &identity.headline(|title| format!("\\textbf{{{title}}}")),
        ),
        grouped(
            "\\small",
            &join_present([phone, email, location, portfolio, social], " \\quad "),
        ),
    ];
    let block = join_present(lines, "\\\\[4pt]\n");
    if block.is_empty() {
        return block;
    }
    format!("\\begin{{center}}\n{block}\n\\end{{center}}")
}

pub(super) fn body(doc: &ResumeDocument) -> String {
    let right = join_present(
        [
            render_sections(doc, &RIGHT, &LAYOUT),
            render_custom_sections(&doc.custom_sections, &LAYOUT),
        ],
        "\n\n",
    );
    let columns = format!(
        "\\begin{{multicols}}{{2}}\n{}\n\n\\columnbreak\n\n{right}\n\\end{{multicols}}",
        render_sections(doc, &LEFT, &LAYOUT),
    );
    join_present([header(&Identity::new(doc)), columns], "\n\n")
}
