//! Full-width banner over a two column body with a contact block.

use super::{Identity, contact_parts, grouped, join_present, styled};
use crate::entries::{EducationStyle, EntryHeader, ExperienceStyle};
use crate::model::{ResumeDocument, SectionKey};
use crate::sections::{SectionLayout, render_custom_sections, render_sections};

const LEFT: [SectionKey; 7] = [
    SectionKey::Summary,
    SectionKey::Education,
    SectionKey::Skills,
    SectionKey::Languages,
    SectionKey::Achievements,
    SectionKey::Experience,
    SectionKey::Portfolio,
];

const RIGHT: [SectionKey; 3] = [
    SectionKey::Football,
    SectionKey::PersonalAttributes,
    SectionKey::References,
];

const LAYOUT: SectionLayout = SectionLayout {
    heading,
    wrap,
    experience: ExperienceStyle {
        header: entry_header,
        list_open: "\\begin{itemize}",
        separator: "\n\n",
    },
    education: EducationStyle {
        header: entry_header,
        activities,
        separator: "\n\n",
    },
};

fn heading(_key: Option<SectionKey>, title: &str) -> String {
    format!("\\section*{{{title}}}")
}

fn wrap(_key: Option<SectionKey>, body: String) -> String {
    format!("{{\\small\n{body}\n}}")
}

fn entry_header(h: &EntryHeader<'_>) -> String {
    let second = join_present(
        [
            styled("textit", h.organization),
            grouped("\\footnotesize", h.dates),
        ],
        " \\hfill ",
    );
    join_present([styled("textbf", h.title), second], "\\\\\n")
}

fn activities(text: &str) -> String {
    format!("\\par{{\\footnotesize Activities: {text}}}")
}

fn banner(identity: &Identity) -> String {
    let lines = join_present(
        [
            grouped("\\Huge\\bfseries", &styled("MakeUppercase", &identity.name)),
            grouped("\\large", &identity.headline(|title| title.to_string())),
        ],
        "\\\\[6pt]\n",
    );
    format!(
        "\\begin{{tikzpicture}}[remember picture,overlay]\n\
         \\fill[headercolor] (current page.north west) rectangle ([yshift=-3.2cm]current page.north east);\n\
         \\node[anchor=north west, text=white, inner sep=0pt] at ([xshift=0.65in,yshift=-0.9cm]current page.north west) {{\\begin{{minipage}}{{0.8\\paperwidth}}\n{lines}\n\\end{{minipage}}}};\n\
         \\end{{tikzpicture}}\n\
         \\vspace*{{2.4cm}}"
    )
}

fn contact(identity: &Identity) -> String {
    let lines = join_present(contact_parts(identity), "\\\\\n");
    if lines.is_empty() {
        return lines;
    }
    format!("\\section*{{Contact}}\n{{\\small\n{lines}\n}}")
}

pub(super) fn body(doc: &ResumeDocument) -> String {
    let identity = Identity::new(doc);
    let left = join_present(
        [contact(&identity), render_sections(doc, &LEFT, &LAYOUT)],
        "\n\n",
    );
    let right = join_present(
        [
            render_sections(doc, &RIGHT, &LAYOUT),
            render_custom_sections(&doc.custom_sections, &LAYOUT),
        ],
        "\n\n",
    );
    format!(
        "{}\n\n\\begin{{multicols}}{{2}}\n{left}\n\n\\columnbreak\n\n{right}\n\\end{{multicols}}",
        banner(&identity)
    )
}
