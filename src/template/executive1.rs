use super::{Identity, contact_parts, grouped, join_present, styled};
use crate::escape::protect_line_start;
use crate::entries::{EducationStyle, EntryHeader, ExperienceStyle};
use crate::model::{ResumeDocument, SectionKey};
use crate::sections::{SectionLayout, render_custom_sections, render_sections};

const ORDER: [SectionKey; 10] = [
    SectionKey::Summary,
    SectionKey::Skills,
    SectionKey::Experience,
    SectionKey::Football,
    SectionKey::Education,
    SectionKey::Achievements,
    SectionKey::Portfolio,
    SectionKey::PersonalAttributes,
    SectionKey::Languages,
    SectionKey::References,
];

const LAYOUT: SectionLayout = SectionLayout {
    heading,
    wrap,
    experience: ExperienceStyle {
        header: experience_header,
        list_open: "\\begin{itemize}",
        separator: "\n\n\\vspace{5pt}\n\n",
    },
    education: EducationStyle {
        header: education_header,
        activities,
        separator: "\n\n\\vspace{4pt}\n\n",
    },
};

fn heading(_key: Option<SectionKey>, title: &str) -> String {
    format!("\\section*{{{title}}}")
}

// Skills read as a compact three column grid.
fn wrap(key: Option<SectionKey>, body: String) -> String {
    match key {
        Some(SectionKey::Skills) => {
            let body = protect_line_start(body);
            format!("\\begin{{multicols}}{{3}}\n{body}\n\\end{{multicols}}")
        }
        _ => body,
    }
}

fn experience_header(h: &EntryHeader<'_>) -> String {
    let lead = join_present(
        [
            styled("textbf", h.title),
            styled("textcolor{executivebluelight}", h.organization),
        ],
        " | ",
    );
    join_present([lead, styled("textit", h.dates)], " \\hfill ")
}

fn education_header(h: &EntryHeader<'_>) -> String {
    let second = join_present(
        [styled("textit", h.organization), h.dates.to_string()],
        " \\hfill ",
    );
    join_present([styled("textbf", h.title), second], "\\\\\n")
}

fn activities(text: &str) -> String {
    format!("\\par{{\\small Activities: {text}}}")
}

fn header(identity: &Identity) -> String {
    let [phone, email, location, portfolio, social] = contact_parts(identity);
    let lines = join_present(
        [
            grouped(
                "\\Huge\\bfseries\\color{executiveblue}",
                &styled("MakeUppercase", &identity.name),
            ),
            grouped("\\large\\color{darkgray}", &identity.headline(|title| title.to_string())),
            grouped("\\small", &join_present([phone, email, location], " \\quad ")),
            grouped("\\small", &join_present([portfolio, social], " \\quad ")),
        ],
        "\\\\[4pt]\n",
    );
    format!(
        "\\begin{{minipage}}[c]{{0.72\\textwidth}}\n{lines}\n\\end{{minipage}}\n\
         \\hfill\n\
         \\begin{{minipage}}[c]{{0.2\\textwidth}}\n\
         \\centering\n\
         \\begin{{tikzpicture}}\n\
         \\draw[executiveblue, line width=1.5pt, fill=lightgray] (0,0) circle (1.4cm);\n\
         \\node[text=executiveblue] at (0,0) {{\\Huge\\faUser}};\n\
         \\end{{tikzpicture}}\n\
         \\end{{minipage}}\n\n\
         \\vspace{{6pt}}\n\
         {{\\color{{executiveblue}}\\rule{{\\linewidth}}{{1.4pt}}}}"
    )
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
