use crate::escape::{escape_latex, protect_line_start};
use crate::model::{EducationEntry, ExperienceEntry};

/// Escaped header fields of one entry, in display order.
#[derive(Debug, Clone, Copy)]
pub struct EntryHeader<'a> {
    /// Position or degree.
    pub title: &'a str,
    /// Company or institution.
    pub organization: &'a str,
    pub dates: &'a str,
}

/// How a layout dresses experience entries. Field order is fixed by the
/// renderer; the layout only decides the markup around it.
#[derive(Debug, Clone, Copy)]
pub struct ExperienceStyle {
    pub header: fn(&EntryHeader<'_>) -> String,
    /// Opening of the details list, e.g. `\begin{itemize}[noitemsep]`.
    pub list_open: &'static str,
    pub separator: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct EducationStyle {
    pub header: fn(&EntryHeader<'_>) -> String,
    /// Receives the escaped, non-empty activities text.
    pub activities: fn(&str) -> String,
    pub separator: &'static str,
}

pub fn render_experience(entries: &[ExperienceEntry], style: &ExperienceStyle) -> String {
    entries
        .iter()
        .filter(|entry| !entry.is_blank())
        .map(|entry| {
            let title = escape_latex(entry.position.trim());
            let organization = escape_latex(entry.company.trim());
            let dates = date_range(&entry.start_date, &entry.end_date);
            let header = (style.header)(&EntryHeader {
                title: &title,
                organization: &organization,
                dates: &dates,
            });

            if entry.details.is_empty() {
                return header;
            }

            let items = entry
                .details
                .iter()
                .map(|detail| format!("  \\item {}", protect_line_start(escape_latex(detail))))
                .collect::<Vec<_>>()
                .join("\n");
            format!("{header}\n{}\n{items}\n\\end{{itemize}}", style.list_open)
        })
        .collect::<Vec<_>>()
        .join(style.separator)
}

pub fn render_education(entries: &[EducationEntry], style: &EducationStyle) -> String {
    entries
        .iter()
        .filter(|entry| !entry.is_blank())
        .map(|entry| {
            let title = escape_latex(entry.degree.trim());
            let organization = escape_latex(entry.institution.trim());
            let dates = date_range(&entry.start_date, &entry.end_date);
            let header = (style.header)(&EntryHeader {
                title: &title,
                organization: &organization,
                dates: &dates,
            });

            let activities = entry.activities.trim();
            if activities.is_empty() {
                header
            } else {
                format!("{header}\n{}", (style.activities)(&escape_latex(activities)))
            }
        })
        .collect::<Vec<_>>()
        .join(style.separator)
}

/// Escaped `start -- end`, or whichever side is present.
pub fn date_range(start: &str, end: &str) -> String {
    match (start.trim(), end.trim()) {
        ("", "") => String::new(),
        (start, "") => escape_latex(start),
        ("", end) => escape_latex(end),
        (start, end) => format!("{} -- {}", escape_latex(start), escape_latex(end)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bracketed(h: &EntryHeader<'_>) -> String {
        format!("[{}|{}|{}]", h.title, h.organization, h.dates)
    }

    fn activities(a: &str) -> String {
        format!("Activities: {a}")
    }

    const EXPERIENCE: ExperienceStyle = ExperienceStyle {
        header: bracketed,
        list_open: "\\begin{itemize}",
        separator: "\n\n",
    };

    const EDUCATION: EducationStyle = EducationStyle {
        header: bracketed,
        activities,
        separator: "\\\\[3pt]\n\n",
    };

    fn job(position: &str, details: &[&str]) -> ExperienceEntry {
        ExperienceEntry {
            position: position.into(),
            company: "Acme & Co".into(),
            start_date: "2020".into(),
            end_date: "2022".into(),
            details: details.iter().map(|d| d.to_string()).collect(),
        }
    }

    #[test]
    fn experience_field_order() {
        let out = render_experience(&[job("Engineer", &["Built X", "Shipped Y"])], &EXPERIENCE);
        assert_eq!(
            out,
            "[Engineer|Acme \\& Co|2020 -- 2022]\n\\begin{itemize}\n  \\item Built X\n  \\item Shipped Y\n\\end{itemize}"
        );
    }

    #[test]
    fn empty_details_are_kept() {
        let out = render_experience(&[job("Engineer", &["a", "", "c"])], &EXPERIENCE);
        assert_eq!(out.matches("\\item").count(), 3);
    }

    #[test]
    fn no_details_means_no_list() {
        let out = render_experience(&[job("Engineer", &[])], &EXPERIENCE);
        assert!(!out.contains("itemize"));
    }

    #[test]
    fn indented_bracket_detail_is_not_an_item_label() {
        let out = render_experience(&[job("Engineer", &["  [2023] award"])], &EXPERIENCE);
        assert!(out.contains("  \\item {}  [2023] award"));
    }

    #[test]
    fn blank_entries_are_skipped() {
        let out = render_experience(
            &[ExperienceEntry::default(), job("B", &[])],
            &EXPERIENCE,
        );
        assert_eq!(out, "[B|Acme \\& Co|2020 -- 2022]");
        assert_eq!(render_experience(&[], &EXPERIENCE), "");
    }

    #[test]
    fn education_with_and_without_activities() {
        let entries = [
            EducationEntry {
                degree: "BSc".into(),
                institution: "Uni".into(),
                start_date: "2017".into(),
                end_date: "2021".into(),
                activities: "Chess_club".into(),
            },
            EducationEntry {
                degree: "MSc".into(),
                institution: "Uni".into(),
                ..EducationEntry::default()
            },
        ];
        let out = render_education(&entries, &EDUCATION);
        assert_eq!(
            out,
            "[BSc|Uni|2017 -- 2021]\nActivities: Chess\\_club\\\\[3pt]\n\n[MSc|Uni|]"
        );
    }

    #[test]
    fn date_range_variants() {
        assert_eq!(date_range("2020", "Present"), "2020 -- Present");
        assert_eq!(date_range(" ", "2022"), "2022");
        assert_eq!(date_range("2020", ""), "2020");
        assert_eq!(date_range("", ""), "");
    }
}
