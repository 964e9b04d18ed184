use std::fmt::{Display, Formatter};
use std::str::FromStr;

use tracing::debug;

use crate::escape::{escape_latex, sanitize_mailto, sanitize_url};
use crate::model::{ResumeDocument, SectionKey};

mod classic;
mod detailed;
mod executive1;
mod executive2;
mod modern;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    Classic,
    Modern,
    Detailed,
    Executive1,
    Executive2,
}

#[derive(Debug, Clone)]
pub struct LayoutParseError {
    value: String,
}

impl LayoutParseError {
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Display for LayoutParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "no such template: {}", self.value)
    }
}

impl std::error::Error for LayoutParseError {}

impl TryFrom<&str> for Layout {
    type Error = LayoutParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "classic" => Ok(Self::Classic),
            "modern" => Ok(Self::Modern),
            "detailed" => Ok(Self::Detailed),
            "executive1" => Ok(Self::Executive1),
            "executive2" => Ok(Self::Executive2),
            _ => Err(LayoutParseError {
                value: value.to_string(),
            }),
        }
    }
}

impl FromStr for Layout {
    type Err = LayoutParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}

impl Display for Layout {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl Layout {
    /// Registry order, which is also the order layouts are listed to users.
    pub const ALL: [Layout; 5] = [
        Self::Classic,
        Self::Modern,
        Self::Detailed,
        Self::Executive1,
        Self::Executive2,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::Classic => "classic",
            Self::Modern => "modern",
            Self::Detailed => "detailed",
            Self::Executive1 => "executive1",
            Self::Executive2 => "executive2",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Classic => "Classic Minimal",
            Self::Modern => "Modern Two Column",
            Self::Detailed => "Detailed Modern",
            Self::Executive1 => "Executive Pro V1",
            Self::Executive2 => "Executive Pro V2",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Classic => "Clean & Professional",
            Self::Modern => "Contemporary Layout",
            Self::Detailed => "Comprehensive",
            Self::Executive1 => "Blue Header Style",
            Self::Executive2 => "Grayscale Professional",
        }
    }

    fn preamble(self) -> &'static str {
        match self {
            Self::Classic => include_str!("classic.tex"),
            Self::Modern => include_str!("modern.tex"),
            Self::Detailed => include_str!("detailed.tex"),
            Self::Executive1 => include_str!("executive1.tex"),
            Self::Executive2 => include_str!("executive2.tex"),
        }
    }

    /// Render a complete, compilable LaTeX document.
    pub fn render(self, doc: &ResumeDocument) -> String {
        let body = match self {
            Self::Classic => classic::body(doc),
            Self::Modern => modern::body(doc),
            Self::Detailed => detailed::body(doc),
            Self::Executive1 => executive1::body(doc),
            Self::Executive2 => executive2::body(doc),
        };
        compose(self.preamble(), &body)
    }
}

/// Look up `layout_id` in the registry and render `doc` with it.
pub fn generate(layout_id: &str, doc: &ResumeDocument) -> Result<String, LayoutParseError> {
    let layout = Layout::try_from(layout_id)?;
    let source = layout.render(doc);
    debug!(layout = %layout, bytes = source.len(), "rendered document");
    Ok(source)
}

fn compose(preamble: &str, body: &str) -> String {
    let mut source = String::with_capacity(preamble.len() + body.len() + 64);
    source.push_str(preamble.trim_end());
    source.push_str("\n\n\\begin{document}\n\n");
    source.push_str(body.trim());
    source.push_str("\n\n\\end{document}");
    source
}

/// Escaped header fields with hardened link targets.
pub(crate) struct Identity {
    pub name: String,
    pub title: String,
    pub subtitle: String,
    pub phone: String,
    pub email: String,
    pub location: String,
    pub portfolio: String,
    pub social: String,
    email_href: Option<String>,
    portfolio_href: Option<String>,
    social_href: Option<String>,
}

impl Identity {
    pub fn new(doc: &ResumeDocument) -> Self {
        let field = |value: &str| escape_latex(value.trim());
        Self {
            name: field(&doc.name),
            title: field(&doc.title),
            subtitle: field(&doc.subtitle),
            phone: field(&doc.phone),
            email: field(&doc.email),
            location: field(&doc.location),
            portfolio: field(&doc.portfolio),
            social: field(&doc.social),
            email_href: sanitize_mailto(&doc.email),
            portfolio_href: sanitize_url(&doc.portfolio),
            social_href: sanitize_url(&doc.social),
        }
    }

    pub fn email_link(&self) -> String {
        link(self.email_href.as_deref(), &self.email)
    }

    pub fn portfolio_link(&self) -> String {
        link(self.portfolio_href.as_deref(), &self.portfolio)
    }

    pub fn social_link(&self) -> String {
        link(self.social_href.as_deref(), &self.social)
    }

    /// `title | subtitle`, or whichever is present.
    pub fn headline(&self, title_markup: fn(&str) -> String) -> String {
        let title = if self.title.is_empty() {
            String::new()
        } else {
            title_markup(&self.title)
        };
        join_present([title, self.subtitle.clone()], " | ")
    }
}

fn link(href: Option<&str>, text: &str) -> String {
    match href {
        Some(href) if !text.is_empty() => format!("\\href{{{href}}}{{{text}}}"),
        _ => text.to_string(),
    }
}

/// `\command{value}`, or nothing for an empty value. `command` may carry
/// leading arguments, e.g. `textcolor{darkblue}`.
pub(crate) fn styled(command: &str, value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        format!("\\{command}{{{value}}}")
    }
}

/// `{declarations value}`, or nothing for an empty value.
pub(crate) fn grouped(declarations: &str, value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        format!("{{{declarations} {value}}}")
    }
}

/// Phone, email, location, portfolio and social, each behind its icon.
pub(crate) fn contact_parts(identity: &Identity) -> [String; 5] {
    [
        with_icon("\\faPhone", identity.phone.clone()),
        with_icon("\\faEnvelope", identity.email_link()),
        with_icon("\\faMapMarker*", identity.location.clone()),
        with_icon("\\faGlobe", identity.portfolio_link()),
        with_icon("\\faLink", identity.social_link()),
    ]
}

/// `icon` followed by `value`, or nothing for an empty value.
pub(crate) fn with_icon(icon: &str, value: String) -> String {
    if value.is_empty() {
        value
    } else {
        format!("{icon}\\ {value}")
    }
}

/// Join the non-empty parts. Used for header lines, where a separator or a
/// `\\` next to a missing value would leave stray markup.
pub(crate) fn join_present(parts: impl IntoIterator<Item = String>, separator: &str) -> String {
    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

pub(crate) fn section_icon(key: Option<SectionKey>) -> &'static str {
    match key {
        Some(SectionKey::Summary) => "\\faUser",
        Some(SectionKey::Football) => "\\faFutbol",
        Some(SectionKey::Experience) => "\\faBriefcase",
        Some(SectionKey::Education) => "\\faGraduationCap",
        Some(SectionKey::Achievements) => "\\faStar",
        Some(SectionKey::Skills) => "\\faTools",
        Some(SectionKey::Portfolio) => "\\faAddressBook",
        Some(SectionKey::PersonalAttributes) => "\\faUserCircle",
        Some(SectionKey::Languages) => "\\faLanguage",
        Some(SectionKey::References) => "\\faAddressCard",
        None => "\\faBookmark",
    }
}

pub(crate) fn unwrapped(_key: Option<SectionKey>, body: String) -> String {
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_roundtrip() {
        for layout in Layout::ALL {
            assert_eq!(Layout::try_from(layout.id()).unwrap(), layout);
            assert_eq!(layout.to_string().parse::<Layout>().unwrap(), layout);
        }
    }

    #[test]
    fn unknown_layout_is_rejected() {
        let err = Layout::try_from("fancy").unwrap_err();
        assert_eq!(err.value(), "fancy");
        assert_eq!(err.to_string(), "no such template: fancy");
        assert!(generate("Classic", &ResumeDocument::default()).is_err());
    }

    #[test]
    fn compose_wraps_body() {
        let src = compose("\\documentclass{article}\n\n", "\nbody\n");
        assert_eq!(
            src,
            "\\documentclass{article}\n\n\\begin{document}\n\nbody\n\n\\end{document}"
        );
    }

    #[test]
    fn empty_document_still_compiles_shape() {
        for layout in Layout::ALL {
            let src = layout.render(&ResumeDocument::default());
            assert!(src.starts_with("\\documentclass"), "{layout}");
            assert!(src.ends_with("\\end{document}"), "{layout}");
            assert!(!src.contains("\\section*"), "{layout}");
        }
    }

    #[test]
    fn identity_links_are_hardened() {
        let doc = ResumeDocument {
            email: "jo_e@example.com".into(),
            portfolio: "example.com/jo e".into(),
            ..ResumeDocument::default()
        };
        let identity = Identity::new(&doc);
        assert_eq!(
            identity.email_link(),
            "\\href{mailto:jo_e@example.com}{jo\\_e@example.com}"
        );
        assert_eq!(
            identity.portfolio_link(),
            "\\href{https://example.com/jo\\%20e}{example.com/jo e}"
        );
        assert_eq!(identity.social_link(), "");
    }

    #[test]
    fn headline_skips_missing_parts() {
        let bold = |t: &str| format!("\\textbf{{{t}}}");
        let mut doc = ResumeDocument {
            subtitle: "Analyst".into(),
            ..ResumeDocument::default()
        };
        assert_eq!(Identity::new(&doc).headline(bold), "Analyst");
        doc.title = "Scout".into();
        assert_eq!(Identity::new(&doc).headline(bold), "\\textbf{Scout} | Analyst");
    }

    #[test]
    fn styled_skips_empty_values() {
        assert_eq!(styled("textbf", ""), "");
        assert_eq!(styled("textcolor{darkblue}", "Acme"), "\\textcolor{darkblue}{Acme}");
    }

    #[test]
    fn grouped_skips_empty_values() {
        assert_eq!(grouped("\\large", ""), "");
        assert_eq!(grouped("\\large", "Jo"), "{\\large Jo}");
    }

    #[test]
    fn icon_is_dropped_with_value() {
        assert_eq!(with_icon("\\faPhone", String::new()), "");
        assert_eq!(with_icon("\\faPhone", "1".into()), "\\faPhone\\ 1");
    }
}
