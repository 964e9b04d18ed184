use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Built-in résumé sections. Section configuration is keyed by this enum, so a
/// setting for an unknown section cannot exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKey {
    Summary,
    Football,
    Experience,
    Education,
    Achievements,
    Skills,
    Portfolio,
    PersonalAttributes,
    Languages,
    References,
}

impl SectionKey {
    pub const ALL: [SectionKey; 10] = [
        Self::Summary,
        Self::Football,
        Self::Experience,
        Self::Education,
        Self::Achievements,
        Self::Skills,
        Self::Portfolio,
        Self::PersonalAttributes,
        Self::Languages,
        Self::References,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Football => "football",
            Self::Experience => "experience",
            Self::Education => "education",
            Self::Achievements => "achievements",
            Self::Skills => "skills",
            Self::Portfolio => "portfolio",
            Self::PersonalAttributes => "personalAttributes",
            Self::Languages => "languages",
            Self::References => "references",
        }
    }

    pub fn default_heading(self) -> &'static str {
        match self {
            Self::Summary => "Professional Summary",
            Self::Football => "Football Credentials",
            Self::Experience => "Professional Experience",
            Self::Education => "Education",
            Self::Achievements => "Key Achievements",
            Self::Skills => "Core Competencies",
            Self::Portfolio => "Portfolio",
            Self::PersonalAttributes => "Personal Attributes",
            Self::Languages => "Languages",
            Self::References => "References",
        }
    }

    /// Sections whose body is free text the user may reformat.
    pub fn is_configurable(self) -> bool {
        !matches!(self, Self::Experience | Self::Education | Self::References)
    }

    pub fn default_field_types(self) -> FieldTypes {
        match self {
            Self::Experience | Self::Education => FieldTypes::only(FieldType::Structured),
            Self::References => FieldTypes::only(FieldType::References),
            _ => FieldTypes::default(),
        }
    }
}

impl Display for SectionKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendering mode for a section body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    Paragraph,
    Bullet,
    Hyperlink,
    Structured,
    Text,
    References,
}

impl FieldType {
    const ALL: [FieldType; 6] = [
        Self::Paragraph,
        Self::Bullet,
        Self::Hyperlink,
        Self::Structured,
        Self::Text,
        Self::References,
    ];

    pub fn is_user_toggleable(self) -> bool {
        matches!(
            self,
            Self::Paragraph | Self::Bullet | Self::Hyperlink | Self::Text
        )
    }

    fn bit(self) -> u8 {
        match self {
            Self::Paragraph => 1,
            Self::Bullet => 1 << 1,
            Self::Hyperlink => 1 << 2,
            Self::Structured => 1 << 3,
            Self::Text => 1 << 4,
            Self::References => 1 << 5,
        }
    }
}

/// A non-empty set of [`FieldType`]s. An empty set collapses to `{paragraph}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<FieldType>", into = "Vec<FieldType>")]
pub struct FieldTypes(u8);

impl FieldTypes {
    pub fn only(field_type: FieldType) -> Self {
        Self(field_type.bit())
    }

    pub fn contains(self, field_type: FieldType) -> bool {
        self.0 & field_type.bit() != 0
    }

    pub fn with(self, field_type: FieldType) -> Self {
        Self(self.0 | field_type.bit())
    }

    /// Flip membership of `field_type`; removing the last member leaves `{paragraph}`.
    pub fn toggled(self, field_type: FieldType) -> Self {
        Self::from_bits(self.0 ^ field_type.bit())
    }

    pub fn iter(self) -> impl Iterator<Item = FieldType> {
        FieldType::ALL.into_iter().filter(move |t| self.contains(*t))
    }

    fn from_bits(bits: u8) -> Self {
        if bits == 0 {
            Self::default()
        } else {
            Self(bits)
        }
    }
}

impl Default for FieldTypes {
    fn default() -> Self {
        Self::only(FieldType::Paragraph)
    }
}

impl From<Vec<FieldType>> for FieldTypes {
    fn from(types: Vec<FieldType>) -> Self {
        types.into_iter().collect()
    }
}

impl From<FieldTypes> for Vec<FieldType> {
    fn from(types: FieldTypes) -> Self {
        types.iter().collect()
    }
}

impl FromIterator<FieldType> for FieldTypes {
    fn from_iter<I: IntoIterator<Item = FieldType>>(iter: I) -> Self {
        Self::from_bits(iter.into_iter().fold(0, |bits, t| bits | t.bit()))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkEntry {
    pub label: String,
    pub url: String,
}

impl LinkEntry {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub position: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    pub details: Vec<String>,
}

impl ExperienceEntry {
    /// Details in their editable form, one per line.
    pub fn details_text(&self) -> String {
        self.details.join("\n")
    }

    /// Replace details from the editable form. Empty lines are kept.
    pub fn set_details_text(&mut self, text: &str) {
        self.details = if text.is_empty() {
            Vec::new()
        } else {
            text.split('\n')
                .map(|line| line.trim_end_matches('\r').to_string())
                .collect()
        };
    }

    pub fn is_blank(&self) -> bool {
        [&self.position, &self.company, &self.start_date, &self.end_date]
            .iter()
            .all(|v| v.trim().is_empty())
            && self.details.iter().all(|d| d.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub start_date: String,
    pub end_date: String,
    pub activities: String,
}

impl EducationEntry {
    pub fn is_blank(&self) -> bool {
        [
            &self.degree,
            &self.institution,
            &self.start_date,
            &self.end_date,
            &self.activities,
        ]
        .iter()
        .all(|v| v.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomSection {
    pub heading: String,
    pub content: String,
    pub field_types: FieldTypes,
    pub links: Vec<LinkEntry>,
}

impl CustomSection {
    pub fn new(heading: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn toggle_field_type(&mut self, field_type: FieldType) -> bool {
        if !field_type.is_user_toggleable() {
            return false;
        }
        self.field_types = self.field_types.toggled(field_type);
        true
    }
}

/// The whole résumé: identity fields, free-text bodies, repeating entries and
/// per-section presentation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ResumeDocument {
    pub name: String,
    pub title: String,
    pub subtitle: String,
    pub phone: String,
    pub email: String,
    pub location: String,
    pub portfolio: String,
    pub social: String,

    pub summary: String,
    pub football: String,
    pub achievements: String,
    pub skills: String,
    pub portfolio_content: String,
    pub personal_attributes: String,
    pub languages: String,
    pub references: String,

    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub custom_sections: Vec<CustomSection>,

    pub section_headings: BTreeMap<SectionKey, String>,
    pub hidden_sections: BTreeSet<SectionKey>,
    pub section_field_types: BTreeMap<SectionKey, FieldTypes>,
    pub section_links: BTreeMap<SectionKey, Vec<LinkEntry>>,
}

impl ResumeDocument {
    /// Display title for a built-in section, falling back to its default.
    pub fn heading(&self, key: SectionKey) -> &str {
        self.section_headings
            .get(&key)
            .map(String::as_str)
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| key.default_heading())
    }

    pub fn set_heading(&mut self, key: SectionKey, heading: impl Into<String>) {
        self.section_headings.insert(key, heading.into());
    }

    pub fn is_hidden(&self, key: SectionKey) -> bool {
        self.hidden_sections.contains(&key)
    }

    pub fn set_hidden(&mut self, key: SectionKey, hidden: bool) {
        if hidden {
            self.hidden_sections.insert(key);
        } else {
            self.hidden_sections.remove(&key);
        }
    }

    pub fn toggle_hidden(&mut self, key: SectionKey) {
        let hidden = self.is_hidden(key);
        self.set_hidden(key, !hidden);
    }

    /// Effective field types. Fixed sections ignore configured values.
    pub fn field_types(&self, key: SectionKey) -> FieldTypes {
        if !key.is_configurable() {
            return key.default_field_types();
        }
        self.section_field_types
            .get(&key)
            .copied()
            .unwrap_or_else(|| key.default_field_types())
    }

    /// Toggle a user-selectable field type on a free section. Returns `false`
    /// when the section or the type is not user-configurable.
    pub fn toggle_field_type(&mut self, key: SectionKey, field_type: FieldType) -> bool {
        if !key.is_configurable() || !field_type.is_user_toggleable() {
            return false;
        }
        let next = self.field_types(key).toggled(field_type);
        self.section_field_types.insert(key, next);
        true
    }

    pub fn links(&self, key: SectionKey) -> &[LinkEntry] {
        self.section_links.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn set_links(&mut self, key: SectionKey, links: Vec<LinkEntry>) {
        if links.is_empty() {
            self.section_links.remove(&key);
        } else {
            self.section_links.insert(key, links);
        }
    }

    /// Raw free-text body of a section; empty for the structured ones.
    pub fn section_content(&self, key: SectionKey) -> &str {
        match key {
            SectionKey::Summary => &self.summary,
            SectionKey::Football => &self.football,
            SectionKey::Achievements => &self.achievements,
            SectionKey::Skills => &self.skills,
            SectionKey::Portfolio => &self.portfolio_content,
            SectionKey::PersonalAttributes => &self.personal_attributes,
            SectionKey::Languages => &self.languages,
            SectionKey::References => &self.references,
            SectionKey::Experience | SectionKey::Education => "",
        }
    }

    pub fn add_experience(&mut self, entry: ExperienceEntry) {
        self.experience.push(entry);
    }

    pub fn update_experience(&mut self, index: usize, entry: ExperienceEntry) -> bool {
        replace_at(&mut self.experience, index, entry)
    }

    pub fn remove_experience(&mut self, index: usize) -> Option<ExperienceEntry> {
        remove_at(&mut self.experience, index)
    }

    pub fn add_education(&mut self, entry: EducationEntry) {
        self.education.push(entry);
    }

    pub fn update_education(&mut self, index: usize, entry: EducationEntry) -> bool {
        replace_at(&mut self.education, index, entry)
    }

    pub fn remove_education(&mut self, index: usize) -> Option<EducationEntry> {
        remove_at(&mut self.education, index)
    }

    pub fn add_custom_section(&mut self, section: CustomSection) {
        self.custom_sections.push(section);
    }

    pub fn update_custom_section(&mut self, index: usize, section: CustomSection) -> bool {
        replace_at(&mut self.custom_sections, index, section)
    }

    pub fn remove_custom_section(&mut self, index: usize) -> Option<CustomSection> {
        remove_at(&mut self.custom_sections, index)
    }

    /// Move a custom section to a new position, shifting the ones in between.
    pub fn move_custom_section(&mut self, from: usize, to: usize) -> bool {
        let len = self.custom_sections.len();
        if from >= len || to >= len {
            return false;
        }
        let section = self.custom_sections.remove(from);
        self.custom_sections.insert(to, section);
        true
    }

    /// Identity values in a fixed order, keyed by field name.
    pub fn scalar_fields(&self) -> [(&'static str, &str); 8] {
        [
            ("name", self.name.as_str()),
            ("title", self.title.as_str()),
            ("subtitle", self.subtitle.as_str()),
            ("phone", self.phone.as_str()),
            ("email", self.email.as_str()),
            ("location", self.location.as_str()),
            ("portfolio", self.portfolio.as_str()),
            ("social", self.social.as_str()),
        ]
    }

    /// The example profile a fresh session starts from.
    pub fn seed() -> Self {
        let mut doc = Self {
            name: "Jordan Avery".into(),
            title: "Media Executive".into(),
            subtitle: "Communications & Sports Media Professional".into(),
            phone: "+44 20 7946 0000".into(),
            email: "jordan.avery@example.com".into(),
            location: "Manchester, UK".into(),
            portfolio: "behance.net/jordanavery".into(),
            social: "youtube.com/@jordanavery".into(),
            summary: "Media executive with twelve years in sports communications and a lifetime \
                      of amateur football. Esports champion, TV match analyst and \
                      press office lead."
                .into(),
            football: "Esports football champion (university league winner, 3× regional Pro Club \
                       champion), TV match analyst and supporters' page manager."
                .into(),
            achievements: "• University esports football league winner\n\
                           • 3× regional Pro Club champion\n\
                           • Featured football analyst on regional sports TV\n\
                           • Organised away-day media trips for 200+ supporters & staff"
                .into(),
            skills: "Content Writing, Social Media Management, Sports Event Management, \
                     Press Releases, Media Coordination, Brand Communications"
                .into(),
            portfolio_content: "TV Appearances: YouTube portfolio\n\
                                Design Work: Behance\n\
                                Writing Samples: match reports and tactical analyses available"
                .into(),
            personal_attributes: "Dedicated, deadline-driven and comfortable with evenings, \
                                  weekends and travel for match coverage."
                .into(),
            languages: "English (native)\nSpanish (professional)".into(),
            references: "Casey Morgan\n\
                         Senior Manager, Northwind Delivery\n\
                         Phone: +44 161 496 0000\n\
                         Email: casey.morgan@example.com\n\
                         \n\
                         Dr. Riley Shah\n\
                         Assistant Professor, Westbrook University\n\
                         Phone: +44 161 496 0001\n\
                         Email: r.shah@example.edu"
                .into(),
            experience: vec![
                ExperienceEntry {
                    position: "Executive - Employee Engagement".into(),
                    company: "Northwind Delivery".into(),
                    start_date: "Jan 2023".into(),
                    end_date: "Jul 2023".into(),
                    details: vec![
                        "Drafted, edited, and published press releases, news articles, and announcements".into(),
                        "Led media operations for Annual Summit 2022 (500+ attendees)".into(),
                    ],
                },
                ExperienceEntry {
                    position: "Employer Branding".into(),
                    company: "Northwind Delivery".into(),
                    start_date: "May 2022".into(),
                    end_date: "Dec 2022".into(),
                    details: vec![
                        "Arranged a company football tournament with full media coverage".into(),
                        "Managed content across social media platforms and corporate websites".into(),
                    ],
                },
            ],
            education: vec![
                EducationEntry {
                    degree: "MSc Strategic Marketing & Digital Media Management".into(),
                    institution: "Westbrook University, UK".into(),
                    start_date: "2024".into(),
                    end_date: "2026".into(),
                    activities: "Student media society".into(),
                },
                EducationEntry {
                    degree: "BBA".into(),
                    institution: "Lakeside University".into(),
                    start_date: "2017".into(),
                    end_date: "2021".into(),
                    activities: "Football club, esports team".into(),
                },
            ],
            ..Self::default()
        };

        doc.section_field_types.insert(
            SectionKey::Achievements,
            FieldTypes::only(FieldType::Bullet),
        );
        doc.section_field_types.insert(
            SectionKey::Languages,
            FieldTypes::only(FieldType::Bullet),
        );
        doc.section_field_types.insert(
            SectionKey::Portfolio,
            FieldTypes::only(FieldType::Bullet).with(FieldType::Hyperlink),
        );
        doc.set_links(
            SectionKey::Portfolio,
            vec![
                LinkEntry::new(
                    "YouTube Portfolio",
                    "https://www.youtube.com/@jordanavery",
                ),
                LinkEntry::new("Behance", "https://www.behance.net/jordanavery"),
            ],
        );
        doc
    }
}

fn replace_at<T>(items: &mut [T], index: usize, value: T) -> bool {
    match items.get_mut(index) {
        Some(slot) => {
            *slot = value;
            true
        }
        None => false,
    }
}

fn remove_at<T>(items: &mut Vec<T>, index: usize) -> Option<T> {
    (index < items.len()).then(|| items.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_types_never_empty() {
        let types = FieldTypes::only(FieldType::Bullet).toggled(FieldType::Bullet);
        assert_eq!(types, FieldTypes::only(FieldType::Paragraph));
        assert_eq!(FieldTypes::from(Vec::new()), FieldTypes::default());
    }

    #[test]
    fn field_types_serialize_as_list() {
        let types = FieldTypes::only(FieldType::Bullet).with(FieldType::Hyperlink);
        let json = serde_json::to_string(&types).unwrap();
        assert_eq!(json, "[\"bullet\",\"hyperlink\"]");
        let back: FieldTypes = serde_json::from_str("[]").unwrap();
        assert_eq!(back, FieldTypes::default());
    }

    #[test]
    fn unknown_section_key_is_rejected() {
        let result = serde_json::from_str::<ResumeDocument>(r#"{"hiddenSections": ["hobbies"]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn heading_falls_back_to_default() {
        let mut doc = ResumeDocument::default();
        assert_eq!(doc.heading(SectionKey::Skills), "Core Competencies");
        doc.set_heading(SectionKey::Skills, "Toolbox");
        assert_eq!(doc.heading(SectionKey::Skills), "Toolbox");
        doc.set_heading(SectionKey::Skills, "  ");
        assert_eq!(doc.heading(SectionKey::Skills), "Core Competencies");
    }

    #[test]
    fn hidden_toggle() {
        let mut doc = ResumeDocument::default();
        assert!(!doc.is_hidden(SectionKey::Skills));
        doc.toggle_hidden(SectionKey::Skills);
        assert!(doc.is_hidden(SectionKey::Skills));
        doc.toggle_hidden(SectionKey::Skills);
        assert!(doc.hidden_sections.is_empty());
    }

    #[test]
    fn fixed_sections_reject_toggles() {
        let mut doc = ResumeDocument::default();
        assert!(!doc.toggle_field_type(SectionKey::Experience, FieldType::Bullet));
        assert!(!doc.toggle_field_type(SectionKey::Summary, FieldType::References));
        assert!(doc.toggle_field_type(SectionKey::Summary, FieldType::Bullet));
        let types = doc.field_types(SectionKey::Summary);
        assert!(types.contains(FieldType::Bullet));
        assert!(types.contains(FieldType::Paragraph));
        assert_eq!(
            doc.field_types(SectionKey::References),
            FieldTypes::only(FieldType::References)
        );
    }

    #[test]
    fn removing_experience_shifts_indices() {
        let mut doc = ResumeDocument::default();
        for position in ["a", "b", "c"] {
            doc.add_experience(ExperienceEntry {
                position: position.into(),
                ..ExperienceEntry::default()
            });
        }
        let removed = doc.remove_experience(0).unwrap();
        assert_eq!(removed.position, "a");
        assert_eq!(doc.experience[0].position, "b");
        assert!(doc.remove_experience(5).is_none());
        assert!(!doc.update_experience(2, ExperienceEntry::default()));
    }

    #[test]
    fn details_text_keeps_empty_lines() {
        let mut entry = ExperienceEntry::default();
        entry.set_details_text("one\n\nthree");
        assert_eq!(entry.details, vec!["one", "", "three"]);
        assert_eq!(entry.details_text(), "one\n\nthree");
        entry.set_details_text("");
        assert!(entry.details.is_empty());
    }

    #[test]
    fn custom_sections_reorder() {
        let mut doc = ResumeDocument::default();
        doc.add_custom_section(CustomSection::new("A", ""));
        doc.add_custom_section(CustomSection::new("B", ""));
        doc.add_custom_section(CustomSection::new("C", ""));
        assert!(doc.move_custom_section(2, 0));
        let order: Vec<_> = doc.custom_sections.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(order, ["C", "A", "B"]);
        assert!(!doc.move_custom_section(3, 0));
    }

    #[test]
    fn seed_profile_is_complete() {
        let doc = ResumeDocument::seed();
        assert!(doc.scalar_fields().iter().all(|(_, v)| !v.is_empty()));
        assert_eq!(doc.experience.len(), 2);
        assert_eq!(doc.education.len(), 2);
        assert!(doc.field_types(SectionKey::Achievements).contains(FieldType::Bullet));
    }
}
