//! # texcv
//!
//! Résumé profiles to LaTeX: five layouts, single-pass escaping, and an
//! optional remote build service for PDFs.
//!
//! ## Quick start
//!
//! ```rust
//! use texcv::{ResumeDocument, generate};
//!
//! let mut doc = ResumeDocument::default();
//! doc.name = "Jane Doe".into();
//! doc.summary = "Grew revenue 50% in two years".into();
//!
//! let latex = generate("classic", &doc).expect("known layout");
//! assert!(latex.contains("50\\% in two years"));
//! ```
//!
//! ## Lower-level API
//!
//! The pieces the layouts are built from are public too:
//!
//! ```rust
//! use texcv::model::{FieldType, FieldTypes};
//! use texcv::{escape, format};
//!
//! assert_eq!(escape::escape_latex("R&D"), "R\\&D");
//! let list = format::format_content("• one\n• two", FieldTypes::only(FieldType::Bullet), &[]);
//! assert_eq!(list.matches("\\item").count(), 2);
//! ```
//!
//! [`render_profile`] loads a profile file and renders it with a layout named
//! by id. With the `remote` feature, [`resume_to_pdf`] renders and compiles in
//! one call.

use std::path::Path;

#[cfg(feature = "remote")]
pub mod compile;
pub mod entries;
pub mod escape;
pub mod format;
pub mod model;
pub mod profile;
pub mod references;
pub mod sections;
pub mod template;

#[cfg(feature = "cli")]
pub mod watch;

#[cfg(feature = "remote")]
pub use compile::{CompileError, DEFAULT_ENDPOINT, compile_latex, compile_latex_to_pdf};
pub use escape::escape_latex;
pub use model::{
    CustomSection, EducationEntry, ExperienceEntry, FieldType, FieldTypes, LinkEntry,
    ResumeDocument, SectionKey,
};
pub use profile::{ProfileError, ProfileFormat, load_profile, parse_profile};
pub use template::{Layout, LayoutParseError, generate};

/// High-level options for the one-shot `resume_to_pdf` function.
#[cfg(feature = "remote")]
#[derive(Debug, Clone)]
pub struct Options {
    /// Default: `Classic`.
    pub layout: Layout,
    /// Build service URL. Default: [`DEFAULT_ENDPOINT`].
    pub endpoint: String,
}

#[cfg(feature = "remote")]
impl Default for Options {
    fn default() -> Self {
        Self {
            layout: Layout::Classic,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

/// Load the profile at `path` and render it with the layout named `layout_id`.
///
/// The layout id is checked before the file is read.
pub fn render_profile(path: impl AsRef<Path>, layout_id: &str) -> Result<String, Error> {
    let layout = Layout::try_from(layout_id)?;
    let doc = load_profile(path.as_ref())?;
    Ok(layout.render(&doc))
}

/// Render `doc` and compile it to PDF bytes in one call.
#[cfg(feature = "remote")]
pub fn resume_to_pdf(doc: &ResumeDocument, options: &Options) -> Result<Vec<u8>, Error> {
    let source = options.layout.render(doc);
    compile_latex(&source, &options.endpoint).map_err(Error::Compile)
}

/// Top-level error type combining all pipeline stages.
#[derive(Debug)]
pub enum Error {
    Layout(LayoutParseError),
    Profile(ProfileError),
    #[cfg(feature = "remote")]
    Compile(CompileError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Layout(e) => write!(f, "layout: {e}"),
            Self::Profile(e) => write!(f, "profile: {e}"),
            #[cfg(feature = "remote")]
            Self::Compile(e) => write!(f, "compile: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Layout(e) => Some(e),
            Self::Profile(e) => Some(e),
            #[cfg(feature = "remote")]
            Self::Compile(e) => Some(e),
        }
    }
}

impl From<LayoutParseError> for Error {
    fn from(err: LayoutParseError) -> Self {
        Self::Layout(err)
    }
}

impl From<ProfileError> for Error {
    fn from(err: ProfileError) -> Self {
        Self::Profile(err)
    }
}

#[cfg(feature = "remote")]
impl From<CompileError> for Error {
    fn from(err: CompileError) -> Self {
        Self::Compile(err)
    }
}
