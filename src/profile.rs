use std::fmt::{Display, Formatter};
use std::path::Path;

use crate::model::ResumeDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileFormat {
    Yaml,
    Json,
}

impl Display for ProfileFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yaml => f.write_str("yaml"),
            Self::Json => f.write_str("json"),
        }
    }
}

impl ProfileFormat {
    /// JSON for a `.json` path or an object literal, YAML otherwise.
    pub fn detect(path: Option<&Path>, input: &str) -> Self {
        let by_extension = path
            .and_then(Path::extension)
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if by_extension || input.trim_start_matches('\u{feff}').trim_start().starts_with('{') {
            Self::Json
        } else {
            Self::Yaml
        }
    }
}

#[derive(Debug)]
pub enum ProfileError {
    Read {
        path: String,
        source: std::io::Error,
    },
    Parse {
        format: ProfileFormat,
        message: String,
    },
}

impl Display for ProfileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => write!(f, "failed to read {path}: {source}"),
            Self::Parse { format, message } => write!(f, "{format} parse error: {message}"),
        }
    }
}

impl std::error::Error for ProfileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { .. } => None,
        }
    }
}

/// Parse a profile. Missing fields stay empty; unknown keys are rejected.
pub fn parse_profile(input: &str, format: ProfileFormat) -> Result<ResumeDocument, ProfileError> {
    let normalized = input.trim_start_matches('\u{feff}');
    if normalized.trim().is_empty() {
        return Ok(ResumeDocument::default());
    }

    match format {
        ProfileFormat::Json => serde_json::from_str(normalized).map_err(|e| ProfileError::Parse {
            format,
            message: e.to_string(),
        }),
        ProfileFormat::Yaml => serde_yaml::from_str(normalized).map_err(|e| ProfileError::Parse {
            format,
            message: e.to_string(),
        }),
    }
}

pub fn load_profile(path: &Path) -> Result<ResumeDocument, ProfileError> {
    let input = std::fs::read_to_string(path).map_err(|source| ProfileError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_profile(&input, ProfileFormat::detect(Some(path), &input))
}
