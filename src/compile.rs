use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use tracing::{info, warn};

/// Public LaTeX build service used when no endpoint is configured.
pub const DEFAULT_ENDPOINT: &str = "https://latex.ytotech.com/builds/sync";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);
const COMPILER: &str = "pdflatex";

#[derive(Debug, Serialize)]
struct BuildRequest<'a> {
    compiler: &'static str,
    resources: [Resource<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Resource<'a> {
    main: bool,
    content: &'a str,
}

impl<'a> BuildRequest<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            compiler: COMPILER,
            resources: [Resource {
                main: true,
                content: source,
            }],
        }
    }
}

#[derive(Debug)]
pub enum CompileError {
    /// The service could not be reached or the response could not be read.
    Request(reqwest::Error),
    /// Non-success status; `body` is the service's reply verbatim.
    Http { status: u16, body: String },
    /// Success status without a PDF; carries the service's reply.
    Service(String),
    Io(std::io::Error),
}

impl Display for CompileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Request(err) => write!(f, "request failed: {err}"),
            Self::Http { status, body } if body.trim().is_empty() => {
                write!(f, "compilation failed (HTTP {status})")
            }
            Self::Http { status, body } => write!(f, "compilation failed (HTTP {status}): {body}"),
            Self::Service(message) => f.write_str(message),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Request(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Http { .. } | Self::Service(_) => None,
        }
    }
}

/// Send `source` to the build service at `endpoint` and return the PDF bytes.
pub fn compile_latex(source: &str, endpoint: &str) -> Result<Vec<u8>, CompileError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(CompileError::Request)?;

    info!(endpoint, bytes = source.len(), "compiling with {COMPILER}");
    let response = client
        .post(endpoint)
        .json(&BuildRequest::new(source))
        .send()
        .map_err(CompileError::Request)?;

    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let body = response.bytes().map_err(CompileError::Request)?;

    interpret_response(status, content_type.as_deref(), body.to_vec())
}

/// Compile and write the PDF to `output_path`, returning the bytes as well.
pub fn compile_latex_to_pdf(
    source: &str,
    endpoint: &str,
    output_path: &Path,
) -> Result<Vec<u8>, CompileError> {
    let pdf = compile_latex(source, endpoint)?;
    fs::write(output_path, &pdf).map_err(CompileError::Io)?;
    Ok(pdf)
}

fn interpret_response(
    status: StatusCode,
    content_type: Option<&str>,
    body: Vec<u8>,
) -> Result<Vec<u8>, CompileError> {
    if !status.is_success() {
        warn!(status = status.as_u16(), "build service rejected the document");
        return Err(CompileError::Http {
            status: status.as_u16(),
            body: String::from_utf8_lossy(&body).into_owned(),
        });
    }

    let is_pdf = content_type.is_some_and(|value| {
        value
            .trim_start()
            .to_ascii_lowercase()
            .starts_with("application/pdf")
    });
    if is_pdf {
        return Ok(body);
    }

    let text = String::from_utf8_lossy(&body);
    if text.trim().is_empty() {
        Err(CompileError::Service(
            "compilation returned non-PDF response".to_string(),
        ))
    } else {
        Err(CompileError::Service(text.into_owned()))
    }
}
