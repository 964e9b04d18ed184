use std::collections::HashMap;
use std::path::{Path, PathBuf};

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{info, warn};

use crate::{
    compile::{CompileError, compile_latex_to_pdf},
    profile::{ProfileError, load_profile},
    template::Layout,
};

pub struct WatchCommand {
    pub layout: Layout,
    pub output: Option<PathBuf>,
    pub multiple_inputs: bool,
    /// Write the `.tex` source instead of compiling it.
    pub tex_only: bool,
    pub endpoint: String,
}

impl WatchCommand {
    fn extension(&self) -> &'static str {
        if self.tex_only { "tex" } else { "pdf" }
    }
}

#[derive(Debug)]
pub enum WatchError {
    Io(std::io::Error),
    Notify(notify::Error),
    Profile(ProfileError),
    Compile(CompileError),
}

impl std::fmt::Display for WatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Notify(err) => write!(f, "{err}"),
            Self::Profile(err) => write!(f, "profile: {err}"),
            Self::Compile(err) => write!(f, "compile: {err}"),
        }
    }
}

impl std::error::Error for WatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Notify(err) => Some(err),
            Self::Profile(err) => Some(err),
            Self::Compile(err) => Some(err),
        }
    }
}

/// Re-render each profile in `paths` whenever it changes. Runs until the
/// watcher fails; a failed rebuild is logged and watching continues.
pub fn watch_inputs(paths: &[PathBuf], command: &WatchCommand) -> Result<(), WatchError> {
    let (tx, rx) = std::sync::mpsc::channel();
    let mut watcher = RecommendedWatcher::new(
        move |res| {
            let _ = tx.send(res);
        },
        Config::default(),
    )
    .map_err(WatchError::Notify)?;

    let mut tracked_files = HashMap::<PathBuf, PathBuf>::new();
    for path in paths {
        let watch_path = canonicalize(path);
        watcher
            .watch(&watch_path, RecursiveMode::NonRecursive)
            .map_err(WatchError::Notify)?;
        tracked_files.insert(watch_path.clone(), path.clone());
        info!(path = %watch_path.display(), layout = %command.layout, "watching");
    }

    loop {
        let event = rx
            .recv()
            .map_err(|e| WatchError::Io(std::io::Error::other(e.to_string())))?;
        match event {
            Ok(Event {
                kind: EventKind::Modify(_) | EventKind::Create(_),
                paths,
                ..
            }) => {
                for changed in paths {
                    let canonical = canonicalize(&changed);
                    let Some(source_path) = tracked_files.get(&canonical) else {
                        continue;
                    };

                    match rebuild_one(source_path, command) {
                        Ok(output) => info!(
                            input = %source_path.display(),
                            output = %output.display(),
                            "updated"
                        ),
                        Err(err) => warn!(input = %source_path.display(), "rebuild failed: {err}"),
                    }
                }
            }
            Ok(_) => {}
            Err(err) => return Err(WatchError::Notify(err)),
        }
    }
}

fn rebuild_one(path: &Path, command: &WatchCommand) -> Result<PathBuf, WatchError> {
    let doc = load_profile(path).map_err(WatchError::Profile)?;
    let source = command.layout.render(&doc);
    let output = resolve_output_path(
        Some(path),
        command.output.as_deref(),
        command.multiple_inputs,
        command.extension(),
    );
    if let Some(parent) = output.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(WatchError::Io)?;
    }

    if command.tex_only {
        std::fs::write(&output, source).map_err(WatchError::Io)?;
    } else {
        compile_latex_to_pdf(&source, &command.endpoint, &output).map_err(WatchError::Compile)?;
    }
    Ok(output)
}

/// Where the rendered file for `input` goes.
///
/// An explicit output is a directory when there are several inputs. Without
/// one, the input's extension is swapped, and stdin renders to `resume.<ext>`.
pub fn resolve_output_path(
    input: Option<&Path>,
    output: Option<&Path>,
    multiple_inputs: bool,
    extension: &str,
) -> PathBuf {
    match (output, input) {
        (Some(path), Some(input)) if multiple_inputs => path
            .join(input.file_name().unwrap_or_default())
            .with_extension(extension),
        (Some(path), _) => path.to_path_buf(),
        (None, Some(input)) => input.with_extension(extension),
        (None, None) => PathBuf::from("resume").with_extension(extension),
    }
}

fn canonicalize(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
