//! External text editor integration.
//!
//! [`EditorConfig`] holds an ordered list of editor commands. The first one
//! whose program can be found is used to edit a temporary copy of an entry's
//! text; the edited text is returned only if the editor exits successfully.
//!
//! # Example
//!
//! ```rust,no_run
//! use zipmend::external_editor::EditorConfig;
//!
//! let editor = EditorConfig::from_env();
//! let edited = editor.edit("key = value\n", "config/settings.toml")?;
//! # Ok::<(), zipmend::Error>(())
//! ```

use std::env;
use std::ffi::OsStr;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::{Error, Result};

/// Editors tried when neither `$VISUAL` nor `$EDITOR` is usable.
pub const DEFAULT_EDITORS: &[&str] = &[
    "nano", "vim", "vi", "code", "subl", "atom", "gedit", "notepad",
];

/// Ordered editor candidates.
///
/// Each candidate is a command line: a program name or path, optionally
/// followed by whitespace-separated arguments (`code --wait`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Candidate commands, most preferred first.
    pub candidates: Vec<String>,
}

/// A resolved editor command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorCommand {
    /// Absolute or relative path of the program.
    pub program: PathBuf,
    /// Arguments placed before the file to edit.
    pub args: Vec<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::new(DEFAULT_EDITORS.iter().copied())
    }
}

impl EditorConfig {
    /// Creates a configuration from explicit candidates.
    pub fn new<I, S>(candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates the default configuration with `$VISUAL` and `$EDITOR` tried first.
    pub fn from_env() -> Self {
        Self::with_preferred(env::var("VISUAL").ok(), env::var("EDITOR").ok())
    }

    /// Creates the default configuration with the given commands tried first.
    pub fn with_preferred(visual: Option<String>, editor: Option<String>) -> Self {
        let mut candidates: Vec<String> = [visual, editor]
            .into_iter()
            .flatten()
            .filter(|c| !c.trim().is_empty())
            .collect();
        candidates.extend(DEFAULT_EDITORS.iter().map(|e| e.to_string()));
        Self { candidates }
    }

    /// Returns the first candidate whose program is found on `PATH`.
    pub fn resolve(&self) -> Option<EditorCommand> {
        let search_path = env::var_os("PATH").unwrap_or_default();
        self.resolve_in(&search_path)
    }

    /// Returns the first candidate whose program is found in `search_path`.
    pub fn resolve_in(&self, search_path: &OsStr) -> Option<EditorCommand> {
        self.candidates.iter().find_map(|candidate| {
            let mut words = candidate.split_whitespace();
            let program = find_program(words.next()?, search_path)?;
            Some(EditorCommand {
                program,
                args: words.map(str::to_string).collect(),
            })
        })
    }

    /// Opens `content` in the resolved editor and returns the edited text.
    ///
    /// The text is written to a temporary file whose name ends in
    /// `_<file name of name_hint>` so editors can pick a syntax mode. The
    /// file is removed afterwards in every case.
    ///
    /// # Errors
    ///
    /// - [`Error::EditorUnavailable`] if no candidate is found
    /// - [`Error::EditCancelled`] if the editor exits unsuccessfully
    /// - [`Error::Io`] if the editor cannot be started or the file cannot be read back
    pub fn edit(&self, content: &str, name_hint: &str) -> Result<String> {
        let command = self.resolve().ok_or(Error::EditorUnavailable)?;
        run_editor(&command, content, name_hint)
    }
}

/// Runs `command` on a temporary copy of `content`.
fn run_editor(command: &EditorCommand, content: &str, name_hint: &str) -> Result<String> {
    let file_name = Path::new(name_hint)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "content.txt".to_string());

    let mut tmp = tempfile::Builder::new()
        .suffix(&format!("_{}", file_name))
        .tempfile()?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;

    log::debug!(
        "running {} on {}",
        command.program.display(),
        tmp.path().display()
    );
    let status = Command::new(&command.program)
        .args(&command.args)
        .arg(tmp.path())
        .status()?;

    if !status.success() {
        return Err(Error::EditCancelled {
            status: status.code(),
        });
    }

    Ok(fs::read_to_string(tmp.path())?)
}

/// Looks a program up the way a shell would.
fn find_program(name: &str, search_path: &OsStr) -> Option<PathBuf> {
    let candidate = Path::new(name);
    if candidate.components().count() > 1 {
        return is_executable(candidate).then(|| candidate.to_path_buf());
    }

    env::split_paths(search_path).find_map(|dir| {
        let full = dir.join(name);
        if is_executable(&full) {
            return Some(full);
        }
        if cfg!(windows) {
            let exe = dir.join(format!("{}.exe", name));
            if is_executable(&exe) {
                return Some(exe);
            }
        }
        None
    })
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
