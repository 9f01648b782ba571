//! Output formatting for CLI operations.

use std::collections::BTreeSet;

use serde_json::json;
use zipmend::attributes::mode_string;
use zipmend::{EditResult, Entry, Error};

const RULE_WIDTH: usize = 50;

/// What a listed entry is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingKind {
    Directory,
    Symlink { target: String },
    File,
}

/// One entry of an archive listing.
#[derive(Debug, Clone)]
pub struct ListingRow {
    pub path: String,
    pub size: u64,
    pub modified: Option<String>,
    /// `ls -l` style mode, for entries written by a Unix host.
    pub mode: Option<String>,
    pub kind: ListingKind,
}

impl ListingRow {
    /// Builds a row; `link_target` is only used for symlink entries.
    pub fn new(entry: &Entry, link_target: Option<String>) -> Self {
        let kind = if entry.is_directory() {
            ListingKind::Directory
        } else {
            match link_target {
                Some(target) if entry.is_symlink() => ListingKind::Symlink { target },
                _ => ListingKind::File,
            }
        };
        Self {
            path: entry.path.clone(),
            size: entry.size,
            modified: entry
                .modified_time()
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string()),
            mode: entry.unix_mode().map(mode_string),
            kind,
        }
    }

    fn kind_name(&self) -> &'static str {
        match self.kind {
            ListingKind::Directory => "directory",
            ListingKind::Symlink { .. } => "symlink",
            ListingKind::File => "file",
        }
    }
}

/// An archive listing in central directory order.
#[derive(Debug, Clone)]
pub struct Listing {
    pub archive: String,
    pub rows: Vec<ListingRow>,
}

impl Listing {
    /// Every directory that contains an entry, with a trailing `/`, sorted.
    pub fn directories(&self) -> BTreeSet<String> {
        self.rows
            .iter()
            .filter_map(|row| row.path.rsplit_once('/'))
            .filter(|(dir, _)| !dir.is_empty())
            .map(|(dir, _)| format!("{}/", dir))
            .collect()
    }

    /// Paths of regular files, sorted.
    pub fn files(&self) -> BTreeSet<&str> {
        self.paths_of(|kind| matches!(kind, ListingKind::File))
    }

    /// Paths of symlinks, sorted.
    pub fn symlinks(&self) -> BTreeSet<&str> {
        self.paths_of(|kind| matches!(kind, ListingKind::Symlink { .. }))
    }

    fn paths_of(&self, keep: impl Fn(&ListingKind) -> bool) -> BTreeSet<&str> {
        self.rows
            .iter()
            .filter(|row| keep(&row.kind))
            .map(|row| row.path.as_str())
            .collect()
    }
}

/// The mutating CLI actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateFile,
    EditFile,
    CreateSymlink,
}

impl Action {
    pub fn name(self) -> &'static str {
        match self {
            Action::CreateFile => "create",
            Action::EditFile => "edit",
            Action::CreateSymlink => "symlink",
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            Action::CreateFile => "✅ File created successfully!",
            Action::EditFile => "✅ File edited successfully!",
            Action::CreateSymlink => "✅ Symlink created successfully!",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Action::CreateFile => "❌ Failed to create file.",
            Action::EditFile => "❌ Failed to edit file.",
            Action::CreateSymlink => "❌ Failed to create symlink.",
        }
    }
}

/// Trait for output formatting
pub trait OutputFormatter {
    /// Formats an archive listing
    fn format_list(&self, listing: &Listing) -> String;

    /// Formats the text content of an entry
    fn format_view(&self, path: &str, content: &str) -> String;

    /// Formats a successful edit
    fn format_success(&self, action: Action, result: &EditResult) -> String;

    /// Formats a failed edit; the error itself is reported separately on stderr
    fn format_failure(&self, action: Action, error: &Error) -> String;
}

/// Human-readable output formatter
pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn format_list(&self, listing: &Listing) -> String {
        let mut output = String::new();

        output.push_str(&format!("\nContents of '{}':\n", listing.archive));
        output.push_str(&"-".repeat(RULE_WIDTH));
        output.push('\n');

        for row in &listing.rows {
            let line = match &row.kind {
                ListingKind::Directory => format!("📁 {}", row.path),
                ListingKind::Symlink { target } => format!("🔗 {} -> {}", row.path, target),
                ListingKind::File => {
                    format!("📄 {} ({:.1} KB)", row.path, row.size as f64 / 1024.0)
                }
            };
            output.push_str(&line);
            let mode = row.mode.as_deref().filter(|_| row.kind != ListingKind::Directory);
            if let Some(mode) = mode {
                output.push_str(&format!("  {}", mode));
            }
            output.push('\n');
        }

        output.push_str("\nAvailable directories for file creation:\n");
        for directory in listing.directories() {
            output.push_str(&format!("  📁 {}\n", directory));
        }

        output.push_str("\nFiles available for viewing/editing:\n");
        for file in listing.files() {
            output.push_str(&format!("  📄 {}\n", file));
        }

        let symlinks = listing.symlinks();
        if !symlinks.is_empty() {
            output.push_str("\nSymbolic links:\n");
            for symlink in symlinks {
                output.push_str(&format!("  🔗 {}\n", symlink));
            }
        }

        output
    }

    fn format_view(&self, path: &str, content: &str) -> String {
        let rule = "-".repeat(RULE_WIDTH);
        format!(
            "\n=== Content of '{}' ===\n{}\n{}\n{}\n",
            path, rule, content, rule
        )
    }

    fn format_success(&self, action: Action, _result: &EditResult) -> String {
        format!("{}\n", action.success_message())
    }

    fn format_failure(&self, action: Action, _error: &Error) -> String {
        format!("{}\n", action.failure_message())
    }
}

/// JSON output formatter
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_list(&self, listing: &Listing) -> String {
        let entries: Vec<_> = listing
            .rows
            .iter()
            .map(|row| {
                let target = match &row.kind {
                    ListingKind::Symlink { target } => Some(target.as_str()),
                    _ => None,
                };
                json!({
                    "path": row.path,
                    "kind": row.kind_name(),
                    "size": row.size,
                    "modified": row.modified,
                    "mode": row.mode,
                    "target": target,
                })
            })
            .collect();

        let obj = json!({
            "archive": listing.archive,
            "entries": entries,
            "directories": listing.directories(),
            "files": listing.files(),
            "symlinks": listing.symlinks(),
        });

        serde_json::to_string_pretty(&obj).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_view(&self, path: &str, content: &str) -> String {
        let obj = json!({
            "path": path,
            "content": content,
        });

        serde_json::to_string_pretty(&obj).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_success(&self, action: Action, result: &EditResult) -> String {
        let obj = json!({
            "success": true,
            "action": action.name(),
            "path": result.added_path,
            "kind": result.kind.to_string(),
            "entries_kept": result.entries_kept,
            "entries_replaced": result.entries_replaced,
            "archive_size": result.archive_size,
        });

        serde_json::to_string_pretty(&obj).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_failure(&self, action: Action, error: &Error) -> String {
        let obj = json!({
            "success": false,
            "action": action.name(),
            "error": error.to_string(),
        });

        serde_json::to_string_pretty(&obj).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Creates the appropriate formatter based on output format
pub fn create_formatter(format: super::OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        super::OutputFormat::Human => Box::new(HumanFormatter),
        super::OutputFormat::Json => Box::new(JsonFormatter),
    }
}
