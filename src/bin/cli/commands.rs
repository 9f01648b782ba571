//! Command implementations for the CLI tool.

use std::io::{self, BufRead};
use std::path::Path;

use zipmend::{
    Archive, ArchiveEditor, ContentSource, EditResult, EditorConfig, Error, Payload, Result,
    WriteOptions,
};

use crate::OutputFormat;
use crate::exit_codes::{ExitCode, error_to_exit_code};
use crate::output::{Action, Listing, ListingRow, create_formatter};

/// Settings shared by every command.
pub struct CommandContext<'a> {
    pub archive_path: &'a Path,
    pub options: WriteOptions,
    pub format: OutputFormat,
}

impl CommandContext<'_> {
    fn editor(&self) -> ArchiveEditor {
        ArchiveEditor::new(self.archive_path).with_options(self.options.clone())
    }
}

/// Reads an archive listing, resolving symlink targets.
pub fn load_listing(archive_path: &Path) -> Result<Listing> {
    let mut archive = Archive::open_path(archive_path)?;
    let entries = archive.entries().to_vec();

    let mut rows = Vec::with_capacity(entries.len());
    for entry in &entries {
        let link_target = if entry.is_symlink() && !entry.is_directory() {
            let bytes = archive.read_index(entry.index)?;
            Some(String::from_utf8_lossy(&bytes).into_owned())
        } else {
            None
        };
        rows.push(ListingRow::new(entry, link_target));
    }

    Ok(Listing {
        archive: archive_path.display().to_string(),
        rows,
    })
}

/// List command implementation
pub fn list(ctx: &CommandContext<'_>) -> ExitCode {
    let formatter = create_formatter(ctx.format);
    match load_listing(ctx.archive_path) {
        Ok(listing) => {
            emit(&formatter.format_list(&listing));
            ExitCode::Success
        }
        Err(e) => fail(&e),
    }
}

/// View command implementation
pub fn view(ctx: &CommandContext<'_>, target: &str) -> ExitCode {
    let formatter = create_formatter(ctx.format);
    match ctx.editor().read_text(target) {
        Ok(content) => {
            emit(&formatter.format_view(target, &content));
            ExitCode::Success
        }
        Err(e) => fail(&e),
    }
}

/// Create command implementation
pub fn create(
    ctx: &CommandContext<'_>,
    target: &str,
    content: &ContentSource,
    overwrite: bool,
) -> ExitCode {
    let result = content
        .load()
        .and_then(|data| ctx.editor().upsert(target, Payload::regular(data), overwrite));
    report(ctx, Action::CreateFile, result)
}

/// Symlink command implementation
pub fn symlink(
    ctx: &CommandContext<'_>,
    target: &str,
    link_target: &str,
    overwrite: bool,
) -> ExitCode {
    let result = ctx.editor().add_symlink(target, link_target, overwrite);
    report(ctx, Action::CreateSymlink, result)
}

/// Edit command implementation
///
/// With `use_editor`, the content goes through the first available external
/// editor and falls back to inline editing when none is installed.
pub fn edit(ctx: &CommandContext<'_>, target: &str, use_editor: bool) -> ExitCode {
    let result = ctx.editor().edit_text(target, |current| {
        if use_editor {
            match EditorConfig::from_env().edit(current, target) {
                Err(Error::EditorUnavailable) => {
                    eprintln!("No suitable text editor found. Using inline mode.");
                }
                other => return other.map(Some),
            }
        }
        edit_inline(target, current).map(Some)
    });
    report(ctx, Action::EditFile, result)
}

fn edit_inline(target: &str, current: &str) -> Result<String> {
    let rule = "-".repeat(30);
    eprintln!("\n=== Editing '{}' ===", target);
    eprintln!("Current content:");
    eprintln!("{}\n{}\n{}", rule, current, rule);
    eprintln!("\nEnter new content (press Ctrl+D or Ctrl+Z to finish):");
    read_until_eof()
}

/// Reads lines from stdin until end of input and joins them with `\n`.
pub fn read_until_eof() -> Result<String> {
    let lines = io::stdin().lock().lines().collect::<io::Result<Vec<_>>>()?;
    Ok(lines.join("\n"))
}

fn report(ctx: &CommandContext<'_>, action: Action, result: Result<EditResult>) -> ExitCode {
    let formatter = create_formatter(ctx.format);
    match result {
        Ok(result) => {
            emit(&formatter.format_success(action, &result));
            ExitCode::Success
        }
        Err(e) => {
            let code = fail(&e);
            emit(&formatter.format_failure(action, &e));
            code
        }
    }
}

fn fail(error: &Error) -> ExitCode {
    eprintln!("Error: {}", error);
    error_to_exit_code(error)
}

fn emit(text: &str) {
    if text.ends_with('\n') {
        print!("{}", text);
    } else {
        println!("{}", text);
    }
}
