//! Interactive menu mode.

use std::io;
use std::path::PathBuf;

use console::Term;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use zipmend::{ContentSource, WriteOptions};

use crate::OutputFormat;
use crate::commands::{self, CommandContext};
use crate::exit_codes::ExitCode;

const MENU: &[&str] = &[
    "Create new file",
    "View existing file",
    "Edit existing file",
    "Create symbolic link",
    "Exit",
];

/// Runs the interactive loop until the user picks "Exit".
pub fn run(options: WriteOptions, format: OutputFormat) -> ExitCode {
    match session(options, format) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::IoError
        }
    }
}

fn session(options: WriteOptions, format: OutputFormat) -> io::Result<()> {
    let theme = ColorfulTheme::default();
    let term = Term::stdout();

    term.write_line("=== zipmend - Interactive Mode ===\n")?;
    let archive_path = prompt_archive(&theme, &term)?;
    let ctx = CommandContext {
        archive_path: &archive_path,
        options,
        format,
    };

    loop {
        commands::list(&ctx);

        let choice = Select::with_theme(&theme)
            .with_prompt("Choose an action")
            .items(MENU)
            .default(0)
            .interact()
            .map_err(io::Error::from)?;

        match choice {
            0 => create_file(&ctx, &theme, &term)?,
            1 => {
                let target = prompt_text(&theme, "Enter file path to view")?;
                commands::view(&ctx, &target);
            }
            2 => {
                let target = prompt_text(&theme, "Enter file path to edit")?;
                let use_editor = Confirm::with_theme(&theme)
                    .with_prompt("Use external editor?")
                    .default(true)
                    .interact()
                    .map_err(io::Error::from)?;
                commands::edit(&ctx, &target, use_editor);
            }
            3 => create_symlink(&ctx, &theme, &term)?,
            _ => {
                term.write_line("Goodbye!")?;
                return Ok(());
            }
        }

        term.write_line("\nPress Enter to continue...")?;
        term.read_line()?;
    }
}

fn prompt_archive(theme: &ColorfulTheme, term: &Term) -> io::Result<PathBuf> {
    loop {
        let path = PathBuf::from(prompt_text(theme, "Enter path to ZIP file")?);
        if path.is_file() {
            return Ok(path);
        }
        term.write_line("File not found. Please enter a valid path.\n")?;
    }
}

fn create_file(ctx: &CommandContext<'_>, theme: &ColorfulTheme, term: &Term) -> io::Result<()> {
    term.write_line("\nEnter the path inside the ZIP where you want to create the file.")?;
    term.write_line("Examples: media/newfile.txt, docs/readme.md, config/settings.json")?;
    let target = prompt_text(theme, "Target path")?;

    term.write_line("\nEnter content for the file (press Ctrl+D or Ctrl+Z to finish):")?;
    let content = commands::read_until_eof().map_err(io::Error::other)?;
    let overwrite = confirm_overwrite(theme)?;

    commands::create(ctx, &target, &ContentSource::Literal(content), overwrite);
    Ok(())
}

fn create_symlink(ctx: &CommandContext<'_>, theme: &ColorfulTheme, term: &Term) -> io::Result<()> {
    term.write_line("\nEnter the path inside the ZIP where you want to create the symlink.")?;
    term.write_line("Examples: media/link_to_passwd, docs/config_link, tmp/shortcut")?;
    let target = prompt_text(theme, "Symlink path")?;

    term.write_line("\nEnter the target path that the symlink should point to.")?;
    term.write_line("Examples: /etc/passwd, ../config/settings.json, /tmp/data")?;
    let link_target = prompt_text(theme, "Target path")?;
    let overwrite = confirm_overwrite(theme)?;

    commands::symlink(ctx, &target, &link_target, overwrite);
    Ok(())
}

fn prompt_text(theme: &ColorfulTheme, prompt: &str) -> io::Result<String> {
    let value: String = Input::with_theme(theme)
        .with_prompt(prompt)
        .interact_text()
        .map_err(io::Error::from)?;
    Ok(value.trim().to_string())
}

fn confirm_overwrite(theme: &ColorfulTheme) -> io::Result<bool> {
    Confirm::with_theme(theme)
        .with_prompt("Overwrite if file exists?")
        .default(false)
        .interact()
        .map_err(io::Error::from)
}
