//! CLI tool for editing ZIP archives in place.

mod commands;
mod exit_codes;
mod interactive;
mod logger;
mod output;

use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::{Shell, generate};
use std::path::PathBuf;

use zipmend::{ContentSource, WriteOptions};

use commands::CommandContext;
use exit_codes::ExitCode;

const EXAMPLES: &str = "\
Examples:
  # Create a new file
  zipmend archive.zip media/image.txt \"Hello World\"
  zipmend archive.zip docs/readme.md --file content.txt

  # View existing file
  zipmend archive.zip docs/existing.txt --view

  # Edit existing file
  zipmend archive.zip config/settings.json --edit
  zipmend archive.zip config/settings.json --edit --inline

  # Create symbolic link
  zipmend archive.zip media/link_to_passwd --symlink /etc/passwd
  zipmend archive.zip config/settings_link --symlink ../settings.json

  # List contents (shows files, dirs, and symlinks)
  zipmend archive.zip --list

  # Interactive mode
  zipmend --interactive";

/// Create, view, edit files and symlinks inside ZIP archives
#[derive(Parser)]
#[command(name = "zipmend")]
#[command(author, version, about = "Create, view, edit files and symlinks inside ZIP archives", long_about = None)]
#[command(after_help = EXAMPLES)]
pub struct Cli {
    /// Path to the ZIP file
    archive: Option<PathBuf>,

    /// Path inside the ZIP where the file or symlink is created, viewed or edited
    target: Option<String>,

    /// Content for the new file (create mode only)
    content: Option<String>,

    /// Read content from this file instead of the CONTENT argument
    #[arg(long, short = 'f', value_name = "PATH")]
    file: Option<PathBuf>,

    /// Replace existing entries with the same path
    #[arg(long)]
    overwrite: bool,

    /// View content of an existing file
    #[arg(long, short = 'v')]
    view: bool,

    /// Edit an existing file
    #[arg(long, short = 'e')]
    edit: bool,

    /// Edit on standard input instead of in an external editor
    #[arg(long)]
    inline: bool,

    /// Create a symbolic link pointing to this target
    #[arg(long, short = 's', value_name = "LINK_TARGET")]
    symlink: Option<String>,

    /// List ZIP contents only
    #[arg(long, short = 'l')]
    list: bool,

    /// Run in interactive mode
    #[arg(long, short = 'i')]
    interactive: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    format: OutputFormat,

    /// Compression method for new files
    #[arg(long, value_enum, default_value = "deflate")]
    method: CompressionMethod,

    /// Compression level (0-9)
    #[arg(long, default_value = "6")]
    level: u32,

    /// Log progress to stderr (repeat for more detail)
    #[arg(long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Generate shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    completions: Option<Shell>,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum CompressionMethod {
    Stored,
    Deflate,
}

impl From<CompressionMethod> for zipmend::format::CompressionMethod {
    fn from(method: CompressionMethod) -> Self {
        match method {
            CompressionMethod::Stored => zipmend::format::CompressionMethod::Stored,
            CompressionMethod::Deflate => zipmend::format::CompressionMethod::Deflate,
        }
    }
}

fn main() {
    // Set up Ctrl+C handler
    ctrlc::set_handler(move || {
        eprintln!("\nInterrupted");
        std::process::exit(exit_codes::USER_INTERRUPT);
    })
    .ok();

    let cli = Cli::parse();
    logger::init(cli.verbose);

    let exit_code = run(cli);
    std::process::exit(exit_code.code());
}

fn run(cli: Cli) -> ExitCode {
    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut std::io::stdout());
        return ExitCode::Success;
    }

    let options = match WriteOptions::new()
        .method(cli.method.into())
        .level(cli.level)
    {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::BadArgs;
        }
    };

    if cli.interactive {
        return interactive::run(options, cli.format);
    }

    let Some(archive_path) = cli.archive.as_deref() else {
        if cli.list {
            eprintln!("Error: ZIP file path required for --list");
        } else {
            eprintln!("Error: ZIP file and target path are required");
            eprintln!("{}", Cli::command().render_usage());
        }
        return ExitCode::BadArgs;
    };
    let ctx = CommandContext {
        archive_path,
        options,
        format: cli.format,
    };

    if cli.list {
        return commands::list(&ctx);
    }

    let Some(target) = cli.target.as_deref() else {
        let mode = if cli.view {
            " for --view"
        } else if cli.edit {
            " for --edit"
        } else if cli.symlink.is_some() {
            " for --symlink"
        } else {
            ""
        };
        eprintln!("Error: ZIP file and target path are required{}", mode);
        return ExitCode::BadArgs;
    };

    if cli.view {
        commands::view(&ctx, target)
    } else if cli.edit {
        commands::edit(&ctx, target, !cli.inline)
    } else if let Some(link_target) = cli.symlink.as_deref() {
        commands::symlink(&ctx, target, link_target, cli.overwrite)
    } else {
        let content = ContentSource::from_args(cli.content, cli.file);
        commands::create(&ctx, target, &content, cli.overwrite)
    }
}
