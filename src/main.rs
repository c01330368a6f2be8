//! allview CLI application entry point
//!
//! # Features
//!
//! - **Preview**: Load files into a viewer session and print the selected preview
//! - **Favicon**: Stretch an image onto every favicon size and save `favicons.zip`
//! - **Quiet Mode**: Suppress informational output for scripting
//!
//! # Usage
//!
//! ```bash
//! # Preview a single file (selected automatically)
//! allview preview notes.md
//!
//! # Load several files and preview the second one
//! allview preview report.docx data.csv logo.png --select 2
//!
//! # Dump the session state as JSON
//! allview preview data.csv --json
//!
//! # Generate favicons from a Photoshop document
//! allview favicon logo.psd -o dist/ --open
//! ```
//!
//! # Configuration
//!
//! Settings live in the user's config directory (`~/.config/allview/config.toml`
//! on Linux) and are managed with `allview config get|set`.

use allview::{
    AllviewError, Result,
    cli::{Cli, Commands, ConfigCommands, parse_setting},
    config::{AllviewConfig, KEYS},
    favicon::{self, ARCHIVE_NAME, FAVICON_SIZES, ResizeSession},
    logging,
    output::{OutputWriter, StdoutWriter, human_size, write_file_list, write_preview},
    preview::PreviewGenerator,
    session::ViewerSession,
    upload::{FileId, UploadedFile},
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};

/// Read every path into an upload, reporting and skipping unreadable ones
fn read_uploads(paths: &[PathBuf], output: &dyn OutputWriter) -> Vec<UploadedFile> {
    paths
        .iter()
        .filter_map(|path| match UploadedFile::from_path(path) {
            Ok(file) => Some(file),
            Err(e) => {
                output.error(&format!("Cannot read {}: {e}", path.display()));
                None
            }
        })
        .collect()
}

/// Handle the preview command
///
/// Files are added in order. With `--select N` file number N is previewed;
/// otherwise the auto-selected sole file, or the first one, is.
///
/// # Errors
///
/// Returns `AllviewError` if no file could be read, `N` does not name a
/// loaded file, or the JSON snapshot cannot be serialized.
fn handle_preview_command(
    config: &AllviewConfig,
    paths: &[PathBuf],
    select: Option<u64>,
    json: bool,
    output: &dyn OutputWriter,
) -> Result<()> {
    let uploads = read_uploads(paths, output);
    if uploads.is_empty() {
        return Err(AllviewError::InvalidInput("No readable files to preview".into()));
    }

    let mut session = ViewerSession::new(PreviewGenerator::new(config.preview_config()));
    let mut snapshot = session.add_files(uploads);

    let target = select.map(FileId).or_else(|| {
        snapshot
            .selected
            .is_none()
            .then(|| snapshot.files.first().map(|f| f.id))
            .flatten()
    });

    if let Some(id) = target {
        if session.file(id).is_none() {
            return Err(AllviewError::InvalidInput(format!(
                "No file {id} loaded (1-{})",
                snapshot.files.len()
            )));
        }
        if snapshot.selected != Some(id) {
            snapshot = session.toggle_select(id);
        }
    }

    debug!(files = snapshot.files.len(), selected = ?snapshot.selected, "preview session ready");

    if json {
        output.write(&serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    if snapshot.show_file_list() {
        write_file_list(output, &snapshot);
        output.write("");
    }
    write_preview(output, &snapshot);

    Ok(())
}

/// Handle the favicon command
///
/// # Errors
///
/// Returns `AllviewError` if the image cannot be read or decoded, the
/// export fails, or the archive cannot be written.
fn handle_favicon_command(
    config: &AllviewConfig,
    image: &Path,
    output_dir: Option<&Path>,
    open_after: bool,
    output: &dyn OutputWriter,
) -> Result<()> {
    let file = UploadedFile::from_path(image)?;
    if !favicon::is_accepted(file.name()) {
        output.warning(&format!(
            "{} is not a {} file, trying anyway",
            file.name(),
            favicon::ACCEPTED_EXTENSIONS.join("/")
        ));
    }

    let mut session = ResizeSession::new();
    session.upload(&file)?;
    if let Some(source) = session.source() {
        let (width, height) = source.dimensions();
        output.info(&format!("Source: {} ({width}×{height})", source.name()));
    }
    output.info(&format!("Will generate: {}", ResizeSession::planned_outputs().join(", ")));

    let archive = session.convert()?;
    let dir = output_dir.map_or_else(|| config.output_dir(), Path::to_path_buf);
    let path = favicon::save_archive(&archive, &dir)?;
    info!(path = %path.display(), bytes = archive.len(), "favicon archive saved");

    output.success(&format!(
        "Saved {} ({})",
        path.display(),
        human_size(archive.len() as u64)
    ));

    if open_after || config.open_after_export {
        if let Err(e) = open::that(&path) {
            output.warning(&format!("Could not open {ARCHIVE_NAME}: {e}"));
        }
    }

    Ok(())
}

/// Handle the sizes command
fn handle_sizes_command(output: &dyn OutputWriter) {
    for size in FAVICON_SIZES {
        output.write(&format!("{size:>4}  {}", favicon::favicon_file_name(size)));
    }
}

/// Handle config subcommands
///
/// # Errors
///
/// Returns `AllviewError` for malformed settings, unknown keys, or if the
/// configuration cannot be saved.
fn handle_config_command(
    mut config: AllviewConfig,
    command: &ConfigCommands,
    output: &dyn OutputWriter,
) -> Result<()> {
    match command {
        ConfigCommands::Set { setting } => {
            let (key, value) = parse_setting(setting).ok_or_else(|| {
                AllviewError::InvalidInput("Invalid format. Use: allview config set key=value".into())
            })?;
            config.set(key, value)?;
            config.save()?;
            output.success(&format!("Set {key} = {value}"));
        }
        ConfigCommands::Get { key } => {
            let value = config.get(key).ok_or_else(|| {
                AllviewError::InvalidInput(format!(
                    "Unknown configuration key: '{key}'. Available keys: {}",
                    KEYS.join(", ")
                ))
            })?;
            output.write(&value);
        }
    }
    Ok(())
}

fn run(cli: Cli, config: AllviewConfig, output: &dyn OutputWriter) -> Result<()> {
    match &cli.command {
        Commands::Preview { files, select, json } => {
            handle_preview_command(&config, files, *select, *json, output)
        }
        Commands::Favicon { image, output: dir, open } => {
            handle_favicon_command(&config, image, dir.as_deref(), *open, output)
        }
        Commands::Sizes => {
            handle_sizes_command(output);
            Ok(())
        }
        Commands::Config { command } => handle_config_command(config, command, output),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    logging::init_logging(cli.verbose);

    let config = match AllviewConfig::load() {
        Ok(config) => config,
        Err(e) => {
            StdoutWriter::new(cli.quiet).error(&format!("Configuration error: {e}"));
            return ExitCode::FAILURE;
        }
    };

    let output = StdoutWriter::new(cli.quiet || config.quiet);
    match run(cli, config, &output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output.error(&e.to_string());
            ExitCode::FAILURE
        }
    }
}
