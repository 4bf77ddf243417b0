//! imgslot: keep image tags, numbered image files and captions in step.
//!
//! A document refers to its images either as embedded references
//! (`![caption](images/3-chart.png)`) or as bare tags (`[IMG 3]`). The number
//! (the *slot*) also prefixes the image filename and indexes a caption
//! side-file, one caption per line. imgslot converts between the two
//! representations, checks the three artifacts against each other, and
//! renumbers a reordered document while keeping captions and files attached
//! to the right image.
//!
//! # Modules
//!
//! - [`slots`]: Shared model (Slot, TaggedDocument, CaptionStore, FileDirectory) and file I/O
//! - [`extract`]: Embedded references → tags plus a caption store
//! - [`materialize`]: Tags → embedded references
//! - [`validation`]: Duplicate, gap and missing-file checks
//! - [`renumber`]: Contiguous renumbering and the rename/copy plan
//! - [`error`]: Error types for imgslot operations

pub mod error;
pub mod extract;
pub mod materialize;
pub mod renumber;
pub mod slots;
pub mod validation;

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub use error::ImgslotError;

use slots::{io as slot_io, CaptionStore, FileDirectory, TaggedDocument};

/// The imgslot CLI application.
#[derive(Parser)]
#[command(name = "imgslot")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Show debug logs.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only show errors in the log.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Replace numbered embedded images with [IMG n] tags and save their captions.
    Extract(ExtractArgs),
    /// Replace [IMG n] tags with embedded images.
    Materialize(MaterializeArgs),
    /// Check tags for duplicates, gaps and missing image files.
    Validate(ValidateArgs),
    /// Renumber tags 1..N in reading order and plan the matching file renames.
    Renumber(RenumberArgs),
}

/// Report rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Arguments for the extract subcommand.
#[derive(clap::Args)]
struct ExtractArgs {
    /// Document containing embedded image references.
    input: PathBuf,

    /// Where to write the tagged document.
    #[arg(short, long)]
    output: PathBuf,

    /// Where to write the extracted captions, one per line.
    #[arg(long, default_value = "alt_text.txt")]
    captions: PathBuf,

    /// Report format.
    #[arg(long, value_enum, default_value = "text")]
    output_format: OutputFormat,
}

/// Arguments for the materialize subcommand.
#[derive(clap::Args)]
struct MaterializeArgs {
    /// Document containing [IMG n] tags.
    input: PathBuf,

    /// Where to write the document with embedded images.
    #[arg(short, long)]
    output: PathBuf,

    /// Directory holding the numbered image files.
    #[arg(long, env = "IMGSLOT_IMAGE_DIR", default_value = "images")]
    images: PathBuf,

    /// Caption file, one caption per line.
    #[arg(long, default_value = "alt_text.txt")]
    captions: PathBuf,

    /// Path written before each filename (defaults to the image directory).
    #[arg(long)]
    image_prefix: Option<String>,

    /// Caption used for slots without one.
    #[arg(long, default_value = materialize::DEFAULT_CAPTION)]
    default_caption: String,

    /// Report format.
    #[arg(long, value_enum, default_value = "text")]
    output_format: OutputFormat,
}

/// Arguments for the validate subcommand.
#[derive(clap::Args)]
struct ValidateArgs {
    /// Document containing [IMG n] tags.
    input: PathBuf,

    /// Directory holding the numbered image files.
    #[arg(long, env = "IMGSLOT_IMAGE_DIR", default_value = "images")]
    images: PathBuf,

    /// Exit non-zero if any issue is found (a document without tags passes).
    #[arg(long)]
    strict: bool,

    /// Report format.
    #[arg(long, value_enum, default_value = "text")]
    output_format: OutputFormat,
}

/// Arguments for the renumber subcommand.
#[derive(clap::Args)]
struct RenumberArgs {
    /// Document containing [IMG n] tags.
    input: PathBuf,

    /// Where to write the renumbered document.
    #[arg(short, long)]
    output: PathBuf,

    /// Caption file keyed by the current numbering (optional).
    #[arg(long, default_value = "alt_text.txt")]
    captions: PathBuf,

    /// Where to write the re-keyed captions
    /// (defaults to <captions>_renumbered.<ext>).
    #[arg(long)]
    captions_output: Option<PathBuf>,

    /// Directory holding the numbered image files.
    #[arg(long, env = "IMGSLOT_IMAGE_DIR", default_value = "images")]
    images: PathBuf,

    /// Report format.
    #[arg(long, value_enum, default_value = "text")]
    output_format: OutputFormat,
}

/// Run the imgslot CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), ImgslotError> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Some(Commands::Extract(args)) => run_extract(args),
        Some(Commands::Materialize(args)) => run_materialize(args),
        Some(Commands::Validate(args)) => run_validate(args),
        Some(Commands::Renumber(args)) => run_renumber(args),
        None => {
            println!("imgslot {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Keep image tags, numbered image files and captions in step.");
            println!();
            println!("Run 'imgslot --help' for usage information.");
            Ok(())
        }
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the flag-derived level.
fn init_logging(verbose: bool, quiet: bool) {
    let filter = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "info"
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Execute the extract subcommand.
fn run_extract(args: ExtractArgs) -> Result<(), ImgslotError> {
    let text = slot_io::read_document(&args.input)?;
    let extraction = extract::extract_tags(&text);

    slot_io::write_text(&args.output, &extraction.document.to_string())?;
    info!("Tagged document saved to {}", args.output.display());

    if extraction.captions.is_empty() {
        info!("No numbered images found to extract");
    } else {
        slot_io::write_captions(&args.captions, &extraction.captions)?;
        info!(
            "Captions for slots 1..{} saved to {}",
            extraction.captions.len(),
            args.captions.display()
        );
    }

    print_report(&extraction.report, args.output_format)
}

/// Execute the materialize subcommand.
fn run_materialize(args: MaterializeArgs) -> Result<(), ImgslotError> {
    let directory = scan_optional_image_dir(&args.images)?;
    let captions = read_optional_captions(&args.captions)?;
    let text = slot_io::read_document(&args.input)?;

    let opts = materialize::MaterializeOptions {
        image_prefix: args
            .image_prefix
            .unwrap_or_else(|| args.images.to_string_lossy().replace('\\', "/")),
        default_caption: args.default_caption,
    };
    let result = materialize::materialize(
        &TaggedDocument::parse(&text),
        &directory.unwrap_or_default(),
        &captions.unwrap_or_default(),
        &opts,
    );

    slot_io::write_text(&args.output, &result.document)?;
    info!("Document with images saved to {}", args.output.display());

    print_report(&result.report, args.output_format)
}

/// Execute the validate subcommand.
fn run_validate(args: ValidateArgs) -> Result<(), ImgslotError> {
    let text = slot_io::read_document(&args.input)?;
    let directory = slot_io::scan_image_dir(&args.images)?;

    info!(
        "Validating {} against {}",
        args.input.display(),
        args.images.display()
    );
    let report = validation::validate_document(&TaggedDocument::parse(&text), &directory);

    print_report(&report, args.output_format)?;

    if args.strict && report.has_findings() {
        Err(ImgslotError::ValidationFailed {
            error_count: report.error_count(),
            warning_count: report.warning_count(),
            report,
        })
    } else {
        Ok(())
    }
}

/// Execute the renumber subcommand.
fn run_renumber(args: RenumberArgs) -> Result<(), ImgslotError> {
    let text = slot_io::read_document(&args.input)?;
    let captions = read_optional_captions(&args.captions)?.filter(|store| !store.is_blank());
    let directory = scan_optional_image_dir(&args.images)?;

    let renumbering = renumber::renumber_document(
        &TaggedDocument::parse(&text),
        captions.as_ref().unwrap_or(&CaptionStore::new()),
    );

    slot_io::write_text(&args.output, &renumbering.document.to_string())?;
    info!("Renumbered document saved to {}", args.output.display());

    if captions.is_some() {
        let path = args
            .captions_output
            .unwrap_or_else(|| renumbered_path(&args.captions));
        slot_io::write_captions(&path, &renumbering.captions)?;
        info!("Captions reordered to {}", path.display());
    }

    let plan = directory.map(|dir| renumber::plan_renames(&renumbering.slot_map, &dir));
    let report = renumber::RenumberReport::new(&renumbering.slot_map, captions.is_some(), plan);

    print_report(&report, args.output_format)
}

/// Scan the image directory, treating a missing directory as empty.
fn scan_optional_image_dir(dir: &Path) -> Result<Option<FileDirectory>, ImgslotError> {
    match slot_io::scan_image_dir(dir) {
        Ok(directory) => Ok(Some(directory)),
        Err(ImgslotError::NotFound { .. }) => {
            warn!("Image directory '{}' not found", dir.display());
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

fn read_optional_captions(path: &Path) -> Result<Option<CaptionStore>, ImgslotError> {
    let captions = slot_io::read_captions(path)?;
    if captions.is_none() {
        warn!(
            "Caption file '{}' not found, using default captions",
            path.display()
        );
    }
    Ok(captions)
}

/// `alt_text.txt` → `alt_text_renumbered.txt`.
fn renumbered_path(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{}_renumbered.{}", stem, ext.to_string_lossy()),
        None => format!("{}_renumbered", stem),
    };
    path.with_file_name(name)
}

fn print_report<R>(report: &R, format: OutputFormat) -> Result<(), ImgslotError>
where
    R: Serialize + fmt::Display,
{
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Text => print!("{}", report),
    }
    Ok(())
}
