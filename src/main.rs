use clap::Parser;
use powerdeck::{ExportArtifact, ExportConfig, ExportError, ExportFormat, Exporter, RenderCache, Session};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const REPORT_TITLE: &str = "Consolidated Report";

/// Export a recorded dashboard session as PDF, DOCX or PPTX.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Session file with the captured sections
    session: PathBuf,

    /// Export a single section
    #[arg(long, conflicts_with = "report", required_unless_present = "report")]
    section: Option<String>,

    /// Export the consolidated report
    #[arg(long, default_value_t = false)]
    report: bool,

    /// pdf, docx, pptx or all
    #[arg(long, default_value = "all")]
    format: String,

    /// Output directory
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// JSON export configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Document title; defaults to the section name
    #[arg(long)]
    title: Option<String>,
}

fn parse_formats(arg: &str) -> Result<Vec<ExportFormat>, ExportError> {
    if arg.eq_ignore_ascii_case("all") {
        return Ok(ExportFormat::ALL.to_vec());
    }
    arg.split(',')
        .map(|f| f.parse::<ExportFormat>().map_err(ExportError::Config))
        .collect()
}

fn write_artifact(dir: &Path, artifact: &ExportArtifact) -> Result<PathBuf, ExportError> {
    let path = dir.join(&artifact.file_name);
    fs::write(&path, &artifact.bytes)?;
    Ok(path)
}

fn main() -> Result<(), ExportError> {
    if env::var("RUST_LOG").is_err() {
        unsafe {
            env::set_var("RUST_LOG", "powerdeck=info");
        }
    }
    env_logger::init();

    let args = Args::parse();
    let formats = parse_formats(&args.format)?;

    let config = match &args.config {
        Some(path) => ExportConfig::from_file(path)?,
        None => ExportConfig::default(),
    };
    println!("✓ Configuration loaded.");

    let session = Session::from_file(&args.session)?;
    let registry = session.replay(&RenderCache::new(config.cache_ttl()));
    println!("✓ Replayed {} sections from {}", session.sections.len(), args.session.display());

    let exporter = Exporter::new(config);
    fs::create_dir_all(&args.out)?;

    let title = match (&args.title, &args.section) {
        (Some(title), _) => title.clone(),
        (None, Some(section)) => section.clone(),
        (None, None) => REPORT_TITLE.to_string(),
    };
    if let Some(section) = &args.section {
        if let Err(e) = exporter.check_section(&registry, section) {
            println!("ℹ {}", e);
        }
    }

    let mut written = 0;
    let mut first_error = None;
    for format in formats {
        let result = match &args.section {
            Some(section) => exporter.export_section(&registry, section, &title, format),
            None => exporter.export_report(&registry, &title, format),
        };
        match result.and_then(|artifact| write_artifact(&args.out, &artifact)) {
            Ok(path) => {
                written += 1;
                println!("✓ {} written to {}", format, path.display());
            }
            Err(e) => {
                eprintln!("✗ {} export failed: {}", format, e);
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) if written == 0 => Err(e),
        _ => {
            println!("\nSuccess! Generated {} file(s) in {}", written, args.out.display());
            Ok(())
        }
    }
}
