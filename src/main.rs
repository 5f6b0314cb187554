//! OCT Importer - decode vendor OCT scan containers.
//!
//! This binary decodes raw scan files into the clinical data model and
//! inspects or exports their contents.

use clap::Parser;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use oct_importer::{
    config::{Cli, Command, ExportConfig, HeaderConfig, InfoConfig},
    format::vol,
    FormatError, FormatRegistry, Oct, Series, Timestamp,
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Command::Info(config) => run_info(config),
        Command::Header(config) => run_header(config),
        Command::Export(config) => run_export(config),
    }
}

// =============================================================================
// Info Command
// =============================================================================

fn run_info(config: InfoConfig) -> ExitCode {
    init_logging(config.verbose);

    let registry = FormatRegistry::default();
    let oct = match registry.open_file(&config.file, &config.read_options()) {
        Ok(oct) => oct,
        Err(err) => return report_decode_error(&registry, &config.file, &err),
    };

    if config.json {
        print_json_summary(&config.file, &oct);
    } else {
        print_tree(&oct);
    }

    ExitCode::SUCCESS
}

/// Render the model tree the way a quick look at a file wants it.
fn print_tree(oct: &Oct) {
    for patient in oct.patients() {
        let name = match (patient.surname(), patient.forename()) {
            ("", "") => String::new(),
            (surname, forename) => format!(" {} {}", forename, surname),
        };
        println!(
            "patient {}{} (id '{}', born {})",
            patient.id(),
            name,
            patient.external_id(),
            patient.birthdate().date_str('-')
        );

        for study in patient.studies() {
            println!(
                "  study {} - {}",
                study.id(),
                study.study_date().date_time_str('-', ':', false)
            );

            for series in study.all_series() {
                println!(
                    "    series {} [{}, {}] scan {}, focus {} dpt",
                    series.id(),
                    series.laterality().as_str(),
                    series.scan_pattern().as_str(),
                    series.scan_date().date_str('-'),
                    series.scan_focus()
                );
                if let Some(slo) = series.slo_image() {
                    println!("      SLO {}x{}", slo.width(), slo.height());
                }
                if let Some(first) = series.bscan(0) {
                    println!(
                        "      {} B-scans ({}x{})",
                        series.bscan_count(),
                        first.width(),
                        first.height()
                    );
                }
            }
        }
    }
}

#[derive(Serialize)]
struct FileSummary<'a> {
    file: String,
    patients: Vec<PatientSummary<'a>>,
}

#[derive(Serialize)]
struct PatientSummary<'a> {
    id: u32,
    forename: &'a str,
    surname: &'a str,
    external_id: &'a str,
    birthdate: String,
    studies: Vec<StudySummary>,
}

#[derive(Serialize)]
struct StudySummary {
    id: u32,
    study_date: String,
    series: Vec<SeriesSummary>,
}

#[derive(Serialize)]
struct SeriesSummary {
    id: u32,
    laterality: &'static str,
    scan_pattern: &'static str,
    scan_date: String,
    scan_focus: f64,
    slo_size: Option<(u32, u32)>,
    bscan_count: usize,
}

fn summarize_series(series: &Series) -> SeriesSummary {
    SeriesSummary {
        id: series.id(),
        laterality: series.laterality().as_str(),
        scan_pattern: series.scan_pattern().as_str(),
        scan_date: series.scan_date().date_str('-'),
        scan_focus: series.scan_focus(),
        slo_size: series.slo_image().map(|slo| (slo.width(), slo.height())),
        bscan_count: series.bscan_count(),
    }
}

fn print_json_summary(file: &Path, oct: &Oct) {
    let summary = FileSummary {
        file: file.display().to_string(),
        patients: oct
            .patients()
            .map(|patient| PatientSummary {
                id: patient.id(),
                forename: patient.forename(),
                surname: patient.surname(),
                external_id: patient.external_id(),
                birthdate: patient.birthdate().date_str('-'),
                studies: patient
                    .studies()
                    .map(|study| StudySummary {
                        id: study.id(),
                        study_date: study.study_date().date_time_str('-', ':', false),
                        series: study.all_series().map(summarize_series).collect(),
                    })
                    .collect(),
            })
            .collect(),
    };

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(err) => error!("failed to serialize summary: {}", err),
    }
}

// =============================================================================
// Header Command
// =============================================================================

fn run_header(config: HeaderConfig) -> ExitCode {
    init_logging(config.verbose);

    let (header, lines) = match vol::dump_header(&config.file) {
        Ok(result) => result,
        Err(err) => {
            error!("{}: {}", config.file.display(), err);
            return ExitCode::FAILURE;
        }
    };

    for line in lines {
        println!("{}", line);
    }

    println!();
    println!("decoded dates:");
    print_date("examTime", &Timestamp::from_ticks(header.exam_time));
    print_date("dob", &Timestamp::from_spreadsheet_days(header.dob));
    print_date("visitDate", &Timestamp::from_spreadsheet_days(header.visit_date));

    ExitCode::SUCCESS
}

fn print_date(name: &str, timestamp: &Timestamp) {
    println!("{:<12} : {}", name, timestamp.date_time_str('-', ':', true));
}

// =============================================================================
// Export Command
// =============================================================================

fn run_export(config: ExportConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(err) = config.validate() {
        error!("configuration error: {}", err);
        return ExitCode::FAILURE;
    }

    let registry = FormatRegistry::default();
    let oct = match registry.open_file(&config.file, &config.read_options()) {
        Ok(oct) => oct,
        Err(err) => return report_decode_error(&registry, &config.file, &err),
    };

    if let Err(err) = std::fs::create_dir_all(&config.out) {
        error!("cannot create '{}': {}", config.out.display(), err);
        return ExitCode::FAILURE;
    }

    let mut exported = 0usize;
    for patient in oct.patients() {
        for study in patient.studies() {
            for series in study.all_series() {
                let stem = format!("p{}_s{}_r{}", patient.id(), study.id(), series.id());

                if let Some(slo) = series.slo_image() {
                    let path = config.out.join(format!("{}_slo.png", stem));
                    if let Err(err) = slo.image().save(&path) {
                        error!("cannot write '{}': {}", path.display(), err);
                        return ExitCode::FAILURE;
                    }
                    exported += 1;
                }

                for (index, bscan) in series.bscans().iter().enumerate() {
                    let path = config.out.join(format!("{}_b{:03}.png", stem, index));
                    if let Err(err) = bscan.image().save(&path) {
                        error!("cannot write '{}': {}", path.display(), err);
                        return ExitCode::FAILURE;
                    }
                    exported += 1;
                }
            }
        }
    }

    println!(
        "exported {} image(s) to {}",
        exported,
        config.out.display()
    );
    ExitCode::SUCCESS
}

// =============================================================================
// Shared Helpers
// =============================================================================

/// Report a decode failure, distinguishing "not a recognized format" from a
/// real error.
fn report_decode_error(registry: &FormatRegistry, file: &Path, err: &FormatError) -> ExitCode {
    if err.is_decline() {
        let extensions: Vec<String> = registry
            .supported_extensions()
            .iter()
            .map(|e| format!(".{} ({})", e.extension, e.name))
            .collect();
        eprintln!("{}: not a recognized scan container", file.display());
        eprintln!("supported formats: {}", extensions.join(", "));
    } else {
        error!("{}: {}", file.display(), err);
    }
    ExitCode::FAILURE
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "oct_importer=debug"
    } else {
        "oct_importer=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
