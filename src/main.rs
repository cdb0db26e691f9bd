//! CLI entry point for the GPA tracker.
//!
//! Provides subcommands for building the full chart report, inspecting a
//! single term, listing terms, and appending records to the data file.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use gpa_tracker::analyzers::aggregate::{aggregate_transcript, term_summary};
use gpa_tracker::analyzers::classify::{GradePolicy, GradingConfig};
use gpa_tracker::analyzers::grade::GradeScale;
use gpa_tracker::analyzers::group::group_by_term;
use gpa_tracker::output::{print_json, print_pretty, write_report};
use gpa_tracker::record::CourseRecord;
use gpa_tracker::store::{append_record, load_records};
use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "gpa_tracker")]
#[command(about = "A tool to track course grades and chart GPA/CPA by term", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Which grade tokens count toward averages.
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    /// Only the nine standard letter grades count
    StrictLetters,
    /// Everything counts except blanks and the W/AU/I/IP markers
    ExclusionList,
}

impl From<PolicyArg> for GradePolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::StrictLetters => GradePolicy::StrictLetters,
            PolicyArg::ExclusionList => GradePolicy::ExclusionList,
        }
    }
}

/// How grade tokens map to 4.0-scale points.
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ScaleArg {
    /// Letter grades only
    Letter,
    /// Letter grades, falling back to numeric 0-10 scores
    LetterOrNumeric,
}

impl From<ScaleArg> for GradeScale {
    fn from(arg: ScaleArg) -> Self {
        match arg {
            ScaleArg::Letter => GradeScale::LetterOnly,
            ScaleArg::LetterOrNumeric => GradeScale::LetterWithNumericFallback,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the GPA/CPA/credit series and emit the chart report
    Report {
        /// CSV file holding the course records
        #[arg(short, long, default_value = "data.csv")]
        data: String,

        /// Terms to put on the chart axes (default: all)
        #[arg(short, long, value_delimiter = ',')]
        terms: Vec<String>,

        /// Write the JSON report to this file instead of stdout
        #[arg(short, long)]
        output: Option<String>,

        /// Grade classification policy
        #[arg(long, value_enum, default_value = "strict-letters")]
        grade_policy: PolicyArg,

        /// Grade scale
        #[arg(long, value_enum, default_value = "letter")]
        scale: ScaleArg,
    },
    /// Show one term's courses with its GPA and cumulative CPA
    Term {
        /// Term label, e.g. 2021-1
        term: String,

        /// CSV file holding the course records
        #[arg(short, long, default_value = "data.csv")]
        data: String,

        /// Grade classification policy
        #[arg(long, value_enum, default_value = "strict-letters")]
        grade_policy: PolicyArg,

        /// Grade scale
        #[arg(long, value_enum, default_value = "letter")]
        scale: ScaleArg,
    },
    /// List the terms found in the data file
    Terms {
        /// CSV file holding the course records
        #[arg(short, long, default_value = "data.csv")]
        data: String,

        /// Grade classification policy
        #[arg(long, value_enum, default_value = "strict-letters")]
        grade_policy: PolicyArg,
    },
    /// Validate and append one course record to the data file
    Add {
        /// Term label, e.g. 2021-1
        term: String,
        /// Course code, e.g. MA101
        code: String,
        /// Course title
        title: String,
        /// Credit weight (positive integer)
        credits: i32,
        /// Grade token (letter grade, marker, or blank)
        grade: String,

        /// CSV file holding the course records
        #[arg(short, long, default_value = "data.csv")]
        data: String,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/gpa_tracker.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("gpa_tracker.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            data,
            terms,
            output,
            grade_policy,
            scale,
        } => {
            let config = GradingConfig::new(grade_policy.into(), scale.into());
            let records = load_records(&data)?;
            let selected: Option<HashSet<String>> = if terms.is_empty() {
                None
            } else {
                Some(terms.into_iter().collect())
            };

            let aggregate = aggregate_transcript(&records, selected.as_ref(), config)?;
            print_pretty(&aggregate);

            match output {
                Some(path) => write_report(&path, &aggregate)?,
                None => print_json(&aggregate)?,
            }
        }
        Commands::Term {
            term,
            data,
            grade_policy,
            scale,
        } => {
            let config = GradingConfig::new(grade_policy.into(), scale.into());
            show_term(&term, &data, config)?;
        }
        Commands::Terms { data, grade_policy } => {
            list_terms(&data, grade_policy.into())?;
        }
        Commands::Add {
            term,
            code,
            title,
            credits,
            grade,
            data,
        } => {
            let record = CourseRecord::new(&term, &code, &title, credits, &grade);
            record.validate()?;
            append_record(&data, &record)?;

            info!(term = %record.term, code = %record.code, "Record appended");
        }
    }

    Ok(())
}

/// Prints one term's course list and its GPA/CPA pair.
#[tracing::instrument(skip(config), fields(term = %term, data))]
fn show_term(term: &str, data: &str, config: GradingConfig) -> Result<()> {
    let records = load_records(data)?;
    let grouping = group_by_term(&records);

    let Some(summary) = term_summary(&grouping, term, config)? else {
        warn!(term = %term, "No records for term");
        return Ok(());
    };

    for record in &grouping[term] {
        let counted = !config.is_excluded(&record.grade);
        info!(
            code = %record.code,
            title = %record.title,
            credits = record.credits,
            grade = %record.grade,
            counted,
            "Course"
        );
    }

    println!("GPA: {:.2}", summary.gpa);
    println!("CPA: {:.2}", summary.cpa);

    Ok(())
}

/// Lists every term with its record counts, plus a transcript summary.
fn list_terms(data: &str, policy: GradePolicy) -> Result<()> {
    let records = load_records(data)?;
    let grouping = group_by_term(&records);

    for (term, term_records) in &grouping {
        let excluded = term_records
            .iter()
            .filter(|r| policy.is_excluded(&r.grade))
            .count();
        let graded = term_records.len() - excluded;
        let credits: i32 = term_records.iter().map(|r| r.credits).sum();

        info!(
            term = %term,
            courses = term_records.len(),
            graded,
            excluded,
            credits,
            "Term"
        );
    }

    info!(
        total = records.len(),
        terms = grouping.len(),
        "Transcript summary"
    );

    Ok(())
}
