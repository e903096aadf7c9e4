//! Render a report request to PDF or text
//!
//! Reads a `ReportRequest` as JSON and writes the rendered report.
//!
//! Usage:
//!   cargo run --release --bin render_report -- request.json
//!   cargo run --release --bin render_report -- request.json --preset comprehensive --format txt
//!   cargo run --release --bin render_report -- request.json --config report.json --output out.pdf

use report_oxide::config::{Preset, ReportConfig};
use report_oxide::delivery::{Download, OutputFormat};
use report_oxide::render::generate;
use report_oxide::report::ReportRequest;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

struct CliArgs {
    request: PathBuf,
    preset: Option<String>,
    config: Option<PathBuf>,
    format: OutputFormat,
    output: Option<PathBuf>,
}

impl CliArgs {
    fn from_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();
        let mut request = None;
        let mut preset = None;
        let mut config = None;
        let mut format = OutputFormat::Pdf;
        let mut output = None;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--preset" => {
                    i += 1;
                    preset = args.get(i).cloned();
                },
                "--config" => {
                    i += 1;
                    config = args.get(i).map(PathBuf::from);
                },
                "--format" => {
                    i += 1;
                    let name = args.get(i).map(String::as_str).unwrap_or_default();
                    format = OutputFormat::from_name(name)
                        .ok_or_else(|| format!("unknown format '{}'", name))?;
                },
                "--output" | "-o" => {
                    i += 1;
                    output = args.get(i).map(PathBuf::from);
                },
                other if request.is_none() && !other.starts_with('-') => {
                    request = Some(PathBuf::from(other));
                },
                other => return Err(format!("unexpected argument '{}'", other)),
            }
            i += 1;
        }

        Ok(Self {
            request: request.ok_or("missing request file")?,
            preset,
            config,
            format,
            output,
        })
    }

    fn report_config(&self) -> report_oxide::Result<ReportConfig> {
        if let Some(path) = &self.config {
            return ReportConfig::from_json_file(path);
        }
        let preset = match &self.preset {
            Some(name) => Preset::from_name(name).ok_or_else(|| {
                report_oxide::Error::Config(format!("unknown preset '{}'", name))
            })?,
            None => Preset::Classic,
        };
        Ok(ReportConfig::preset(preset))
    }
}

fn run(args: &CliArgs) -> report_oxide::Result<PathBuf> {
    let json = std::fs::read_to_string(&args.request)?;
    let request = ReportRequest::from_json_str(&json)?;
    let config = args.report_config()?;

    let output = generate(&request, &config, args.format)?;
    let download = Download::new(&request.title, args.format, output);

    match &args.output {
        Some(path) => {
            std::fs::write(path, &download.bytes)?;
            Ok(path.clone())
        },
        None => download.save_in("."),
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match CliArgs::from_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!(
                "Usage: render_report <request.json> [--preset classic|comprehensive|minimal] \
                 [--config file.json] [--format pdf|txt] [--output path]"
            );
            return ExitCode::from(2);
        },
    };

    let start = Instant::now();
    match run(&args) {
        Ok(path) => {
            println!("Wrote {} in {:.1?}", path.display(), start.elapsed());
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
    }
}
