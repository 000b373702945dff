//! labdata - assemble lab publication data from BibTeX and rosters
//!
//! ```text
//! labdata --config lab.yaml --output site/_data/lab.yaml
//! labdata --config lab.yaml --output lab.json
//! labdata --config lab.yaml --validate
//! labdata --config lab.yaml --unresolved
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, ArgGroup, Parser};
use labdata_core::{
    assemble_with_diagnostics, export, AssemblyResult, ExportFormat, LabDataConfig,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "labdata",
    version,
    about = "Assemble lab publications, people and projects into YAML or JSON"
)]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["output", "validate", "unresolved"])
))]
struct Cli {
    /// Lab configuration file (YAML, or TOML with a .toml extension)
    #[arg(short, long, value_name = "PATH")]
    config: PathBuf,

    /// Export format: yaml or json (default: from the output extension, else yaml)
    #[arg(short, long, value_name = "FORMAT")]
    format: Option<ExportFormat>,

    /// Write the assembled data set to this file
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Report counts and data problems; fails on unknown project ids
    #[arg(long)]
    validate: bool,

    /// List author names that matched no lab member
    #[arg(long)]
    unresolved: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> labdata_core::Result<ExitCode> {
    tracing::debug!(config = %cli.config.display(), "Loading configuration");
    let config = LabDataConfig::from_file(&cli.config)?;
    let result = assemble_with_diagnostics(&config)?;

    if let Some(output) = &cli.output {
        let format = cli
            .format
            .or_else(|| ExportFormat::from_path(output))
            .unwrap_or_default();
        run_export(&result, output, format)?;
        return Ok(ExitCode::SUCCESS);
    }

    if cli.validate {
        return Ok(run_validate(&result));
    }

    print_unresolved(&result);
    Ok(ExitCode::SUCCESS)
}

fn run_export(result: &AssemblyResult, output: &Path, format: ExportFormat) -> labdata_core::Result<()> {
    export(&result.data, output, format)?;

    println!("Wrote {}", output.display());
    print_counts(result);
    Ok(())
}

fn run_validate(result: &AssemblyResult) -> ExitCode {
    let diagnostics = &result.diagnostics;
    print_counts(result);

    if !diagnostics.unresolved_authors.is_empty() {
        println!();
        println!("Unresolved authors ({}):", diagnostics.unresolved_authors.len());
        for name in &diagnostics.unresolved_authors {
            println!("  - {name}");
        }
    }

    if !diagnostics.ambiguous_aliases.is_empty() {
        println!();
        println!("Ambiguous aliases ({}):", diagnostics.ambiguous_aliases.len());
        for report in &diagnostics.ambiguous_aliases {
            println!("  - {} ({})", report.alias, report.person_ids.join(", "));
        }
    }

    if !diagnostics.duplicate_bib_ids.is_empty() {
        println!();
        println!("Duplicate bib ids ({}):", diagnostics.duplicate_bib_ids.len());
        for bib_id in &diagnostics.duplicate_bib_ids {
            println!("  - {bib_id}");
        }
    }

    let errors = diagnostics.unknown_projects.len();
    if errors > 0 {
        println!();
        println!("Unknown project IDs ({errors}):");
        for id in &diagnostics.unknown_projects {
            println!("  - {id}");
        }
        println!();
        println!("Validation found {errors} error(s).");
        return ExitCode::FAILURE;
    }

    println!();
    println!("Validation passed.");
    ExitCode::SUCCESS
}

fn print_unresolved(result: &AssemblyResult) {
    let unresolved = &result.diagnostics.unresolved_authors;
    if unresolved.is_empty() {
        println!("All authors resolved.");
        return;
    }

    println!("Unresolved authors ({}):", unresolved.len());
    for name in unresolved {
        println!("  {name}");
    }
}

fn print_counts(result: &AssemblyResult) {
    let data = &result.data;
    println!("Publications: {}", data.publications.len());
    println!("People: {}", data.people.len());
    println!("Projects: {}", data.projects.len());
    println!("Collaborators: {}", data.collaborators.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_exactly_one_mode_required() {
        assert!(Cli::try_parse_from(["labdata", "--config", "lab.yaml"]).is_err());
        assert!(
            Cli::try_parse_from(["labdata", "-c", "lab.yaml", "--validate", "--unresolved"])
                .is_err()
        );
        let cli = Cli::try_parse_from(["labdata", "-c", "lab.yaml", "--validate", "-vv"]).unwrap();
        assert!(cli.validate);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_format_flag() {
        let cli = Cli::try_parse_from(["labdata", "-c", "lab.yaml", "-o", "out", "-f", "json"])
            .unwrap();
        assert_eq!(cli.format, Some(ExportFormat::Json));
        assert!(Cli::try_parse_from(["labdata", "-c", "l", "-o", "o", "-f", "xml"]).is_err());
    }
}
