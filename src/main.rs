use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use sybase_bq_types::commands::map_types;
use sybase_bq_types::config::{MapperConfig, DEFAULT_OUTPUT_DIR, OUTPUT_DIR_ENV, OVERRIDES_PATH_ENV};
use sybase_bq_types::db::dataform::write_include;
use sybase_bq_types::db::report::TypeMappingReport;

#[derive(Debug, Parser)]
#[command(name = "sybase-bq-types")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Map Sybase column types to BigQuery column types", long_about = None)]
struct Args {
    /// Sybase column types to map, e.g. `int` or `varchar(255)`
    #[arg(required_unless_present = "dataform")]
    types: Vec<String>,

    /// Print resolutions as JSON
    #[arg(long)]
    json: bool,

    /// Write the unmapped-type report into the output directory
    #[arg(long)]
    report: bool,

    /// Write the Dataform type mapping include under `<output>/dataform`
    #[arg(long)]
    dataform: bool,

    /// Override file of `SOURCE=TARGET` lines
    #[arg(long, env = OVERRIDES_PATH_ENV)]
    overrides: Option<PathBuf>,

    /// Directory for generated files
    #[arg(long, env = OUTPUT_DIR_ENV, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,
}

impl Args {
    fn config(&self) -> MapperConfig {
        MapperConfig {
            overrides_path: self.overrides.clone(),
            output_dir: self.output_dir.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.config();
    let mapper = config
        .build_mapper()
        .context("building Sybase to BigQuery type mapper")?;

    let resolutions = map_types(&mapper, &args.types);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&resolutions)?);
    } else {
        for r in &resolutions {
            println!("{} -> {}", r.source_type, r.target_type);
        }
    }

    if args.report {
        let mut report = TypeMappingReport::new();
        for r in &resolutions {
            report.record(r);
        }
        if report
            .write_to(&config.output_dir)
            .context("writing type mapping report")?
            .is_none()
        {
            log::info!("All types mapped explicitly; no report written");
        }
    }

    if args.dataform {
        write_include(&config.output_dir.join("dataform"), &mapper)
            .context("writing Dataform type mapping include")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_parse_types_and_flags() {
        let args = Args::try_parse_from([
            "sybase-bq-types",
            "--json",
            "--report",
            "--output-dir",
            "/tmp/out",
            "int",
            "varchar(255)",
        ])
        .unwrap();
        assert!(args.json);
        assert!(args.report);
        assert!(!args.dataform);
        assert_eq!(args.types, vec!["int", "varchar(255)"]);
        assert_eq!(args.config().output_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_unknown_short_flag_is_rejected() {
        let err = Args::try_parse_from(["sybase-bq-types", "-x", "int"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_unknown_long_flag_is_rejected() {
        let err = Args::try_parse_from(["sybase-bq-types", "--bogus", "int"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_types_required_without_dataform() {
        let err = Args::try_parse_from(["sybase-bq-types", "--json"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_dataform_alone_is_accepted() {
        let args = Args::try_parse_from(["sybase-bq-types", "--dataform"]).unwrap();
        assert!(args.dataform);
        assert!(args.types.is_empty());
    }

    #[test]
    fn test_help_is_reported_not_exited() {
        let err = Args::try_parse_from(["sybase-bq-types", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_overrides_flag_flows_into_config() {
        let args = Args::try_parse_from([
            "sybase-bq-types",
            "--overrides",
            "config/type_mappings.txt",
            "bit",
        ])
        .unwrap();
        assert_eq!(
            args.config().overrides_path,
            Some(PathBuf::from("config/type_mappings.txt"))
        );
    }
}
