use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FilePocketsConfig, FileReportConfig, FileViewerConfig};
use super::models::{CollectConfig, DetectConfig, ReportSummaryConfig, ResiduesConfig, ViewConfig};
use crate::cli::{CollectArgs, ConfigArgs, DetectArgs, ReportArgs, ResiduesArgs, ViewArgs};
use crate::error::{CliError, Result};
use pocketscan::core::models::ids::PocketId;
use pocketscan::engine::config::{
    DetectionConfigBuilder, MalformedPolicy, PocketLayout, PocketNaming, PredictorKind,
    ReportConfig, ViewerConfig,
};
use std::path::PathBuf;

pub fn build_detect_config(args: &DetectArgs) -> Result<DetectConfig> {
    let defaults = DefaultsConfig::default();
    let mut file_config = load_file_config(&args.config)?;

    let predictor_file = file_config.predictor.take().unwrap_or_default();
    let kind = match args.predictor {
        Some(kind) => kind,
        None => parse_config_value::<PredictorKind>(
            predictor_file.kind.as_deref().unwrap_or(&defaults.predictor),
        )?,
    };
    let policy = merge_policy(
        args.on_malformed,
        file_config.on_malformed.as_deref(),
        &defaults,
    )?;
    let naming = merge_naming(file_config.pockets.take(), args.max_pocket_id)?;
    let report = merge_report(file_config.report.take(), None);

    let output_file = file_config.output.take().unwrap_or_default();
    let summary_path = args
        .output
        .clone()
        .or(output_file.summary)
        .unwrap_or_else(|| PathBuf::from(&defaults.summary_file));
    let residue_table_path = args.residues.clone().or(output_file.residues);

    let mut builder = DetectionConfigBuilder::new()
        .predictor(kind)
        .extra_args(predictor_file.extra_args.unwrap_or_default())
        .malformed_policy(policy)
        .pocket_naming(naming)
        .report(report)
        .summary_path(summary_path)
        .residue_table_path(residue_table_path);
    if let Some(executable) = args.executable.clone().or(predictor_file.executable) {
        builder = builder.executable(executable);
    }
    let core_config = builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let viewer = args
        .view
        .then(|| merge_viewer(file_config.viewer.take(), None, None));

    Ok(DetectConfig {
        input_path: args.input.clone(),
        core_config,
        viewer,
    })
}

pub fn build_collect_config(args: &CollectArgs) -> Result<CollectConfig> {
    let defaults = DefaultsConfig::default();
    let mut file_config = load_file_config(&args.config)?;

    let policy = merge_policy(
        args.on_malformed,
        file_config.on_malformed.as_deref(),
        &defaults,
    )?;
    let naming = merge_naming(file_config.pockets.take(), args.max_pocket_id)?;
    let summary_path = args
        .output
        .clone()
        .or(file_config.output.and_then(|o| o.summary))
        .unwrap_or_else(|| PathBuf::from(&defaults.summary_file));

    Ok(CollectConfig {
        layout: PocketLayout::with_naming(&args.pocket_dir, naming),
        policy,
        summary_path,
    })
}

pub fn build_report_config(args: &ReportArgs) -> Result<ReportSummaryConfig> {
    let defaults = DefaultsConfig::default();
    let mut file_config = load_file_config(&args.config)?;

    let report = merge_report(file_config.report.take(), args.separator.clone());
    if report.residue_separator.is_empty() {
        return Err(CliError::Config(
            "The residue separator cannot be empty.".to_string(),
        ));
    }
    let summary_path = args
        .output
        .clone()
        .or(file_config.output.and_then(|o| o.summary))
        .unwrap_or_else(|| PathBuf::from(&defaults.summary_file));

    Ok(ReportSummaryConfig {
        report_path: args.report.clone(),
        separator: report.residue_separator,
        summary_path,
    })
}

pub fn build_residues_config(args: &ResiduesArgs) -> Result<ResiduesConfig> {
    let defaults = DefaultsConfig::default();
    let file_config = load_file_config(&args.config)?;

    let policy = merge_policy(
        args.on_malformed,
        file_config.on_malformed.as_deref(),
        &defaults,
    )?;
    let output_path = args
        .output
        .clone()
        .or(file_config.output.and_then(|o| o.residues))
        .unwrap_or_else(|| PathBuf::from(&defaults.residue_file));

    Ok(ResiduesConfig {
        input_path: args.input.clone(),
        policy,
        output_path,
    })
}

pub fn build_view_config(args: &ViewArgs) -> Result<ViewConfig> {
    let file_config = load_file_config(&args.config)?;
    Ok(ViewConfig {
        input_path: args.input.clone(),
        viewer: merge_viewer(file_config.viewer, args.viewer.clone(), args.script.clone()),
    })
}

fn load_file_config(args: &ConfigArgs) -> Result<FileConfig> {
    let file_config = match &args.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    apply_set_values(file_config, &args.set_values)
}

fn parse_config_value<T>(value: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| CliError::Config(e.to_string()))
}

fn merge_policy(
    cli_val: Option<MalformedPolicy>,
    file_val: Option<&str>,
    defaults: &DefaultsConfig,
) -> Result<MalformedPolicy> {
    match cli_val {
        Some(policy) => Ok(policy),
        None => parse_config_value(file_val.unwrap_or(&defaults.on_malformed)),
    }
}

fn merge_naming(file_val: Option<FilePocketsConfig>, cli_max: Option<u32>) -> Result<PocketNaming> {
    let file_val = file_val.unwrap_or_default();
    let base = PocketNaming::default();
    let max_pocket_id = match cli_max.or(file_val.max_pocket_id) {
        Some(n) => Some(PocketId::new(n).ok_or_else(|| {
            CliError::Config("`pockets.max-pocket-id` must be at least 1.".to_string())
        })?),
        None => None,
    };
    Ok(PocketNaming {
        subdirectory: file_val.subdirectory.unwrap_or(base.subdirectory),
        prefix: file_val.prefix.unwrap_or(base.prefix),
        suffix: file_val.suffix.unwrap_or(base.suffix),
        extension: file_val.extension.unwrap_or(base.extension),
        max_pocket_id,
    })
}

fn merge_report(file_val: Option<FileReportConfig>, cli_separator: Option<String>) -> ReportConfig {
    let file_val = file_val.unwrap_or_default();
    let base = ReportConfig::default();
    ReportConfig {
        file_name: file_val.file_name.unwrap_or(base.file_name),
        residue_separator: cli_separator
            .or(file_val.residue_separator)
            .unwrap_or(base.residue_separator),
    }
}

fn merge_viewer(
    file_val: Option<FileViewerConfig>,
    cli_program: Option<PathBuf>,
    cli_script: Option<String>,
) -> ViewerConfig {
    let file_val = file_val.unwrap_or_default();
    let base = ViewerConfig::default();
    let extra_args = file_val.args.unwrap_or_default();
    let (program, args) = match cli_program.or(file_val.program) {
        // Platform launcher arguments only apply to the platform default program.
        Some(program) => (program, extra_args),
        None => {
            let mut args = base.args;
            args.extend(extra_args);
            (base.program, args)
        }
    };
    ViewerConfig {
        program,
        args,
        script_name: cli_script.or(file_val.script_name).or(base.script_name),
    }
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let value = value_str.to_string();

        match key {
            "on-malformed" => config.on_malformed = Some(value),
            "predictor.kind" => {
                config.predictor.get_or_insert_with(Default::default).kind = Some(value)
            }
            "predictor.executable" => {
                config
                    .predictor
                    .get_or_insert_with(Default::default)
                    .executable = Some(PathBuf::from(value))
            }
            "pockets.subdirectory" => {
                config
                    .pockets
                    .get_or_insert_with(Default::default)
                    .subdirectory = Some(value)
            }
            "pockets.prefix" => {
                config.pockets.get_or_insert_with(Default::default).prefix = Some(value)
            }
            "pockets.suffix" => {
                config.pockets.get_or_insert_with(Default::default).suffix = Some(value)
            }
            "pockets.extension" => {
                config.pockets.get_or_insert_with(Default::default).extension = Some(value)
            }
            "pockets.max-pocket-id" => {
                config
                    .pockets
                    .get_or_insert_with(Default::default)
                    .max_pocket_id = Some(value_str.parse().map_err(|_| {
                    CliError::Config(format!("Invalid integer value for {}: {}", key, value_str))
                })?);
            }
            "report.file-name" => {
                config.report.get_or_insert_with(Default::default).file_name = Some(value)
            }
            "report.residue-separator" => {
                config
                    .report
                    .get_or_insert_with(Default::default)
                    .residue_separator = Some(value)
            }
            "viewer.program" => {
                config.viewer.get_or_insert_with(Default::default).program =
                    Some(PathBuf::from(value))
            }
            "viewer.script-name" => {
                config.viewer.get_or_insert_with(Default::default).script_name = Some(value)
            }
            "output.summary" => {
                config.output.get_or_insert_with(Default::default).summary =
                    Some(PathBuf::from(value))
            }
            "output.residues" => {
                config.output.get_or_insert_with(Default::default).residues =
                    Some(PathBuf::from(value))
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn detect_args(extra: &[&str]) -> DetectArgs {
        let mut argv = vec!["pocketscan", "detect", "-i", "1tup.pdb"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Detect(args) => args,
            other => panic!("Expected 'detect' subcommand, got {:?}", other),
        }
    }

    fn write_config(dir: &Path, content: &str) -> String {
        let path = dir.join("pocketscan.toml");
        fs::write(&path, content).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn detect_defaults_without_file() {
        let app = build_detect_config(&detect_args(&[])).unwrap();
        let cfg = app.core_config;

        assert_eq!(app.input_path, PathBuf::from("1tup.pdb"));
        assert_eq!(cfg.predictor.kind, PredictorKind::Fpocket);
        assert_eq!(cfg.predictor.executable, PathBuf::from("fpocket"));
        assert_eq!(cfg.malformed_policy, MalformedPolicy::Skip);
        assert_eq!(cfg.pocket_naming, PocketNaming::default());
        assert_eq!(
            cfg.output.summary_path,
            PathBuf::from(DefaultsConfig::default().summary_file)
        );
        assert_eq!(cfg.output.residue_table_path, None);
        assert!(app.viewer.is_none());
    }

    #[test]
    fn detect_reads_file_and_merges() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
            on-malformed = "abort"

            [predictor]
            kind = "p2rank"
            executable = "./p2rank_2.5/prank"
            extra-args = ["-threads", "2"]

            [pockets]
            max-pocket-id = 99

            [output]
            summary = "out/summary.csv"
            residues = "out/residues.csv"
            "#,
        );

        let app = build_detect_config(&detect_args(&["-c", &path])).unwrap();
        let cfg = app.core_config;

        assert_eq!(cfg.predictor.kind, PredictorKind::P2rank);
        assert_eq!(cfg.predictor.executable, PathBuf::from("./p2rank_2.5/prank"));
        assert_eq!(cfg.predictor.extra_args, vec!["-threads", "2"]);
        assert_eq!(cfg.malformed_policy, MalformedPolicy::Abort);
        assert_eq!(cfg.pocket_naming.max_pocket_id, PocketId::new(99));
        assert_eq!(cfg.output.summary_path, PathBuf::from("out/summary.csv"));
        assert_eq!(
            cfg.output.residue_table_path,
            Some(PathBuf::from("out/residues.csv"))
        );
    }

    #[test]
    fn cli_flags_override_file_values() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
            on-malformed = "abort"
            [predictor]
            kind = "p2rank"
            [pockets]
            max-pocket-id = 99
            "#,
        );

        let args = detect_args(&[
            "-c",
            &path,
            "--predictor",
            "fpocket",
            "--on-malformed",
            "skip",
            "--max-pocket-id",
            "5",
            "-o",
            "summary.csv",
            "--view",
        ]);
        let app = build_detect_config(&args).unwrap();
        let cfg = app.core_config;

        assert_eq!(cfg.predictor.kind, PredictorKind::Fpocket);
        assert_eq!(cfg.predictor.executable, PathBuf::from("fpocket"));
        assert_eq!(cfg.malformed_policy, MalformedPolicy::Skip);
        assert_eq!(cfg.pocket_naming.max_pocket_id, PocketId::new(5));
        assert_eq!(cfg.output.summary_path, PathBuf::from("summary.csv"));
        assert!(app.viewer.is_some());
    }

    #[test]
    fn set_values_override_file() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
            [pockets]
            prefix = "cavity"
            "#,
        );

        let args = detect_args(&[
            "-c",
            &path,
            "-S",
            "pockets.prefix=pocket",
            "-S",
            "pockets.max-pocket-id=12",
            "-S",
            "predictor.kind=p2rank",
            "-S",
            "report.residue-separator=,",
        ]);
        let cfg = build_detect_config(&args).unwrap().core_config;

        assert_eq!(cfg.pocket_naming.prefix, "pocket");
        assert_eq!(cfg.pocket_naming.max_pocket_id, PocketId::new(12));
        assert_eq!(cfg.predictor.kind, PredictorKind::P2rank);
        assert_eq!(cfg.predictor.executable, PathBuf::from("prank"));
        assert_eq!(cfg.report.residue_separator, ",");
    }

    #[test]
    fn invalid_values_are_config_errors() {
        for set in [
            "pockets.max-pocket-id=lots",
            "pockets.max-pocket-id=0",
            "predictor.kind=cavityplus",
            "on-malformed=ignore",
            "nonsense.key=1",
            "missing-equals",
        ] {
            let result = build_detect_config(&detect_args(&["-S", set]));
            assert!(
                matches!(result, Err(CliError::Config(_))),
                "expected config error for {}",
                set
            );
        }
    }

    #[test]
    fn empty_pocket_naming_is_rejected() {
        let args = detect_args(&["-S", "pockets.prefix=", "-S", "pockets.suffix="]);
        assert!(matches!(
            build_detect_config(&args),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn collect_uses_pocket_dir_and_naming() {
        let argv = [
            "pocketscan",
            "collect",
            "1tup_out/pockets",
            "-S",
            "pockets.suffix=",
            "--on-malformed",
            "abort",
        ];
        let Commands::Collect(args) = Cli::parse_from(argv).command else {
            panic!("Expected 'collect' subcommand");
        };
        let app = build_collect_config(&args).unwrap();

        assert_eq!(app.layout.directory, PathBuf::from("1tup_out/pockets"));
        assert_eq!(app.layout.path_for(PocketId::FIRST), PathBuf::from("1tup_out/pockets/pocket1.pdb"));
        assert_eq!(app.policy, MalformedPolicy::Abort);
        assert_eq!(app.summary_path, PathBuf::from("pockets_summary.csv"));
    }

    #[test]
    fn report_separator_precedence() {
        let dir = tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
            [report]
            residue-separator = ","
            "#,
        );

        let parse = |extra: &[&str]| {
            let mut argv = vec!["pocketscan", "report", "pockets.csv", "-c", path.as_str()];
            argv.extend_from_slice(extra);
            match Cli::parse_from(argv).command {
                Commands::Report(args) => build_report_config(&args),
                other => panic!("Expected 'report' subcommand, got {:?}", other),
            }
        };

        assert_eq!(parse(&[]).unwrap().separator, ",");
        assert_eq!(parse(&["--separator", "|"]).unwrap().separator, "|");
        assert!(matches!(
            parse(&["--separator", ""]),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn residues_output_defaults_to_residue_data() {
        let Commands::Residues(args) =
            Cli::parse_from(["pocketscan", "residues", "-i", "1tup.pdb"]).command
        else {
            panic!("Expected 'residues' subcommand");
        };
        let app = build_residues_config(&args).unwrap();
        assert_eq!(app.output_path, PathBuf::from("residue_data.csv"));
        assert_eq!(app.policy, MalformedPolicy::Skip);
    }

    #[test]
    fn explicit_viewer_program_drops_platform_arguments() {
        let Commands::View(args) = Cli::parse_from([
            "pocketscan",
            "view",
            "-i",
            "1tup.pdb",
            "--viewer",
            "pymol",
            "--script",
            "session.pml",
        ])
        .command
        else {
            panic!("Expected 'view' subcommand");
        };
        let app = build_view_config(&args).unwrap();
        assert_eq!(app.viewer.program, PathBuf::from("pymol"));
        assert!(app.viewer.args.is_empty());
        assert_eq!(app.viewer.script_name.as_deref(), Some("session.pml"));
    }

    #[test]
    fn viewer_file_arguments_follow_the_platform_launcher() {
        let dir = tempdir().unwrap();
        let path = write_config(dir.path(), "[viewer]\nargs = [\"-q\"]\n");
        let Commands::View(args) =
            Cli::parse_from(["pocketscan", "view", "-i", "1tup.pdb", "-c", &path]).command
        else {
            panic!("Expected 'view' subcommand");
        };
        let app = build_view_config(&args).unwrap();

        let base = ViewerConfig::default();
        let mut expected = base.args.clone();
        expected.push("-q".to_string());
        assert_eq!(app.viewer.program, base.program);
        assert_eq!(app.viewer.args, expected);
    }
}
