use clap::{Args, Parser, Subcommand};
use pocketscan::engine::config::{MalformedPolicy, PredictorKind};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan",
    version,
    about = "pocketscan - Run a pocket predictor on a protein structure and summarize the residues lining each pocket.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a pocket predictor on a structure and write the pocket summary.
    Detect(DetectArgs),
    /// Summarize an existing directory of per-pocket structure files.
    Collect(CollectArgs),
    /// Summarize an existing consolidated pocket table.
    Report(ReportArgs),
    /// List every residue of a structure file.
    Residues(ResiduesArgs),
    /// Open the viewer session script written next to a structure.
    View(ViewArgs),
}

/// Options shared by every subcommand that reads a configuration file.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S pockets.max-pocket-id=99
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `detect` subcommand.
#[derive(Args, Debug)]
pub struct DetectArgs {
    /// Path to the input structure file (e.g., 1tup.pdb).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the pocket summary table.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Also write the residue table of the whole structure to this path.
    #[arg(short, long, value_name = "PATH")]
    pub residues: Option<PathBuf>,

    /// Pocket predictor to run (fpocket or p2rank).
    #[arg(short, long, value_name = "NAME")]
    pub predictor: Option<PredictorKind>,

    /// Override the predictor executable.
    #[arg(short = 'e', long, value_name = "PATH")]
    pub executable: Option<PathBuf>,

    /// What to do with unreadable ATOM/HETATM records (skip or abort).
    #[arg(long, value_name = "POLICY")]
    pub on_malformed: Option<MalformedPolicy>,

    /// Highest pocket number to collect.
    #[arg(long, value_name = "INT")]
    pub max_pocket_id: Option<u32>,

    /// Open the predictor's viewer session script once the summary is written.
    #[arg(long)]
    pub view: bool,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Arguments for the `collect` subcommand.
#[derive(Args, Debug)]
pub struct CollectArgs {
    /// Directory holding the per-pocket files (e.g., 1tup_out/pockets).
    #[arg(required = true, value_name = "DIR")]
    pub pocket_dir: PathBuf,

    /// Path for the pocket summary table.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// What to do with unreadable ATOM/HETATM records (skip or abort).
    #[arg(long, value_name = "POLICY")]
    pub on_malformed: Option<MalformedPolicy>,

    /// Highest pocket number to collect.
    #[arg(long, value_name = "INT")]
    pub max_pocket_id: Option<u32>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Arguments for the `report` subcommand.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Path to the consolidated pocket table (e.g., 1tup_out/pockets.csv).
    #[arg(required = true, value_name = "PATH")]
    pub report: PathBuf,

    /// Path for the pocket summary table.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Separator between residue descriptors in the report.
    #[arg(long, value_name = "SEP")]
    pub separator: Option<String>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Arguments for the `residues` subcommand.
#[derive(Args, Debug)]
pub struct ResiduesArgs {
    /// Path to the input structure file.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the residue table.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// What to do with unreadable ATOM/HETATM records (skip or abort).
    #[arg(long, value_name = "POLICY")]
    pub on_malformed: Option<MalformedPolicy>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Arguments for the `view` subcommand.
#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Path to the structure the predictor was run on.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Viewer program to launch.
    #[arg(long, value_name = "PROGRAM")]
    pub viewer: Option<PathBuf>,

    /// Session script name inside the output directory.
    #[arg(long, value_name = "NAME")]
    pub script: Option<String>,

    #[command(flatten)]
    pub config: ConfigArgs,
}
