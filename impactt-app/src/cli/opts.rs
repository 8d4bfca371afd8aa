use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "impactt",
    version,
    about = "IMPACT-T run wrapper: render the input file, stage data, launch"
)]
pub struct Cli {
    /// Directory containing config.yaml (defaults to the current directory)
    #[arg(long)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Full pipeline: render the input file, stage files, launch the simulator
    Run(RunCmd),
    /// Render the input file only
    Render(RenderCmd),
    /// Stage data files into the run directory only
    Stage(StageCmd),
    /// Print rows from a fort.N summary file
    Fort(FortCmd),
    /// Write a sample config.yaml
    Init(InitCmd),
}

#[derive(Debug, Args, Clone)]
pub struct RunCmd {
    /// Input-file template with {name} placeholders
    #[arg(long)]
    pub template: PathBuf,
    /// YAML mapping of parameter name to scalar value
    #[arg(long)]
    pub params: PathBuf,
    /// Run directory (created if missing)
    #[arg(long, default_value = ".")]
    pub run_dir: PathBuf,
    /// Stage only this file out of the data directory (repeatable)
    #[arg(long = "data-file")]
    pub data_files: Vec<String>,
    /// Existing particle distribution to stage as partcl.data
    #[arg(long)]
    pub particles: Option<PathBuf>,
    /// MPI process count; launches through mpirun when > 1
    #[arg(long, default_value_t = 1)]
    pub num_procs: u32,
    /// Kill the simulator after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,
    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct RenderCmd {
    /// Input-file template with {name} placeholders
    #[arg(long)]
    pub template: PathBuf,
    /// YAML mapping of parameter name to scalar value
    #[arg(long)]
    pub params: PathBuf,
    /// Run directory to write ImpactT.in into
    #[arg(long, default_value = ".")]
    pub run_dir: PathBuf,
    /// Print to stdout instead of writing the file
    #[arg(long)]
    pub stdout: bool,
}

#[derive(Debug, Args, Clone)]
pub struct StageCmd {
    /// Run directory (created if missing)
    #[arg(long, default_value = ".")]
    pub run_dir: PathBuf,
    /// Stage only this file out of the data directory (repeatable)
    #[arg(long = "data-file")]
    pub data_files: Vec<String>,
}

#[derive(Debug, Args, Clone)]
pub struct FortCmd {
    /// fort file number, e.g. 26
    pub num: u32,
    /// Run directory holding the fort files
    #[arg(long, default_value = ".")]
    pub run_dir: PathBuf,
    /// Print only the rows nearest these longitudinal positions (repeatable)
    #[arg(long = "z")]
    pub z: Vec<f64>,
}

#[derive(Debug, Args, Clone)]
pub struct InitCmd {
    /// Target directory (defaults to the current directory)
    pub dir: Option<PathBuf>,
    /// Overwrite an existing config.yaml
    #[arg(long)]
    pub force: bool,
}
