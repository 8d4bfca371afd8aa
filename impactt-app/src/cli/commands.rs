use crate::cli::opts::*;

use anyhow::{bail, Result};
use impactt_core::Params;
use impactt_run::{
    ensure_run_dir, load_params, load_template, populate_data_files, read_fort, write_input_file,
    Beamline, Launcher, ParticleFile, ProcessError, RunError, SiteConfig, CONFIG_FILE, INPUT_FILE,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

const SAMPLE_CONFIG: &str = "\
# Site paths for the IMPACT-T wrapper. Values may reference environment
# variables as $VAR or ${VAR}.
IMPACT_EXE_PATH: ${HOME}/bin/ImpactTexe
DATA_DIR: ${HOME}/impactt/data
";

pub async fn run_cli(args: Cli) -> Result<()> {
    match args.cmd.clone() {
        Command::Run(cmd) => run_cmd(&args, cmd).await,
        Command::Render(cmd) => render_cmd(cmd),
        Command::Stage(cmd) => stage_cmd(&args, cmd),
        Command::Fort(cmd) => fort_cmd(cmd),
        Command::Init(cmd) => init_cmd(cmd),
    }
}

fn load_config(args: &Cli) -> Result<SiteConfig> {
    let config = match &args.config_dir {
        Some(dir) => SiteConfig::load_from(dir)?,
        None => SiteConfig::load()?,
    };
    Ok(config)
}

async fn run_cmd(args: &Cli, cmd: RunCmd) -> Result<()> {
    let config = load_config(args)?;
    let template = load_template(&cmd.template)?;
    let params = load_params(&cmd.params)?;
    let launcher = Launcher::new(
        &config.impact_exe_path,
        cmd.num_procs,
        cmd.timeout_secs.map(Duration::from_secs),
    )?;

    let mut beamline = Beamline::new(&config, template, params, launcher, &cmd.run_dir);
    if !cmd.data_files.is_empty() {
        beamline = beamline.with_data_files(cmd.data_files);
    }
    if let Some(particles) = &cmd.particles {
        beamline = beamline.with_distribution(Box::new(ParticleFile::new(particles)));
    }

    let report = match beamline.run().await {
        Ok(report) => report,
        // the simulator's own exit code is the caller's exit code
        Err(RunError::Process(ProcessError::Exited { code })) => {
            eprintln!("simulator exited with status {code}");
            std::process::exit(code);
        }
        Err(e) => return Err(e.into()),
    };

    // fort.26 is only there if the simulator wrote it; stay quiet otherwise
    if let Ok(true) = beamline.has_backward_motion() {
        warn!("reference particle reversed direction (fort.26 avg_pz < 0)");
    }

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "run {} finished in {:.1}s (exit {})",
            report.run_id, report.wall_time_secs, report.exit_code
        );
    }
    Ok(())
}

fn render_cmd(cmd: RenderCmd) -> Result<()> {
    let template = load_template(&cmd.template)?;
    let params = load_params(&cmd.params)?;

    if cmd.stdout {
        print!("{}", template.render(&params.group(Params::INPUT_GROUP))?);
        return Ok(());
    }
    ensure_run_dir(&cmd.run_dir)?;
    let path = write_input_file(&template, &params, &cmd.run_dir, INPUT_FILE)?;
    println!("wrote {}", path.display());
    Ok(())
}

fn stage_cmd(args: &Cli, cmd: StageCmd) -> Result<()> {
    let config = load_config(args)?;
    ensure_run_dir(&cmd.run_dir)?;
    let files = if cmd.data_files.is_empty() {
        None
    } else {
        Some(cmd.data_files.as_slice())
    };
    let staged = populate_data_files(&config.data_dir, &cmd.run_dir, files)?;
    println!("staged {} file(s) into {}", staged.len(), cmd.run_dir.display());
    Ok(())
}

fn fort_cmd(cmd: FortCmd) -> Result<()> {
    let table = read_fort(&cmd.run_dir, cmd.num)?;
    if let Some(names) = table.names() {
        println!("{}", names.join("\t"));
    }

    let rows: Vec<&[f64]> = if cmd.z.is_empty() {
        table.rows().collect()
    } else {
        let Some(axis) = table.axis() else {
            bail!("fort.{} has no named longitudinal column", cmd.num);
        };
        table.rows_nearest(axis, &cmd.z)?
    };
    for row in rows {
        let line = row
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("\t");
        println!("{line}");
    }
    Ok(())
}

fn init_cmd(cmd: InitCmd) -> Result<()> {
    let dir = cmd.dir.unwrap_or_else(|| PathBuf::from("."));
    let path = dir.join(CONFIG_FILE);
    if path.exists() && !cmd.force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    std::fs::create_dir_all(&dir)?;
    std::fs::write(&path, SAMPLE_CONFIG)?;
    println!("wrote {}", path.display());
    Ok(())
}
