use std::{path::{Path, PathBuf}, sync::Arc};
use anyhow::Context;
use clap::Parser;
use itertools::{Itertools, MinMaxResult};
use serde::{Deserialize, Serialize};
use tracing::{info, Level};
use mlsense::{
    circuit::{AreaModify, CurrentSenseAmp, MultilevelSenseAmp, SenseAmpConfig, SenseAmpFootprint},
    tech::DeviceParams,
};

fn main_result() -> anyhow::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.level())
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    let config = Config::load(&args.config)?;
    config.device.validate().context("check device params")?;
    let params = Arc::new(config.device.clone());
    info!("technology {}nm {}, {} rows per sub array", params.tech_node, params.roadmap, params.num_row_subarray);

    let sense_amp = CurrentSenseAmp::with_footprint(params.clone(), config.footprint.unwrap_or_default());
    let mut msa = MultilevelSenseAmp::with_sense_amp(params, sense_amp);
    msa.initialize(config.sense_amp.clone()).context("initialize multilevel sense amp")?;

    let workload = &config.workload;
    if let MinMaxResult::MinMax(low, high) = workload.column_resistances.iter().minmax_by(|a, b| a.total_cmp(b)) {
        info!("{} columns, resistance from {:e} to {:e} ohm", workload.column_resistances.len(), low, high);
    }

    msa.calculate_area(workload.height, workload.width, workload.layout).context("calculate area")?;
    msa.calculate_latency(&workload.column_resistances, workload.num_col_muxed, workload.num_reads)
        .context("calculate latency")?;
    msa.calculate_power(&workload.column_resistances, workload.num_reads)
        .context("calculate power")?;

    msa.print_property(&config.name);
    Ok(())
}

fn main() {
    if let Err(e) = main_result() {
        eprint!("Err: {:#}\n", e);
        std::process::exit(1);
    }
}

/// Area, latency and energy of a multi-level sense amplifier
#[derive(Parser, Debug)]
#[command(name = "mlsense")]
#[command(about = "Multi-level sense amplifier model", long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    pub fn level(&self) -> Level {
        if self.verbose { Level::DEBUG } else { Level::INFO }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_name")]
    pub name: String,
    pub device: DeviceParams,
    pub sense_amp: SenseAmpConfig,
    pub footprint: Option<SenseAmpFootprint>,
    pub workload: Workload,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Workload {
    pub column_resistances: Vec<f64>,
    #[serde(default = "one")]
    pub num_col_muxed: f64,
    #[serde(default = "one")]
    pub num_reads: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub layout: AreaModify,
}

fn default_name() -> String {
    "Multilevel SenseAmp".into()
}

fn one() -> f64 {
    1.0
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config file '{}'", path.display()))?;
        serde_json::from_str(&content).context("parse config file")
    }
}
