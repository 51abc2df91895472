mod ic;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use diffusion_core::{Dimension, HeatConfig, HeatResult, Preset, run};
use ic::{run_seed, sample_alpha, sample_preset};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Integrate one configuration and write every recorded snapshot
    Run(RunArgs),
    /// Integrate a batch of randomly sampled configurations
    Sweep(SweepArgs),
}

#[derive(Args, Debug)]
struct RunArgs {
    /// Output directory
    #[arg(long)]
    out: PathBuf,

    /// Spatial dimensionality (1, 2 or 3)
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=3))]
    dim: u8,

    /// JSON file holding a full configuration; replaces the flags below
    #[arg(long)]
    config: Option<PathBuf>,

    /// Interior grid points per axis
    #[arg(long, default_value_t = 80)]
    n: usize,

    /// Diffusivity
    #[arg(long, default_value_t = 0.2)]
    alpha: f64,

    /// Requested time step (clamped to the stability bound)
    #[arg(long, default_value_t = 0.0005)]
    dt: f64,

    /// Total simulated time
    #[arg(long, default_value_t = 1.0)]
    t_end: f64,

    /// Initial condition (point|half|bump|two-humps|corner|two-spots)
    #[arg(long, default_value = "point")]
    preset: Preset,

    /// Snapshot cap (defaults to 201 in 1D/2D, 101 in 3D)
    #[arg(long)]
    max_snapshots: Option<usize>,
}

#[derive(Args, Debug)]
struct SweepArgs {
    /// Output directory
    #[arg(long)]
    out: PathBuf,

    /// Spatial dimensionality (1, 2 or 3)
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(1..=3))]
    dim: u8,

    /// Interior grid points per axis
    #[arg(long, default_value_t = 32)]
    n: usize,

    /// Run start index (for deterministic split-by-range)
    #[arg(long, default_value_t = 0)]
    start: usize,

    /// Number of runs to generate
    #[arg(long, default_value_t = 16)]
    count: usize,

    /// Diffusivity min (sampled per run)
    #[arg(long, default_value_t = 0.05)]
    alpha_min: f64,

    /// Diffusivity max (sampled per run)
    #[arg(long, default_value_t = 0.5)]
    alpha_max: f64,

    /// Requested time step
    #[arg(long, default_value_t = 0.001)]
    dt: f64,

    /// Total simulated time per run
    #[arg(long, default_value_t = 0.1)]
    t_end: f64,

    /// Base RNG seed (reproducibility)
    #[arg(long, default_value_t = 123)]
    seed: u64,
}

/// Dimension-erased view of a finished run.
struct RunRecord {
    steps: usize,
    dt: f64,
    h: f64,
    side: usize,
    times: Vec<f64>,
    sup_norm: Vec<f64>,
    total_heat: Vec<f64>,
    snapshots: Vec<Vec<f64>>,
}

impl<const D: usize> From<HeatResult<D>> for RunRecord {
    fn from(r: HeatResult<D>) -> Self {
        let sup_norm = (0..r.len()).map(|i| r.sup_norm(i)).collect();
        let total_heat = (0..r.len()).map(|i| r.total_heat(i)).collect();
        RunRecord {
            steps: r.steps,
            dt: r.dt,
            h: r.h,
            side: r.side,
            times: r.times,
            sup_norm,
            total_heat,
            snapshots: r.snapshots,
        }
    }
}

#[derive(Serialize)]
struct RunMeta<'a> {
    dim: usize,
    config: &'a HeatConfig,
    steps: usize,
    dt: f64,
    h: f64,
    side: usize,
    snapshot_len: usize,
    times: &'a [f64],
    sup_norm: &'a [f64],
    total_heat: &'a [f64],
}

#[derive(Serialize)]
struct SweepRow {
    global_idx: u64,
    run_idx: usize,

    base_seed: u64,
    run_seed: u64,

    dim: usize,
    n: usize,
    alpha: f64,
    preset: Preset,

    t_end: f64,
    steps: usize,
    dt: f64,

    final_sup_norm: f64,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => cmd_run(&args),
        Command::Sweep(args) => cmd_sweep(&args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn dimension(dim: u8) -> Result<Dimension> {
    match Dimension::from_usize(dim as usize) {
        Some(d) => Ok(d),
        None => bail!("dim must be 1, 2 or 3 (got {dim})"),
    }
}

fn simulate(dim: Dimension, cfg: &HeatConfig) -> Result<RunRecord> {
    let record = match dim {
        Dimension::One => run::<1>(cfg).map(RunRecord::from),
        Dimension::Two => run::<2>(cfg).map(RunRecord::from),
        Dimension::Three => run::<3>(cfg).map(RunRecord::from),
    };
    record.with_context(|| format!("{}D run failed", dim.as_usize()))
}

fn load_config(path: &Path) -> Result<HeatConfig> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

fn run_config(args: &RunArgs) -> Result<HeatConfig> {
    if let Some(path) = &args.config {
        return load_config(path);
    }
    Ok(HeatConfig {
        n: args.n,
        alpha: args.alpha,
        dt: args.dt,
        t_end: args.t_end,
        preset: args.preset,
        max_snapshots: args.max_snapshots,
    })
}

fn cmd_run(args: &RunArgs) -> Result<()> {
    let dim = dimension(args.dim)?;
    let cfg = run_config(args)?;
    let record = simulate(dim, &cfg)?;

    fs::create_dir_all(&args.out)?;

    let mut snap_writer = BufWriter::new(File::create(args.out.join("snapshots.bin"))?);
    for snap in &record.snapshots {
        write_f64_vec(&mut snap_writer, snap)?;
    }
    snap_writer.flush()?;

    let meta = RunMeta {
        dim: dim.as_usize(),
        config: &cfg,
        steps: record.steps,
        dt: record.dt,
        h: record.h,
        side: record.side,
        snapshot_len: record.snapshots.first().map_or(0, Vec::len),
        times: &record.times,
        sup_norm: &record.sup_norm,
        total_heat: &record.total_heat,
    };
    let meta_file = BufWriter::new(File::create(args.out.join("meta.json"))?);
    serde_json::to_writer_pretty(meta_file, &meta)?;

    info!("Wrote run to: {}", args.out.display());
    info!(
        "Snapshots: {} (steps={}, dt={:e}, final sup-norm={:.6})",
        record.snapshots.len(),
        record.steps,
        record.dt,
        record.sup_norm.last().copied().unwrap_or(0.0)
    );

    Ok(())
}

fn cmd_sweep(args: &SweepArgs) -> Result<()> {
    if args.alpha_max <= args.alpha_min {
        bail!("alpha_max must be > alpha_min");
    }
    if args.alpha_min <= 0.0 {
        bail!("alpha_min must be > 0");
    }
    let dim = dimension(args.dim)?;

    fs::create_dir_all(&args.out)?;

    let mut final_writer = BufWriter::new(File::create(args.out.join("final.bin"))?);
    let mut meta_file = BufWriter::new(
        OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(args.out.join("meta.jsonl"))?,
    );

    let mut global_idx: u64 = 0;

    for local in 0..args.count {
        let run_idx = args.start + local;
        let seed = run_seed(args.seed, run_idx);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let alpha = sample_alpha(&mut rng, args.alpha_min, args.alpha_max);
        let preset = sample_preset(&mut rng, dim);

        let cfg = HeatConfig::new(args.n, alpha, args.dt, args.t_end, preset);
        let record = simulate(dim, &cfg).with_context(|| format!("run {run_idx}"))?;

        if let Some(last) = record.snapshots.last() {
            write_f64_vec(&mut final_writer, last)?;
        }

        let row = SweepRow {
            global_idx,
            run_idx,
            base_seed: args.seed,
            run_seed: seed,
            dim: dim.as_usize(),
            n: args.n,
            alpha,
            preset,
            t_end: args.t_end,
            steps: record.steps,
            dt: record.dt,
            final_sup_norm: record.sup_norm.last().copied().unwrap_or(0.0),
        };
        serde_json::to_writer(&mut meta_file, &row)?;
        meta_file.write_all(b"\n")?;

        global_idx += 1;
    }

    final_writer.flush()?;
    meta_file.flush()?;

    info!("Wrote sweep to: {}", args.out.display());
    info!("Runs: {} (dim={}, n={})", global_idx, dim.as_usize(), args.n);

    Ok(())
}

fn write_f64_vec<W: Write>(w: &mut W, v: &[f64]) -> std::io::Result<()> {
    for &x in v {
        w.write_all(&x.to_le_bytes())?;
    }
    Ok(())
}
