use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use wf_core::units::{m, mps2};
use wf_cost::{
    BrachistochroneConfig, BrachistochroneExperiment, CostFunction, cycloid_min_time_si,
};
use wf_synth::{WaveShape, WaveSpec, Waveform, resample};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config error in {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("--t-scales only applies to bezier shapes, not {shape}")]
    TScalesNotApplicable { shape: &'static str },

    #[error("Synthesis error: {0}")]
    Synth(#[from] wf_synth::SynthError),

    #[error("Cost error: {0}")]
    Cost(#[from] wf_cost::CostError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "wf-cli")]
#[command(about = "WaveFlow CLI - control waveform synthesis and cost evaluation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a waveform from a YAML/JSON wave spec
    Render {
        /// Path to the wave spec file
        spec_path: PathBuf,
        /// Comma-separated parameter vector
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        params: Vec<f64>,
        /// Override the handle positions of a bezier spec
        #[arg(long, value_delimiter = ',')]
        t_scales: Option<Vec<f64>>,
        /// Output file (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Resample a waveform file onto a new sample rate
    Resample {
        /// Waveform file, one value per line
        wave_path: PathBuf,
        /// Duration spanned by the input waveform in seconds
        #[arg(long)]
        duration: f64,
        /// New sample rate in Hz
        #[arg(long)]
        rate: f64,
        /// Output file (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Evaluate the brachistochrone cost of a parameter vector
    Brachistochrone {
        /// Comma-separated parameter vector
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        params: Vec<f64>,
        /// Experiment config file (optional, defaults apply)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Seed for the timing noise
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the ideal cycloid transit time
    MinTime {
        /// Cycloid depth parameter
        #[arg(long, default_value_t = 5.0)]
        k: f64,
        /// Gravitational acceleration
        #[arg(long, default_value_t = wf_core::units::constants::G_LAB_MPS2)]
        g: f64,
    },
}

fn main() -> CliResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            spec_path,
            params,
            t_scales,
            output,
        } => cmd_render(&spec_path, &params, t_scales, output.as_deref()),
        Commands::Resample {
            wave_path,
            duration,
            rate,
            output,
        } => cmd_resample(&wave_path, duration, rate, output.as_deref()),
        Commands::Brachistochrone {
            params,
            config,
            seed,
        } => cmd_brachistochrone(&params, config.as_deref(), seed),
        Commands::MinTime { k, g } => {
            println!("{:.6}", min_time_seconds(k, g));
            Ok(())
        }
    }
}

fn cmd_render(
    spec_path: &Path,
    params: &[f64],
    t_scales: Option<Vec<f64>>,
    output: Option<&Path>,
) -> CliResult<()> {
    let mut spec: WaveSpec = load_config(spec_path)?;
    if let Some(scales) = t_scales {
        match &mut spec.shape {
            WaveShape::Bezier { t_scales } => *t_scales = scales,
            other => return Err(CliError::TScalesNotApplicable { shape: other.name() }),
        }
    }
    tracing::info!(shape = spec.shape.name(), params = params.len(), "rendering waveform");
    let wave = spec.render(params)?;
    write_wave(&wave, output)
}

fn cmd_resample(wave_path: &Path, duration: f64, rate: f64, output: Option<&Path>) -> CliResult<()> {
    let text = read_text(wave_path)?;
    let wave = Waveform::from_text(&text)?;
    let out = resample(wave.samples(), duration, rate)?;
    tracing::info!(from = wave.len(), to = out.len(), "resampled waveform");
    write_wave(&out, output)
}

fn cmd_brachistochrone(params: &[f64], config: Option<&Path>, seed: Option<u64>) -> CliResult<()> {
    let mut cfg: BrachistochroneConfig = match config {
        Some(path) => load_config(path)?,
        None => BrachistochroneConfig::default(),
    };
    if seed.is_some() {
        cfg.seed = seed;
    }
    let mut experiment = BrachistochroneExperiment::new(cfg)?;
    let record = experiment.compute_cost(params)?;
    println!("{}", serde_json::to_string(&record)?);
    Ok(())
}

fn min_time_seconds(k: f64, g: f64) -> f64 {
    cycloid_min_time_si(m(k), mps2(g)).value
}

fn read_text(path: &Path) -> CliResult<String> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// YAML unless the file ends in `.json`.
fn load_config<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    let content = read_text(path)?;
    let is_json = path.extension().is_some_and(|ext| ext == "json");
    let parsed = if is_json {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(&content).map_err(|e| e.to_string())
    };
    parsed.map_err(|message| CliError::Config {
        path: path.to_path_buf(),
        message,
    })
}

fn write_wave(wave: &Waveform, output: Option<&Path>) -> CliResult<()> {
    if let Some(path) = output {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        wave.write_text(BufWriter::new(File::create(path)?))?;
        eprintln!("✓ Wrote {} samples to {}", wave.len(), path.display());
    } else {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        wave.write_text(&mut lock)?;
        lock.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_accept_negative_values() {
        let cli = Cli::try_parse_from(["wf-cli", "brachistochrone", "--params", "-3,0,0.5", "--seed", "4"])
            .unwrap();
        match cli.command {
            Commands::Brachistochrone { params, seed, config } => {
                assert_eq!(params, vec![-3.0, 0.0, 0.5]);
                assert_eq!(seed, Some(4));
                assert!(config.is_none());
            }
            _ => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn render_takes_optional_t_scales() {
        let cli = Cli::try_parse_from([
            "wf-cli", "render", "spec.yaml", "--params", "0.8,0.5", "--t-scales", "0.3,0.6",
        ])
        .unwrap();
        match cli.command {
            Commands::Render { t_scales, params, output, .. } => {
                assert_eq!(t_scales, Some(vec![0.3, 0.6]));
                assert_eq!(params, vec![0.8, 0.5]);
                assert!(output.is_none());
            }
            _ => panic!("wrong subcommand"),
        }
    }

    #[test]
    fn min_time_defaults_to_lab_gravity() {
        let cli = Cli::try_parse_from(["wf-cli", "min-time"]).unwrap();
        assert!(matches!(cli.command, Commands::MinTime { k, g } if k == 5.0 && g == 9.8));
        assert!((min_time_seconds(5.0, 9.8) - 2.2443).abs() < 1e-4);
    }
}
