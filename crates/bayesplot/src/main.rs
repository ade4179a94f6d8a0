use bayesplot::{
    ConfigOverrides, PlotConfig, PosteriorRun, PosteriorView, init_logging, write_charts,
};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bayesplot")]
#[command(about = "Plot positive and negative predictive values against prior prevalence")]
struct Args {
    /// Path to a YAML config file (default: <data-dir>/config.yaml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the data directory holding the log file (default: ~/.bayesplot/)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Pr(+|H), the test's true-positive rate
    #[arg(long)]
    sensitivity: Option<f64>,

    /// Pr(+|¬H), one minus specificity
    #[arg(long)]
    false_positive_rate: Option<f64>,

    /// Prior reported on stdout and highlighted on the chart
    #[arg(long)]
    prior: Option<f64>,

    /// Directory for the chart files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// File stem for the chart files
    #[arg(short, long)]
    base_name: Option<String>,

    /// Also write the sweep as JSON to this path
    #[arg(long)]
    export: Option<PathBuf>,

    /// Write the files and exit without showing the terminal chart
    #[arg(long)]
    no_wait: bool,
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".bayesplot")
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = args.data_dir.unwrap_or_else(default_data_dir);

    let _log = init_logging(&data_dir, &args.log_level)?;

    let mut config = PlotConfig::load(args.config.as_deref(), &data_dir)?;
    config.apply_overrides(ConfigOverrides {
        sensitivity: args.sensitivity,
        false_positive_rate: args.false_positive_rate,
        example_prior: args.prior,
        output_dir: args.output_dir,
        base_name: args.base_name,
        no_wait: args.no_wait,
    });

    let run = PosteriorRun::compute(&config)?;
    println!("{}", run.summary);

    let figure = run.figure(&config.labels);
    write_charts(&config.output, &figure)?;

    if let Some(path) = args.export {
        run.export(&config).write(&path)?;
    }

    if config.interactive {
        let view = PosteriorView::new(&figure);
        ratatui::run(|terminal| view.run(terminal))?;

        if let Err(err) = ratatui::try_restore() {
            tracing::error!("Failed to restore terminal: {err}");
        }
    }

    tracing::info!("bayesplot finished");
    Ok(())
}
