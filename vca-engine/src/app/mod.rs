/// This module governs the high-level implementation of the command line application
mod calculations;
mod configuration;
mod styles;
mod telemetry;

pub(crate) use configuration::Configuration;

use crate::{
    model::{ModelFile, ModelSpecification},
    vca::VcaBuilder,
};
use clap::{ArgEnum, Parser};
use color_eyre::eyre::eyre;
use std::path::PathBuf;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct App {
    /// The model description, a `.toml` file
    file_path: Option<PathBuf>,
    #[clap(arg_enum, short, long, default_value = "info")]
    log_level: LogLevel,
    #[clap(arg_enum, short, long, default_value = "spectrum")]
    calculation: Calculation,
    /// Directory receiving the log and the result tables
    #[clap(short, long, default_value = "../results")]
    results: PathBuf,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ArgEnum)]
enum LogLevel {
    Trace,
    Info,
    Debug,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self {
            LogLevel::Trace => "trace",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Error => "error",
        };
        write!(f, "{}", level)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ArgEnum)]
pub(crate) enum Calculation {
    /// The lattice spectral function along the momentum path
    Spectrum,
    /// The momentum averaged spectral function
    DensityOfStates,
    /// The spectral function of the isolated reference cluster
    Cluster,
}

pub fn run() -> color_eyre::Result<()> {
    let cli = App::parse();

    std::fs::create_dir_all(&cli.results)?;
    let (subscriber, _guard) = telemetry::get_subscriber(cli.log_level, &cli.results);
    telemetry::init_subscriber(subscriber)?;

    let mut styles = styles::Styles::default();
    styles.colorize();

    let config = Configuration::build()?;
    tracing::debug!("{:?}", config);

    let path = cli
        .file_path
        .ok_or_else(|| eyre!("A file path needs to be passed."))?;
    let model = ModelSpecification::try_from(ModelFile::build(path)?)?;

    println!("{}", styles.heading(&model.name));
    println!("{}", styles.entry("cluster sites", model.cluster.num_points()));
    println!("{}", styles.entry("unit cell sites", model.unit_cell.num_points()));
    println!("{}", styles.entry("calculation", format!("{:?}", cli.calculation)));

    let vca = VcaBuilder::new()
        .with_model(&model)
        .with_settings(&config.vca_settings())
        .build()?;
    println!("{}", styles.entry("ground state energy", vca.ground_state_energy()));

    match cli.calculation {
        Calculation::Spectrum => {
            calculations::spectrum_along_path(&vca, &model.path, &config, &cli.results, &styles)
        }
        Calculation::DensityOfStates => calculations::density_of_states_on_mesh(
            &vca,
            &model.mesh,
            &config,
            &cli.results,
            &styles,
        ),
        Calculation::Cluster => calculations::cluster_spectrum(&vca, &config, &cli.results, &styles),
    }
}
