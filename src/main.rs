use clap::{Parser, ValueEnum};
use flarecast::evaluation::{render, ReportFormat};
use flarecast::pipeline::builder::DEFAULT_TRAIN_FRACTION;
use flarecast::pipeline::SplitConfig;
use flarecast::{
    logging, DataLoaderFactory, EvaluationMode, ExperimentConfig, ExperimentDirector, FlareError,
    ModelFactory,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

/// Predpoveď počtu slnečných erupcií a vyhodnotenie predikcií po triedach C, M, X
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Dátový súbor (hlavička + 13 polí oddelených medzerami na riadok)
    #[arg(required_unless_present = "list")]
    data: Option<PathBuf>,

    /// Vypíše dostupné modely, formáty a recepty a skončí
    #[arg(long)]
    list: bool,

    /// Hotový recept experimentu (pozri --list); nahrádza --config a --model
    #[arg(long, conflicts_with_all = ["config", "model", "train_fraction", "shuffle_seed"])]
    preset: Option<String>,

    /// JSON konfigurácia experimentu; prepínače nižšie ju prepisujú
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Model: tree alebo mlp
    #[arg(short, long)]
    model: Option<String>,

    /// Parameter modelu v tvare key=value (opakovateľné)
    #[arg(short = 'p', long = "param", value_parser = parse_key_value)]
    params: Vec<(String, String)>,

    /// Pevný počet trénovacích riadkov od začiatku súboru
    #[arg(long, conflicts_with = "train_fraction")]
    train_rows: Option<usize>,

    /// Podiel trénovacích riadkov
    #[arg(long)]
    train_fraction: Option<f64>,

    /// Premieša riadky pred delením s daným seedom
    #[arg(long, conflicts_with = "train_rows")]
    shuffle_seed: Option<u64>,

    /// Spôsob evaluácie
    #[arg(long, value_enum, default_value_t = ModeArg::Rates)]
    mode: ModeArg,

    /// Zaokrúhli predikcie na nezáporné celé počty
    #[arg(long)]
    rounded: bool,

    /// Formát výstupu
    #[arg(long, value_enum, default_value_t = FormatArg::Text)]
    format: FormatArg,

    /// Podrobné logovanie (ak nie je nastavené RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Rates,
    Correlation,
}

impl From<ModeArg> for EvaluationMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Rates => EvaluationMode::Rates,
            ModeArg::Correlation => EvaluationMode::Correlation,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for ReportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Text => ReportFormat::Text,
            FormatArg::Json => ReportFormat::Json,
        }
    }
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("Očakávaný tvar key=value, zadané '{}'", raw)),
    }
}

fn resolve_config(args: &Args) -> Result<ExperimentConfig, FlareError> {
    let mut config = match &args.config {
        Some(path) => ExperimentConfig::from_path(path)?,
        None => ExperimentConfig::default(),
    };

    if let Some(model) = &args.model {
        config.model = model.clone();
    }
    config.model_params.extend(args.params.iter().cloned());

    let fraction = args.train_fraction.unwrap_or(match config.split {
        Some(SplitConfig::Fraction { train_fraction })
        | Some(SplitConfig::Shuffled { train_fraction, .. }) => train_fraction,
        _ => DEFAULT_TRAIN_FRACTION,
    });
    if let Some(train_rows) = args.train_rows {
        config.split = Some(SplitConfig::Positional { train_rows });
    } else if let Some(seed) = args.shuffle_seed {
        config.split = Some(SplitConfig::Shuffled { train_fraction: fraction, seed });
    } else if let Some(train_fraction) = args.train_fraction {
        config.split = Some(SplitConfig::Fraction { train_fraction });
    }

    config.rounded |= args.rounded;
    Ok(config)
}

fn list_options() -> String {
    let mut out = String::from("Modely:\n");
    for name in ModelFactory::available_models() {
        let description = ModelFactory::get_model_description(name).unwrap_or("");
        out.push_str(&format!("  {:<14} {}\n", name, description));
    }
    out.push_str("Formáty dát:\n");
    for name in DataLoaderFactory::available_formats() {
        let description = DataLoaderFactory::get_format_description(name).unwrap_or("");
        out.push_str(&format!("  {:<14} {}\n", name, description));
    }
    out.push_str("Recepty:\n");
    for preset in ExperimentDirector::available_presets() {
        out.push_str(&format!("  {:<14} {}\n", preset.name, preset.description));
    }
    out
}

fn run(args: &Args) -> Result<String, FlareError> {
    if args.list {
        return Ok(list_options());
    }
    let data = args
        .data
        .as_deref()
        .ok_or_else(|| FlareError::Config("Chýba dátový súbor".to_string()))?;

    let loader = DataLoaderFactory::create("flare")?;
    let dataset = loader.load_from_path(data)?;

    let mut experiment = match &args.preset {
        Some(name) => {
            let train_rows = args.train_rows.unwrap_or_else(|| {
                (dataset.num_samples() as f64 * DEFAULT_TRAIN_FRACTION).round() as usize
            });
            ExperimentDirector::build_preset(name, train_rows).ok_or_else(|| {
                FlareError::Config(format!("Neznámy recept: {}", name))
            })??
        }
        None => resolve_config(args)?.build()?,
    };

    let outcome = experiment.run(&dataset)?;
    info!(
        model = %outcome.info.model_name,
        train = outcome.info.train_samples,
        test = outcome.info.test_samples,
        "Predikcie pripravené"
    );

    let report = outcome.evaluate(args.mode.into())?;
    match ReportFormat::from(args.format) {
        ReportFormat::Text => Ok(format!(
            "{}\n{}",
            outcome.info,
            render(&report, ReportFormat::Text)?
        )),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
            "experiment": outcome.info,
            "evaluation": report,
        }))?),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = logging::init(args.verbose) {
        eprintln!("{}", e);
    }

    match run(&args) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("Chyba: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn shuffle_seed_keeps_fraction_from_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"split": {"policy": "fraction", "train_fraction": 0.6}}"#)
            .unwrap();
        let config_path = file.path().to_str().unwrap();

        let args =
            Args::try_parse_from(["flarecast", "data.txt", "--config", config_path, "--shuffle-seed", "5"])
                .unwrap();
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.split, Some(SplitConfig::Shuffled { train_fraction: 0.6, seed: 5 }));

        let args = Args::try_parse_from(["flarecast", "data.txt", "--shuffle-seed", "5"]).unwrap();
        let config = resolve_config(&args).unwrap();
        assert_eq!(
            config.split,
            Some(SplitConfig::Shuffled { train_fraction: DEFAULT_TRAIN_FRACTION, seed: 5 })
        );
    }

    #[test]
    fn list_needs_no_data_file() {
        let args = Args::try_parse_from(["flarecast", "--list"]).unwrap();
        let output = run(&args).unwrap();
        assert!(output.contains("tree"));
        assert!(output.contains("flare"));
        assert!(output.contains("tree_counts"));

        assert!(Args::try_parse_from(["flarecast"]).is_err());
    }
}
