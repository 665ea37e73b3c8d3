use queueflow::config::{self, Command, EstimateArgs, FormatArg};
use queueflow::engine;
use queueflow::error::{Error, Result};
use queueflow::estimator;
use queueflow::output::{self, Formatter, HumanFormatter, JsonFormatter, SummaryFormatter};

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = config::parse_args()?;

    let output = match cli.command {
        Command::Run(args) => {
            let (config, format) = config::build_config(&args)?;
            let result = engine::run_scenario(&config)?;
            formatter_for(&format).write(&result)
        }
        Command::ShowConfig(args) => {
            let config = config::load_config(&args.config)?;
            engine::validate_config(&config)?;
            output::write_config(&config)
        }
        Command::Estimate(args) => estimate(&args)?,
        Command::ListRewards(args) => output::write_rewards(&config::load_catalog(&args)?.rewards),
        Command::ListQuests(args) => output::write_quests(&config::load_catalog(&args)?.quests),
    };
    print!("{}", output);

    Ok(())
}

fn estimate(args: &EstimateArgs) -> Result<String> {
    if args.avg_service == 0 {
        return Err(Error::ServiceTimeZero);
    }
    let (joined, projected) = estimator::project(
        args.avg_service,
        args.ahead,
        args.jitter,
        args.skip,
        args.minutes,
    );
    Ok(output::write_projection(&joined, &projected, args.minutes))
}

fn formatter_for(format: &FormatArg) -> Box<dyn Formatter> {
    match format {
        FormatArg::Human => Box::new(HumanFormatter),
        FormatArg::Summary => Box::new(SummaryFormatter),
        FormatArg::Json => Box::new(JsonFormatter),
    }
}
