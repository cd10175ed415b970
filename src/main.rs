use clap::Parser;
use delta_ghost::cli::commands::{parse_date, Cli, Commands};
use delta_ghost::application::options_flow::FlowFilter;
use delta_ghost::config::Settings;
use delta_ghost::domain::values::history_range::HistoryRange;
use delta_ghost::domain::values::option_kind::OptionKind;
use delta_ghost::domain::values::ticker::Ticker;
use delta_ghost::DeltaGhost;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    let dg = match DeltaGhost::new(&settings) {
        Ok(dg) => dg,
        Err(e) => {
            eprintln!("Error initializing Delta Ghost: {e}");
            std::process::exit(1);
        }
    };

    let result = run_command(dg, &settings, cli.command).await;
    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_command(
    dg: DeltaGhost,
    settings: &Settings,
    cmd: Commands,
) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Chart { tickers, range } => {
            let tickers = Ticker::parse_list(&tickers)?;
            let report = dg.chart(&tickers, range.parse::<HistoryRange>()?).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Analyze {
            ticker,
            indicators,
            full,
        } => {
            let ticker = Ticker::new(&ticker)?;
            let options = indicators.to_options(settings, full)?;
            let analysis = dg.analyze(&ticker, &options).await?;
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }
        Commands::Scan {
            tickers,
            indicators,
        } => {
            let tickers = Ticker::parse_list(&tickers)?;
            let options = indicators.to_options(settings, false)?;
            let report = dg.scan(&tickers, &options).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Options {
            ticker,
            min_volume,
            kind,
            limit,
        } => {
            let ticker = Ticker::new(&ticker)?;
            let filter = FlowFilter {
                min_volume,
                kind: kind.map(|k| k.parse::<OptionKind>()).transpose()?,
                limit,
            };
            let report = dg.options_flow(&ticker, &filter).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::History {
            ticker,
            since,
            limit,
        } => {
            let ticker = ticker.map(|t| Ticker::new(&t)).transpose()?;
            let since = parse_date(&since)?;
            let records = dg.history(ticker, since, Some(limit))?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Commands::Signal { id } => {
            let record = dg.signal(&id)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
    }
    Ok(())
}
