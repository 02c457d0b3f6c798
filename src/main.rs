use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

mod config;

use config::Config;
use matchodds::stats::{CsvSeasonFile, SeasonProvider};
use matchodds::{forecast, Prediction};

fn main() -> Result<()> {
    // Logs go to stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::parse();
    config.validate()?;

    let providers: Vec<Box<dyn SeasonProvider>> = config
        .seasons
        .iter()
        .map(|path| Box::new(CsvSeasonFile::new(path)) as Box<dyn SeasonProvider>)
        .collect();

    let seasons = providers
        .iter()
        .map(|p| {
            p.load_season()
                .with_context(|| format!("failed to load season '{}'", p.name()))
        })
        .collect::<Result<Vec<_>>>()?;

    info!(
        "Pricing {} vs {} with the {} model over {} season(s)",
        config.home.trim(),
        config.away.trim(),
        config.model,
        seasons.len()
    );

    let prediction = forecast(
        &config.home,
        &config.away,
        &seasons,
        config.model,
        &config.estimator_config(),
    )?;

    if config.json {
        println!("{}", serde_json::to_string_pretty(&prediction)?);
    } else {
        print_table(&prediction);
    }
    Ok(())
}

fn print_table(p: &Prediction) {
    println!(
        "{} vs {}  [{}; {}]",
        p.home,
        p.away,
        p.model,
        p.seasons.join(", ")
    );
    println!("{:>6} {:>10} {:>10} {:>10}", "", "1", "X", "2");
    println!(
        "{:>6} {:>10.3} {:>10.3} {:>10.3}",
        "prob", p.probabilities.home, p.probabilities.draw, p.probabilities.away
    );
    println!(
        "{:>6} {:>10.2} {:>10.2} {:>10.2}",
        "odds", p.odds.home, p.odds.draw, p.odds.away
    );
    if p.odds.has_no_bet() {
        println!("(1.00 marks a no-bet outcome)");
    }
}
