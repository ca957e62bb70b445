use anyhow::{Context, Result};
use log::LevelFilter;
use std::io::Write;
use std::time::Instant;

use titanic_scratch::config::{build_cli, ClassifierConfig, ExploreConfig};
use titanic_scratch::{experiment, report};

fn main() -> Result<()> {
    let started = Instant::now();
    env_logger::Builder::default()
        .filter_level(LevelFilter::Warn)
        .parse_env(env_logger::Env::default().filter_or("TITANIC_LOG", "warn"))
        .init();

    let matches = build_cli().get_matches();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match matches.subcommand() {
        Some(("explore", sub)) => {
            let config = ExploreConfig::from_matches(sub);
            let outcome = experiment::run_explore(&config)
                .with_context(|| format!("exploring {}", config.input_path.display()))?;
            report::write_explore(&mut out, &outcome)?;
        }
        Some(("logistic", sub)) => {
            let config = ClassifierConfig::from_matches(sub);
            let outcome = experiment::run_logistic(&config)
                .with_context(|| format!("logistic regression on {}", config.input_path.display()))?;
            report::write_logistic(&mut out, &outcome)?;
        }
        Some(("bayes", sub)) => {
            let config = ClassifierConfig::from_matches(sub);
            let outcome = experiment::run_bayes(&config)
                .with_context(|| format!("naive Bayes on {}", config.input_path.display()))?;
            report::write_bayes(&mut out, &outcome)?;
        }
        _ => unreachable!("a subcommand is required"),
    }

    report::write_footer(&mut out, started.elapsed())?;
    out.flush()?;

    Ok(())
}
