use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use log::info;
use synthplot::{bin_count_for, init_logging, Config, Report};

fn main() -> Result<()> {
    let matches = Command::new("synth-report")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generates a synthetic dataset and prints its summary and binned means")
        .args(Config::args())
        .arg(
            Arg::new("bins")
                .short('b')
                .long("bins")
                .value_name("BINS")
                .help("Number of bins (default: max(1, points / 10))")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_name("FORMAT")
                .help("Output format")
                .value_parser(["text", "yaml"])
                .default_value("text"),
        )
        .arg(
            Arg::new("with_data")
                .long("with-data")
                .help("Include the generated records in the output")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    init_logging(matches.get_count("verbose"));

    let config = Config::from_matches(&matches).context("Invalid parameters")?;
    let params = config.params()?;
    let bins = matches
        .get_one::<usize>("bins")
        .copied()
        .unwrap_or_else(|| bin_count_for(params.count));

    info!(
        "Generating {} points with seed {} into {} bins",
        params.count, params.seed, bins
    );

    let dataset = params.generate();
    let mut report = Report::build(params, &dataset, bins, config.closed)
        .with_context(|| format!("Failed to bin {} points into {} bins", params.count, bins))?;
    if matches.get_flag("with_data") {
        report = report.with_data(dataset);
    }

    match matches.get_one::<String>("format").map(String::as_str) {
        Some("yaml") => print!("{}", serde_yaml::to_string(&report)?),
        _ => print!("{}", report),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use synthplot::ClosedSide;

    #[test]
    fn test_report_for_defaults() {
        let params = Config::default().params().unwrap();
        let dataset = params.generate();
        let report = Report::build(params, &dataset, bin_count_for(params.count), ClosedSide::Right).unwrap();
        assert_eq!(report.bins.len(), 25);
        assert_eq!(report.bins.iter().map(|b| b.count).sum::<usize>(), 250);
    }
}
