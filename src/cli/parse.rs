use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI structure.
#[derive(Parser, Debug)]
#[command(
    name = "iperf-chart",
    version,
    about = "Plain-text charts of iperf3 throughput, packet loss and jitter"
)]
pub struct Cli {
    /// iperf3 JSON file (defaults to `default_input_file` from config.ini)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_is_optional() {
        assert_eq!(Cli::try_parse_from(["iperf-chart"]).unwrap().input, None);
        let cli = Cli::try_parse_from(["iperf-chart", "runs/a.json"]).unwrap();
        assert_eq!(cli.input, Some(PathBuf::from("runs/a.json")));
    }

    #[test]
    fn extra_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["iperf-chart", "a.json", "b.json"]).is_err());
        assert!(Cli::try_parse_from(["iperf-chart", "--width", "80"]).is_err());
    }
}
