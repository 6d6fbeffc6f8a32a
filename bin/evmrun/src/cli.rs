//! Contains the CLI for `evmrun`.

use std::path::PathBuf;

use clap::Parser;
use evmrun_config::HarnessConfig;
use evmrun_executor::Harness;

use crate::{input::decode_or_empty, report::RunReport};

/// CLI arguments for evmrun.
#[derive(Parser, Debug)]
#[command(name = "evmrun")]
#[command(about = "Run one EVM contract invocation against an in-memory store")]
pub(crate) struct Cli {
    /// Contract bytecode as hex.
    #[arg(long)]
    pub(crate) code: String,

    /// Call data (signature + arguments) as hex. A leading `0x` is stripped.
    #[arg(long, default_value = "")]
    pub(crate) sig: String,

    /// Caller address as hex, right-aligned. Defaults to the configured caller.
    #[arg(long, default_value = "")]
    pub(crate) caller: String,

    /// Path to the configuration file (TOML or JSON).
    #[arg(short, long, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,

    /// Override chain ID from config.
    #[arg(long)]
    pub(crate) chain_id: Option<u64>,

    /// Abort on malformed hex instead of continuing with empty input.
    #[arg(long)]
    pub(crate) strict: bool,

    /// Number of times to invoke the contract against the same store.
    #[arg(long, default_value = "1")]
    pub(crate) runs: u32,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl Cli {
    /// Load the harness configuration, applying CLI overrides.
    pub(crate) fn load_config(&self) -> eyre::Result<HarnessConfig> {
        let mut config = HarnessConfig::load(self.config.as_deref())?;

        if let Some(chain_id) = self.chain_id {
            config.chain.chain_id = chain_id;
        }

        Ok(config)
    }

    /// Decode the inputs, run the invocations and print a report.
    pub(crate) fn run(self) -> eyre::Result<()> {
        let report = self.execute()?;
        println!("{report}");
        Ok(())
    }

    /// Decode the inputs and run the invocations against a fresh store.
    pub(crate) fn execute(&self) -> eyre::Result<RunReport> {
        let config = self.load_config()?;
        tracing::debug!(?config, "loaded configuration");

        let code = decode_or_empty("code", &self.code, self.strict)?;
        let call_data = decode_or_empty("sig", &self.sig, self.strict)?;
        let caller = decode_or_empty("caller", &self.caller, self.strict)?;

        let mut harness = Harness::new(config);
        let namespace = harness.namespace(&code);

        let mut report = RunReport::new(namespace);
        for _ in 0..self.runs {
            let result = harness.invoke_raw(code.clone(), call_data.clone(), &caller)?;
            report.push(result);
        }
        report.capture_store(harness.store());
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use evmrun_executor::ExecutionStatus;

    use super::*;

    #[test]
    fn parses_required_code() {
        let cli = Cli::try_parse_from(["evmrun", "--code", "600a600055"]).unwrap();
        assert_eq!(cli.code, "600a600055");
        assert!(cli.sig.is_empty());
        assert_eq!(cli.runs, 1);
        assert!(!cli.strict);
    }

    #[test]
    fn missing_code_is_rejected() {
        assert!(Cli::try_parse_from(["evmrun", "--sig", "0x00"]).is_err());
    }

    #[test]
    fn chain_id_override_applies() {
        let cli =
            Cli::try_parse_from(["evmrun", "--code", "00", "--chain-id", "7"]).unwrap();
        assert_eq!(cli.load_config().unwrap().chain.chain_id, 7);
    }

    #[test]
    fn malformed_code_runs_as_no_code() {
        let cli = Cli::try_parse_from(["evmrun", "--code", "zz", "--runs", "2"]).unwrap();
        let report = cli.execute().unwrap();

        assert_eq!(report.runs().len(), 2);
        assert!(report.runs().iter().all(|run| run.status == ExecutionStatus::NoCode));
    }

    #[test]
    fn repeated_runs_share_one_store() {
        // PUSH1 0 SLOAD PUSH1 1 ADD PUSH1 0 SSTORE STOP
        let cli = Cli::try_parse_from(["evmrun", "--code", "0x60005460010160005500", "--runs", "3"])
            .unwrap();
        let report = cli.execute().unwrap();

        assert!(report.runs().iter().all(|run| run.status == ExecutionStatus::Success));
        assert!(report.to_string().ends_with("[0] = 0x03"));
    }

    #[test]
    fn strict_rejects_malformed_code() {
        let cli = Cli::try_parse_from(["evmrun", "--code", "zz", "--strict"]).unwrap();
        assert!(cli.execute().is_err());
    }
}
