use crate::demo::{
    run_assess, run_health, run_stream, run_validate, AssessArgs, StreamArgs, ValidateArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use credit_wizard::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "credit-wizard",
    about = "Submit loan applications for credit assessment and review the decision dashboard",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a preset application, submit it, and print the decision dashboard
    Assess(AssessArgs),
    /// Stream the service's progress frames for a preset application and print the summary
    Stream(StreamArgs),
    /// Ask the assessment service to check a preset application without scoring it
    Validate(ValidateArgs),
    /// Report whether the assessment service is reachable
    Health,
    /// Run a local stand-in for the assessment service that answers with canned reports
    ServeStub(ServeStubArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeStubArgs {
    /// Override the configured host for the stub service
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the stub service
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Assess(args) => run_assess(args).await,
        Command::Stream(args) => run_stream(args).await,
        Command::Validate(args) => run_validate(args).await,
        Command::Health => run_health().await,
        Command::ServeStub(args) => server::run(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credit_wizard::workflows::assessment::PresetKind;

    #[test]
    fn parses_assess_with_alias_preset() {
        let cli = Cli::try_parse_from(["credit-wizard", "assess", "--preset", "good", "--json"])
            .expect("arguments parse");
        match cli.command {
            Command::Assess(args) => {
                assert_eq!(args.preset, PresetKind::Favorable);
                assert!(args.json);
            }
            other => panic!("expected assess, got {other:?}"),
        }
    }

    #[test]
    fn parses_stream_preset() {
        let cli = Cli::try_parse_from(["credit-wizard", "stream", "--preset", "risky"])
            .expect("arguments parse");
        match cli.command {
            Command::Stream(args) => assert_eq!(args.preset, PresetKind::Risky),
            other => panic!("expected stream, got {other:?}"),
        }
    }

    #[test]
    fn parses_serve_stub_overrides() {
        let cli = Cli::try_parse_from(["credit-wizard", "serve-stub", "--port", "9100"])
            .expect("arguments parse");
        match cli.command {
            Command::ServeStub(args) => {
                assert_eq!(args.port, Some(9100));
                assert!(args.host.is_none());
            }
            other => panic!("expected serve-stub, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_preset() {
        assert!(Cli::try_parse_from(["credit-wizard", "validate", "--preset", "average"]).is_err());
    }
}
