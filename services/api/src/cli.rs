use crate::invoke;
use crate::server;
use clap::{Args, Parser, Subcommand};
use cleaning_intake::error::AppError;
use cleaning_intake::handlers::Endpoint;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Cleaning Intake",
    about = "Serve the cleaning quote form or run one of its functions from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Run a single function invocation against an event payload and print the result
    Invoke(InvokeArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

#[derive(Args, Debug)]
pub(crate) struct InvokeArgs {
    /// Function to run: cleaning-inquiry, commercial-inquiry, places-autocomplete, places-details
    #[arg(long, value_parser = parse_endpoint)]
    pub(crate) endpoint: Endpoint,
    /// Event JSON file; read from stdin when omitted
    #[arg(long)]
    pub(crate) event: Option<PathBuf>,
}

fn parse_endpoint(raw: &str) -> Result<Endpoint, String> {
    Endpoint::from_name(raw).ok_or_else(|| {
        let known: Vec<&str> = Endpoint::ALL.iter().map(|endpoint| endpoint.name()).collect();
        format!("unknown endpoint '{raw}' (expected one of: {})", known.join(", "))
    })
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Invoke(args) => invoke::run(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["cleaning-intake-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn invoke_accepts_known_endpoint_names() {
        let cli = Cli::try_parse_from([
            "cleaning-intake-api",
            "invoke",
            "--endpoint",
            "places-details",
            "--event",
            "event.json",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Invoke(args)) => {
                assert_eq!(args.endpoint, Endpoint::PlacesDetails);
                assert_eq!(args.event, Some(PathBuf::from("event.json")));
            }
            other => panic!("expected invoke, got {other:?}"),
        }
    }

    #[test]
    fn invoke_rejects_unknown_endpoint() {
        let err = Cli::try_parse_from(["cleaning-intake-api", "invoke", "--endpoint", "contact"])
            .expect_err("unknown endpoint");
        assert!(err.to_string().contains("unknown endpoint 'contact'"));
    }
}
