use crate::cli::InvokeArgs;
use crate::infra::build_handlers;
use cleaning_intake::config::AppConfig;
use cleaning_intake::error::AppError;
use cleaning_intake::handlers::FunctionEvent;
use cleaning_intake::telemetry;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::debug;

/// Run one function invocation. The event comes from `--event` or stdin and
/// the `{statusCode, headers, body}` result is printed to stdout.
pub(crate) async fn run(args: InvokeArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let raw = match &args.event {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => {
            let mut buffer = String::new();
            tokio::io::stdin().read_to_string(&mut buffer).await?;
            buffer
        }
    };
    let event: FunctionEvent = serde_json::from_str(&raw)?;
    debug!(endpoint = args.endpoint.name(), method = %event.http_method, "invoking function");

    let handlers = build_handlers(&config.mail, &config.places)?;
    let response = handlers.invoke(args.endpoint, event).await;

    let mut rendered = serde_json::to_vec_pretty(&response)?;
    rendered.push(b'\n');
    let mut stdout = tokio::io::stdout();
    stdout.write_all(&rendered).await?;
    stdout.flush().await?;
    Ok(())
}
