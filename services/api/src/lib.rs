mod assets;
mod cli;
mod infra;
mod invoke;
mod routes;
mod server;

use cleaning_intake::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
