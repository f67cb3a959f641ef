mod assess;
mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use carbon_construct::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
