mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use assessment_funnel::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
