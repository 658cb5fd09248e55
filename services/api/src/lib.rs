mod cli;
mod infra;
mod routes;
mod score;
mod server;

use idea_review::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
