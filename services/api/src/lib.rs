mod assets;
mod cli;
mod infra;
mod routes;
mod server;

use story_eval::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
