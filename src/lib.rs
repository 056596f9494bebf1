pub mod assessment;
pub mod booking;
pub mod config;
pub mod error;
pub mod resources;
pub mod scheduling;
pub mod telemetry;

mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
