mod cli;
mod commands;
mod render;

use policy_navigator::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
