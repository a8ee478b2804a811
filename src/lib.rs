mod cli;
mod commands;
mod render;

pub use commands::{
    effective_rules, score_company_profile, score_indicator_file, ProfileOptions, ScoreOptions,
    ScoreRun, StockReport,
};
use tenbagger::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
