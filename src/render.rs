use serde::Serialize;
use tenbagger::error::AppError;
use tenbagger::profile::ProfileOutcome;
use tenbagger::scoring::{Indicator, ScoreResult};

use crate::commands::{ScoreRun, StockReport};

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn render_score_run(run: &ScoreRun, details: bool) {
    println!(
        "Scored {} of {} stocks",
        run.requested - run.skipped.len(),
        run.requested
    );
    if !run.skipped.is_empty() {
        println!("Skipped: {}", run.skipped.join(", "));
    }
    if run.stocks.is_empty() {
        println!("No stocks to report.");
        return;
    }

    println!(
        "\n{:<10} {:>7} {:>9} {:>9} {:>9} {:>9}  {}",
        "code", "total", "industry", "compete", "growth", "timing", "level"
    );
    for stock in &run.stocks {
        print_result_row(&stock.result);
    }

    if details {
        for stock in &run.stocks {
            render_details(stock);
        }
    }
}

fn print_result_row(result: &ScoreResult) {
    println!(
        "{:<10} {:>7.2} {:>9.2} {:>9.2} {:>9.2} {:>9.2}  {}",
        result.stock_code,
        result.total_score,
        result.industry_score,
        result.competitiveness_score,
        result.growth_score,
        result.timing_score,
        result.potential_level.label()
    );
}

fn render_details(stock: &StockReport) {
    println!(
        "\n{} (scored {})",
        stock.result.stock_code, stock.result.score_date
    );
    for entry in &stock.dimensions {
        println!(
            "- {}: {:.2} x {:.2}",
            entry.dimension.label(),
            entry.score,
            entry.weight
        );
    }
    print_indicators("Strengths", &stock.analysis.strengths);
    print_indicators("Weaknesses", &stock.analysis.weaknesses);
}

fn print_indicators(heading: &str, indicators: &[Indicator]) {
    if indicators.is_empty() {
        return;
    }
    println!("  {heading}:");
    for indicator in indicators {
        println!(
            "    - {} ({}): {:.2}",
            indicator.display_name(),
            indicator.dimension.label(),
            indicator.score.unwrap_or_default()
        );
    }
}

pub(crate) fn render_profile(outcome: &ProfileOutcome, details: bool) {
    let result = &outcome.result;
    println!(
        "{} scored {:.2} ({}) on {}",
        result.stock_code,
        result.total_score,
        result.potential_level.label(),
        result.score_date
    );
    println!(
        "- industry {:.2} | competitiveness {:.2} | growth {:.2} | timing {:.2}",
        result.industry_score,
        result.competitiveness_score,
        result.growth_score,
        result.timing_score
    );

    if details {
        println!("Rules applied:");
        for adjustment in &outcome.adjustments {
            println!(
                "  - {}: {:+.0} {}",
                adjustment.dimension.label(),
                adjustment.points,
                adjustment.note
            );
        }
    }
}
