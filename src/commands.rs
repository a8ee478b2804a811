use std::path::PathBuf;

use chrono::NaiveDate;
use rand::Rng;
use serde::Serialize;
use tenbagger::config::ScoringSettings;
use tenbagger::error::AppError;
use tenbagger::import::IndicatorImporter;
use tenbagger::profile::{CompanyProfile, FinancialRatios, ProfileOutcome};
use tenbagger::scoring::{
    high_potential, scoring_rng, Clock, DimensionScore, FixedClock, ScoreResult, ScoringConfig,
    ScoringEngine, StrengthReport, SystemClock,
};
use tracing::info;

/// Inputs of one `score` invocation after flags and environment are merged.
#[derive(Debug, Clone)]
pub struct ScoreOptions {
    pub input: PathBuf,
    pub settings: ScoringSettings,
    pub date: Option<NaiveDate>,
    pub parallel: bool,
    /// Keep only results at or above this total, best first.
    pub min_score: Option<f64>,
    pub limit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockReport {
    #[serde(flatten)]
    pub result: ScoreResult,
    pub dimensions: Vec<DimensionScore>,
    #[serde(flatten)]
    pub analysis: StrengthReport,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreRun {
    pub requested: usize,
    pub skipped: Vec<String>,
    pub stocks: Vec<StockReport>,
}

fn engine_for(config: ScoringConfig, date: Option<NaiveDate>) -> ScoringEngine<FixedClock> {
    let today = date.unwrap_or_else(|| SystemClock.today());
    ScoringEngine::with_clock(config, FixedClock(today))
}

pub fn score_indicator_file(options: &ScoreOptions) -> Result<ScoreRun, AppError> {
    let engine = engine_for(options.settings.scoring_config()?, options.date);
    let set = IndicatorImporter::from_path(&options.input)?;
    let (codes, mut indicators) = set.into_parts();
    let mut rng = scoring_rng(options.settings.seed)?;

    let results = if options.parallel {
        let seed = options.settings.seed.unwrap_or_else(|| rng.gen());
        engine.score_all_parallel(&codes, &mut indicators, seed)
    } else {
        engine.score_all(&codes, &mut indicators, &mut rng)
    };

    let skipped = codes
        .iter()
        .filter(|code| !results.iter().any(|result| &result.stock_code == *code))
        .cloned()
        .collect();

    let results = match options.min_score {
        Some(min_score) => high_potential(&results, min_score, options.limit),
        None => results,
    };

    let stocks = results
        .into_iter()
        .map(|result| {
            let analysis = indicators
                .get(&result.stock_code)
                .map(|scored| engine.analyze(scored))
                .unwrap_or_default();
            StockReport {
                dimensions: engine.breakdown(&result),
                result,
                analysis,
            }
        })
        .collect::<Vec<_>>();

    info!(
        input = %options.input.display(),
        requested = codes.len(),
        reported = stocks.len(),
        "score run complete"
    );

    Ok(ScoreRun {
        requested: codes.len(),
        skipped,
        stocks,
    })
}

#[derive(Debug, Clone)]
pub struct ProfileOptions {
    pub profile: CompanyProfile,
    pub ratios: FinancialRatios,
    pub settings: ScoringSettings,
    pub date: Option<NaiveDate>,
}

pub fn score_company_profile(options: &ProfileOptions) -> Result<ProfileOutcome, AppError> {
    let engine = engine_for(options.settings.scoring_config()?, options.date);
    let mut rng = scoring_rng(options.settings.seed)?;
    Ok(engine.score_profile(&options.profile, &options.ratios, &mut rng))
}

pub fn effective_rules(settings: &ScoringSettings) -> Result<ScoringConfig, AppError> {
    Ok(settings.scoring_config()?)
}
