use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tenbagger::config::{AppConfig, ScoringSettings};
use tenbagger::error::AppError;
use tenbagger::profile::{CompanyProfile, FinancialRatios};
use tenbagger::scoring::DEFAULT_HIGH_POTENTIAL_LIMIT;
use tenbagger::telemetry;

use crate::commands::{
    effective_rules, score_company_profile, score_indicator_file, ProfileOptions, ScoreOptions,
};
use crate::render::{print_json, render_profile, render_score_run};

#[derive(Parser, Debug)]
#[command(
    name = "tenbagger",
    about = "Grade equities for long-horizon growth potential",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score every stock in an indicator CSV
    Score(ScoreArgs),
    /// Score one company from its profile and financial ratios
    Profile(ProfileArgs),
    /// Print the effective rule configuration as JSON
    Rules(RulesArgs),
}

/// Flags shared by every scoring command.
#[derive(Args, Debug, Default)]
pub(crate) struct ScoringFlags {
    /// Seed for reproducible scores (overrides SCORING_SEED)
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Use range midpoints instead of random draws
    #[arg(long)]
    pub(crate) no_jitter: bool,
    /// JSON rule file (overrides SCORING_RULES_PATH)
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
    /// Scoring date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) date: Option<NaiveDate>,
}

impl ScoringFlags {
    fn merge(&self, env: &ScoringSettings) -> ScoringSettings {
        ScoringSettings {
            seed: self.seed.or(env.seed),
            jitter: env.jitter && !self.no_jitter,
            rules_path: self.rules.clone().or_else(|| env.rules_path.clone()),
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Indicator CSV (stock_code, indicator_code, dimension, value, value_text, weight)
    #[arg(long, short)]
    pub(crate) input: PathBuf,
    #[command(flatten)]
    pub(crate) scoring: ScoringFlags,
    /// Score stocks on all cores
    #[arg(long)]
    pub(crate) parallel: bool,
    /// Only report stocks scoring at least this total
    #[arg(long)]
    pub(crate) min_score: Option<f64>,
    /// Maximum number of stocks reported with --min-score
    #[arg(long, default_value_t = DEFAULT_HIGH_POTENTIAL_LIMIT)]
    pub(crate) limit: usize,
    /// Show dimension weights, strengths and weaknesses per stock
    #[arg(long)]
    pub(crate) details: bool,
    /// Emit JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ProfileArgs {
    #[arg(long)]
    pub(crate) code: String,
    #[arg(long, default_value = "")]
    pub(crate) name: String,
    #[arg(long)]
    pub(crate) industry: String,
    /// Listing date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub(crate) listed: NaiveDate,
    #[arg(long)]
    pub(crate) price: Option<f64>,
    /// Return on equity as a fraction (0.18 = 18%)
    #[arg(long)]
    pub(crate) roe: Option<f64>,
    #[arg(long)]
    pub(crate) net_margin: Option<f64>,
    #[arg(long)]
    pub(crate) gross_margin: Option<f64>,
    #[arg(long)]
    pub(crate) debt_ratio: Option<f64>,
    #[arg(long)]
    pub(crate) current_ratio: Option<f64>,
    #[arg(long)]
    pub(crate) quick_ratio: Option<f64>,
    #[command(flatten)]
    pub(crate) scoring: ScoringFlags,
    /// List every rule that fired
    #[arg(long)]
    pub(crate) details: bool,
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RulesArgs {
    /// JSON rule file to validate and print (overrides SCORING_RULES_PATH)
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Command::Score(args) => run_score(args, &config.scoring),
        Command::Profile(args) => run_profile(args, &config.scoring),
        Command::Rules(args) => {
            let settings = ScoringSettings {
                rules_path: args.rules.or_else(|| config.scoring.rules_path.clone()),
                ..config.scoring.clone()
            };
            print_json(&effective_rules(&settings)?)
        }
    }
}

fn run_score(args: ScoreArgs, env: &ScoringSettings) -> Result<(), AppError> {
    if let Some(min_score) = args.min_score {
        if !(0.0..=100.0).contains(&min_score) {
            return Err(AppError::InvalidInput(format!(
                "--min-score must be between 0 and 100, got {min_score}"
            )));
        }
    }

    let options = ScoreOptions {
        input: args.input,
        settings: args.scoring.merge(env),
        date: args.scoring.date,
        parallel: args.parallel,
        min_score: args.min_score,
        limit: args.limit,
    };
    let run = score_indicator_file(&options)?;

    if args.json {
        print_json(&run)
    } else {
        render_score_run(&run, args.details);
        Ok(())
    }
}

fn run_profile(args: ProfileArgs, env: &ScoringSettings) -> Result<(), AppError> {
    let options = ProfileOptions {
        profile: CompanyProfile {
            code: args.code,
            name: args.name,
            industry: args.industry,
            list_date: args.listed,
            current_price: args.price,
        },
        ratios: FinancialRatios {
            roe: args.roe,
            netprofit_ratio: args.net_margin,
            grossprofit_ratio: args.gross_margin,
            debt_to_assets: args.debt_ratio,
            current_ratio: args.current_ratio,
            quick_ratio: args.quick_ratio,
        },
        settings: args.scoring.merge(env),
        date: args.scoring.date,
    };
    let outcome = score_company_profile(&options)?;

    if args.json {
        print_json(&outcome)
    } else {
        render_profile(&outcome, args.details);
        Ok(())
    }
}
