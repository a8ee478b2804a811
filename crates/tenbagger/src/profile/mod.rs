mod industry;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::scoring::{
    Dimension, DimensionScores, RulesError, SamplingMode, ScoreRange, ScoreResult, MAX_SCORE,
};

const LISTING_YEAR_DAYS: f64 = 365.0;
const DEFAULT_PRICE: f64 = 50.0;
const DEFAULT_DEBT_RATIO: f64 = 0.5;

/// Static facts about a listed company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub code: String,
    pub name: String,
    pub industry: String,
    pub list_date: NaiveDate,
    #[serde(default)]
    pub current_price: Option<f64>,
}

impl CompanyProfile {
    /// Exchange-qualified code: Shanghai for codes starting with 6, Shenzhen otherwise.
    pub fn exchange_code(&self) -> String {
        let exchange = if self.code.starts_with('6') { "SH" } else { "SZ" };
        format!("{}.{exchange}", self.code)
    }

    pub fn listing_years(&self, today: NaiveDate) -> f64 {
        (today - self.list_date).num_days() as f64 / LISTING_YEAR_DAYS
    }
}

/// Latest reported ratios, as fractions (0.15 is 15%).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialRatios {
    pub roe: Option<f64>,
    pub netprofit_ratio: Option<f64>,
    pub grossprofit_ratio: Option<f64>,
    pub debt_to_assets: Option<f64>,
    pub current_ratio: Option<f64>,
    pub quick_ratio: Option<f64>,
}

/// Maximum symmetric noise added to each profile dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileJitter {
    pub industry: f64,
    pub competitiveness: f64,
    pub growth: f64,
    pub timing: f64,
}

impl Default for ProfileJitter {
    fn default() -> Self {
        Self {
            industry: 5.0,
            competitiveness: 10.0,
            growth: 8.0,
            timing: 10.0,
        }
    }
}

impl ProfileJitter {
    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Industry => self.industry,
            Dimension::Competitiveness => self.competitiveness,
            Dimension::Growth => self.growth,
            Dimension::Timing => self.timing,
        }
    }
}

/// Tables driving the profile heuristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileRules {
    pub industry_priors: BTreeMap<String, f64>,
    pub default_industry_score: f64,
    pub growth_industries: Vec<String>,
    pub cyclical_industries: Vec<String>,
    pub jitter: ProfileJitter,
}

impl Default for ProfileRules {
    fn default() -> Self {
        Self {
            industry_priors: industry::default_priors(),
            default_industry_score: industry::DEFAULT_INDUSTRY_SCORE,
            growth_industries: industry::default_growth_industries(),
            cyclical_industries: industry::default_cyclical_industries(),
            jitter: ProfileJitter::default(),
        }
    }
}

impl ProfileRules {
    pub fn industry_prior(&self, industry: &str) -> f64 {
        self.industry_priors
            .get(industry)
            .copied()
            .unwrap_or(self.default_industry_score)
    }

    pub(crate) fn validate(&self) -> Result<(), RulesError> {
        for dimension in Dimension::ordered() {
            let jitter = self.jitter.get(dimension);
            if !jitter.is_finite() || jitter < 0.0 {
                return Err(RulesError::InvalidJitter { dimension, jitter });
            }
        }
        let priors = self
            .industry_priors
            .iter()
            .map(|(industry, score)| (industry.as_str(), *score))
            .chain(std::iter::once(("<default>", self.default_industry_score)));
        for (industry, score) in priors {
            if !score.is_finite() || !(0.0..=MAX_SCORE).contains(&score) {
                return Err(RulesError::InvalidIndustryPrior {
                    industry: industry.to_string(),
                    score,
                });
            }
        }
        Ok(())
    }
}

/// One rule firing while scoring a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    pub dimension: Dimension,
    pub points: f64,
    pub note: String,
}

/// Dimension scores of a profile together with the rules that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileBreakdown {
    pub scores: DimensionScores,
    pub adjustments: Vec<Adjustment>,
}

/// Composite result of a profile plus the rules that fired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileOutcome {
    pub result: ScoreResult,
    pub adjustments: Vec<Adjustment>,
}

/// Derives the four dimension scores straight from a company profile and its ratios.
pub struct ProfileScorer<'a> {
    rules: &'a ProfileRules,
    sampling: SamplingMode,
}

struct Tally {
    dimension: Dimension,
    score: f64,
    adjustments: Vec<Adjustment>,
}

impl Tally {
    fn start(dimension: Dimension, base: f64, note: String) -> Self {
        Self {
            dimension,
            score: base,
            adjustments: vec![Adjustment {
                dimension,
                points: base,
                note,
            }],
        }
    }

    fn add(&mut self, points: f64, note: String) {
        self.score += points;
        self.adjustments.push(Adjustment {
            dimension: self.dimension,
            points,
            note,
        });
    }
}

impl<'a> ProfileScorer<'a> {
    pub fn new(rules: &'a ProfileRules, sampling: SamplingMode) -> Self {
        Self { rules, sampling }
    }

    pub fn score<R: Rng + ?Sized>(
        &self,
        profile: &CompanyProfile,
        ratios: &FinancialRatios,
        today: NaiveDate,
        rng: &mut R,
    ) -> ProfileBreakdown {
        let tallies = [
            self.industry(profile, today),
            self.competitiveness(ratios),
            self.growth(profile, ratios),
            self.timing(profile),
        ];

        let mut scores = DimensionScores::default();
        let mut adjustments = Vec::new();
        for tally in tallies {
            let jitter = self.rules.jitter.get(tally.dimension);
            let noise = ScoreRange::new(-jitter, jitter).sample(self.sampling, rng);
            scores.set(tally.dimension, (tally.score + noise).clamp(0.0, MAX_SCORE));
            adjustments.extend(tally.adjustments);
        }

        debug!(
            stock = profile.code.as_str(),
            industry = profile.industry.as_str(),
            "profile scored"
        );
        ProfileBreakdown {
            scores,
            adjustments,
        }
    }

    fn industry(&self, profile: &CompanyProfile, today: NaiveDate) -> Tally {
        let prior = self.rules.industry_prior(&profile.industry);
        let mut tally = Tally::start(
            Dimension::Industry,
            prior,
            format!("industry prior for {}", profile.industry),
        );

        let years = profile.listing_years(today);
        if years > 10.0 {
            tally.add(5.0, format!("listed {years:.1} years"));
        } else if years < 3.0 {
            tally.add(-5.0, format!("listed only {years:.1} years"));
        }
        tally
    }

    fn competitiveness(&self, ratios: &FinancialRatios) -> Tally {
        let mut tally = Tally::start(Dimension::Competitiveness, 60.0, "baseline".to_string());

        let roe = ratios.roe.unwrap_or(0.0);
        if roe > 0.20 {
            tally.add(20.0, format!("roe {:.1}% above 20%", roe * 100.0));
        } else if roe > 0.15 {
            tally.add(15.0, format!("roe {:.1}% above 15%", roe * 100.0));
        } else if roe > 0.10 {
            tally.add(10.0, format!("roe {:.1}% above 10%", roe * 100.0));
        }

        let margin = ratios.netprofit_ratio.unwrap_or(0.0);
        if margin > 0.20 {
            tally.add(15.0, format!("net margin {:.1}% above 20%", margin * 100.0));
        } else if margin > 0.15 {
            tally.add(10.0, format!("net margin {:.1}% above 15%", margin * 100.0));
        } else if margin > 0.10 {
            tally.add(5.0, format!("net margin {:.1}% above 10%", margin * 100.0));
        }

        let debt = ratios.debt_to_assets.unwrap_or(DEFAULT_DEBT_RATIO);
        if debt < 0.3 {
            tally.add(10.0, format!("debt ratio {:.1}% below 30%", debt * 100.0));
        } else if debt < 0.5 {
            tally.add(5.0, format!("debt ratio {:.1}% below 50%", debt * 100.0));
        } else if debt > 0.7 {
            tally.add(-10.0, format!("debt ratio {:.1}% above 70%", debt * 100.0));
        }
        tally
    }

    fn growth(&self, profile: &CompanyProfile, ratios: &FinancialRatios) -> Tally {
        let mut tally = Tally::start(Dimension::Growth, 65.0, "baseline".to_string());

        if self
            .rules
            .growth_industries
            .iter()
            .any(|name| name == &profile.industry)
        {
            tally.add(15.0, format!("{} is a growth industry", profile.industry));
        }
        if ratios.roe.unwrap_or(0.0) > 0.15 {
            tally.add(10.0, "roe above 15%".to_string());
        }
        if ratios.grossprofit_ratio.unwrap_or(0.0) > 0.30 {
            tally.add(10.0, "gross margin above 30%".to_string());
        }
        tally
    }

    fn timing(&self, profile: &CompanyProfile) -> Tally {
        let mut tally = Tally::start(Dimension::Timing, 70.0, "baseline".to_string());

        let price = profile.current_price.unwrap_or(DEFAULT_PRICE);
        if price < 20.0 {
            tally.add(10.0, format!("price {price:.2} below 20"));
        } else if price > 100.0 {
            tally.add(-5.0, format!("price {price:.2} above 100"));
        }
        if self
            .rules
            .cyclical_industries
            .iter()
            .any(|name| name == &profile.industry)
        {
            tally.add(-5.0, format!("{} is cyclical", profile.industry));
        }
        tally
    }
}

#[cfg(test)]
mod tests;
