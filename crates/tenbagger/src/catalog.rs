//! Known indicator codes with their display names, dimensions and default weights.

use crate::scoring::Dimension;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorDefinition {
    pub code: &'static str,
    pub name: &'static str,
    pub dimension: Dimension,
    /// Weight applied when an import row leaves the weight blank.
    pub default_weight: Option<f64>,
}

const fn definition(
    code: &'static str,
    name: &'static str,
    dimension: Dimension,
    default_weight: Option<f64>,
) -> IndicatorDefinition {
    IndicatorDefinition {
        code,
        name,
        dimension,
        default_weight,
    }
}

const DEFINITIONS: [IndicatorDefinition; 31] = [
    definition("industry_lifecycle", "Industry lifecycle", Dimension::Industry, Some(0.15)),
    definition("market_growth_rate", "Market growth rate", Dimension::Industry, Some(0.10)),
    definition("industry_concentration", "Industry concentration", Dimension::Industry, Some(0.05)),
    definition("policy_support", "Policy support", Dimension::Industry, None),
    definition("barrier_to_entry", "Barrier to entry", Dimension::Industry, None),
    definition("market_share", "Market share", Dimension::Competitiveness, Some(0.15)),
    definition("revenue_growth", "Revenue growth", Dimension::Competitiveness, Some(0.10)),
    definition("profit_margin", "Net profit margin", Dimension::Competitiveness, Some(0.08)),
    definition("roe", "Return on equity", Dimension::Competitiveness, Some(0.07)),
    definition("r_d_intensity", "R&D intensity", Dimension::Competitiveness, Some(0.05)),
    definition("brand_value", "Brand value", Dimension::Competitiveness, None),
    definition("management_team", "Management team", Dimension::Competitiveness, None),
    definition("future_growth", "Expected growth", Dimension::Growth, Some(0.12)),
    definition("new_business", "New business", Dimension::Growth, None),
    definition("market_expansion", "Market expansion", Dimension::Growth, None),
    definition("innovation_capability", "Innovation capability", Dimension::Growth, None),
    definition("valuation_level", "Valuation level", Dimension::Timing, Some(0.06)),
    definition("market_sentiment", "Market sentiment", Dimension::Timing, Some(0.04)),
    definition("technical_trend", "Technical trend", Dimension::Timing, Some(0.03)),
    definition("IND001", "行业生命周期阶段", Dimension::Industry, Some(0.15)),
    definition("IND002", "行业市场规模增速", Dimension::Industry, Some(0.10)),
    definition("IND003", "行业集中度", Dimension::Industry, Some(0.05)),
    definition("IND004", "市场份额", Dimension::Competitiveness, Some(0.15)),
    definition("IND005", "营收增速", Dimension::Competitiveness, Some(0.10)),
    definition("IND006", "净利润率", Dimension::Competitiveness, Some(0.08)),
    definition("IND007", "净资产收益率", Dimension::Competitiveness, Some(0.07)),
    definition("IND008", "未来3年预期增速", Dimension::Growth, Some(0.12)),
    definition("IND009", "研发投入强度", Dimension::Growth, Some(0.05)),
    definition("IND010", "估值水平", Dimension::Timing, Some(0.06)),
    definition("IND011", "市场情绪", Dimension::Timing, Some(0.04)),
    definition("IND012", "技术趋势", Dimension::Timing, Some(0.03)),
];

pub fn definitions() -> &'static [IndicatorDefinition] {
    &DEFINITIONS
}

/// Case-insensitive lookup by indicator code.
pub fn lookup(code: &str) -> Option<&'static IndicatorDefinition> {
    DEFINITIONS
        .iter()
        .find(|definition| definition.code.eq_ignore_ascii_case(code))
}
