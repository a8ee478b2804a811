use std::collections::BTreeMap;

pub(crate) const DEFAULT_INDUSTRY_SCORE: f64 = 70.0;

const INDUSTRY_PRIORS: [(&str, f64); 31] = [
    ("白酒", 85.0),
    ("银行", 75.0),
    ("房地产", 65.0),
    ("电子", 80.0),
    ("汽车", 78.0),
    ("食品饮料", 82.0),
    ("医药生物", 88.0),
    ("安防", 75.0),
    ("新能源汽车", 90.0),
    ("半导体", 85.0),
    ("互联网", 82.0),
    ("新能源", 88.0),
    ("人工智能", 92.0),
    ("医疗器械", 86.0),
    ("消费电子", 79.0),
    ("化工", 70.0),
    ("钢铁", 60.0),
    ("煤炭", 58.0),
    ("电力", 68.0),
    ("交通运输", 72.0),
    ("建筑", 65.0),
    ("机械", 75.0),
    ("农业", 70.0),
    ("纺织服装", 65.0),
    ("轻工制造", 68.0),
    ("商业贸易", 70.0),
    ("休闲服务", 75.0),
    ("计算机", 83.0),
    ("通信", 80.0),
    ("非银金融", 77.0),
    ("综合", 60.0),
];

const GROWTH_INDUSTRIES: [&str; 4] = ["新能源汽车", "医药生物", "电子", "白酒"];

const CYCLICAL_INDUSTRIES: [&str; 3] = ["房地产", "银行", "汽车"];

pub(crate) fn default_priors() -> BTreeMap<String, f64> {
    INDUSTRY_PRIORS
        .iter()
        .map(|(industry, score)| (industry.to_string(), *score))
        .collect()
}

pub(crate) fn default_growth_industries() -> Vec<String> {
    GROWTH_INDUSTRIES.iter().map(|name| name.to_string()).collect()
}

pub(crate) fn default_cyclical_industries() -> Vec<String> {
    CYCLICAL_INDUSTRIES.iter().map(|name| name.to_string()).collect()
}
