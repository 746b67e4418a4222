/// Display tier for a risk category. Categories are an open set on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskTier {
    Low,
    Moderate,
    High,
    Unrecognized,
}

impl RiskTier {
    pub fn from_category(category: &str) -> Self {
        let c = category.trim();
        if c.eq_ignore_ascii_case("low") {
            RiskTier::Low
        } else if c.eq_ignore_ascii_case("moderate") {
            RiskTier::Moderate
        } else if c.eq_ignore_ascii_case("high") {
            RiskTier::High
        } else {
            RiskTier::Unrecognized
        }
    }

    pub fn marker(&self) -> &'static str {
        match self {
            RiskTier::Low => "[low]",
            RiskTier::Moderate => "[moderate]",
            RiskTier::High => "[HIGH]",
            RiskTier::Unrecognized => "[unrated]",
        }
    }
}
