use std::fmt;

use serde::{Deserialize, Serialize};

use super::record::CreditRecord;

/// Age buckets used by the portfolio breakdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgeBand {
    #[serde(rename = "18-25")]
    UpTo25,
    #[serde(rename = "26-35")]
    From26To35,
    #[serde(rename = "36-45")]
    From36To45,
    #[serde(rename = "46-60")]
    From46To60,
    #[serde(rename = "60+")]
    Over60,
}

impl AgeBand {
    pub fn ordered() -> [AgeBand; 5] {
        [
            AgeBand::UpTo25,
            AgeBand::From26To35,
            AgeBand::From36To45,
            AgeBand::From46To60,
            AgeBand::Over60,
        ]
    }

    pub fn for_age(age: u32) -> Self {
        match age {
            0..=25 => AgeBand::UpTo25,
            26..=35 => AgeBand::From26To35,
            36..=45 => AgeBand::From36To45,
            46..=60 => AgeBand::From46To60,
            _ => AgeBand::Over60,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeBand::UpTo25 => "18-25",
            AgeBand::From26To35 => "26-35",
            AgeBand::From36To45 => "36-45",
            AgeBand::From46To60 => "46-60",
            AgeBand::Over60 => "60+",
        }
    }
}

impl fmt::Display for AgeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl CreditRecord {
    pub fn age_band(&self) -> AgeBand {
        AgeBand::for_age(self.age_years)
    }

    /// Average repayment per month in DM.
    pub fn payment_pressure(&self) -> f64 {
        if self.duration_months == 0 {
            return 0.0;
        }
        f64::from(self.credit_amount) / f64::from(self.duration_months)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_edges_are_inclusive() {
        assert_eq!(AgeBand::for_age(19), AgeBand::UpTo25);
        assert_eq!(AgeBand::for_age(25), AgeBand::UpTo25);
        assert_eq!(AgeBand::for_age(26), AgeBand::From26To35);
        assert_eq!(AgeBand::for_age(60), AgeBand::From46To60);
        assert_eq!(AgeBand::for_age(61), AgeBand::Over60);
    }

    #[test]
    fn bands_sort_by_age() {
        let mut bands = vec![AgeBand::Over60, AgeBand::UpTo25, AgeBand::From36To45];
        bands.sort();
        assert_eq!(
            bands,
            vec![AgeBand::UpTo25, AgeBand::From36To45, AgeBand::Over60]
        );
    }
}
