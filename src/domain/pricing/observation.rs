use serde::{Deserialize, Serialize};
use std::fmt;

/// Seasonality flag of an observation or a pricing query.
///
/// Encoded as `0` (low) / `1` (high) in features and exported tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", from = "u8")]
pub enum Season {
    #[default]
    Low,
    High,
}

impl Season {
    /// Coerces a numeric flag by truthiness: any nonzero value (NaN included) is high season.
    pub fn from_flag(flag: f64) -> Self {
        if flag != 0.0 { Season::High } else { Season::Low }
    }

    pub fn is_high(self) -> bool {
        matches!(self, Season::High)
    }

    /// Feature encoding used by the regression model
    pub fn as_feature(self) -> f64 {
        match self {
            Season::Low => 0.0,
            Season::High => 1.0,
        }
    }
}

impl From<bool> for Season {
    fn from(high: bool) -> Self {
        if high { Season::High } else { Season::Low }
    }
}

impl From<u8> for Season {
    fn from(flag: u8) -> Self {
        Season::from(flag != 0)
    }
}

impl From<Season> for u8 {
    fn from(season: Season) -> Self {
        match season {
            Season::Low => 0,
            Season::High => 1,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}

/// One labeled row of the pricing table.
///
/// `observed_price` is the target the model learns; the remaining fields are its features.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub demand_index: f64,
    pub competitor_price: f64,
    pub seasonality: Season,
    pub observed_price: f64,
}

impl Observation {
    pub fn new(
        demand_index: f64,
        competitor_price: f64,
        seasonality: Season,
        observed_price: f64,
    ) -> Self {
        Self {
            demand_index,
            competitor_price,
            seasonality,
            observed_price,
        }
    }

    /// Feature vector in registry order (see `domain::ml::feature_registry`)
    pub fn features(&self) -> [f64; 3] {
        crate::domain::ml::feature_registry::to_feature_row(
            self.demand_index,
            self.competitor_price,
            self.seasonality,
        )
    }
}
