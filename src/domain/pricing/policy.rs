use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default maximum markup over the competitor price (25%)
pub const DEFAULT_MARKUP_LIMIT: f64 = 0.25;

/// Decimal places of a suggested price
pub const PRICE_DECIMALS: u32 = 2;

/// Business guardrails applied on top of the model prediction.
///
/// Composition order is fixed: markup cap, then floor, then ceiling. A ceiling below the
/// floor therefore wins over the floor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingPolicy {
    /// Maximum relative markup over the competitor price (e.g. 0.25 = 25%)
    pub markup_limit: f64,
    pub floor_price: Option<f64>,
    pub ceiling_price: Option<f64>,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            markup_limit: DEFAULT_MARKUP_LIMIT,
            floor_price: None,
            ceiling_price: None,
        }
    }
}

/// Which rule produced the final price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Guardrail {
    /// Raw model prediction passed every guardrail untouched
    Model,
    MarkupLimit,
    Floor,
    Ceiling,
}

impl fmt::Display for Guardrail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Guardrail::Model => "model",
            Guardrail::MarkupLimit => "markup_limit",
            Guardrail::Floor => "floor",
            Guardrail::Ceiling => "ceiling",
        };
        f.write_str(label)
    }
}

/// Outcome of applying a policy to a raw prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceSuggestion {
    pub predicted: f64,
    pub max_allowed: f64,
    /// Final price, rounded to `PRICE_DECIMALS`
    pub suggested: f64,
    pub binding: Guardrail,
}

impl PricingPolicy {
    pub fn new(markup_limit: f64) -> Self {
        Self {
            markup_limit,
            ..Default::default()
        }
    }

    pub fn with_floor(mut self, floor_price: f64) -> Self {
        self.floor_price = Some(floor_price);
        self
    }

    pub fn with_ceiling(mut self, ceiling_price: f64) -> Self {
        self.ceiling_price = Some(ceiling_price);
        self
    }

    pub fn max_allowed(&self, competitor_price: f64) -> f64 {
        competitor_price * (1.0 + self.markup_limit)
    }

    /// Clamps `predicted` through markup cap, floor and ceiling, then rounds.
    ///
    /// Inputs are not range-checked. Comparisons only replace the running value when the
    /// bound is strictly tighter, so a NaN prediction is kept as NaN.
    pub fn apply(&self, predicted: f64, competitor_price: f64) -> PriceSuggestion {
        let max_allowed = self.max_allowed(competitor_price);

        let mut suggested = predicted;
        let mut binding = Guardrail::Model;

        if max_allowed < suggested {
            suggested = max_allowed;
            binding = Guardrail::MarkupLimit;
        }

        if let Some(floor) = self.floor_price
            && floor > suggested
        {
            suggested = floor;
            binding = Guardrail::Floor;
        }

        if let Some(ceiling) = self.ceiling_price
            && ceiling < suggested
        {
            suggested = ceiling;
            binding = Guardrail::Ceiling;
        }

        PriceSuggestion {
            predicted,
            max_allowed,
            suggested: round_price(suggested),
            binding,
        }
    }
}

/// Rounds half-to-even on the exact binary value of `price`.
/// Values outside the decimal range (NaN, infinities) are returned unchanged.
pub fn round_price(price: f64) -> f64 {
    price_decimal(price)
        .and_then(|d| d.to_f64())
        .unwrap_or(price)
}

/// Suggested price as a `Decimal` with `PRICE_DECIMALS` places, `None` when not representable
pub fn price_decimal(price: f64) -> Option<Decimal> {
    Decimal::from_f64_retain(price).map(|d| d.round_dp(PRICE_DECIMALS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_prediction_below_cap_passes_through() {
        let policy = PricingPolicy::default();
        let s = policy.apply(100.123, 95.0);

        assert_eq!(s.suggested, 100.12);
        assert_eq!(s.binding, Guardrail::Model);
        assert_eq!(s.max_allowed, 118.75);
    }

    #[test]
    fn test_markup_cap() {
        let policy = PricingPolicy::default();
        let s = policy.apply(150.0, 95.0);

        assert_eq!(s.suggested, 118.75);
        assert_eq!(s.binding, Guardrail::MarkupLimit);
    }

    #[test]
    fn test_zero_markup_caps_at_competitor_price() {
        let policy = PricingPolicy::new(0.0);
        let s = policy.apply(101.0, 100.0);
        assert_eq!(s.suggested, 100.0);
    }

    #[test]
    fn test_floor_raises_price() {
        let policy = PricingPolicy::default().with_floor(100.0);
        let s = policy.apply(92.5, 110.0);

        assert_eq!(s.suggested, 100.0);
        assert_eq!(s.binding, Guardrail::Floor);
    }

    #[test]
    fn test_floor_applies_after_markup_cap() {
        // Floor above max_allowed still wins over the cap
        let policy = PricingPolicy::default().with_floor(130.0);
        let s = policy.apply(150.0, 100.0);

        assert_eq!(s.suggested, 130.0);
        assert_eq!(s.binding, Guardrail::Floor);
    }

    #[test]
    fn test_ceiling_lowers_price() {
        let policy = PricingPolicy::default().with_ceiling(90.0);
        let s = policy.apply(96.4, 80.0);

        assert_eq!(s.suggested, 90.0);
        assert_eq!(s.binding, Guardrail::Ceiling);
    }

    #[test]
    fn test_ceiling_overrides_higher_floor() {
        let policy = PricingPolicy::default()
            .with_floor(120.0)
            .with_ceiling(100.0);

        for predicted in [50.0, 110.0, 200.0] {
            let s = policy.apply(predicted, 100.0);
            assert_eq!(s.suggested, 100.0);
            assert_eq!(s.binding, Guardrail::Ceiling);
        }
    }

    #[test]
    fn test_bounds_hold_over_grid() {
        let policy = PricingPolicy::new(0.1).with_floor(80.0);
        for i in 0..200 {
            let predicted = 40.0 + i as f64 * 0.73;
            let competitor = 70.0 + (i % 50) as f64;
            let s = policy.apply(predicted, competitor);

            assert!(s.suggested >= 80.0);
            if competitor * 1.1 >= 80.0 {
                assert!(s.suggested <= round_price(competitor * 1.1));
            }
        }
    }

    #[test]
    fn test_nan_prediction_is_not_clamped() {
        let policy = PricingPolicy::default().with_floor(10.0).with_ceiling(20.0);
        let s = policy.apply(f64::NAN, 100.0);
        assert!(s.suggested.is_nan());
        assert_eq!(s.binding, Guardrail::Model);
    }

    #[test]
    fn test_round_price_half_to_even_on_exact_value() {
        // 2.675 is stored as 2.67499999...
        assert_eq!(round_price(2.675), 2.67);
        // 0.125 is exact, ties go to even
        assert_eq!(round_price(0.125), 0.12);
        assert_eq!(round_price(0.375), 0.38);
        assert_eq!(round_price(-1.005), -1.0);
        assert!(round_price(f64::INFINITY).is_infinite());
    }

    #[test]
    fn test_price_decimal() {
        assert_eq!(price_decimal(118.75), Some(dec!(118.75)));
        assert_eq!(price_decimal(2.675), Some(dec!(2.67)));
        assert_eq!(price_decimal(f64::NAN), None);
    }

    #[test]
    fn test_guardrail_display() {
        assert_eq!(Guardrail::MarkupLimit.to_string(), "markup_limit");
    }
}
