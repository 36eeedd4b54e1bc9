use crate::domain::pricing::observation::Season;

/// Ordered list of feature names.
/// This order MUST match the column order of every feature matrix handed to a regressor
/// and the weight order of `LinearModel`.
pub const FEATURE_NAMES: &[&str] = &["demand_index", "competitor_price", "seasonality"];

pub const FEATURE_COUNT: usize = 3;

/// Builds a feature row in registry order.
pub fn to_feature_row(demand_index: f64, competitor_price: f64, seasonality: Season) -> [f64; 3] {
    [demand_index, competitor_price, seasonality.as_feature()]
}

/// Pairs each feature name with the matching value, e.g. for coefficient reports.
pub fn label_features(values: &[f64]) -> Vec<(&'static str, f64)> {
    FEATURE_NAMES
        .iter()
        .copied()
        .zip(values.iter().copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_row_length() {
        let row = to_feature_row(0.5, 100.0, Season::Low);
        assert_eq!(row.len(), FEATURE_NAMES.len());
        assert_eq!(FEATURE_COUNT, FEATURE_NAMES.len());
    }

    #[test]
    fn test_feature_consistency() {
        let row = to_feature_row(0.7, 95.0, Season::High);
        // demand is index 0
        assert_eq!(row[0], 0.7);
        // seasonality is last index (2)
        assert_eq!(row[2], 1.0);
    }

    #[test]
    fn test_label_features() {
        let labeled = label_features(&[1.0, 2.0, 3.0]);
        assert_eq!(labeled[1], ("competitor_price", 2.0));
        assert_eq!(labeled.len(), 3);
    }
}
