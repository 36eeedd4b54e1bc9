use crate::domain::ml::linear_model::LinearModel;
use crate::domain::pricing::observation::Season;
use crate::domain::pricing::policy::{PriceSuggestion, PricingPolicy};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Inputs of one price suggestion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceQuery {
    pub demand_index: f64,
    pub competitor_price: f64,
    pub seasonality: Season,
}

impl PriceQuery {
    pub fn new(demand_index: f64, competitor_price: f64, seasonality: impl Into<Season>) -> Self {
        Self {
            demand_index,
            competitor_price,
            seasonality: seasonality.into(),
        }
    }

    /// Queries printed by the driver when none are supplied
    pub fn default_examples() -> Vec<PriceQuery> {
        vec![
            PriceQuery::new(0.2, 95.0, Season::Low),
            PriceQuery::new(0.8, 95.0, Season::High),
            PriceQuery::new(0.5, 110.0, Season::Low),
            PriceQuery::new(0.9, 80.0, Season::High),
        ]
    }

    /// Console line for this query, e.g. `demand=0.9, comp_price=80, season=1 -> suggested = 100.0`.
    /// The price uses float debug formatting so whole values keep their `.0`.
    pub fn report_line(&self, suggested: f64) -> String {
        format!("{} -> suggested = {:?}", self, suggested)
    }
}

impl fmt::Display for PriceQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "demand={}, comp_price={}, season={}",
            self.demand_index, self.competitor_price, self.seasonality
        )
    }
}

impl std::str::FromStr for PriceQuery {
    type Err = anyhow::Error;

    /// Parses `demand,competitor_price,season`, e.g. `0.5,110,0`.
    /// The season field is coerced by truthiness.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            anyhow::bail!(
                "Invalid query: {}. Expected 'demand,competitor_price,season'",
                s
            );
        }
        let demand: f64 = parts[0].parse()?;
        let competitor: f64 = parts[1].parse()?;
        let season: f64 = parts[2].parse()?;
        Ok(PriceQuery::new(demand, competitor, Season::from_flag(season)))
    }
}

/// Suggests bounded prices from a frozen model.
///
/// Inputs are not range-checked: a demand outside [0, 1] or a negative competitor price still
/// yields a number.
#[derive(Debug, Clone)]
pub struct PriceAdvisor {
    model: LinearModel,
    policy: PricingPolicy,
}

impl PriceAdvisor {
    pub fn new(model: LinearModel) -> Self {
        Self {
            model,
            policy: PricingPolicy::default(),
        }
    }

    /// Policy used by `suggest`/`explain` when none is passed explicitly
    pub fn with_policy(mut self, policy: PricingPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn model(&self) -> &LinearModel {
        &self.model
    }

    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Raw model output, before any guardrail
    pub fn predict(&self, query: &PriceQuery) -> f64 {
        self.model.predict(
            query.demand_index,
            query.competitor_price,
            query.seasonality,
        )
    }

    pub fn suggest_price(
        &self,
        demand_index: f64,
        competitor_price: f64,
        seasonality: impl Into<Season>,
        policy: &PricingPolicy,
    ) -> f64 {
        let query = PriceQuery::new(demand_index, competitor_price, seasonality);
        self.explain_with(&query, policy).suggested
    }

    /// Suggested price under the advisor's own policy
    pub fn suggest(&self, query: &PriceQuery) -> f64 {
        self.explain_with(query, &self.policy).suggested
    }

    pub fn explain(&self, query: &PriceQuery) -> PriceSuggestion {
        self.explain_with(query, &self.policy)
    }

    pub fn explain_with(&self, query: &PriceQuery, policy: &PricingPolicy) -> PriceSuggestion {
        let predicted = self.predict(query);
        let suggestion = policy.apply(predicted, query.competitor_price);
        debug!(
            "{} -> predicted={:.4}, max_allowed={:.4}, suggested={} (bound by {})",
            query,
            suggestion.predicted,
            suggestion.max_allowed,
            suggestion.suggested,
            suggestion.binding
        );
        suggestion
    }
}
