use serde::{Deserialize, Serialize};

/// Monthly cost components
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct CostBreakdown {
    pub compute: f64,
    pub storage: f64,
    pub network: f64,
}

/// Monthly price estimate for a configuration.
///
/// Wire shape matches the estimation endpoint: `{ monthly_cost, breakdown }`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct CostEstimate {
    pub monthly_cost: f64,
    pub breakdown: CostBreakdown,
}

/// Round to cents
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl CostEstimate {
    /// Build an estimate whose total is the rounded sum of its parts
    pub fn from_parts(compute: f64, storage: f64, network: f64) -> Self {
        let breakdown = CostBreakdown {
            compute: round_cents(compute),
            storage: round_cents(storage),
            network: round_cents(network),
        };
        Self {
            monthly_cost: round_cents(breakdown.compute + breakdown.storage + breakdown.network),
            breakdown,
        }
    }

    /// Total agrees with the breakdown to the cent
    pub fn is_consistent(&self) -> bool {
        let sum = self.breakdown.compute + self.breakdown.storage + self.breakdown.network;
        (round_cents(sum) - round_cents(self.monthly_cost)).abs() < 0.005
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_sums() {
        let estimate = CostEstimate::from_parts(17.0, 4.0, 5.0);
        assert_eq!(estimate.monthly_cost, 26.0);
        assert!(estimate.is_consistent());
    }

    #[test]
    fn test_rounding() {
        let estimate = CostEstimate::from_parts(6.8 * 3.0, 20.0 * 0.1 * 3.0, 5.0);
        assert_eq!(estimate.breakdown.compute, 20.4);
        assert_eq!(estimate.breakdown.storage, 6.0);
        assert_eq!(estimate.monthly_cost, 31.4);
    }

    #[test]
    fn test_parse_wire_shape() {
        let estimate: CostEstimate = serde_json::from_str(
            r#"{"monthly_cost": 26.0, "breakdown": {"compute": 17.0, "storage": 4.0, "network": 5.0}}"#,
        )
        .unwrap();
        assert_eq!(estimate.breakdown.network, 5.0);
        assert!(estimate.is_consistent());
    }

    #[test]
    fn test_inconsistent_total_detected() {
        let estimate = CostEstimate {
            monthly_cost: 21.0,
            breakdown: CostBreakdown {
                compute: 17.0,
                storage: 4.0,
                network: 5.0,
            },
        };
        assert!(!estimate.is_consistent());
    }
}
