use crate::error::{InvoiceTrackerError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Upper bound for `weeklySpanDays`; a year of weekly buckets is the most a chart shows.
pub const MAX_WEEKLY_SPAN_DAYS: i64 = 366;

/// Tunables for the derivation pipeline. Every field has a default, so a partial
/// JSON document (or `{}`) is a valid configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardConfig {
    #[schemars(
        description = "Chart incomes are divided by this value before display. 1000 expresses them in thousands."
    )]
    pub display_divisor: f64,

    #[schemars(
        description = "Windows spanning at most this many days are bucketed by week, longer ones by calendar month."
    )]
    pub weekly_span_days: i64,

    #[schemars(description = "Placeholder data used when a window holds no real invoices")]
    pub synthetic: SyntheticConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            display_divisor: 1000.0,
            weekly_span_days: 31,
            synthetic: SyntheticConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct SyntheticConfig {
    #[schemars(description = "Mean amount of a placeholder invoice")]
    pub base_amount: f64,

    #[schemars(
        description = "Relative standard deviation applied to baseAmount. Range: 0.0 (identical amounts) to 1.0."
    )]
    pub noise_factor: f64,

    #[schemars(description = "Seed mixed with the window bounds so identical windows yield identical data")]
    pub seed: u64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            base_amount: 2500.0,
            noise_factor: 0.15,
            seed: 0x1DA5_2026,
        }
    }
}

impl DashboardConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: DashboardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.display_divisor.is_finite() || self.display_divisor <= 0.0 {
            return Err(InvoiceTrackerError::InvalidConfig(format!(
                "displayDivisor must be a positive number, got {}",
                self.display_divisor
            )));
        }

        if !(1..=MAX_WEEKLY_SPAN_DAYS).contains(&self.weekly_span_days) {
            return Err(InvoiceTrackerError::InvalidConfig(format!(
                "weeklySpanDays must be between 1 and {}, got {}",
                MAX_WEEKLY_SPAN_DAYS, self.weekly_span_days
            )));
        }

        let synthetic = &self.synthetic;
        if !synthetic.base_amount.is_finite() || synthetic.base_amount < 0.0 {
            return Err(InvoiceTrackerError::InvalidAmount(synthetic.base_amount));
        }

        if !(0.0..=1.0).contains(&synthetic.noise_factor) {
            return Err(InvoiceTrackerError::InvalidNoiseFactor(
                synthetic.noise_factor,
            ));
        }

        Ok(())
    }

    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(DashboardConfig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = DashboardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.display_divisor, 1000.0);
        assert_eq!(config.weekly_span_days, 31);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = DashboardConfig::from_json(r#"{"synthetic":{"seed":7}}"#).unwrap();
        assert_eq!(config.synthetic.seed, 7);
        assert_eq!(config.synthetic.base_amount, 2500.0);
        assert_eq!(config.display_divisor, 1000.0);

        let empty = DashboardConfig::from_json("{}").unwrap();
        assert_eq!(empty, DashboardConfig::default());
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            DashboardConfig::from_json(r#"{"displayDivisor":0}"#),
            Err(InvoiceTrackerError::InvalidConfig(_))
        ));
        assert!(matches!(
            DashboardConfig::from_json(r#"{"synthetic":{"noiseFactor":1.5}}"#),
            Err(InvoiceTrackerError::InvalidNoiseFactor(_))
        ));
        assert!(matches!(
            DashboardConfig::from_json(r#"{"synthetic":{"baseAmount":-1}}"#),
            Err(InvoiceTrackerError::InvalidAmount(_))
        ));
        assert!(matches!(
            DashboardConfig::from_json("not json"),
            Err(InvoiceTrackerError::SerializationError(_))
        ));
    }

    #[test]
    fn test_weekly_span_days_bounds() {
        let huge = DashboardConfig {
            weekly_span_days: i64::MAX,
            ..DashboardConfig::default()
        };
        assert!(matches!(
            huge.validate(),
            Err(InvoiceTrackerError::InvalidConfig(_))
        ));
        assert!(crate::InvoiceDashboard::new(huge).is_err());

        assert!(matches!(
            DashboardConfig::from_json(r#"{"weeklySpanDays":0}"#),
            Err(InvoiceTrackerError::InvalidConfig(_))
        ));
        let max = DashboardConfig::from_json(r#"{"weeklySpanDays":366}"#).unwrap();
        assert_eq!(max.weekly_span_days, MAX_WEEKLY_SPAN_DAYS);
    }

    #[test]
    fn test_json_keys_are_camel_case() {
        let config = DashboardConfig::from_json(
            r#"{"displayDivisor":1,"synthetic":{"baseAmount":10,"noiseFactor":0}}"#,
        )
        .unwrap();
        assert_eq!(config.display_divisor, 1.0);
        assert_eq!(config.synthetic.base_amount, 10.0);

        let json = serde_json::to_value(DashboardConfig::default()).unwrap();
        assert!(json.get("weeklySpanDays").is_some());
        assert!(json["synthetic"].get("noiseFactor").is_some());
    }
}
