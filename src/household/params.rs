use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::models::Fixture;
use crate::error::ConfigError;

/// Mean and standard deviation of a normal distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Normal {
    pub mean: f64,
    pub std_dev: f64,
}

impl Normal {
    pub const fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }

    fn validate(&self, subject: &str) -> Result<(), ConfigError> {
        if !self.mean.is_finite() {
            return Err(ConfigError::invalid(subject, "mean must be finite"));
        }
        if !self.std_dev.is_finite() || self.std_dev < 0.0 {
            return Err(ConfigError::invalid(
                subject,
                "standard deviation must be finite and non-negative",
            ));
        }
        Ok(())
    }
}

/// Rounding applied to drawn and converted values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    /// Integer gallons
    #[default]
    Whole,
    /// One decimal place
    Tenths,
}

impl Precision {
    pub fn round(&self, value: f64) -> f64 {
        match self {
            Precision::Whole => value.round(),
            Precision::Tenths => (value * 10.0).round() / 10.0,
        }
    }
}

/// What a drawn value measures, and how it becomes gallons/day
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UsageUnit {
    /// Already gallons per day
    #[default]
    PerDay,
    /// Gallons per person per day, scaled by household size
    PerPerson,
    /// Gallons per event (load, wash); `events_min..=events_max` events
    /// happen every `period_days`
    PerEvent {
        events_min: u32,
        events_max: u32,
        period_days: f64,
    },
}

/// Distribution of one fixture column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FixtureParams {
    #[serde(flatten)]
    pub distribution: Normal,
    #[serde(default)]
    pub precision: Precision,
    #[serde(default)]
    pub unit: UsageUnit,
}

impl FixtureParams {
    pub const fn daily(mean: f64, std_dev: f64) -> Self {
        Self {
            distribution: Normal::new(mean, std_dev),
            precision: Precision::Whole,
            unit: UsageUnit::PerDay,
        }
    }

    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_unit(mut self, unit: UsageUnit) -> Self {
        self.unit = unit;
        self
    }

    pub(crate) fn validate(&self, fixture: Fixture) -> Result<(), ConfigError> {
        let subject = fixture.label();
        self.distribution.validate(subject)?;
        if let UsageUnit::PerEvent {
            events_min,
            events_max,
            period_days,
        } = self.unit
        {
            if events_min > events_max {
                return Err(ConfigError::invalid(
                    subject,
                    format!("events_min {} exceeds events_max {}", events_min, events_max),
                ));
            }
            if !period_days.is_finite() || period_days <= 0.0 {
                return Err(ConfigError::invalid(subject, "period_days must be positive"));
            }
        }
        Ok(())
    }
}

/// Full parameter table for the generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorParams {
    pub household_size: Normal,
    /// Empty means records carry no zip code
    #[serde(default)]
    pub zip_codes: Vec<String>,
    pub fixtures: BTreeMap<Fixture, FixtureParams>,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self::direct_daily()
    }
}

impl GeneratorParams {
    /// Every fixture drawn directly as whole gallons/day
    pub fn direct_daily() -> Self {
        let fixtures = BTreeMap::from([
            (Fixture::Shower, FixtureParams::daily(25.0, 5.0)),
            (Fixture::Laundry, FixtureParams::daily(30.0, 8.0)),
            (Fixture::Dishwashing, FixtureParams::daily(12.0, 3.0)),
            (Fixture::Garden, FixtureParams::daily(40.0, 15.0)),
            (Fixture::CarWash, FixtureParams::daily(15.0, 5.0)),
        ]);

        Self {
            household_size: Normal::new(2.6, 0.5),
            zip_codes: ["90001", "90002", "90003", "90004"]
                .iter()
                .map(|z| z.to_string())
                .collect(),
            fixtures,
        }
    }

    /// Per-person and per-event draws converted to daily averages
    pub fn per_event() -> Self {
        let fixtures = BTreeMap::from([
            (
                Fixture::Shower,
                FixtureParams::daily(17.2, 2.0)
                    .with_precision(Precision::Tenths)
                    .with_unit(UsageUnit::PerPerson),
            ),
            (
                Fixture::Laundry,
                FixtureParams::daily(30.0, 5.0)
                    .with_precision(Precision::Tenths)
                    .with_unit(UsageUnit::PerEvent {
                        events_min: 3,
                        events_max: 6,
                        period_days: 7.0,
                    }),
            ),
            (
                Fixture::Dishwashing,
                FixtureParams::daily(6.0, 1.0)
                    .with_precision(Precision::Tenths)
                    .with_unit(UsageUnit::PerEvent {
                        events_min: 1,
                        events_max: 2,
                        period_days: 1.0,
                    }),
            ),
            (Fixture::Garden, FixtureParams::daily(40.0, 15.0)),
            (
                Fixture::CarWash,
                FixtureParams::daily(55.0, 8.7)
                    .with_precision(Precision::Tenths)
                    .with_unit(UsageUnit::PerEvent {
                        events_min: 1,
                        events_max: 4,
                        period_days: 30.0,
                    }),
            ),
        ]);

        Self {
            household_size: Normal::new(2.6, 0.5),
            zip_codes: Vec::new(),
            fixtures,
        }
    }

    /// Look up a fixture, failing if the table has no entry for it
    pub fn fixture(&self, fixture: Fixture) -> Result<&FixtureParams, ConfigError> {
        self.fixtures
            .get(&fixture)
            .ok_or(ConfigError::MissingFixture(fixture))
    }

    /// Check the whole table before anything is drawn
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.household_size.validate("household size")?;
        for fixture in Fixture::ALL {
            self.fixture(fixture)?.validate(fixture)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(GeneratorParams::direct_daily().validate().is_ok());
        assert!(GeneratorParams::per_event().validate().is_ok());
    }

    #[test]
    fn test_missing_fixture_is_reported() {
        let mut params = GeneratorParams::direct_daily();
        params.fixtures.remove(&Fixture::Garden);
        assert_eq!(
            params.validate(),
            Err(ConfigError::MissingFixture(Fixture::Garden))
        );
    }

    #[test]
    fn test_negative_std_dev_rejected() {
        let mut params = GeneratorParams::direct_daily();
        params
            .fixtures
            .insert(Fixture::Shower, FixtureParams::daily(25.0, -1.0));
        assert!(matches!(
            params.validate(),
            Err(ConfigError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_inverted_event_range_rejected() {
        let mut params = GeneratorParams::per_event();
        params.fixtures.insert(
            Fixture::Laundry,
            FixtureParams::daily(30.0, 5.0).with_unit(UsageUnit::PerEvent {
                events_min: 6,
                events_max: 3,
                period_days: 7.0,
            }),
        );
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_precision_rounding() {
        assert_eq!(Precision::Whole.round(24.5), 25.0);
        assert_eq!(Precision::Tenths.round(17.26), 17.3);
        assert_eq!(Precision::Tenths.round(-0.04), -0.0);
    }

    #[test]
    fn test_params_parse_from_yaml() {
        let yaml = r#"
household_size: { mean: 3.0, std_dev: 0.0 }
fixtures:
  shower: { mean: 20.0, std_dev: 1.0 }
  laundry:
    mean: 30.0
    std_dev: 5.0
    precision: tenths
    unit: { kind: per_event, events_min: 3, events_max: 6, period_days: 7.0 }
  dishwashing: { mean: 6.0, std_dev: 1.0, unit: { kind: per_person } }
  garden: { mean: 40.0, std_dev: 15.0 }
  car_wash: { mean: 15.0, std_dev: 5.0 }
"#;
        let params: GeneratorParams = serde_yaml::from_str(yaml).unwrap();
        assert!(params.zip_codes.is_empty());
        assert_eq!(params.fixtures.len(), 5);
        let laundry = params.fixture(Fixture::Laundry).unwrap();
        assert_eq!(laundry.precision, Precision::Tenths);
        assert!(matches!(laundry.unit, UsageUnit::PerEvent { events_max: 6, .. }));
        assert!(params.validate().is_ok());
    }
}
