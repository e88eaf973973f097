use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::UsageError;

/// Household water-consuming activity tracked by the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fixture {
    Shower,
    Laundry,
    Dishwashing,
    Garden,
    CarWash,
}

impl Fixture {
    /// Catalog order. Also the order columns are drawn in.
    pub const ALL: [Fixture; 5] = [
        Fixture::Shower,
        Fixture::Laundry,
        Fixture::Dishwashing,
        Fixture::Garden,
        Fixture::CarWash,
    ];

    /// Display name shown in the dashboard
    pub fn label(&self) -> &'static str {
        match self {
            Fixture::Shower => "Shower",
            Fixture::Laundry => "Laundry",
            Fixture::Dishwashing => "Dishwashing",
            Fixture::Garden => "Garden",
            Fixture::CarWash => "Car Wash",
        }
    }

    /// Configuration key
    pub fn key(&self) -> &'static str {
        match self {
            Fixture::Shower => "shower",
            Fixture::Laundry => "laundry",
            Fixture::Dishwashing => "dishwashing",
            Fixture::Garden => "garden",
            Fixture::CarWash => "car_wash",
        }
    }
}

impl fmt::Display for Fixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Static mapping from an activity name to its dataset column.
///
/// Accepts display names ("Car Wash") and config keys ("car_wash"),
/// ignoring case. Every fixture owns a dedicated column; names outside
/// the catalog are rejected rather than routed to some aggregate.
pub struct FixtureCatalog;

impl FixtureCatalog {
    pub fn resolve(name: &str) -> Result<Fixture, UsageError> {
        let wanted = name.trim();
        Fixture::ALL
            .iter()
            .copied()
            .find(|f| f.label().eq_ignore_ascii_case(wanted) || f.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UsageError::UnknownFixture(name.to_string()))
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        Fixture::ALL.iter().map(|f| f.label())
    }
}

/// Daily usage per fixture for one household (gallons/day)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FixtureUsage {
    pub shower: f64,
    pub laundry: f64,
    pub dishwashing: f64,
    pub garden: f64,
    pub car_wash: f64,
}

impl FixtureUsage {
    /// Same value for every fixture
    pub fn uniform(value: f64) -> Self {
        Self {
            shower: value,
            laundry: value,
            dishwashing: value,
            garden: value,
            car_wash: value,
        }
    }

    pub fn get(&self, fixture: Fixture) -> f64 {
        match fixture {
            Fixture::Shower => self.shower,
            Fixture::Laundry => self.laundry,
            Fixture::Dishwashing => self.dishwashing,
            Fixture::Garden => self.garden,
            Fixture::CarWash => self.car_wash,
        }
    }

    pub(crate) fn set(&mut self, fixture: Fixture, value: f64) {
        match fixture {
            Fixture::Shower => self.shower = value,
            Fixture::Laundry => self.laundry = value,
            Fixture::Dishwashing => self.dishwashing = value,
            Fixture::Garden => self.garden = value,
            Fixture::CarWash => self.car_wash = value,
        }
    }

    pub fn total(&self) -> f64 {
        Fixture::ALL.iter().map(|f| self.get(*f)).sum()
    }
}

/// One synthetic household
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HouseholdRecord {
    pub household_id: u32,
    pub zip_code: Option<String>,
    pub household_size: u32,
    pub usage: FixtureUsage,
}

impl HouseholdRecord {
    /// Sum of all fixture fields. Derived, never stored.
    pub fn total_daily_usage(&self) -> f64 {
        self.usage.total()
    }
}

/// Immutable collection of households generated for a session
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<HouseholdRecord>,
    seed: Option<u64>,
}

impl Dataset {
    pub(crate) fn generated(records: Vec<HouseholdRecord>, seed: u64) -> Self {
        Self {
            records,
            seed: Some(seed),
        }
    }

    /// Wrap hand-built records (fixtures, imports)
    pub fn from_records(records: Vec<HouseholdRecord>) -> Self {
        Self { records, seed: None }
    }

    pub fn records(&self) -> &[HouseholdRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Seed the dataset was generated from, if any
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Values of one fixture column, in household order
    pub fn column(&self, fixture: Fixture) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(move |r| r.usage.get(fixture))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_resolves_labels_and_keys() {
        assert_eq!(FixtureCatalog::resolve("Car Wash"), Ok(Fixture::CarWash));
        assert_eq!(FixtureCatalog::resolve("car_wash"), Ok(Fixture::CarWash));
        assert_eq!(FixtureCatalog::resolve("  shower "), Ok(Fixture::Shower));
        assert_eq!(FixtureCatalog::resolve("GARDEN"), Ok(Fixture::Garden));
    }

    #[test]
    fn test_catalog_rejects_unknown() {
        assert_eq!(
            FixtureCatalog::resolve("Pool"),
            Err(UsageError::UnknownFixture("Pool".to_string()))
        );
        assert!(FixtureCatalog::resolve("").is_err());
    }

    #[test]
    fn test_every_fixture_has_its_own_column() {
        let mut usage = FixtureUsage::default();
        for (i, fixture) in Fixture::ALL.iter().enumerate() {
            usage.set(*fixture, (i + 1) as f64);
        }
        for (i, fixture) in Fixture::ALL.iter().enumerate() {
            assert_eq!(usage.get(*fixture), (i + 1) as f64);
        }
        assert_eq!(usage.total(), 15.0);
    }

    #[test]
    fn test_total_tracks_components() {
        let record = HouseholdRecord {
            household_id: 1,
            zip_code: None,
            household_size: 2,
            usage: FixtureUsage {
                shower: 20.0,
                laundry: 12.5,
                dishwashing: 6.0,
                garden: 40.0,
                car_wash: 1.5,
            },
        };
        assert_eq!(record.total_daily_usage(), 80.0);
    }
}
