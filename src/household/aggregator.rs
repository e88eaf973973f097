use serde::{Deserialize, Serialize};

use super::models::{Dataset, Fixture, FixtureCatalog};
use crate::error::{ensure_non_negative, ensure_positive, UsageError};

/// Water price in USD per gallon
pub const COST_PER_GALLON: f64 = 0.01065;

/// National average daily usage (gallons/day)
pub const NATIONAL_BASELINE: f64 = 82.0;

/// Days in the monthly savings projection
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Mean daily usage of a fixture, looked up by name
pub fn average_usage(dataset: &Dataset, fixture_name: &str) -> Result<f64, UsageError> {
    let fixture = FixtureCatalog::resolve(fixture_name)?;
    average_usage_of(dataset, fixture)
}

/// Mean daily usage of a fixture across every household
pub fn average_usage_of(dataset: &Dataset, fixture: Fixture) -> Result<f64, UsageError> {
    if dataset.is_empty() {
        return Err(UsageError::EmptyDataset);
    }
    let sum: f64 = dataset.column(fixture).sum();
    Ok(sum / dataset.len() as f64)
}

/// Where a household stands against the baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavingsStatus {
    Above,
    AtBaseline,
    Below,
}

/// Outcome of comparing daily usage against a baseline
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SavingsResult {
    Above {
        /// Gallons/day saved by dropping to the baseline
        savings_potential: f64,
        /// USD/day for that reduction
        projected_cost_savings: f64,
    },
    AtBaseline,
    Below {
        /// Gallons/day already saved relative to the baseline
        surplus_savings: f64,
    },
}

impl SavingsResult {
    pub fn status(&self) -> SavingsStatus {
        match self {
            SavingsResult::Above { .. } => SavingsStatus::Above,
            SavingsResult::AtBaseline => SavingsStatus::AtBaseline,
            SavingsResult::Below { .. } => SavingsStatus::Below,
        }
    }
}

/// Compare usage against a baseline at the standard water price
pub fn compare_to_baseline(
    user_daily_usage: f64,
    baseline_daily_usage: f64,
) -> Result<SavingsResult, UsageError> {
    compare_with_rate(user_daily_usage, baseline_daily_usage, COST_PER_GALLON)
}

/// Compare usage against a baseline at a configured water price
pub fn compare_with_rate(
    user_daily_usage: f64,
    baseline_daily_usage: f64,
    cost_per_gallon: f64,
) -> Result<SavingsResult, UsageError> {
    let user = ensure_non_negative("daily usage", user_daily_usage)?;
    let baseline = ensure_positive("baseline usage", baseline_daily_usage)?;
    let rate = ensure_non_negative("cost per gallon", cost_per_gallon)?;

    let result = if user > baseline {
        let savings_potential = user - baseline;
        SavingsResult::Above {
            savings_potential,
            projected_cost_savings: savings_potential * rate,
        }
    } else if user == baseline {
        SavingsResult::AtBaseline
    } else {
        SavingsResult::Below {
            surplus_savings: baseline - user,
        }
    };

    Ok(result)
}

/// Gallons/day saved if `population` people moved from `usage_a` to `usage_b`
pub fn statewide_savings(usage_a: f64, usage_b: f64, population: u64) -> Result<f64, UsageError> {
    let a = ensure_non_negative("regional usage", usage_a)?;
    let b = ensure_non_negative("regional usage", usage_b)?;
    Ok((a - b) * population as f64)
}

/// A household change with a known daily saving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConservationMeasure {
    pub name: String,
    pub gallons_per_day: f64,
}

impl ConservationMeasure {
    pub fn new(name: impl Into<String>, gallons_per_day: f64) -> Self {
        Self {
            name: name.into(),
            gallons_per_day,
        }
    }

    pub fn defaults() -> Vec<ConservationMeasure> {
        vec![
            ConservationMeasure::new("Install low-flow showerheads", 10.0),
            ConservationMeasure::new("Upgrade to a high-efficiency washer", 15.0),
            ConservationMeasure::new("Use drip irrigation for gardens", 20.0),
        ]
    }
}

/// Combined effect of a set of measures
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MeasureSavings {
    pub gallons_per_day: f64,
    pub cost_per_day: f64,
}

pub fn measure_savings<'a, I>(selected: I, cost_per_gallon: f64) -> MeasureSavings
where
    I: IntoIterator<Item = &'a ConservationMeasure>,
{
    let gallons_per_day: f64 = selected
        .into_iter()
        .map(|m| m.gallons_per_day.max(0.0))
        .sum();

    MeasureSavings {
        gallons_per_day,
        cost_per_day: gallons_per_day * cost_per_gallon,
    }
}

/// Progress toward a daily reduction goal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalProgress {
    pub current_usage: f64,
    pub reduction_goal: f64,
    /// Usage left after meeting the goal, never below zero
    pub remaining: f64,
    /// Share of current usage the goal covers, in `0.0..=1.0`
    pub progress: f64,
}

pub fn goal_progress(current_usage: f64, reduction_goal: f64) -> Result<GoalProgress, UsageError> {
    let current = ensure_positive("current usage", current_usage)?;
    let goal = ensure_non_negative("reduction goal", reduction_goal)?;

    Ok(GoalProgress {
        current_usage: current,
        reduction_goal: goal,
        remaining: (current - goal).max(0.0),
        progress: (goal / current).min(1.0),
    })
}

/// Money saved by meeting a daily reduction goal
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GoalSavings {
    /// USD/day
    pub daily: f64,
    /// USD over `DAYS_PER_MONTH` days
    pub monthly: f64,
}

pub fn goal_savings(reduction_goal: f64, cost_per_gallon: f64) -> Result<GoalSavings, UsageError> {
    let goal = ensure_non_negative("reduction goal", reduction_goal)?;
    let rate = ensure_non_negative("cost per gallon", cost_per_gallon)?;

    let daily = goal * rate;
    Ok(GoalSavings {
        daily,
        monthly: daily * DAYS_PER_MONTH,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::household::models::{FixtureUsage, HouseholdRecord};

    fn identical_rows(n: u32, value: f64) -> Dataset {
        let records = (1..=n)
            .map(|id| HouseholdRecord {
                household_id: id,
                zip_code: None,
                household_size: 2,
                usage: FixtureUsage::uniform(value),
            })
            .collect();
        Dataset::from_records(records)
    }

    #[test]
    fn test_average_of_identical_rows() {
        let dataset = identical_rows(37, 12.5);
        for name in FixtureCatalog::names() {
            assert_eq!(average_usage(&dataset, name), Ok(12.5));
        }
    }

    #[test]
    fn test_average_reads_the_named_column() {
        let mut record = HouseholdRecord {
            household_id: 1,
            zip_code: None,
            household_size: 1,
            usage: FixtureUsage::default(),
        };
        record.usage.garden = 40.0;
        record.usage.car_wash = 4.0;
        let dataset = Dataset::from_records(vec![record]);

        assert_eq!(average_usage(&dataset, "Garden"), Ok(40.0));
        assert_eq!(average_usage(&dataset, "Car Wash"), Ok(4.0));
        assert_eq!(average_usage(&dataset, "Laundry"), Ok(0.0));
    }

    #[test]
    fn test_average_unknown_fixture() {
        let dataset = identical_rows(3, 1.0);
        assert_eq!(
            average_usage(&dataset, "Swimming Pool"),
            Err(UsageError::UnknownFixture("Swimming Pool".to_string()))
        );
    }

    #[test]
    fn test_average_empty_dataset() {
        let dataset = Dataset::from_records(Vec::new());
        assert_eq!(average_usage(&dataset, "Shower"), Err(UsageError::EmptyDataset));
    }

    #[test]
    fn test_compare_above_baseline() {
        let result = compare_to_baseline(100.0, 82.0).unwrap();
        assert_eq!(result.status(), SavingsStatus::Above);
        match result {
            SavingsResult::Above {
                savings_potential,
                projected_cost_savings,
            } => {
                assert_eq!(savings_potential, 18.0);
                assert!((projected_cost_savings - 18.0 * COST_PER_GALLON).abs() < 1e-12);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_compare_at_baseline() {
        assert_eq!(compare_to_baseline(82.0, 82.0), Ok(SavingsResult::AtBaseline));
    }

    #[test]
    fn test_compare_below_baseline() {
        assert_eq!(
            compare_to_baseline(50.0, 82.0),
            Ok(SavingsResult::Below { surplus_savings: 32.0 })
        );
    }

    #[test]
    fn test_compare_rejects_bad_inputs() {
        assert!(compare_to_baseline(-1.0, 82.0).is_err());
        assert!(compare_to_baseline(10.0, 0.0).is_err());
        assert!(compare_to_baseline(f64::NAN, 82.0).is_err());
        assert!(compare_with_rate(10.0, 82.0, -0.01).is_err());
    }

    #[test]
    fn test_compare_with_configured_rate() {
        let result = compare_with_rate(92.0, 82.0, 0.02).unwrap();
        let SavingsResult::Above {
            savings_potential,
            projected_cost_savings,
        } = result
        else {
            panic!("expected Above, got {:?}", result);
        };
        assert_eq!(savings_potential, 10.0);
        assert!((projected_cost_savings - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_statewide_savings() {
        assert_eq!(statewide_savings(146.0, 82.0, 39_538_223), Ok(2_530_446_272.0));
        assert_eq!(statewide_savings(82.0, 82.0, 1_000), Ok(0.0));
        assert!(statewide_savings(-1.0, 82.0, 10).is_err());
    }

    #[test]
    fn test_measure_savings_sums_selection() {
        let measures = ConservationMeasure::defaults();
        let savings = measure_savings(&measures, COST_PER_GALLON);
        assert_eq!(savings.gallons_per_day, 45.0);
        assert!((savings.cost_per_day - 45.0 * COST_PER_GALLON).abs() < 1e-12);

        let none = measure_savings(std::iter::empty(), COST_PER_GALLON);
        assert_eq!(none, MeasureSavings::default());
    }

    #[test]
    fn test_goal_progress() {
        let progress = goal_progress(100.0, 10.0).unwrap();
        assert_eq!(progress.remaining, 90.0);
        assert_eq!(progress.progress, 0.1);

        let overshoot = goal_progress(40.0, 50.0).unwrap();
        assert_eq!(overshoot.remaining, 0.0);
        assert_eq!(overshoot.progress, 1.0);

        assert!(goal_progress(0.0, 10.0).is_err());
        assert!(goal_progress(80.0, -5.0).is_err());
    }

    #[test]
    fn test_goal_savings_projects_a_month() {
        let savings = goal_savings(10.0, COST_PER_GALLON).unwrap();
        assert!((savings.daily - 0.1065).abs() < 1e-12);
        assert!((savings.monthly - 3.195).abs() < 1e-12);

        assert_eq!(goal_savings(0.0, COST_PER_GALLON), Ok(GoalSavings::default()));
        assert!(goal_savings(-1.0, COST_PER_GALLON).is_err());
        assert!(goal_savings(10.0, f64::NAN).is_err());
    }
}
