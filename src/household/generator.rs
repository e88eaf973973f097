use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::f64::consts::TAU;
use tracing::debug;

use super::models::{Dataset, Fixture, FixtureUsage, HouseholdRecord};
use super::params::{FixtureParams, GeneratorParams, Normal, UsageUnit};
use crate::error::ConfigError;

/// Seed used when the configuration does not name one
pub const DEFAULT_SEED: u64 = 42;

/// Households generated when the configuration does not say otherwise
pub const DEFAULT_HOUSEHOLDS: usize = 100;

/// Generate the synthetic household dataset.
///
/// Draw order is fixed (household sizes, then each fixture column in
/// catalog order, then zip codes), so a seed and parameter table always
/// reproduce the same dataset. Parameters are validated up front and no
/// partial dataset is ever returned.
pub fn generate_dataset(
    num_households: usize,
    seed: u64,
    params: &GeneratorParams,
) -> Result<Dataset, ConfigError> {
    if num_households == 0 {
        return Err(ConfigError::NonPositiveHouseholds);
    }
    if u32::try_from(num_households).is_err() {
        return Err(ConfigError::invalid(
            "household count",
            format!("{} exceeds the id range", num_households),
        ));
    }
    params.validate()?;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let sizes: Vec<u32> = (0..num_households)
        .map(|_| {
            let size = sample_normal(&mut rng, params.household_size).round();
            // Floor of one person; `as` saturates the upper end
            size.max(1.0) as u32
        })
        .collect();

    let mut usage = vec![FixtureUsage::default(); num_households];
    for fixture in Fixture::ALL {
        let column = draw_column(&mut rng, fixture, params.fixture(fixture)?, &sizes)?;
        for (row, value) in usage.iter_mut().zip(column) {
            row.set(fixture, value);
        }
    }

    // Finite columns can still sum past f64::MAX
    if usage.iter().any(|row| !row.total().is_finite()) {
        return Err(ConfigError::invalid(
            "household total",
            "fixture parameters overflow the daily total",
        ));
    }

    let zip_codes: Vec<Option<String>> = (0..num_households)
        .map(|_| params.zip_codes.choose(&mut rng).cloned())
        .collect();

    let records: Vec<HouseholdRecord> = sizes
        .into_iter()
        .zip(usage)
        .zip(zip_codes)
        .enumerate()
        .map(|(i, ((household_size, usage), zip_code))| HouseholdRecord {
            household_id: i as u32 + 1,
            zip_code,
            household_size,
            usage,
        })
        .collect();

    debug!(households = records.len(), seed, "generated household dataset");

    Ok(Dataset::generated(records, seed))
}

/// Draw one fixture column and convert it to gallons/day
fn draw_column<R: Rng + ?Sized>(
    rng: &mut R,
    fixture: Fixture,
    params: &FixtureParams,
    sizes: &[u32],
) -> Result<Vec<f64>, ConfigError> {
    let precision = params.precision;
    let drawn: Vec<f64> = sizes
        .iter()
        .map(|_| precision.round(sample_normal(&mut *rng, params.distribution)))
        .collect();

    let daily: Vec<f64> = match params.unit {
        UsageUnit::PerDay => drawn,
        UsageUnit::PerPerson => drawn
            .iter()
            .zip(sizes)
            .map(|(per_person, size)| precision.round(per_person * *size as f64))
            .collect(),
        UsageUnit::PerEvent {
            events_min,
            events_max,
            period_days,
        } => {
            // Event counts form their own column, drawn after the volumes
            let events: Vec<u32> = sizes
                .iter()
                .map(|_| rng.gen_range(events_min..=events_max))
                .collect();
            drawn
                .iter()
                .zip(events)
                .map(|(per_event, count)| precision.round(per_event * count as f64 / period_days))
                .collect()
        }
    };

    daily
        .into_iter()
        .map(|value| {
            // Huge but finite parameters can overflow to infinity
            if value.is_finite() {
                Ok(clamp_non_negative(value))
            } else {
                Err(ConfigError::invalid(
                    fixture.label(),
                    "parameters overflow to a non-finite daily usage",
                ))
            }
        })
        .collect()
}

/// Box-Muller transform over the uniform stream
fn sample_normal<R: Rng + ?Sized>(rng: &mut R, dist: Normal) -> f64 {
    // 1 - [0, 1) keeps the log argument away from zero
    let u1 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen();
    let z = (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos();
    dist.mean + dist.std_dev * z
}

fn clamp_non_negative(value: f64) -> f64 {
    if value <= 0.0 {
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::household::params::Precision;

    fn fixed(mean: f64) -> FixtureParams {
        FixtureParams::daily(mean, 0.0)
    }

    #[test]
    fn test_same_seed_same_dataset() {
        let params = GeneratorParams::direct_daily();
        let a = generate_dataset(100, DEFAULT_SEED, &params).unwrap();
        let b = generate_dataset(100, DEFAULT_SEED, &params).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.seed(), Some(DEFAULT_SEED));

        let params = GeneratorParams::per_event();
        let a = generate_dataset(100, 7, &params).unwrap();
        let b = generate_dataset(100, 7, &params).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_different_dataset() {
        let params = GeneratorParams::direct_daily();
        let a = generate_dataset(50, 1, &params).unwrap();
        let b = generate_dataset(50, 2, &params).unwrap();
        assert_ne!(a.records(), b.records());
    }

    #[test]
    fn test_record_invariants_hold() {
        for params in [GeneratorParams::direct_daily(), GeneratorParams::per_event()] {
            let dataset = generate_dataset(500, 11, &params).unwrap();
            assert_eq!(dataset.len(), 500);

            for (i, record) in dataset.records().iter().enumerate() {
                assert_eq!(record.household_id as usize, i + 1);
                assert!(record.household_size >= 1);

                let mut sum = 0.0;
                for fixture in Fixture::ALL {
                    let value = record.usage.get(fixture);
                    assert!(value >= 0.0, "{} was {}", fixture, value);
                    sum += value;
                }
                assert!((record.total_daily_usage() - sum).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_zero_households_is_a_config_error() {
        let result = generate_dataset(0, DEFAULT_SEED, &GeneratorParams::default());
        assert_eq!(result, Err(ConfigError::NonPositiveHouseholds));
    }

    #[test]
    fn test_missing_fixture_fails_fast() {
        let mut params = GeneratorParams::direct_daily();
        params.fixtures.remove(&Fixture::CarWash);
        let result = generate_dataset(10, DEFAULT_SEED, &params);
        assert_eq!(result, Err(ConfigError::MissingFixture(Fixture::CarWash)));
    }

    #[test]
    fn test_whole_precision_yields_integers() {
        let dataset = generate_dataset(200, 3, &GeneratorParams::direct_daily()).unwrap();
        for fixture in Fixture::ALL {
            assert!(dataset.column(fixture).all(|v| v.fract() == 0.0));
        }
    }

    #[test]
    fn test_tenths_precision_yields_one_decimal() {
        let dataset = generate_dataset(200, 3, &GeneratorParams::per_event()).unwrap();
        for value in dataset.column(Fixture::Laundry) {
            assert!(((value * 10.0).round() - value * 10.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_zip_codes_come_from_configured_set() {
        let params = GeneratorParams::direct_daily();
        let dataset = generate_dataset(100, DEFAULT_SEED, &params).unwrap();
        for record in dataset.records() {
            let zip = record.zip_code.as_ref().expect("zip code present");
            assert!(params.zip_codes.contains(zip));
        }

        let dataset = generate_dataset(10, DEFAULT_SEED, &GeneratorParams::per_event()).unwrap();
        assert!(dataset.records().iter().all(|r| r.zip_code.is_none()));
    }

    #[test]
    fn test_negative_draws_are_clamped() {
        let mut params = GeneratorParams::direct_daily();
        params
            .fixtures
            .insert(Fixture::CarWash, FixtureParams::daily(-50.0, 1.0));
        let dataset = generate_dataset(100, DEFAULT_SEED, &params).unwrap();
        assert!(dataset.column(Fixture::CarWash).all(|v| v == 0.0));
    }

    #[test]
    fn test_household_size_floor() {
        let mut params = GeneratorParams::direct_daily();
        params.household_size = Normal::new(-3.0, 0.5);
        let dataset = generate_dataset(50, DEFAULT_SEED, &params).unwrap();
        assert!(dataset.records().iter().all(|r| r.household_size == 1));
    }

    #[test]
    fn test_per_person_scales_with_household() {
        let mut params = GeneratorParams::direct_daily();
        params.household_size = Normal::new(3.0, 0.0);
        params.fixtures.insert(
            Fixture::Shower,
            fixed(10.0).with_precision(Precision::Tenths).with_unit(UsageUnit::PerPerson),
        );
        let dataset = generate_dataset(20, DEFAULT_SEED, &params).unwrap();
        assert!(dataset.column(Fixture::Shower).all(|v| v == 30.0));
    }

    #[test]
    fn test_per_event_converts_to_daily_average() {
        let mut params = GeneratorParams::direct_daily();
        params.fixtures.insert(
            Fixture::Laundry,
            fixed(28.0)
                .with_precision(Precision::Tenths)
                .with_unit(UsageUnit::PerEvent {
                    events_min: 3,
                    events_max: 6,
                    period_days: 7.0,
                }),
        );
        let dataset = generate_dataset(200, DEFAULT_SEED, &params).unwrap();
        // 28 gallons/load at 3..=6 loads/week
        let allowed = [12.0, 16.0, 20.0, 24.0];
        assert!(dataset.column(Fixture::Laundry).all(|v| allowed.contains(&v)));
    }

    #[test]
    fn test_overflowing_parameters_are_rejected() {
        let mut params = GeneratorParams::direct_daily();
        params.household_size = Normal::new(3.0, 0.0);
        // Finite per person, infinite once scaled to three people
        params
            .fixtures
            .insert(Fixture::Garden, fixed(1e308).with_unit(UsageUnit::PerPerson));
        let result = generate_dataset(50, DEFAULT_SEED, &params);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { ref subject, .. }) if subject == "Garden"
        ));
    }

    #[test]
    fn test_overflowing_total_is_rejected() {
        let mut params = GeneratorParams::direct_daily();
        for fixture in Fixture::ALL {
            params.fixtures.insert(fixture, fixed(1e308));
        }
        let result = generate_dataset(5, DEFAULT_SEED, &params);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter { ref subject, .. }) if subject == "household total"
        ));
    }

    #[test]
    fn test_sample_mean_tracks_configured_mean() {
        let dataset = generate_dataset(2000, 5, &GeneratorParams::direct_daily()).unwrap();
        let mean = dataset.column(Fixture::Shower).sum::<f64>() / dataset.len() as f64;
        assert!((mean - 25.0).abs() < 1.0, "mean was {}", mean);
    }
}
