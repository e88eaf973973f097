pub mod aggregator;
pub mod generator;
pub mod models;
pub mod params;
pub mod regions;

pub use aggregator::{
    average_usage, average_usage_of, compare_to_baseline, compare_with_rate, goal_progress,
    goal_savings, measure_savings, statewide_savings, ConservationMeasure, GoalProgress,
    GoalSavings, MeasureSavings, SavingsResult, SavingsStatus, COST_PER_GALLON, DAYS_PER_MONTH,
    NATIONAL_BASELINE,
};
pub use generator::{generate_dataset, DEFAULT_HOUSEHOLDS, DEFAULT_SEED};
pub use models::{Dataset, Fixture, FixtureCatalog, FixtureUsage, HouseholdRecord};
pub use params::{FixtureParams, GeneratorParams, Normal, Precision, UsageUnit};
pub use regions::{RegionalBaseline, RegionalBaselines, CALIFORNIA_POPULATION};
