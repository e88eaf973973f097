use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use jadewater::config::DashboardConfig;
use jadewater::household::{
    average_usage_of, compare_with_rate, generate_dataset, Fixture, HouseholdRecord, SavingsResult,
};

#[derive(Debug, Serialize)]
struct Summary<'a> {
    households: usize,
    seed: u64,
    mean_daily_usage: BTreeMap<Fixture, f64>,
    statewide_savings: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    records: Option<&'a [HouseholdRecord]>,
}

fn main() -> Result<()> {
    let mut json = false;
    let mut with_records = false;
    let mut config_path: Option<PathBuf> = None;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            "--records" => with_records = true,
            other => config_path = Some(PathBuf::from(other)),
        }
    }

    let config = DashboardConfig::load_or_default(config_path.as_deref())?;
    let generator = &config.generator;
    let dataset = generate_dataset(generator.num_households, generator.seed, &generator.params)
        .context("Failed to generate household dataset")?;

    let mut means = BTreeMap::new();
    for fixture in Fixture::ALL {
        means.insert(fixture, average_usage_of(&dataset, fixture)?);
    }

    let regions = &config.regions;
    let statewide = regions
        .baselines
        .statewide_projection(&regions.state, &regions.reference, regions.population)
        .ok();

    if json {
        let summary = Summary {
            households: dataset.len(),
            seed: generator.seed,
            mean_daily_usage: means,
            statewide_savings: statewide,
            records: with_records.then(|| dataset.records()),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Generated {} households (seed {})\n", dataset.len(), generator.seed);

    println!("Average daily usage per household:");
    for (fixture, mean) in &means {
        println!("  {:<12} {:>8.2} gal", fixture.label(), mean);
    }

    let savings = &config.savings;
    let example_usage = 100.0;
    println!(
        "\nAt {:.0} gal/day against a {:.0} gal baseline:",
        example_usage, savings.baseline_gallons
    );
    match compare_with_rate(example_usage, savings.baseline_gallons, savings.cost_per_gallon)? {
        SavingsResult::Above {
            savings_potential,
            projected_cost_savings,
        } => println!(
            "  could save {:.2} gal/day, ${:.4}/day",
            savings_potential, projected_cost_savings
        ),
        SavingsResult::AtBaseline => println!("  exactly at the baseline"),
        SavingsResult::Below { surplus_savings } => {
            println!("  already {:.2} gal/day under", surplus_savings)
        }
    }

    match statewide {
        Some(gallons) => println!(
            "\n{} at the {} rate would save {:.0} gal/day",
            regions.state, regions.reference, gallons
        ),
        None => println!("\nNo statewide projection for {} vs {}", regions.state, regions.reference),
    }

    if with_records {
        println!("\nid    size  zip    shower  laundry  dishes  garden  car_wash");
        for record in dataset.records() {
            let usage = &record.usage;
            println!(
                "{:<5} {:>4}  {:<5} {:>7.1} {:>8.1} {:>7.1} {:>7.1} {:>9.1}",
                record.household_id,
                record.household_size,
                record.zip_code.as_deref().unwrap_or("-"),
                usage.shower,
                usage.laundry,
                usage.dishwashing,
                usage.garden,
                usage.car_wash
            );
        }
    }

    Ok(())
}
