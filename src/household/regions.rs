use serde::{Deserialize, Serialize};

use super::aggregator::statewide_savings;
use crate::error::UsageError;

/// California population used for the statewide projection
pub const CALIFORNIA_POPULATION: u64 = 39_538_223;

/// Reference daily usage for a region (gallons/day)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalBaseline {
    pub region: String,
    pub daily_usage: f64,
}

impl RegionalBaseline {
    pub fn new(region: impl Into<String>, daily_usage: f64) -> Self {
        Self {
            region: region.into(),
            daily_usage,
        }
    }
}

/// Fixed table of regional reference figures, in display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionalBaselines(Vec<RegionalBaseline>);

impl Default for RegionalBaselines {
    fn default() -> Self {
        Self(vec![
            RegionalBaseline::new("Silicon Valley", 75.0),
            RegionalBaseline::new("California", 146.0),
            RegionalBaseline::new("National Average", 82.0),
        ])
    }
}

impl RegionalBaselines {
    pub fn new(baselines: Vec<RegionalBaseline>) -> Self {
        Self(baselines)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegionalBaseline> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Case-insensitive lookup by region name
    pub fn lookup(&self, region: &str) -> Result<&RegionalBaseline, UsageError> {
        self.0
            .iter()
            .find(|b| b.region.eq_ignore_ascii_case(region.trim()))
            .ok_or_else(|| UsageError::UnknownRegion(region.to_string()))
    }

    /// Gallons/day saved if everyone in `state` used as little as `reference`
    pub fn statewide_projection(
        &self,
        state: &str,
        reference: &str,
        population: u64,
    ) -> Result<f64, UsageError> {
        let state = self.lookup(state)?;
        let reference = self.lookup(reference)?;
        statewide_savings(state.daily_usage, reference.daily_usage, population)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ignores_case() {
        let baselines = RegionalBaselines::default();
        assert_eq!(baselines.lookup("california").unwrap().daily_usage, 146.0);
        assert_eq!(baselines.lookup("National Average").unwrap().daily_usage, 82.0);
        assert!(matches!(
            baselines.lookup("Nevada"),
            Err(UsageError::UnknownRegion(_))
        ));
    }

    #[test]
    fn test_california_projection() {
        let baselines = RegionalBaselines::default();
        let saved = baselines
            .statewide_projection("California", "National Average", CALIFORNIA_POPULATION)
            .unwrap();
        assert_eq!(saved, 2_530_446_272.0);
    }

    #[test]
    fn test_baselines_parse_as_list() {
        let yaml = "- { region: Austin, daily_usage: 110.0 }\n- { region: Texas, daily_usage: 120.5 }\n";
        let baselines: RegionalBaselines = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(baselines.len(), 2);
        assert_eq!(baselines.lookup("texas").unwrap().daily_usage, 120.5);
    }
}
