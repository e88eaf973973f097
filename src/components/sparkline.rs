/// Bucketed counts of a fixture column, drawn as a text sparkline
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Distribution {
    pub counts: Vec<u64>,
    pub min: f64,
    pub max: f64,
}

impl Distribution {
    /// Spread `values` over `buckets` equal-width bins between their min and max
    pub fn from_values<I>(values: I, buckets: usize) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let values: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        let buckets = buckets.max(1);

        if values.is_empty() {
            return Self {
                counts: vec![0; buckets],
                min: 0.0,
                max: 0.0,
            };
        }

        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let span = max - min;

        let mut counts = vec![0u64; buckets];
        for v in values {
            let idx = if span > 0.0 {
                (((v - min) / span) * buckets as f64) as usize
            } else {
                0
            };
            counts[idx.min(buckets - 1)] += 1;
        }

        Self { counts, min, max }
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Convert bucket counts to a sparkline string, one char per bucket
    pub fn to_sparkline(&self) -> String {
        const CHARS: &[char] = &['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

        let peak = self.counts.iter().copied().max().unwrap_or(0);
        if peak == 0 {
            return " ".repeat(self.counts.len());
        }

        self.counts
            .iter()
            .map(|&count| {
                if count == 0 {
                    ' '
                } else {
                    let normalized = count as f64 / peak as f64;
                    let idx = ((normalized * (CHARS.len() - 1) as f64).round() as usize)
                        .min(CHARS.len() - 1);
                    CHARS[idx]
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buckets_cover_range() {
        let dist = Distribution::from_values([0.0, 1.0, 2.0, 3.0, 4.0, 10.0], 5);
        assert_eq!(dist.min, 0.0);
        assert_eq!(dist.max, 10.0);
        assert_eq!(dist.counts, vec![2, 2, 1, 0, 1]);
        assert_eq!(dist.total(), 6);
    }

    #[test]
    fn test_constant_column_lands_in_first_bucket() {
        let dist = Distribution::from_values([3.0, 3.0, 3.0], 4);
        assert_eq!(dist.counts, vec![3, 0, 0, 0]);
        assert_eq!(dist.to_sparkline(), "█   ");
    }

    #[test]
    fn test_empty_values_render_blank() {
        let dist = Distribution::from_values(Vec::<f64>::new(), 6);
        assert_eq!(dist.to_sparkline(), "      ");
        assert_eq!(dist.total(), 0);
    }

    #[test]
    fn test_sparkline_scales_to_peak() {
        let dist = Distribution {
            counts: vec![1, 4, 8],
            min: 0.0,
            max: 1.0,
        };
        assert_eq!(dist.to_sparkline(), "▂▅█");
    }
}
