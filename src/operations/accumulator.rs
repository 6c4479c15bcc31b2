use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Running revenue per nation name.
///
/// Each worker owns one of these while it scans its share of the line items; the partial
/// accumulators are folded together with [RevenueAccumulator::merge] once every worker is done.
/// Floating point addition is not associative, so the last bits of a total may depend on how
/// the rows were split between workers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RevenueAccumulator {
    revenue: FxHashMap<String, f64>,
}

impl RevenueAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `revenue` to `nation`, creating the entry at zero on first contribution.
    pub fn accumulate(&mut self, nation: &str, revenue: f64) {
        match self.revenue.get_mut(nation) {
            Some(total) => *total += revenue,
            None => {
                self.revenue.insert(nation.to_string(), revenue);
            }
        }
    }

    pub fn merge(&mut self, other: RevenueAccumulator) {
        for (nation, revenue) in other.revenue {
            *self.revenue.entry(nation).or_insert(0.0) += revenue;
        }
    }

    pub fn len(&self) -> usize {
        self.revenue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revenue.is_empty()
    }

    pub fn into_result(self) -> QueryResult {
        QueryResult {
            revenue: self.revenue,
        }
    }
}

/// One output line: `n_name,revenue`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NationRevenue {
    pub n_name: String,
    pub revenue: f64,
}

/// Final nation -> revenue mapping. Not modified after the scan completes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    revenue: FxHashMap<String, f64>,
}

impl QueryResult {
    pub fn revenue(&self, nation: &str) -> Option<f64> {
        self.revenue.get(nation).copied()
    }

    pub fn nations(&self) -> impl Iterator<Item = &str> {
        self.revenue.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.revenue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.revenue.is_empty()
    }

    /// Rows sorted by nation name.
    pub fn rows(&self) -> Vec<NationRevenue> {
        self.revenue
            .iter()
            .sorted_by(|a, b| a.0.cmp(b.0))
            .map(|(n_name, revenue)| NationRevenue {
                n_name: n_name.clone(),
                revenue: *revenue,
            })
            .collect()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for QueryResult {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut accumulator = RevenueAccumulator::new();
        for (nation, revenue) in iter {
            let nation: String = nation.into();
            accumulator.accumulate(&nation, revenue);
        }
        accumulator.into_result()
    }
}
