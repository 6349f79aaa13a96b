//! Summaries of datasets and of evaluated tour costs.

use std::fs::File;
use std::path::Path;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::dataset::TspDataset;
use crate::error::Result;
use crate::instance::Point;

/// Shape and extent of a dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// Number of instances
    pub num_instances: usize,
    /// Smallest number of points in an instance
    pub min_points: usize,
    /// Largest number of points in an instance
    pub max_points: usize,
    /// Lower corner of the bounding box of all points
    pub lower: Option<Point>,
    /// Upper corner of the bounding box of all points
    pub upper: Option<Point>,
}

impl DatasetSummary {
    pub fn from_dataset(dataset: &TspDataset) -> Self {
        let min_points = dataset.iter().map(|i| i.len()).min().unwrap_or(0);
        let max_points = dataset.iter().map(|i| i.len()).max().unwrap_or(0);

        let bounds = dataset.iter().filter_map(|i| i.bounds()).reduce(|(lo, hi), (l, h)| {
            (
                Point::new(lo.x.min(l.x), lo.y.min(l.y)),
                Point::new(hi.x.max(h.x), hi.y.max(h.y)),
            )
        });

        DatasetSummary {
            num_instances: dataset.len(),
            min_points,
            max_points,
            lower: bounds.map(|(lo, _)| lo),
            upper: bounds.map(|(_, hi)| hi),
        }
    }

    /// Whether every instance has the same number of points
    pub fn is_uniform_size(&self) -> bool {
        self.min_points == self.max_points
    }
}

impl std::fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Instances: {}", self.num_instances)?;
        if self.is_uniform_size() {
            writeln!(f, "  Points per instance: {}", self.min_points)?;
        } else {
            writeln!(f, "  Points per instance: {}..={}", self.min_points, self.max_points)?;
        }
        match (self.lower, self.upper) {
            (Some(lo), Some(hi)) => writeln!(
                f,
                "  Bounding box: [{:.4}, {:.4}] x [{:.4}, {:.4}]",
                lo.x, hi.x, lo.y, hi.y
            ),
            _ => writeln!(f, "  Bounding box: -"),
        }
    }
}

/// Aggregated statistics of a cost vector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostSummary {
    /// Number of costs
    pub count: usize,
    /// Average cost
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Best (lowest) cost
    pub best: f64,
    /// Position of the best cost
    pub best_index: usize,
    /// Worst (highest) cost
    pub worst: f64,
    /// Position of the worst cost
    pub worst_index: usize,
}

impl CostSummary {
    /// Summarize `costs`, `None` when empty
    pub fn from_costs(costs: &[f64]) -> Option<Self> {
        use statrs::statistics::Statistics;

        let (best_index, &best) = costs
            .iter()
            .enumerate()
            .min_by_key(|&(_, &c)| OrderedFloat(c))?;
        let (worst_index, &worst) = costs
            .iter()
            .enumerate()
            .max_by_key(|&(_, &c)| OrderedFloat(c))?;

        Some(CostSummary {
            count: costs.len(),
            mean: costs.iter().mean(),
            std_dev: costs.iter().population_std_dev(),
            best,
            best_index,
            worst,
            worst_index,
        })
    }
}

impl std::fmt::Display for CostSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Tours evaluated: {}", self.count)?;
        writeln!(f, "  Average length: {:.4} (std {:.4})", self.mean, self.std_dev)?;
        writeln!(f, "  Best length: {:.4} (instance {})", self.best, self.best_index)?;
        writeln!(f, "  Worst length: {:.4} (instance {})", self.worst, self.worst_index)
    }
}

/// One exported cost row
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CostRecord {
    instance: usize,
    cost: f64,
}

/// Export per-instance costs to CSV with an `instance,cost` header
pub fn export_costs_csv<P: AsRef<Path>>(path: P, costs: &[f64]) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);

    for (instance, &cost) in costs.iter().enumerate() {
        writer.serialize(CostRecord { instance, cost })?;
    }

    writer.flush()?;
    Ok(())
}
