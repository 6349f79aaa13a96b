//! Problem descriptors.
//!
//! A problem bundles how its datasets are built with how candidate solutions are scored, so
//! training and decoding code can stay generic over the problem kind.

use crate::batch::Batch;
use crate::dataset::{DatasetConfig, TspDataset};
use crate::error::Result;
use crate::evaluation;

pub trait Problem {
    /// Short identifier, used in dataset file names
    const NAME: &'static str;

    type Dataset;

    /// Per-solution auxiliary output of [`Problem::get_costs`]
    type Aux;

    /// Validate `solutions` against `batch` and score them, one cost per batch position
    fn get_costs(batch: &Batch, solutions: &[Vec<usize>]) -> Result<(Vec<f64>, Option<Self::Aux>)>;

    fn make_dataset(config: &DatasetConfig) -> Result<Self::Dataset>;
}

/// Euclidean travelling salesman problem
#[derive(Debug, Clone, Copy, Default)]
pub struct Tsp;

impl Problem for Tsp {
    const NAME: &'static str = "tsp";

    type Dataset = TspDataset;

    type Aux = ();

    fn get_costs(batch: &Batch, tours: &[Vec<usize>]) -> Result<(Vec<f64>, Option<()>)> {
        evaluation::get_costs(batch, tours)
    }

    fn make_dataset(config: &DatasetConfig) -> Result<TspDataset> {
        TspDataset::new(config)
    }
}

/// File name of a generated dataset, `{problem}{size}_{name}_seed{seed}.{extension}`
pub fn dataset_file_name<P: Problem>(size: usize, name: &str, seed: u64, extension: &str) -> String {
    format!("{}{}_{}_seed{}.{}", P::NAME, size, name, seed, extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tsp_name() {
        assert_eq!(Tsp::NAME, "tsp");
        assert_eq!(
            dataset_file_name::<Tsp>(20, "validation", 4321, "tspset"),
            "tsp20_validation_seed4321.tspset"
        );
    }

    #[test]
    fn test_make_dataset_and_score() {
        let dataset = Tsp::make_dataset(&DatasetConfig::sampled(6, 3).with_seed(8)).unwrap();
        let batch = Batch::from_instances(dataset.instances()).unwrap();
        let tours: Vec<Vec<usize>> = (0..3).map(|_| (0..6).collect()).collect();

        let (costs, aux) = Tsp::get_costs(&batch, &tours).unwrap();

        assert_eq!(costs.len(), 3);
        assert!(aux.is_none());
        for (instance, cost) in dataset.iter().zip(&costs) {
            assert!((instance.tour_length(&tours[0]) - cost).abs() < 1e-12);
        }
    }
}
