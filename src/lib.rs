//! TSP Dataset Library
//!
//! Instance sets for the Euclidean Travelling Salesman Problem and batched tour evaluation,
//! meant to feed learned construction policies.
//!
//! # Features
//!
//! - Seeded uniform sampling of instances in the unit square
//! - Loading windows (`offset`, `num_samples`) of instance set files (`.tspset`, `.json`)
//! - Bit-exact saving of instance sets
//! - Batched tour validation and closed tour length computation
//!
//! # Example
//!
//! ```no_run
//! use tsp_dataset::dataset::{DatasetConfig, TspDataset};
//! use tsp_dataset::batch::Batch;
//! use tsp_dataset::evaluation::get_costs;
//!
//! // Sample 128 instances of 20 points
//! let dataset = TspDataset::new(&DatasetConfig::sampled(20, 128).with_seed(1234)).unwrap();
//!
//! // Score the identity tour on each of them
//! let batch = Batch::from_instances(dataset.instances()).unwrap();
//! let tours: Vec<Vec<usize>> = (0..dataset.len()).map(|_| (0..20).collect()).collect();
//! let (costs, _) = get_costs(&batch, &tours).unwrap();
//!
//! println!("Average length: {:.4}", costs.iter().sum::<f64>() / costs.len() as f64);
//! ```

pub mod batch;
pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod instance;
pub mod io;
pub mod problem;
pub mod stats;

pub use batch::Batch;
pub use dataset::{DatasetConfig, Distribution, TspDataset};
pub use error::{Error, Result};
pub use instance::{Instance, Point};
pub use problem::{Problem, Tsp};
