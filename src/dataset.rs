//! Fixed collections of TSP instances.
//!
//! A dataset is either read from an instance set file (see [`crate::io`]) or sampled
//! uniformly from the unit square. It is built once and never modified afterwards.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::batch::Batch;
use crate::error::{Error, Result};
use crate::instance::Instance;
use crate::io;

/// Default number of points per sampled instance
pub const DEFAULT_SIZE: usize = 50;
/// Default number of instances
pub const DEFAULT_NUM_SAMPLES: usize = 1_000_000;
/// Default seed of the sampling generator
pub const DEFAULT_SEED: u64 = 1234;

/// Distribution points are sampled from
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distribution {
    /// Independent uniform coordinates in `[0, 1)`
    #[default]
    Uniform,
}

impl FromStr for Distribution {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "uniform" => Ok(Distribution::Uniform),
            other => Err(Error::invalid_format(format!(
                "unknown distribution '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distribution::Uniform => write!(f, "uniform"),
        }
    }
}

/// How to build a dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Instance set file; sample instances when `None`
    pub source: Option<PathBuf>,
    /// Points per instance (sampling only)
    pub size: usize,
    /// Number of instances
    pub num_samples: usize,
    /// Records skipped at the start of the file (file only)
    pub offset: usize,
    /// Sampling distribution
    pub distribution: Distribution,
    /// Seed of the sampling generator
    pub seed: u64,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        DatasetConfig {
            source: None,
            size: DEFAULT_SIZE,
            num_samples: DEFAULT_NUM_SAMPLES,
            offset: 0,
            distribution: Distribution::Uniform,
            seed: DEFAULT_SEED,
        }
    }
}

impl DatasetConfig {
    /// Sample `num_samples` instances of `size` points
    pub fn sampled(size: usize, num_samples: usize) -> Self {
        DatasetConfig {
            size,
            num_samples,
            ..Default::default()
        }
    }

    /// Read up to `num_samples` instances from `path`
    pub fn from_file<P: Into<PathBuf>>(path: P, num_samples: usize) -> Self {
        DatasetConfig {
            source: Some(path.into()),
            num_samples,
            ..Default::default()
        }
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_distribution(mut self, distribution: Distribution) -> Self {
        self.distribution = distribution;
        self
    }
}

/// Immutable collection of TSP instances
#[derive(Debug, Clone)]
pub struct TspDataset {
    instances: Vec<Instance>,
}

impl TspDataset {
    /// Build a dataset from its configuration
    pub fn new(config: &DatasetConfig) -> Result<Self> {
        match &config.source {
            Some(path) => Self::load(path, config.offset, config.num_samples),
            None => Ok(Self::sample(
                config.size,
                config.num_samples,
                config.distribution,
                config.seed,
            )),
        }
    }

    /// Read the records `[offset, offset + num_samples)` of an instance set file.
    ///
    /// A window reaching past the end of the file yields the records that exist.
    pub fn load<P: AsRef<Path>>(path: P, offset: usize, num_samples: usize) -> Result<Self> {
        let path = path.as_ref();
        let instances = io::read_instances(path, offset, num_samples)?;

        if instances.len() < num_samples {
            log::warn!(
                "{:?}: requested {} instances from offset {}, only {} available",
                path,
                num_samples,
                offset,
                instances.len()
            );
        }
        log::info!("Loaded {} instances from {:?}", instances.len(), path);

        Ok(TspDataset { instances })
    }

    /// Sample `num_samples` instances of `size` points, deterministic in `seed`
    pub fn sample(size: usize, num_samples: usize, distribution: Distribution, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let instances = match distribution {
            Distribution::Uniform => (0..num_samples)
                .map(|_| Instance::random(size, &mut rng))
                .collect(),
        };

        log::info!(
            "Sampled {} {} instances of {} points (seed {})",
            num_samples,
            distribution,
            size,
            seed
        );

        TspDataset { instances }
    }

    /// Number of instances
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Instance at `index`
    pub fn get(&self, index: usize) -> Result<&Instance> {
        self.instances.get(index).ok_or(Error::IndexOutOfRange {
            index,
            len: self.instances.len(),
        })
    }

    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instance> {
        self.instances.iter()
    }

    /// Consecutive batches of `batch_size` instances, the last one possibly shorter.
    ///
    /// A batch fails to build when its instances differ in size.
    pub fn batches(&self, batch_size: usize) -> impl Iterator<Item = Result<Batch>> + '_ {
        self.instances
            .chunks(batch_size.max(1))
            .map(|chunk| Batch::from_instances(chunk))
    }

    /// Write the dataset to `path`, in the format given by its extension
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        io::write_instances(path, &self.instances)
    }
}

impl From<Vec<Instance>> for TspDataset {
    fn from(instances: Vec<Instance>) -> Self {
        TspDataset { instances }
    }
}

impl<'a> IntoIterator for &'a TspDataset {
    type Item = &'a Instance;
    type IntoIter = std::slice::Iter<'a, Instance>;

    fn into_iter(self) -> Self::IntoIter {
        self.instances.iter()
    }
}
