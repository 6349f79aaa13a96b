//! A batch of equally sized instances stored as one contiguous `[B, N, 2]` block.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::instance::{Instance, Point};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    /// Number of instances (B)
    batch_size: usize,
    /// Points per instance (N)
    graph_size: usize,
    /// Row-major coordinates, `coords[(b * N + i) * 2]` is the x of point i in instance b
    coords: Vec<f64>,
}

impl Batch {
    /// Stack instances into a batch. All instances must have the same number of points.
    pub fn from_instances<'a, I>(instances: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Instance>,
    {
        let mut graph_size = None;
        let mut batch_size = 0;
        let mut coords = Vec::new();

        for (position, instance) in instances.into_iter().enumerate() {
            let expected = *graph_size.get_or_insert(instance.len());
            if instance.len() != expected {
                return Err(Error::InconsistentSize {
                    expected,
                    found: instance.len(),
                    position,
                });
            }
            coords.extend(instance.points().iter().flat_map(|p| [p.x, p.y]));
            batch_size += 1;
        }

        Ok(Batch {
            batch_size,
            graph_size: graph_size.unwrap_or(0),
            coords,
        })
    }

    /// Wrap an existing `[B, N, 2]` buffer.
    ///
    /// Returns `None` when the buffer length is not `batch_size * graph_size * 2`.
    pub fn from_raw(batch_size: usize, graph_size: usize, coords: Vec<f64>) -> Option<Self> {
        if coords.len() != batch_size * graph_size * 2 {
            return None;
        }
        Some(Batch {
            batch_size,
            graph_size,
            coords,
        })
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn graph_size(&self) -> usize {
        self.graph_size
    }

    pub fn is_empty(&self) -> bool {
        self.batch_size == 0
    }

    /// Shape as `[B, N, 2]`
    pub fn shape(&self) -> [usize; 3] {
        [self.batch_size, self.graph_size, 2]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.coords
    }

    /// Flat coordinates of instance `b`
    pub fn coords(&self, b: usize) -> &[f64] {
        let stride = self.graph_size * 2;
        &self.coords[b * stride..(b + 1) * stride]
    }

    #[inline]
    pub fn point(&self, b: usize, i: usize) -> Point {
        let at = (b * self.graph_size + i) * 2;
        Point::new(self.coords[at], self.coords[at + 1])
    }

    /// Copy instance `b` out of the batch
    pub fn instance(&self, b: usize) -> Instance {
        Instance::new((0..self.graph_size).map(|i| self.point(b, i)).collect())
    }
}
