//! Tour validation and closed tour length evaluation.
//!
//! A tour over an instance of `n` points is valid when, sorted ascending, it equals
//! `0, 1, ..., n - 1`. Its cost is the Euclidean length of the closed polygon visiting the
//! points in tour order and returning to the first one.

use rayon::prelude::*;

use crate::batch::Batch;
use crate::error::{Error, Result};
use crate::instance::Instance;

/// Per-tour costs and the auxiliary slot, which is always `None` for the TSP
pub type Costs = (Vec<f64>, Option<()>);

/// Reason a tour is not a permutation of `0..n`, if it is not
fn permutation_defect(tour: &[usize], n: usize) -> Option<String> {
    if tour.len() != n {
        return Some(format!("expected {} indices, found {}", n, tour.len()));
    }

    let mut sorted = tour.to_vec();
    sorted.sort_unstable();

    if let Some(&last) = sorted.last() {
        if last >= n {
            return Some(format!("index {} out of range for {} points", last, n));
        }
    }

    sorted
        .iter()
        .enumerate()
        .find(|&(i, &v)| v != i)
        .map(|(i, &v)| {
            if v < i {
                format!("index {} visited more than once", v)
            } else {
                format!("index {} never visited", i)
            }
        })
}

/// Check that `tour` visits each of the `n` points exactly once
pub fn validate_tour(tour: &[usize], n: usize) -> Result<()> {
    match permutation_defect(tour, n) {
        Some(reason) => Err(Error::invalid_tour(0, reason)),
        None => Ok(()),
    }
}

/// Validate every tour of a batch against the batch graph size.
///
/// Fails on the first invalid tour, reporting its position in the batch.
pub fn validate_tours<T: AsRef<[usize]>>(tours: &[T], n: usize) -> Result<()> {
    for (position, tour) in tours.iter().enumerate() {
        if let Some(reason) = permutation_defect(tour.as_ref(), n) {
            log::debug!("Rejecting tour {}: {}", position, reason);
            return Err(Error::invalid_tour(position, reason));
        }
    }
    Ok(())
}

/// Closed length of `tour` over instance `b` of the batch. The tour is assumed valid.
fn closed_length(batch: &Batch, b: usize, tour: &[usize]) -> f64 {
    let n = tour.len();
    if n == 0 {
        return 0.0;
    }

    let mut length = 0.0;
    for i in 0..n - 1 {
        length += batch.point(b, tour[i + 1]).distance(&batch.point(b, tour[i]));
    }

    length + batch.point(b, tour[0]).distance(&batch.point(b, tour[n - 1]))
}

/// Validate a batch of tours and compute their closed lengths.
///
/// `tours[b]` is a tour over instance `b` of the batch and the returned cost at position `b`
/// belongs to it. All tours are validated before any length is computed, so an invalid tour
/// yields only the error. Lengths are computed in parallel over the batch.
pub fn get_costs<T>(batch: &Batch, tours: &[T]) -> Result<Costs>
where
    T: AsRef<[usize]> + Sync,
{
    if tours.len() != batch.batch_size() {
        return Err(Error::BatchMismatch {
            instances: batch.batch_size(),
            tours: tours.len(),
        });
    }

    validate_tours(tours, batch.graph_size())?;

    let costs = tours
        .par_iter()
        .enumerate()
        .map(|(b, tour)| closed_length(batch, b, tour.as_ref()))
        .collect();

    Ok((costs, None))
}

/// [`get_costs`] over a slice of instances, which are stacked into a batch first
pub fn get_instance_costs<T>(instances: &[Instance], tours: &[T]) -> Result<Costs>
where
    T: AsRef<[usize]> + Sync,
{
    let batch = Batch::from_instances(instances)?;
    get_costs(&batch, tours)
}

/// Checked closed tour length of a single instance
pub fn tour_length(instance: &Instance, tour: &[usize]) -> Result<f64> {
    validate_tour(tour, instance.len())?;
    Ok(instance.tour_length(tour))
}
