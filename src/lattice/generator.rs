/*
MIT License with FEFF10 Attribution

Copyright (c) 2025 Ameyanagi

Based on or developed using Distribution: FEFF10.0
Copyright (c) 2020 FEFF Project, University of Washington and SLAC National Accelerator Laboratory.
All rights reserved.
*/


//! Enumeration of lattice vectors inside a cutoff sphere
//!
//! Vectors are produced in ascending order of their squared length. Counting
//! and generation share the same acceptance test, so a buffer sized with
//! [`count_lattice_vectors`] always holds the output of [`create_lattice`].

use super::bravais::BravaisMatrix;
use super::errors::{LatticeError, Result};
use super::truncation::TruncationBounds;
use super::vector::Vector3D;
use crate::utils::constants::BORDER_TOLERANCE;

/// Lattice vectors sorted by non-decreasing squared norm
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LatticeVectorSet {
    vectors: Vec<Vector3D>,
    norms_squared: Vec<f64>,
}

impl LatticeVectorSet {
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn vectors(&self) -> &[Vector3D] {
        &self.vectors
    }

    pub fn norms_squared(&self) -> &[f64] {
        &self.norms_squared
    }

    /// Iterate over (vector, squared norm) pairs from the shortest up
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (&Vector3D, f64)> + '_ {
        self.vectors.iter().zip(self.norms_squared.iter().copied())
    }
}

/// Fixed-capacity storage that keeps its entries ordered by squared norm
///
/// A new entry is placed in front of the first stored entry whose squared
/// norm is greater than or equal to its own, so equal norms end up in
/// reverse insertion order.
#[derive(Debug, Clone)]
pub struct OrderedVectorBuffer {
    vectors: Vec<Vector3D>,
    norms_squared: Vec<f64>,
    len: usize,
}

impl OrderedVectorBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vectors: vec![Vector3D::origin(); capacity],
            norms_squared: vec![0.0; capacity],
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.vectors.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a vector while keeping the filled prefix sorted
    ///
    /// # Arguments
    ///
    /// * `vector` - Vector to store
    /// * `norm_squared` - Its squared length
    ///
    /// # Returns
    ///
    /// An error if every slot is already taken
    pub fn insert_ordered(&mut self, vector: Vector3D, norm_squared: f64) -> Result<()> {
        if self.len == self.capacity() {
            return Err(LatticeError::InsufficientCapacity {
                capacity: self.capacity(),
                required: self.len + 1,
            });
        }

        let position = self.norms_squared[..self.len]
            .iter()
            .position(|&stored| stored >= norm_squared)
            .unwrap_or(self.len);

        self.vectors.copy_within(position..self.len, position + 1);
        self.norms_squared
            .copy_within(position..self.len, position + 1);
        self.vectors[position] = vector;
        self.norms_squared[position] = norm_squared;
        self.len += 1;
        Ok(())
    }

    /// Finish filling and hand out the occupied entries
    pub fn into_set(mut self) -> LatticeVectorSet {
        self.vectors.truncate(self.len);
        self.norms_squared.truncate(self.len);
        LatticeVectorSet {
            vectors: self.vectors,
            norms_squared: self.norms_squared,
        }
    }
}

/// Squared acceptance radius including the border tolerance
fn acceptance_radius_squared(cutoff: f64) -> f64 {
    let cutoff = cutoff.max(0.0);
    cutoff * cutoff + BORDER_TOLERANCE
}

fn box_points<'a>(
    bravais: &'a BravaisMatrix,
    bounds: &TruncationBounds,
) -> impl Iterator<Item = Vector3D> + 'a {
    let (rx, ry, rz) = (bounds.range(0), bounds.range(1), bounds.range(2));
    rx.flat_map(move |x| {
        let rz = rz.clone();
        ry.clone()
            .flat_map(move |y| rz.clone().map(move |z| bravais.lattice_point(x, y, z)))
    })
}

/// Number of lattice points of the bounded box that lie inside the cutoff sphere
///
/// # Arguments
///
/// * `bravais` - Lattice whose columns are the primitive vectors
/// * `cutoff` - Sphere radius; negative values behave like zero
/// * `bounds` - Box half-widths along each axis
pub fn count_lattice_vectors(
    bravais: &BravaisMatrix,
    cutoff: f64,
    bounds: &TruncationBounds,
) -> usize {
    let limit = acceptance_radius_squared(cutoff);
    box_points(bravais, bounds)
        .filter(|v| v.norm_squared() <= limit)
        .count()
}

/// Sorted lattice vectors of the bounded box inside the cutoff sphere
///
/// # Arguments
///
/// * `bravais` - Lattice whose columns are the primitive vectors
/// * `cutoff` - Sphere radius; negative values behave like zero
/// * `bounds` - Box half-widths along each axis
/// * `capacity` - Number of slots to reserve
///
/// # Returns
///
/// The accepted vectors, or `InsufficientCapacity` when `capacity` is too small
pub fn create_lattice(
    bravais: &BravaisMatrix,
    cutoff: f64,
    bounds: &TruncationBounds,
    capacity: usize,
) -> Result<LatticeVectorSet> {
    let limit = acceptance_radius_squared(cutoff);
    let mut buffer = OrderedVectorBuffer::with_capacity(capacity);
    for vector in box_points(bravais, bounds) {
        let norm_squared = vector.norm_squared();
        if norm_squared <= limit {
            buffer.insert_ordered(vector, norm_squared)?;
        }
    }
    Ok(buffer.into_set())
}

/// Count and generate in one step
pub fn generate_lattice(
    bravais: &BravaisMatrix,
    cutoff: f64,
    bounds: &TruncationBounds,
) -> Result<LatticeVectorSet> {
    let capacity = count_lattice_vectors(bravais, cutoff, bounds);
    create_lattice(bravais, cutoff, bounds, capacity)
}
