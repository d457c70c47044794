// SPDX-FileCopyrightText: 2025-2026 Carlson Büth <code@cbueth.de>
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use ndarray::{Array1, Array2, ArrayD, Dimension};

use crate::estimators::errors::{MicrostateError, Result};

/// Dense multidimensional buffer with axis-0-contiguous storage.
///
/// Axis 0 holds the components of one state vector; the remaining axes index
/// observation positions (time steps, grid cells). Storage follows a fixed
/// stride scheme where axis 0 carries stride 1 and each later axis multiplies
/// the sizes of all axes before it, so a state vector is a contiguous slice
/// of the backing store and [`Tensor::column`] can hand it out without
/// copying.
///
/// Every constructor copies the source data into this layout; a `Tensor`
/// never aliases caller memory and is read-only after construction.
#[derive(Debug, Clone)]
pub struct Tensor<T> {
    shape: Vec<usize>,
    strides: Vec<usize>,
    body: Vec<T>,
}

impl<T: Copy + Default> Tensor<T> {
    /// Build a tensor from a caller-supplied row-major buffer.
    ///
    /// The buffer length must equal the product of `shape`; the contents are
    /// copied and re-ordered into the internal layout.
    pub fn from_row_major(shape: Vec<usize>, data: &[T]) -> Result<Self> {
        let len: usize = shape.iter().product();
        if data.len() != len {
            return Err(MicrostateError::DimensionMismatch(format!(
                "buffer holds {} elements but the shape requires {len}",
                data.len()
            )));
        }
        let strides = build_strides(&shape);

        // Row-major strides of the source buffer, innermost axis last.
        let mut row_major = vec![1usize; shape.len()];
        for axis in (0..shape.len().saturating_sub(1)).rev() {
            row_major[axis] = row_major[axis + 1] * shape[axis + 1];
        }

        let mut body = vec![T::default(); len];
        for (source, &value) in data.iter().enumerate() {
            let mut remainder = source;
            let mut target = 0;
            for (axis, &stride) in row_major.iter().enumerate() {
                target += (remainder / stride) * strides[axis];
                remainder %= stride;
            }
            body[target] = value;
        }

        Ok(Self {
            shape,
            strides,
            body,
        })
    }

    /// Build a tensor from a dynamic-dimensional ndarray, copying its contents.
    pub fn from_dyn(array: &ArrayD<T>) -> Self {
        let shape = array.shape().to_vec();
        let strides = build_strides(&shape);
        let mut body = vec![T::default(); shape.iter().product()];
        for (index, &value) in array.indexed_iter() {
            let coords = index.slice();
            let target: usize = coords
                .iter()
                .zip(&strides)
                .map(|(coord, stride)| coord * stride)
                .sum();
            body[target] = value;
        }
        Self {
            shape,
            strides,
            body,
        }
    }

    /// Build a tensor from a 2D ndarray whose rows are state-vector components
    /// and whose columns are observation positions.
    pub fn from_array2(array: Array2<T>) -> Self {
        Self::from_dyn(&array.into_dyn())
    }

    /// Build a `[1, n]` tensor from a scalar series.
    pub fn from_array1(array: Array1<T>) -> Self {
        let n = array.len();
        let reshaped = array
            .into_shape_with_order((1, n))
            .expect("reshape 1d->2d");
        Self::from_array2(reshaped)
    }
}

impl<T: Copy> Tensor<T> {
    /// Number of axes.
    pub fn axes(&self) -> usize {
        self.shape.len()
    }

    /// Size of one axis.
    pub fn extent(&self, axis: usize) -> usize {
        self.shape[axis]
    }

    /// The full shape.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Total number of stored elements.
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Offset of a coordinate tuple into the backing store.
    ///
    /// The tuple must name every axis. Over all coordinate combinations the
    /// offsets cover `[0, len)` exactly once.
    pub fn linear_index(&self, coords: &[usize]) -> Result<usize> {
        if coords.len() != self.shape.len() {
            return Err(MicrostateError::Index(format!(
                "expected {} coordinates, got {}",
                self.shape.len(),
                coords.len()
            )));
        }
        debug_assert!(
            coords.iter().zip(&self.shape).all(|(c, s)| c < s),
            "coordinate out of range"
        );
        Ok(coords
            .iter()
            .zip(&self.strides)
            .map(|(coord, stride)| coord * stride)
            .sum())
    }

    /// The state vector at a fixed observation position.
    ///
    /// `fixed` names every axis except axis 0; the returned slice walks axis 0
    /// from 0 to `shape[0] - 1` and has length `shape[0]`.
    pub fn column(&self, fixed: &[usize]) -> Result<&[T]> {
        if fixed.len() != self.shape.len() - 1 {
            return Err(MicrostateError::Index(format!(
                "a column is fixed by {} coordinates, got {}",
                self.shape.len() - 1,
                fixed.len()
            )));
        }
        let start: usize = fixed
            .iter()
            .zip(&self.strides[1..])
            .map(|(coord, stride)| coord * stride)
            .sum();
        Ok(&self.body[start..start + self.shape[0]])
    }
}

/// Stride table: axis 0 is unscaled, each later axis multiplies the sizes of
/// all axes before it.
fn build_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1usize; shape.len()];
    for axis in 1..shape.len() {
        strides[axis] = strides[axis - 1] * shape[axis - 1];
    }
    strides
}
