// SPDX-FileCopyrightText: 2023 Changgyoo Park <wvwwvwwv@me.com>
//
// SPDX-License-Identifier: Apache-2.0

//! [`Array`] is the contiguous one-dimensional storage primitive both layouts build on.

use super::{Error, Metadata};
use std::mem::size_of;
use std::ops::{Index, IndexMut};

/// [`Array`] owns `extent` default-initialized values of `T` in a single allocation.
///
/// # Examples
///
/// ```
/// use view_of_structs::{Array, Metadata};
///
/// let mut array: Array<u32> = Array::new(&Metadata::new(3).with_label("ids"));
/// array[1] = 7;
/// assert_eq!(array.as_slice(), &[0, 7, 0]);
/// assert_eq!(array.label(), "ids");
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Array<T> {
    /// The label inherited from the [`Metadata`].
    label: String,

    /// The values.
    data: Box<[T]>,
}

impl<T: Default> Array<T> {
    /// Allocates a new [`Array`].
    ///
    /// # Panics
    ///
    /// Panics if the memory cannot be allocated.
    #[inline]
    #[must_use]
    pub fn new(metadata: &Metadata) -> Array<T> {
        log_allocation::<T>(metadata);
        let mut data = Vec::with_capacity(metadata.extent());
        data.resize_with(metadata.extent(), T::default);
        Array {
            label: metadata.label().to_owned(),
            data: data.into_boxed_slice(),
        }
    }

    /// Allocates a new [`Array`] reporting allocation failure as an [`Error`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the memory cannot be allocated.
    #[inline]
    pub fn try_new(metadata: &Metadata) -> Result<Array<T>, Error> {
        log_allocation::<T>(metadata);
        let mut data = Vec::new();
        if data.try_reserve_exact(metadata.extent()).is_err() {
            log::warn!(
                "failed to allocate {} x {} bytes for '{}'",
                metadata.extent(),
                size_of::<T>(),
                metadata.label()
            );
            return Err(Error::OutOfMemory);
        }
        data.resize_with(metadata.extent(), T::default);
        Ok(Array {
            label: metadata.label().to_owned(),
            data: data.into_boxed_slice(),
        })
    }
}

impl<T> Array<T> {
    /// Returns the label.
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the [`Array`] holds no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns a reference to the element at `index`.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    /// Returns a mutable reference to the element at `index`.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.data.get_mut(index)
    }

    /// Returns the elements as a slice.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Returns the elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T> Index<usize> for Array<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.data[index]
    }
}

impl<T> IndexMut<usize> for Array<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.data[index]
    }
}

fn log_allocation<T>(metadata: &Metadata) {
    log::debug!(
        "allocating '{}': {} x {} bytes",
        metadata.label(),
        metadata.extent(),
        size_of::<T>()
    );
}
