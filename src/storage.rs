// SPDX-FileCopyrightText: 2023 Changgyoo Park <wvwwvwwv@me.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Physical storage of records.

pub mod columnar;
pub mod interleaved;

use super::field::Nat;
use super::{Error, FieldAt, Metadata, Record};
use std::any::Any;

/// [`Backend`] is the capability every physical layout of `R` provides.
///
/// Resolving a field never branches at run time: the position is a type parameter, and each
/// implementation projects into its own memory through [`FieldAt`].
///
/// Methods that do not return an [`Option`] or a [`Result`] panic if `index` is not smaller than
/// the extent, the same way slice indexing does.
pub trait Backend<R: Record>: Sized {
    /// Allocates the storage described by the [`Metadata`].
    ///
    /// # Panics
    ///
    /// Panics if the memory cannot be allocated.
    fn new(metadata: &Metadata) -> Self;

    /// Allocates the storage described by the [`Metadata`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the memory cannot be allocated.
    fn try_new(metadata: &Metadata) -> Result<Self, Error>;

    /// Returns the label.
    fn label(&self) -> &str;

    /// Returns the number of records.
    fn extent(&self) -> usize;

    /// Returns a reference to field `N` of the record at `index`.
    fn cell<N: Nat>(&self, index: usize) -> &<R as FieldAt<N>>::Type
    where
        R: FieldAt<N>;

    /// Returns a mutable reference to field `N` of the record at `index`.
    fn cell_mut<N: Nat>(&mut self, index: usize) -> &mut <R as FieldAt<N>>::Type
    where
        R: FieldAt<N>;

    /// Returns a reference to field `N` of the record at `index` if `index` is in bounds.
    fn get<N: Nat>(&self, index: usize) -> Option<&<R as FieldAt<N>>::Type>
    where
        R: FieldAt<N>;

    /// Returns a mutable reference to field `N` of the record at `index` if `index` is in bounds.
    fn get_mut<N: Nat>(&mut self, index: usize) -> Option<&mut <R as FieldAt<N>>::Type>
    where
        R: FieldAt<N>;

    /// Materializes the record at `index`.
    fn read(&self, index: usize) -> R;

    /// Overwrites every field of the record at `index`.
    fn write(&mut self, index: usize, record: R);

    /// Returns a type-erased reference to the field at `pos` of the record at `index`.
    ///
    /// The caller guarantees that `pos < R::NUMBER_FIELDS`.
    fn cell_any(&self, index: usize, pos: usize) -> &dyn Any;

    /// Returns a type-erased mutable reference to the field at `pos` of the record at `index`.
    ///
    /// The caller guarantees that `pos < R::NUMBER_FIELDS`.
    fn cell_any_mut(&mut self, index: usize, pos: usize) -> &mut dyn Any;
}
