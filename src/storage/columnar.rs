// SPDX-FileCopyrightText: 2023 Changgyoo Park <wvwwvwwv@me.com>
//
// SPDX-License-Identifier: Apache-2.0

//! [`ColumnarStorage`] [`Backend`] implementation.

use super::Backend;
use crate::field::Nat;
use crate::{Array, End, Error, FieldAt, FieldList, Metadata, Record, Struct};
use std::any::Any;
use std::fmt;

/// [`ColumnarStorage`] keeps each field of the records in its own [`Array`].
///
/// The arrays form a chain of [`ColumnNode`] instances that mirrors the [`Struct`] list: the node
/// of field `i` owns the array of field `i` and the node of field `i + 1`, and [`Terminal`] closes
/// the chain. Every array receives the same [`Metadata`].
pub struct ColumnarStorage<R: Record> {
    /// The number of records.
    extent: usize,

    /// The label shared by all the arrays.
    label: String,

    /// The per-field arrays.
    columns: R::Columns,
}

/// [`ColumnNode`] owns the array of a single field and the nodes of the subsequent fields.
#[derive(Clone, Debug)]
pub struct ColumnNode<H, Next> {
    pub(crate) column: Array<H>,
    pub(crate) next: Next,
}

/// [`Terminal`] ends a chain of [`ColumnNode`] instances.
#[derive(Clone, Copy, Debug, Default)]
pub struct Terminal;

/// [`Decompose`] splits a [`FieldList`] into one array per field.
pub trait Decompose: FieldList {
    /// The chain of per-field arrays.
    type Columns;

    /// Allocates one array per field.
    ///
    /// # Panics
    ///
    /// Panics if the memory cannot be allocated.
    fn columns(metadata: &Metadata) -> Self::Columns;

    /// Allocates one array per field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if any of the arrays cannot be allocated.
    fn try_columns(metadata: &Metadata) -> Result<Self::Columns, Error>;

    /// Collects the fields at `index` into a record.
    fn gather(columns: &Self::Columns, index: usize) -> Self;

    /// Distributes the fields of `self` over the arrays at `index`.
    fn scatter(self, columns: &mut Self::Columns, index: usize);

    /// Returns a type-erased reference to the field at `pos` of the record at `index`.
    fn cell_any(columns: &Self::Columns, index: usize, pos: usize) -> &dyn Any;

    /// Returns a type-erased mutable reference to the field at `pos` of the record at `index`.
    fn cell_any_mut(columns: &mut Self::Columns, index: usize, pos: usize) -> &mut dyn Any;
}

impl Decompose for End {
    type Columns = Terminal;

    #[inline]
    fn columns(_metadata: &Metadata) -> Terminal {
        Terminal
    }

    #[inline]
    fn try_columns(_metadata: &Metadata) -> Result<Terminal, Error> {
        Ok(Terminal)
    }

    #[inline]
    fn gather(_columns: &Terminal, _index: usize) -> End {
        End
    }

    #[inline]
    fn scatter(self, _columns: &mut Terminal, _index: usize) {}

    #[inline]
    fn cell_any(_columns: &Terminal, _index: usize, pos: usize) -> &dyn Any {
        unreachable!("field position exceeds the number of columns by {}", pos + 1)
    }

    #[inline]
    fn cell_any_mut(_columns: &mut Terminal, _index: usize, pos: usize) -> &mut dyn Any {
        unreachable!("field position exceeds the number of columns by {}", pos + 1)
    }
}

impl<H, R> Decompose for Struct<H, R>
where
    H: Clone + Default + 'static,
    R: Decompose,
{
    type Columns = ColumnNode<H, R::Columns>;

    #[inline]
    fn columns(metadata: &Metadata) -> Self::Columns {
        ColumnNode {
            column: Array::new(metadata),
            next: R::columns(metadata),
        }
    }

    #[inline]
    fn try_columns(metadata: &Metadata) -> Result<Self::Columns, Error> {
        Ok(ColumnNode {
            column: Array::try_new(metadata)?,
            next: R::try_columns(metadata)?,
        })
    }

    #[inline]
    fn gather(columns: &Self::Columns, index: usize) -> Self {
        Struct {
            field_content: columns.column[index].clone(),
            rest: R::gather(&columns.next, index),
        }
    }

    #[inline]
    fn scatter(self, columns: &mut Self::Columns, index: usize) {
        columns.column[index] = self.field_content;
        self.rest.scatter(&mut columns.next, index);
    }

    #[inline]
    fn cell_any(columns: &Self::Columns, index: usize, pos: usize) -> &dyn Any {
        if pos == 0 {
            &columns.column[index]
        } else {
            R::cell_any(&columns.next, index, pos - 1)
        }
    }

    #[inline]
    fn cell_any_mut(columns: &mut Self::Columns, index: usize, pos: usize) -> &mut dyn Any {
        if pos == 0 {
            &mut columns.column[index]
        } else {
            R::cell_any_mut(&mut columns.next, index, pos - 1)
        }
    }
}

impl<R: Record> ColumnarStorage<R> {
    /// Returns the contiguous values of field `N` of all the records.
    #[inline]
    #[must_use]
    pub fn column<N: Nat>(&self) -> &[<R as FieldAt<N>>::Type]
    where
        R: FieldAt<N>,
    {
        <R as FieldAt<N>>::column(&self.columns).as_slice()
    }

    /// Returns the contiguous values of field `N` of all the records as a mutable slice.
    #[inline]
    pub fn column_mut<N: Nat>(&mut self) -> &mut [<R as FieldAt<N>>::Type]
    where
        R: FieldAt<N>,
    {
        <R as FieldAt<N>>::column_mut(&mut self.columns).as_mut_slice()
    }
}

impl<R: Record> Backend<R> for ColumnarStorage<R> {
    #[inline]
    fn new(metadata: &Metadata) -> Self {
        ColumnarStorage {
            extent: metadata.extent(),
            label: metadata.label().to_owned(),
            columns: R::columns(metadata),
        }
    }

    #[inline]
    fn try_new(metadata: &Metadata) -> Result<Self, Error> {
        Ok(ColumnarStorage {
            extent: metadata.extent(),
            label: metadata.label().to_owned(),
            columns: R::try_columns(metadata)?,
        })
    }

    #[inline]
    fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    fn extent(&self) -> usize {
        self.extent
    }

    #[inline]
    fn cell<N: Nat>(&self, index: usize) -> &<R as FieldAt<N>>::Type
    where
        R: FieldAt<N>,
    {
        &<R as FieldAt<N>>::column(&self.columns)[index]
    }

    #[inline]
    fn cell_mut<N: Nat>(&mut self, index: usize) -> &mut <R as FieldAt<N>>::Type
    where
        R: FieldAt<N>,
    {
        &mut <R as FieldAt<N>>::column_mut(&mut self.columns)[index]
    }

    #[inline]
    fn get<N: Nat>(&self, index: usize) -> Option<&<R as FieldAt<N>>::Type>
    where
        R: FieldAt<N>,
    {
        <R as FieldAt<N>>::column(&self.columns).get(index)
    }

    #[inline]
    fn get_mut<N: Nat>(&mut self, index: usize) -> Option<&mut <R as FieldAt<N>>::Type>
    where
        R: FieldAt<N>,
    {
        <R as FieldAt<N>>::column_mut(&mut self.columns).get_mut(index)
    }

    #[inline]
    fn read(&self, index: usize) -> R {
        R::gather(&self.columns, index)
    }

    #[inline]
    fn write(&mut self, index: usize, record: R) {
        // A record is either written in full or not at all.
        assert!(index < self.extent, "index {index} out of bounds");
        record.scatter(&mut self.columns, index);
    }

    #[inline]
    fn cell_any(&self, index: usize, pos: usize) -> &dyn Any {
        R::cell_any(&self.columns, index, pos)
    }

    #[inline]
    fn cell_any_mut(&mut self, index: usize, pos: usize) -> &mut dyn Any {
        R::cell_any_mut(&mut self.columns, index, pos)
    }
}

impl<R: Record> fmt::Debug for ColumnarStorage<R> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnarStorage")
            .field("label", &self.label)
            .field("extent", &self.extent)
            .field("number_fields", &R::NUMBER_FIELDS)
            .finish_non_exhaustive()
    }
}
