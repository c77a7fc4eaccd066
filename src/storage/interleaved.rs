// SPDX-FileCopyrightText: 2023 Changgyoo Park <wvwwvwwv@me.com>
//
// SPDX-License-Identifier: Apache-2.0

//! [`InterleavedStorage`] [`Backend`] implementation.

use super::Backend;
use crate::field::Nat;
use crate::{Array, Error, FieldAt, Metadata, Record};
use std::any::Any;

/// [`InterleavedStorage`] keeps whole records next to each other in a single [`Array`].
///
/// All the fields of a record share a cache line as far as their sizes allow, which favors
/// random access to single records over field-wise bulk traversal.
#[derive(Clone, Debug)]
pub struct InterleavedStorage<R: Record> {
    records: Array<R>,
}

impl<R: Record> InterleavedStorage<R> {
    /// Returns the records.
    #[inline]
    #[must_use]
    pub fn records(&self) -> &[R] {
        self.records.as_slice()
    }

    /// Returns the records as a mutable slice.
    #[inline]
    pub fn records_mut(&mut self) -> &mut [R] {
        self.records.as_mut_slice()
    }
}

impl<R: Record> Backend<R> for InterleavedStorage<R> {
    #[inline]
    fn new(metadata: &Metadata) -> Self {
        InterleavedStorage {
            records: Array::new(metadata),
        }
    }

    #[inline]
    fn try_new(metadata: &Metadata) -> Result<Self, Error> {
        Ok(InterleavedStorage {
            records: Array::try_new(metadata)?,
        })
    }

    #[inline]
    fn label(&self) -> &str {
        self.records.label()
    }

    #[inline]
    fn extent(&self) -> usize {
        self.records.len()
    }

    #[inline]
    fn cell<N: Nat>(&self, index: usize) -> &<R as FieldAt<N>>::Type
    where
        R: FieldAt<N>,
    {
        <R as FieldAt<N>>::field(&self.records[index])
    }

    #[inline]
    fn cell_mut<N: Nat>(&mut self, index: usize) -> &mut <R as FieldAt<N>>::Type
    where
        R: FieldAt<N>,
    {
        <R as FieldAt<N>>::field_mut(&mut self.records[index])
    }

    #[inline]
    fn get<N: Nat>(&self, index: usize) -> Option<&<R as FieldAt<N>>::Type>
    where
        R: FieldAt<N>,
    {
        self.records.get(index).map(<R as FieldAt<N>>::field)
    }

    #[inline]
    fn get_mut<N: Nat>(&mut self, index: usize) -> Option<&mut <R as FieldAt<N>>::Type>
    where
        R: FieldAt<N>,
    {
        self.records.get_mut(index).map(<R as FieldAt<N>>::field_mut)
    }

    #[inline]
    fn read(&self, index: usize) -> R {
        self.records[index].clone()
    }

    #[inline]
    fn write(&mut self, index: usize, record: R) {
        self.records[index] = record;
    }

    #[inline]
    fn cell_any(&self, index: usize, pos: usize) -> &dyn Any {
        match self.records[index].field_any(pos) {
            Some(field) => field,
            None => unreachable!("field position {pos} exceeds {}", R::NUMBER_FIELDS),
        }
    }

    #[inline]
    fn cell_any_mut(&mut self, index: usize, pos: usize) -> &mut dyn Any {
        match self.records[index].field_any_mut(pos) {
            Some(field) => field,
            None => unreachable!("field position {pos} exceeds {}", R::NUMBER_FIELDS),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Field, Selector, Struct};

    type Particle = Struct![i32, f64, char];

    #[test]
    fn fields_are_adjacent() {
        let storage: InterleavedStorage<Particle> = Backend::new(&Metadata::new(4));
        let record = &storage.records()[2] as *const Particle as usize;
        let first = storage.cell::<<Field<0> as Selector>::Index>(2) as *const i32 as usize;
        let last = storage.cell::<<Field<2> as Selector>::Index>(2) as *const char as usize;
        let size = std::mem::size_of::<Particle>();
        assert!(record <= first && first < record + size);
        assert!(record <= last && last < record + size);
    }

    #[test]
    fn read_write() {
        let mut storage: InterleavedStorage<Particle> = Backend::new(&Metadata::new(2));
        storage.write(1, (5, 1.5, 'q').into());
        assert_eq!(storage.read(1), Particle::from((5, 1.5, 'q')));
        assert_eq!(storage.read(0), Particle::default());
        assert!(storage.get::<<Field<0> as Selector>::Index>(2).is_none());
    }
}
