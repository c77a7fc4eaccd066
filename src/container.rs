// SPDX-FileCopyrightText: 2023 Changgyoo Park <wvwwvwwv@me.com>
//
// SPDX-License-Identifier: Apache-2.0

use super::storage::Backend;
use super::{Columnar, Error, FieldAt, Interleaved, Layout, Metadata, Record, Selector};
use std::any::{Any, TypeId};
use std::fmt;
use std::ops::{Index, IndexMut};

/// [`ViewOfStructs`] is a fixed-size collection of records of type `R` laid out in memory as
/// specified by `L`.
///
/// Fields are addressed by a record index and a [`Field`](super::Field) token, and the accessor
/// is the same for every layout; switching the layout only requires changing `L`.
///
/// A reference returned by an accessor borrows the [`ViewOfStructs`], so it can neither outlive
/// it nor coexist with a mutable reference to the same cell. Shared references to distinct cells
/// can be used from any number of threads.
///
/// # Examples
///
/// ```
/// use view_of_structs::{Columnar, Field, Struct, ViewOfStructs};
///
/// let mut view: ViewOfStructs<Struct![i32, f64, char], Columnar> = ViewOfStructs::new(4);
/// view[(2, Field::<0>)] = 42;
/// *view.cell_mut(2, Field::<1>) = 3.14;
/// *view.cell_mut(2, Field::<2>) = 'x';
///
/// assert_eq!(view[(2, Field::<0>)], 42);
/// assert_eq!(*view.cell(2, Field::<1>), 3.14);
/// assert_eq!(view.get(2, Field::<2>), Some(&'x'));
/// assert_eq!(view.get(4, Field::<2>), None);
/// ```
pub struct ViewOfStructs<R: Record, L: Layout = Interleaved> {
    /// The backend selected by the layout.
    storage: L::Storage<R>,
}

impl<R: Record, L: Layout> ViewOfStructs<R, L> {
    /// The number of fields in a record.
    pub const NUMBER_FIELDS: usize = R::NUMBER_FIELDS;

    /// Creates a new [`ViewOfStructs`] with every field default-initialized.
    ///
    /// # Panics
    ///
    /// Panics if the memory cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use view_of_structs::{Interleaved, Metadata, Struct, ViewOfStructs};
    ///
    /// let view: ViewOfStructs<Struct![u8, u16], Interleaved> =
    ///     ViewOfStructs::new(Metadata::new(8).with_label("pairs"));
    /// assert_eq!(view.extent(), 8);
    /// assert_eq!(view.label(), "pairs");
    /// ```
    #[inline]
    #[must_use]
    pub fn new<M: Into<Metadata>>(metadata: M) -> ViewOfStructs<R, L> {
        let metadata = metadata.into();
        log_construction::<R, L>(&metadata);
        ViewOfStructs {
            storage: <L::Storage<R> as Backend<R>>::new(&metadata),
        }
    }

    /// Creates a new [`ViewOfStructs`] reporting allocation failure as an [`Error`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfMemory`] if the memory cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use view_of_structs::{Columnar, Error, Struct, ViewOfStructs};
    ///
    /// let view = ViewOfStructs::<Struct![u64, u8], Columnar>::try_new(usize::MAX);
    /// assert_eq!(view.err(), Some(Error::OutOfMemory));
    /// ```
    #[inline]
    pub fn try_new<M: Into<Metadata>>(metadata: M) -> Result<ViewOfStructs<R, L>, Error> {
        let metadata = metadata.into();
        log_construction::<R, L>(&metadata);
        Ok(ViewOfStructs {
            storage: <L::Storage<R> as Backend<R>>::try_new(&metadata)?,
        })
    }

    /// Creates a new labeled [`ViewOfStructs`].
    ///
    /// # Panics
    ///
    /// Panics if the memory cannot be allocated.
    #[inline]
    #[must_use]
    pub fn with_label<S: Into<String>>(label: S, extent: usize) -> ViewOfStructs<R, L> {
        Self::new(Metadata::new(extent).with_label(label))
    }

    /// Returns the label.
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        self.storage.label()
    }

    /// Returns the number of records.
    #[inline]
    #[must_use]
    pub fn extent(&self) -> usize {
        self.storage.extent()
    }

    /// Returns the number of records.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.extent()
    }

    /// Returns `true` if the [`ViewOfStructs`] holds no records.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.storage.extent() == 0
    }

    /// Returns the [`TypeId`] of the field at `pos`.
    #[inline]
    #[must_use]
    pub fn field_type_id(pos: usize) -> Option<TypeId> {
        R::field_type_id(pos)
    }

    /// Returns a reference to a field of the record at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn cell<F: Selector>(&self, index: usize, _field: F) -> &<R as FieldAt<F::Index>>::Type
    where
        R: FieldAt<F::Index>,
    {
        self.storage.cell::<F::Index>(index)
    }

    /// Returns a mutable reference to a field of the record at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    #[inline]
    pub fn cell_mut<F: Selector>(
        &mut self,
        index: usize,
        _field: F,
    ) -> &mut <R as FieldAt<F::Index>>::Type
    where
        R: FieldAt<F::Index>,
    {
        self.storage.cell_mut::<F::Index>(index)
    }

    /// Returns a reference to a field of the record at `index`, or `None` if `index` is out of
    /// bounds.
    #[inline]
    pub fn get<F: Selector>(
        &self,
        index: usize,
        _field: F,
    ) -> Option<&<R as FieldAt<F::Index>>::Type>
    where
        R: FieldAt<F::Index>,
    {
        self.storage.get::<F::Index>(index)
    }

    /// Returns a mutable reference to a field of the record at `index`, or `None` if `index` is
    /// out of bounds.
    #[inline]
    pub fn get_mut<F: Selector>(
        &mut self,
        index: usize,
        _field: F,
    ) -> Option<&mut <R as FieldAt<F::Index>>::Type>
    where
        R: FieldAt<F::Index>,
    {
        self.storage.get_mut::<F::Index>(index)
    }

    /// Returns a copy of the record at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use view_of_structs::{Columnar, Struct, ViewOfStructs};
    ///
    /// type Pair = Struct![u8, char];
    ///
    /// let mut view: ViewOfStructs<Pair, Columnar> = ViewOfStructs::new(2);
    /// assert!(view.store(1, Pair::from((3, 'c'))).is_ok());
    /// assert_eq!(view.load(1).map(|r| r.into_tuple::<(u8, char)>()), Ok((3, 'c')));
    /// assert!(view.load(2).is_err());
    /// ```
    #[inline]
    pub fn load(&self, index: usize) -> Result<R, Error> {
        self.check_index(index)?;
        Ok(self.storage.read(index))
    }

    /// Overwrites every field of the record at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index` is out of bounds.
    #[inline]
    pub fn store(&mut self, index: usize, record: R) -> Result<(), Error> {
        self.check_index(index)?;
        self.storage.write(index, record);
        Ok(())
    }

    /// Overwrites every record with `record`.
    #[inline]
    pub fn fill(&mut self, record: &R) {
        for index in 0..self.extent() {
            self.storage.write(index, record.clone());
        }
    }

    /// Copies every record of `source` into `self` regardless of their layouts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ExtentMismatch`] if the extents differ.
    ///
    /// # Examples
    ///
    /// ```
    /// use view_of_structs::{Columnar, Field, Interleaved, Struct, ViewOfStructs};
    ///
    /// let mut aos: ViewOfStructs<Struct![i32, f64], Interleaved> = ViewOfStructs::new(3);
    /// let mut soa: ViewOfStructs<Struct![i32, f64], Columnar> = ViewOfStructs::new(3);
    /// aos[(1, Field::<1>)] = 0.5;
    /// assert!(soa.copy_from(&aos).is_ok());
    /// assert_eq!(soa.column(Field::<1>), &[0.0, 0.5, 0.0]);
    /// ```
    #[inline]
    pub fn copy_from<L2: Layout>(&mut self, source: &ViewOfStructs<R, L2>) -> Result<(), Error> {
        if self.extent() != source.extent() {
            return Err(Error::ExtentMismatch);
        }
        log::trace!(
            "copying {} records from {} '{}' to {} '{}'",
            self.extent(),
            L2::NAME,
            source.label(),
            L::NAME,
            self.label()
        );
        for index in 0..self.extent() {
            self.storage.write(index, source.storage.read(index));
        }
        Ok(())
    }

    /// Returns a type-erased reference to the field at position `pos` of the record at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FieldOutOfRange`] if `pos` does not name a field, or
    /// [`Error::IndexOutOfBounds`] if `index` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use view_of_structs::{Error, Interleaved, Struct, ViewOfStructs};
    ///
    /// let view: ViewOfStructs<Struct![i32, char], Interleaved> = ViewOfStructs::new(1);
    /// let cell = view.cell_any(0, 1).ok().and_then(|c| c.downcast_ref::<char>());
    /// assert_eq!(cell, Some(&'\0'));
    /// assert_eq!(view.cell_any(0, 2).err(), Some(Error::FieldOutOfRange));
    /// ```
    #[inline]
    pub fn cell_any(&self, index: usize, pos: usize) -> Result<&dyn Any, Error> {
        self.check_position(index, pos)?;
        Ok(self.storage.cell_any(index, pos))
    }

    /// Returns a type-erased mutable reference to the field at position `pos` of the record at
    /// `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FieldOutOfRange`] if `pos` does not name a field, or
    /// [`Error::IndexOutOfBounds`] if `index` is out of bounds.
    #[inline]
    pub fn cell_any_mut(&mut self, index: usize, pos: usize) -> Result<&mut dyn Any, Error> {
        self.check_position(index, pos)?;
        Ok(self.storage.cell_any_mut(index, pos))
    }

    fn check_index(&self, index: usize) -> Result<(), Error> {
        if index < self.extent() {
            Ok(())
        } else {
            Err(Error::IndexOutOfBounds)
        }
    }

    fn check_position(&self, index: usize, pos: usize) -> Result<(), Error> {
        if pos >= R::NUMBER_FIELDS {
            return Err(Error::FieldOutOfRange);
        }
        self.check_index(index)
    }
}

impl<R: Record> ViewOfStructs<R, Columnar> {
    /// Returns the values of a field of all the records as a contiguous slice.
    #[inline]
    pub fn column<F: Selector>(&self, _field: F) -> &[<R as FieldAt<F::Index>>::Type]
    where
        R: FieldAt<F::Index>,
    {
        self.storage.column::<F::Index>()
    }

    /// Returns the values of a field of all the records as a contiguous mutable slice.
    #[inline]
    pub fn column_mut<F: Selector>(&mut self, _field: F) -> &mut [<R as FieldAt<F::Index>>::Type]
    where
        R: FieldAt<F::Index>,
    {
        self.storage.column_mut::<F::Index>()
    }
}

impl<R: Record> ViewOfStructs<R, Interleaved> {
    /// Returns the records as a contiguous slice.
    #[inline]
    #[must_use]
    pub fn records(&self) -> &[R] {
        self.storage.records()
    }

    /// Returns the records as a contiguous mutable slice.
    #[inline]
    pub fn records_mut(&mut self) -> &mut [R] {
        self.storage.records_mut()
    }
}

impl<R: Record, L: Layout> fmt::Debug for ViewOfStructs<R, L> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewOfStructs")
            .field("layout", &L::NAME)
            .field("label", &self.label())
            .field("extent", &self.extent())
            .field("number_fields", &R::NUMBER_FIELDS)
            .finish_non_exhaustive()
    }
}

impl<R, L, F> Index<(usize, F)> for ViewOfStructs<R, L>
where
    R: Record + FieldAt<F::Index>,
    L: Layout,
    F: Selector,
{
    type Output = <R as FieldAt<F::Index>>::Type;

    #[inline]
    fn index(&self, (index, field): (usize, F)) -> &Self::Output {
        self.cell(index, field)
    }
}

impl<R, L, F> IndexMut<(usize, F)> for ViewOfStructs<R, L>
where
    R: Record + FieldAt<F::Index>,
    L: Layout,
    F: Selector,
{
    #[inline]
    fn index_mut(&mut self, (index, field): (usize, F)) -> &mut Self::Output {
        self.cell_mut(index, field)
    }
}

fn log_construction<R: Record, L: Layout>(metadata: &Metadata) {
    log::debug!(
        "creating {} view '{}': {} records of {} fields",
        L::NAME,
        metadata.label(),
        metadata.extent(),
        R::NUMBER_FIELDS
    );
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Field, FieldReference, FieldType, Struct};
    use static_assertions::{assert_impl_all, assert_type_eq_all, const_assert_eq};

    type Particle = Struct![i32, f64, char];

    const_assert_eq!(ViewOfStructs::<Particle, Interleaved>::NUMBER_FIELDS, 3);
    const_assert_eq!(ViewOfStructs::<Particle, Columnar>::NUMBER_FIELDS, 3);
    assert_type_eq_all!(FieldType<Particle, 1>, f64);
    assert_impl_all!(ViewOfStructs<Particle, Interleaved>: Send, Sync);
    assert_impl_all!(ViewOfStructs<Particle, Columnar>: Send, Sync);

    #[allow(clippy::approx_constant)]
    fn scenario<L: Layout>() {
        let mut view: ViewOfStructs<Particle, L> = ViewOfStructs::with_label("particles", 4);
        view[(2, Field::<0>)] = 42;
        view[(2, Field::<1>)] = 3.14;
        view[(2, Field::<2>)] = 'x';
        assert_eq!(view[(2, Field::<0>)], 42);
        assert_eq!(view[(2, Field::<1>)], 3.14);
        assert_eq!(view[(2, Field::<2>)], 'x');
        for index in [0, 1, 3] {
            assert_eq!(view.load(index), Ok(Particle::default()));
        }
    }

    #[test]
    fn interleaved() {
        scenario::<Interleaved>();
    }

    #[test]
    fn columnar() {
        scenario::<Columnar>();
    }

    fn assign_through_reference<L: Layout>() {
        let mut view: ViewOfStructs<Particle, L> = ViewOfStructs::new(2);
        let cell: FieldReference<'_, Particle, 1> = view.cell_mut(1, Field::<1>);
        *cell = 2.0;
        let cell: FieldReference<'_, Particle, 2> = view.cell_mut(0, Field::<2>);
        *cell = 'z';
        assert_eq!(view[(1, Field::<1>)], 2.0);
        assert_eq!(view[(0, Field::<2>)], 'z');
        assert_eq!(view[(0, Field::<1>)], 0.0);
    }

    #[test]
    fn field_reference() {
        assign_through_reference::<Interleaved>();
        assign_through_reference::<Columnar>();
    }

    #[test]
    fn fill() {
        let mut view: ViewOfStructs<Particle, Columnar> = ViewOfStructs::new(3);
        view.fill(&Particle::from((1, 1.0, 'a')));
        assert_eq!(view.column(Field::<0>), &[1, 1, 1]);
        assert_eq!(view.column(Field::<2>), &['a', 'a', 'a']);
    }

    #[test]
    fn copy_from_mismatch() {
        let mut aos: ViewOfStructs<Particle, Interleaved> = ViewOfStructs::new(3);
        let soa: ViewOfStructs<Particle, Columnar> = ViewOfStructs::new(2);
        assert_eq!(aos.copy_from(&soa), Err(Error::ExtentMismatch));
    }

    #[test]
    fn cell_any() {
        let mut view: ViewOfStructs<Particle, Interleaved> = ViewOfStructs::new(2);
        if let Ok(cell) = view.cell_any_mut(1, 1) {
            if let Some(value) = cell.downcast_mut::<f64>() {
                *value = 2.5;
            }
        }
        assert_eq!(view[(1, Field::<1>)], 2.5);
        assert_eq!(view.cell_any(2, 0).err(), Some(Error::IndexOutOfBounds));
        assert_eq!(view.cell_any(0, 3).err(), Some(Error::FieldOutOfRange));
        assert_eq!(
            ViewOfStructs::<Particle, Interleaved>::field_type_id(2),
            Some(TypeId::of::<char>())
        );
    }

    #[test]
    fn records() {
        let mut view: ViewOfStructs<Particle, Interleaved> = ViewOfStructs::new(2);
        view.records_mut()[0] = Particle::from((5, 0.5, 'r'));
        assert_eq!(*view.cell(0, Field::<0>), 5);
        assert_eq!(view.records().len(), 2);
    }

    #[test]
    fn debug() {
        let view: ViewOfStructs<Particle, Columnar> = ViewOfStructs::with_label("p", 1);
        let formatted = format!("{view:?}");
        assert!(formatted.contains("columnar"));
        assert!(formatted.contains("\"p\""));
    }

    #[test]
    fn empty() {
        let view: ViewOfStructs<Particle, Columnar> = ViewOfStructs::new(0);
        assert!(view.is_empty());
        assert!(view.get(0, Field::<0>).is_none());
        assert_eq!(view.load(0), Err(Error::IndexOutOfBounds));
    }
}
