// SPDX-FileCopyrightText: 2023 Changgyoo Park <wvwwvwwv@me.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Type-level descriptions of records.

use super::field::{Field, Nat, Selector, S, Z};
use super::storage::columnar::{ColumnNode, Decompose};
use super::Array;
use std::any::{Any, TypeId};

/// [`Struct`] is an ordered list of fields: the first field followed by the list of the remaining
/// fields.
///
/// `Struct<i32, Struct<f64, Struct<char>>>` describes a record of three fields; the
/// [`Struct!`](crate::Struct!) macro spells it as `Struct![i32, f64, char]`.
///
/// [`Struct`] is `#[repr(C)]`: the fields are laid out in declaration order following the C
/// padding rules, so the size of a record in the interleaved layout only depends on its field
/// types.
///
/// # Examples
///
/// ```
/// use view_of_structs::{record, Field, FieldList, Struct};
///
/// let mut r: Struct![i32, f64, char] = record![42, 3.14, 'x'];
/// assert_eq!(<Struct![i32, f64, char]>::NUMBER_FIELDS, 3);
/// assert_eq!(*r.get(Field::<0>), 42);
/// *r.get_mut(Field::<2>) = 'y';
/// assert_eq!(r.into_tuple::<(i32, f64, char)>(), (42, 3.14, 'y'));
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[repr(C)]
pub struct Struct<H, R = End> {
    /// The first field.
    pub field_content: H,

    /// The remaining fields.
    pub rest: R,
}

/// [`End`] terminates a [`Struct`] list.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct End;

/// [`FieldList`] is implemented by every [`Struct`] list including the empty one.
pub trait FieldList: Sized {
    /// The number of fields in the list.
    const NUMBER_FIELDS: usize;

    /// Returns the [`TypeId`] of the field at `pos`.
    fn field_type_id(pos: usize) -> Option<TypeId>;

    /// Returns a type-erased reference to the field at `pos`.
    fn field_any(&self, pos: usize) -> Option<&dyn Any>;

    /// Returns a type-erased mutable reference to the field at `pos`.
    fn field_any_mut(&mut self, pos: usize) -> Option<&mut dyn Any>;
}

/// [`Record`] is a non-empty [`FieldList`] that can be stored in a
/// [`ViewOfStructs`](super::ViewOfStructs).
///
/// Every field has to be default-constructible as freshly allocated storage is
/// default-initialized, and cloneable as whole records can be loaded out of the columnar layout.
pub trait Record: FieldList + Decompose + Clone + Default + 'static {}

impl<H, R> Record for Struct<H, R>
where
    H: Clone + Default + 'static,
    R: FieldList + Decompose + Clone + Default + 'static,
{
}

/// [`FieldAt`] resolves the field at position `N`.
///
/// It is implemented recursively: position [`Z`] is the first field of a [`Struct`], and position
/// `S<N>` is position `N` of the remaining fields. [`End`] implements nothing, therefore naming a
/// field that does not exist fails to type-check.
pub trait FieldAt<N: Nat>: Decompose {
    /// The declared type of the field.
    type Type: 'static;

    /// Returns a reference to the field.
    fn field(&self) -> &Self::Type;

    /// Returns a mutable reference to the field.
    fn field_mut(&mut self) -> &mut Self::Type;

    /// Returns the array holding the field in the columnar layout.
    fn column(columns: &Self::Columns) -> &Array<Self::Type>;

    /// Returns the mutable array holding the field in the columnar layout.
    fn column_mut(columns: &mut Self::Columns) -> &mut Array<Self::Type>;
}

/// The declared type of field `I` of `R`.
pub type FieldType<R, const I: usize> = <R as FieldAt<<Field<I> as Selector>::Index>>::Type;

/// The assignable reference type of field `I` of `R`.
pub type FieldReference<'a, R, const I: usize> = &'a mut FieldType<R, I>;

/// Returns the number of fields of `R`.
///
/// # Examples
///
/// ```
/// use view_of_structs::{number_fields, Struct};
///
/// assert_eq!(number_fields::<Struct![u8, u16]>(), 2);
/// ```
#[inline]
#[must_use]
pub const fn number_fields<R: FieldList>() -> usize {
    R::NUMBER_FIELDS
}

impl<H, R> Struct<H, R> {
    /// Creates a new [`Struct`].
    #[inline]
    pub const fn new(field_content: H, rest: R) -> Struct<H, R> {
        Struct {
            field_content,
            rest,
        }
    }

    /// Returns a reference to the field named by the selector.
    #[inline]
    pub fn get<F: Selector>(&self, _field: F) -> &<Self as FieldAt<F::Index>>::Type
    where
        Self: FieldAt<F::Index>,
    {
        <Self as FieldAt<F::Index>>::field(self)
    }

    /// Returns a mutable reference to the field named by the selector.
    #[inline]
    pub fn get_mut<F: Selector>(&mut self, _field: F) -> &mut <Self as FieldAt<F::Index>>::Type
    where
        Self: FieldAt<F::Index>,
    {
        <Self as FieldAt<F::Index>>::field_mut(self)
    }
}

impl FieldList for End {
    const NUMBER_FIELDS: usize = 0;

    #[inline]
    fn field_type_id(_pos: usize) -> Option<TypeId> {
        None
    }

    #[inline]
    fn field_any(&self, _pos: usize) -> Option<&dyn Any> {
        None
    }

    #[inline]
    fn field_any_mut(&mut self, _pos: usize) -> Option<&mut dyn Any> {
        None
    }
}

impl<H: 'static, R: FieldList> FieldList for Struct<H, R> {
    const NUMBER_FIELDS: usize = 1 + R::NUMBER_FIELDS;

    #[inline]
    fn field_type_id(pos: usize) -> Option<TypeId> {
        if pos == 0 {
            Some(TypeId::of::<H>())
        } else {
            R::field_type_id(pos - 1)
        }
    }

    #[inline]
    fn field_any(&self, pos: usize) -> Option<&dyn Any> {
        if pos == 0 {
            Some(&self.field_content)
        } else {
            self.rest.field_any(pos - 1)
        }
    }

    #[inline]
    fn field_any_mut(&mut self, pos: usize) -> Option<&mut dyn Any> {
        if pos == 0 {
            Some(&mut self.field_content)
        } else {
            self.rest.field_any_mut(pos - 1)
        }
    }
}

impl<H, R> FieldAt<Z> for Struct<H, R>
where
    H: Clone + Default + 'static,
    R: Decompose,
{
    type Type = H;

    #[inline]
    fn field(&self) -> &H {
        &self.field_content
    }

    #[inline]
    fn field_mut(&mut self) -> &mut H {
        &mut self.field_content
    }

    #[inline]
    fn column(columns: &ColumnNode<H, R::Columns>) -> &Array<H> {
        &columns.column
    }

    #[inline]
    fn column_mut(columns: &mut ColumnNode<H, R::Columns>) -> &mut Array<H> {
        &mut columns.column
    }
}

impl<H, R, N> FieldAt<S<N>> for Struct<H, R>
where
    H: Clone + Default + 'static,
    R: FieldAt<N>,
    N: Nat,
{
    type Type = R::Type;

    #[inline]
    fn field(&self) -> &R::Type {
        <R as FieldAt<N>>::field(&self.rest)
    }

    #[inline]
    fn field_mut(&mut self) -> &mut R::Type {
        <R as FieldAt<N>>::field_mut(&mut self.rest)
    }

    #[inline]
    fn column(columns: &ColumnNode<H, R::Columns>) -> &Array<R::Type> {
        <R as FieldAt<N>>::column(&columns.next)
    }

    #[inline]
    fn column_mut(columns: &mut ColumnNode<H, R::Columns>) -> &mut Array<R::Type> {
        <R as FieldAt<N>>::column_mut(&mut columns.next)
    }
}

/// Spells a [`Struct`] type out of a list of field types.
///
/// # Examples
///
/// ```
/// use view_of_structs::{End, Struct};
///
/// let _: Struct![u8, char] = Struct::new(1_u8, Struct::new('a', End));
/// ```
#[macro_export]
macro_rules! Struct {
    ($first:ty $(,)?) => {
        $crate::Struct<$first, $crate::End>
    };
    ($first:ty, $($rest:ty),+ $(,)?) => {
        $crate::Struct<$first, $crate::Struct![$($rest),+]>
    };
}

/// Builds a [`Struct`] value out of a list of field values.
///
/// # Examples
///
/// ```
/// use view_of_structs::{record, Field};
///
/// let r = record![1_u8, 'a'];
/// assert_eq!(*r.get(Field::<1>), 'a');
/// ```
#[macro_export]
macro_rules! record {
    ($first:expr $(,)?) => {
        $crate::Struct::new($first, $crate::End)
    };
    ($first:expr, $($rest:expr),+ $(,)?) => {
        $crate::Struct::new($first, $crate::record![$($rest),+])
    };
}

macro_rules! tuple_conversions {
    ($($t:ident $v:ident),+) => {
        impl<$($t),+> From<($($t,)+)> for Struct![$($t),+] {
            #[inline]
            fn from(($($v,)+): ($($t,)+)) -> Self {
                $crate::record![$($v),+]
            }
        }

        impl<$($t),+> From<Struct![$($t),+]> for ($($t,)+) {
            #[inline]
            fn from(record: Struct![$($t),+]) -> Self {
                tuple_conversions!(@destructure record; $($v),+);
                ($($v,)+)
            }
        }
    };
    (@destructure $record:expr; $v:ident) => {
        let Struct { field_content: $v, rest: End } = $record;
    };
    (@destructure $record:expr; $v:ident, $($rest:ident),+) => {
        let Struct { field_content: $v, rest } = $record;
        tuple_conversions!(@destructure rest; $($rest),+);
    };
}

tuple_conversions!(A a);
tuple_conversions!(A a, B b);
tuple_conversions!(A a, B b, C c);
tuple_conversions!(A a, B b, C c, D d);
tuple_conversions!(A a, B b, C c, D d, E e);
tuple_conversions!(A a, B b, C c, D d, E e, F f);
tuple_conversions!(A a, B b, C c, D d, E e, F f, G g);
tuple_conversions!(A a, B b, C c, D d, E e, F f, G g, H h);
tuple_conversions!(A a, B b, C c, D d, E e, F f, G g, H h, I i);
tuple_conversions!(A a, B b, C c, D d, E e, F f, G g, H h, I i, J j);
tuple_conversions!(A a, B b, C c, D d, E e, F f, G g, H h, I i, J j, K k);
tuple_conversions!(A a, B b, C c, D d, E e, F f, G g, H h, I i, J j, K k, L l);

impl<H, R> Struct<H, R> {
    /// Converts the [`Struct`] into the equivalent tuple.
    #[inline]
    pub fn into_tuple<T>(self) -> T
    where
        T: From<Self>,
    {
        T::from(self)
    }
}
