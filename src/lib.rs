// SPDX-FileCopyrightText: 2023 Changgyoo Park <wvwwvwwv@me.com>
//
// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Typed multi-field containers with a selectable memory layout.
//!
//! A [`ViewOfStructs`] stores a fixed number of records described by a [`Struct`] list, and lays
//! them out either as an array of records ([`Interleaved`]) or as one array per field
//! ([`Columnar`]). A field is addressed by a record index and a [`Field`] token; the token is
//! resolved when the program is compiled, and naming a field the record does not have is a type
//! error.
//!
//! ```
//! use view_of_structs::{Columnar, Field, Interleaved, Struct, ViewOfStructs};
//!
//! type Particle = Struct![i32, f64, char];
//!
//! let mut aos: ViewOfStructs<Particle, Interleaved> = ViewOfStructs::new(4);
//! let mut soa: ViewOfStructs<Particle, Columnar> = ViewOfStructs::new(4);
//! aos[(2, Field::<1>)] = 3.14;
//! soa[(2, Field::<1>)] = 3.14;
//! assert_eq!(aos[(2, Field::<1>)], soa[(2, Field::<1>)]);
//! ```
//!
//! ```compile_fail
//! use view_of_structs::{Field, Interleaved, Struct, ViewOfStructs};
//!
//! let view: ViewOfStructs<Struct![i32, f64, char], Interleaved> = ViewOfStructs::new(4);
//! let _ = view.cell(0, Field::<3>);
//! ```

mod array;
mod container;
mod error;
pub mod field;
mod layout;
mod metadata;
mod record;
pub mod storage;

pub use array::Array;
pub use container::ViewOfStructs;
pub use error::Error;
pub use field::{Field, Selector, MAX_FIELDS};
pub use layout::{Columnar, Interleaved, Layout};
pub use metadata::Metadata;
pub use record::{number_fields, End, FieldAt, FieldList, FieldReference, FieldType, Record, Struct};
