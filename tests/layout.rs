// SPDX-FileCopyrightText: 2023 Changgyoo Park <wvwwvwwv@me.com>
//
// SPDX-License-Identifier: Apache-2.0

#![allow(clippy::approx_constant)]

use proptest::prelude::*;
use std::mem::size_of;
use view_of_structs::{Columnar, Field, Interleaved, Layout, Struct, ViewOfStructs};

type Particle = Struct![i32, f64, char];

const EXTENT: usize = 16;

#[derive(Clone, Copy, Debug)]
enum Write {
    Int(usize, i32),
    Float(usize, f64),
    Char(usize, char),
}

fn write() -> impl Strategy<Value = Write> {
    prop_oneof![
        (0..EXTENT, any::<i32>()).prop_map(|(i, v)| Write::Int(i, v)),
        (0..EXTENT, -1.0e9..1.0e9_f64).prop_map(|(i, v)| Write::Float(i, v)),
        (0..EXTENT, any::<char>()).prop_map(|(i, v)| Write::Char(i, v)),
    ]
}

fn apply<L: Layout>(view: &mut ViewOfStructs<Particle, L>, write: Write) {
    match write {
        Write::Int(i, v) => view[(i, Field::<0>)] = v,
        Write::Float(i, v) => view[(i, Field::<1>)] = v,
        Write::Char(i, v) => view[(i, Field::<2>)] = v,
    }
}

fn snapshot<L: Layout>(view: &ViewOfStructs<Particle, L>) -> Vec<(i32, f64, char)> {
    (0..view.extent())
        .map(|i| {
            (
                *view.cell(i, Field::<0>),
                *view.cell(i, Field::<1>),
                *view.cell(i, Field::<2>),
            )
        })
        .collect()
}

fn addresses<L: Layout>(view: &ViewOfStructs<Particle, L>) -> Vec<(usize, usize)> {
    let mut ranges = Vec::new();
    for i in 0..view.extent() {
        ranges.push((view.cell(i, Field::<0>) as *const i32 as usize, size_of::<i32>()));
        ranges.push((view.cell(i, Field::<1>) as *const f64 as usize, size_of::<f64>()));
        ranges.push((view.cell(i, Field::<2>) as *const char as usize, size_of::<char>()));
    }
    ranges
}

fn assert_disjoint(mut ranges: Vec<(usize, usize)>) {
    ranges.sort_unstable();
    for pair in ranges.windows(2) {
        assert!(pair[0].0 + pair[0].1 <= pair[1].0, "{:?} overlaps {:?}", pair[0], pair[1]);
    }
}

fn scenario<L: Layout>() {
    let mut view: ViewOfStructs<Particle, L> = ViewOfStructs::new(4);
    *view.cell_mut(2, Field::<0>) = 42;
    *view.cell_mut(2, Field::<1>) = 3.14;
    *view.cell_mut(2, Field::<2>) = 'x';
    assert_eq!(*view.cell(2, Field::<0>), 42);
    assert_eq!(*view.cell(2, Field::<1>), 3.14);
    assert_eq!(*view.cell(2, Field::<2>), 'x');
    for i in [0, 1, 3] {
        assert_eq!(*view.cell(i, Field::<0>), 0);
        assert_eq!(*view.cell(i, Field::<1>), 0.0);
        assert_eq!(*view.cell(i, Field::<2>), '\0');
    }
}

#[test]
fn scenario_interleaved() {
    scenario::<Interleaved>();
}

#[test]
fn scenario_columnar() {
    scenario::<Columnar>();
}

#[test]
fn disjoint_cells() {
    assert_disjoint(addresses(&ViewOfStructs::<Particle, Interleaved>::new(EXTENT)));
    assert_disjoint(addresses(&ViewOfStructs::<Particle, Columnar>::new(EXTENT)));
}

#[test]
fn aliasing() {
    let mut view: ViewOfStructs<Particle, Columnar> = ViewOfStructs::new(EXTENT);
    let first = view.cell(5, Field::<1>) as *const f64;
    let second = view.cell(5, Field::<1>) as *const f64;
    assert_eq!(first, second);
    *view.cell_mut(5, Field::<1>) = 1.25;
    assert_eq!(view.get(5, Field::<1>), Some(&1.25));
}

#[test]
fn interleaved_record_locality() {
    let view: ViewOfStructs<Particle, Interleaved> = ViewOfStructs::new(EXTENT);
    let stride = size_of::<Particle>();
    let first = view.cell(0, Field::<1>) as *const f64 as usize;
    let second = view.cell(1, Field::<1>) as *const f64 as usize;
    assert_eq!(second - first, stride);
}

#[test]
fn columnar_field_locality() {
    let view: ViewOfStructs<Particle, Columnar> = ViewOfStructs::new(EXTENT);
    let first = view.cell(0, Field::<1>) as *const f64 as usize;
    let second = view.cell(1, Field::<1>) as *const f64 as usize;
    assert_eq!(second - first, size_of::<f64>());
    assert_eq!(view.column(Field::<1>).len(), EXTENT);
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        failure_persistence: None,
        .. ProptestConfig::default()
    })]

    #[test]
    fn round_trip(index in 0..EXTENT, int in any::<i32>(), float in -1.0e9..1.0e9_f64, c in any::<char>()) {
        let mut aos: ViewOfStructs<Particle, Interleaved> = ViewOfStructs::new(EXTENT);
        let mut soa: ViewOfStructs<Particle, Columnar> = ViewOfStructs::new(EXTENT);

        aos[(index, Field::<0>)] = int;
        soa[(index, Field::<0>)] = int;
        prop_assert_eq!(aos[(index, Field::<0>)], int);
        prop_assert_eq!(soa[(index, Field::<0>)], int);

        *aos.cell_mut(index, Field::<1>) = float;
        *soa.cell_mut(index, Field::<1>) = float;
        prop_assert_eq!(*aos.cell(index, Field::<1>), float);
        prop_assert_eq!(*soa.cell(index, Field::<1>), float);

        if let Some(cell) = aos.get_mut(index, Field::<2>) {
            *cell = c;
        }
        if let Some(cell) = soa.get_mut(index, Field::<2>) {
            *cell = c;
        }
        prop_assert_eq!(aos.get(index, Field::<2>), Some(&c));
        prop_assert_eq!(soa.get(index, Field::<2>), Some(&c));
    }

    #[test]
    fn layout_equivalence(writes in proptest::collection::vec(write(), 0..64)) {
        let mut aos: ViewOfStructs<Particle, Interleaved> = ViewOfStructs::new(EXTENT);
        let mut soa: ViewOfStructs<Particle, Columnar> = ViewOfStructs::new(EXTENT);
        for w in writes {
            apply(&mut aos, w);
            apply(&mut soa, w);
        }
        prop_assert_eq!(snapshot(&aos), snapshot(&soa));
        for i in 0..EXTENT {
            prop_assert_eq!(aos.load(i), soa.load(i));
        }
    }

    #[test]
    fn copy_across_layouts(writes in proptest::collection::vec(write(), 0..64)) {
        let mut soa: ViewOfStructs<Particle, Columnar> = ViewOfStructs::new(EXTENT);
        for w in writes {
            apply(&mut soa, w);
        }
        let mut aos: ViewOfStructs<Particle, Interleaved> = ViewOfStructs::new(EXTENT);
        prop_assert!(aos.copy_from(&soa).is_ok());
        prop_assert_eq!(snapshot(&aos), snapshot(&soa));

        let mut round_trip: ViewOfStructs<Particle, Columnar> = ViewOfStructs::new(EXTENT);
        prop_assert!(round_trip.copy_from(&aos).is_ok());
        for k in 0..EXTENT {
            prop_assert_eq!(round_trip.column(Field::<0>)[k], soa.column(Field::<0>)[k]);
        }
    }

    #[test]
    fn store_then_cells(index in 0..EXTENT, int in any::<i32>(), c in any::<char>()) {
        let mut soa: ViewOfStructs<Particle, Columnar> = ViewOfStructs::new(EXTENT);
        prop_assert!(soa.store(index, Particle::from((int, 0.5, c))).is_ok());
        prop_assert_eq!(*soa.cell(index, Field::<0>), int);
        prop_assert_eq!(*soa.cell(index, Field::<1>), 0.5);
        prop_assert_eq!(*soa.cell(index, Field::<2>), c);
    }
}
