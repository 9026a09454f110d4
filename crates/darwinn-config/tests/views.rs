//! Consumer views at the edges of what a valid descriptor allows.

mod common;

use common::synthetic_builder;

#[test]
fn byte_alignment_rounds_nothing() {
    let chip = synthetic_builder()
        .minimum_alignment_bytes(1)
        .allocation_alignment_bytes(1)
        .build()
        .unwrap();
    let a = chip.alignment();
    assert_eq!(a.minimum(), 1);
    assert_eq!(a.align_up(0), Some(0));
    assert_eq!(a.align_up(100), Some(100));
    assert_eq!(a.align_up(u64::MAX), Some(u64::MAX));
    assert!(a.is_aligned(101));
}

#[test]
fn widest_allocation_alignment_saturates_to_none() {
    let top = 1u64 << 63;
    let chip = synthetic_builder()
        .allocation_alignment_bytes(top)
        .build()
        .unwrap();
    let a = chip.alignment();
    assert_eq!(a.allocation(), top);
    assert_eq!(a.align_up(1), Some(top));
    assert_eq!(a.align_up(top), Some(top));
    assert_eq!(a.align_up(top + 1), None);
}

#[test]
fn widest_tile_grid_counts_without_overflow() {
    let chip = synthetic_builder()
        .number_x_tiles(u64::MAX)
        .number_y_tiles(1)
        .build()
        .unwrap();
    let g = chip.topology();
    assert_eq!(g.x_tiles(), u64::MAX);
    assert_eq!(g.tile_count(), u64::MAX);
    assert_eq!(g.tile_index(u64::MAX - 1, 0), Some(u64::MAX - 1));
    assert_eq!(g.tile_index(0, 1), None);
}

#[test]
fn csr_window_at_top_of_address_space() {
    let chip = synthetic_builder()
        .csr_region_base_offset(u64::MAX - 0x1000)
        .csr_region_size_bytes(0x1000)
        .build()
        .unwrap();
    let w = chip.csr_window();
    assert_eq!(w.base(), u64::MAX - 0x1000);
    assert_eq!(w.size(), 0x1000);
    assert_eq!(w.end(), u64::MAX);
    assert!(w.contains(u64::MAX - 1));
    assert!(!w.contains(u64::MAX));
}

#[test]
fn views_are_equal_for_equal_descriptors() {
    let a = synthetic_builder().build().unwrap();
    let b = a.to_builder().variant("other").build().unwrap();
    assert_eq!(a.alignment(), b.alignment());
    assert_eq!(a.translation(), b.translation());
    assert_eq!(a.transport(), b.transport());
    assert_eq!(a.csr_window(), b.csr_window());
    assert_eq!(a.topology(), b.topology());
}
