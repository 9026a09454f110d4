//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use darwinn_config::{ChipStructures, ChipStructuresBuilder, Field};

/// Host page-table size used by the page-table builder in these tests.
pub const HOST_TABLE_SIZE: u64 = 4096;

/// 8 GiB of on-device DRAM.
pub const DRAM_8_GIB: u64 = 8_589_934_592;

/// Complete, valid constant set for a synthetic 4x4-tile chip.
pub fn synthetic_builder() -> ChipStructuresBuilder {
    ChipStructures::builder()
        .variant("synthetic")
        .minimum_alignment_bytes(64)
        .allocation_alignment_bytes(4096)
        .axi_dma_burst_limiter(2)
        .num_wire_interrupts(4)
        .num_page_table_entries(16_384)
        .physical_address_bits(37)
        .tpu_dram_size_bytes(DRAM_8_GIB)
        .narrow_memory_capacity(0x2_0000)
        .external_narrow_memory_translate_entry_size_bytes(4096)
        .number_x_tiles(4)
        .number_y_tiles(4)
        .number_compute_threads(4)
        .number_of_ring_virtual_networks(7)
        .last_z_out_cell_disable_incompatible_with_sparsity(1)
        .nlu_buffer_backpressure_causes_assertion(0)
        .mesh_rx_queue_depth(16)
        .default_vn_buffer_memory_lines(32)
        .csr_region_base_offset(0x4_0000)
        .csr_region_size_bytes(0x2_0000)
        .support_trace_arch_registers(1)
        .base_and_bound_unit_size_bytes(8192)
        .number_of_scalar_core_contexts(2)
        .support_tile_thread_gcsr_node(1)
}

/// A value for `field` that differs from `value` but keeps the descriptor valid.
pub fn valid_alternative(field: Field, value: u64) -> u64 {
    match field {
        // Power of two, and allocation stays >= minimum.
        Field::MinimumAlignmentBytes => value / 2,
        Field::AllocationAlignmentBytes => value * 2,
        // Keep DRAM a whole number of host tables.
        Field::TpuDramSizeBytes => value + HOST_TABLE_SIZE,
        Field::PhysicalAddressBits => value + 1,
        _ => value + 1,
    }
}
