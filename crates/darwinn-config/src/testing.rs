//! Shared fixtures for unit tests.

use crate::builder::ChipStructuresBuilder;

/// A complete, valid constant set: 4x4 tiles, 37 address bits, 8 GiB DRAM.
pub(crate) fn reference_builder() -> ChipStructuresBuilder {
    ChipStructuresBuilder::new()
        .variant("reference")
        .minimum_alignment_bytes(4096)
        .allocation_alignment_bytes(4096)
        .axi_dma_burst_limiter(0)
        .num_wire_interrupts(4)
        .num_page_table_entries(8192)
        .physical_address_bits(37)
        .tpu_dram_size_bytes(8_589_934_592)
        .narrow_memory_capacity(128 * 1024)
        .external_narrow_memory_translate_entry_size_bytes(0)
        .number_x_tiles(4)
        .number_y_tiles(4)
        .number_compute_threads(1)
        .number_of_ring_virtual_networks(7)
        .last_z_out_cell_disable_incompatible_with_sparsity(0)
        .nlu_buffer_backpressure_causes_assertion(0)
        .mesh_rx_queue_depth(16)
        .default_vn_buffer_memory_lines(32)
        .csr_region_base_offset(0x4_0000)
        .csr_region_size_bytes(0x1_0000)
        .support_trace_arch_registers(1)
        .base_and_bound_unit_size_bytes(8192)
        .number_of_scalar_core_contexts(1)
        .support_tile_thread_gcsr_node(0)
}
