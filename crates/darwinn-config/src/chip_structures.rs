//! The per-chip hardware descriptor.

use crate::builder::ChipStructuresBuilder;
use crate::error::Result;
use crate::field::Field;
use crate::validate;
use crate::views::{AlignmentParams, CsrWindow, TopologyParams, TranslationParams, TransportParams};

/// Hardware-derived constants for one chip variant.
///
/// Instances only come out of [`ChipStructuresBuilder::build`], which checks
/// every invariant before returning, so holding a `ChipStructures` means
/// holding a valid one. Fields are private and there are no setters; share it
/// by reference, in an `Arc`, or by copy.
///
/// Flag fields keep their raw integral encoding. Use the `supports_*` style
/// accessors for a boolean reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChipStructures {
    pub(crate) minimum_alignment_bytes: u64,
    pub(crate) allocation_alignment_bytes: u64,
    pub(crate) axi_dma_burst_limiter: u64,
    pub(crate) num_wire_interrupts: u64,
    pub(crate) num_page_table_entries: u64,
    pub(crate) physical_address_bits: u64,
    pub(crate) tpu_dram_size_bytes: u64,
    pub(crate) narrow_memory_capacity: u64,
    pub(crate) external_narrow_memory_translate_entry_size_bytes: u64,
    pub(crate) number_x_tiles: u64,
    pub(crate) number_y_tiles: u64,
    pub(crate) number_compute_threads: u64,
    pub(crate) number_of_ring_virtual_networks: u64,
    pub(crate) last_z_out_cell_disable_incompatible_with_sparsity: u64,
    pub(crate) nlu_buffer_backpressure_causes_assertion: u64,
    pub(crate) mesh_rx_queue_depth: u64,
    pub(crate) default_vn_buffer_memory_lines: u64,
    pub(crate) csr_region_base_offset: u64,
    pub(crate) csr_region_size_bytes: u64,
    pub(crate) support_trace_arch_registers: u64,
    pub(crate) base_and_bound_unit_size_bytes: u64,
    pub(crate) number_of_scalar_core_contexts: u64,
    pub(crate) support_tile_thread_gcsr_node: u64,
}

const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ChipStructures>();
};

impl ChipStructures {
    /// Start building a descriptor.
    #[must_use]
    pub fn builder() -> ChipStructuresBuilder {
        ChipStructuresBuilder::new()
    }

    // ── Memory alignment ─────────────────────────────────────────────────────

    /// Hardware required minimum alignment on buffers.
    #[must_use]
    pub const fn minimum_alignment_bytes(&self) -> u64 {
        self.minimum_alignment_bytes
    }

    /// Buffer allocation alignment and granularity.
    ///
    /// Usually the same as [`minimum_alignment_bytes`](Self::minimum_alignment_bytes),
    /// but may also factor in host cache line size or cache API constraints.
    #[must_use]
    pub const fn allocation_alignment_bytes(&self) -> u64 {
        self.allocation_alignment_bytes
    }

    /// Shared memory base-and-bound unit size in bytes.
    ///
    /// Needed when programming shared memory base and size for the parameter,
    /// instruction, activation and scalar memory partitions.
    #[must_use]
    pub const fn base_and_bound_unit_size_bytes(&self) -> u64 {
        self.base_and_bound_unit_size_bytes
    }

    // ── Address translation ──────────────────────────────────────────────────

    /// Number of physical address bits generated by the hardware.
    #[must_use]
    pub const fn physical_address_bits(&self) -> u64 {
        self.physical_address_bits
    }

    /// Number of page table entries.
    #[must_use]
    pub const fn num_page_table_entries(&self) -> u64 {
        self.num_page_table_entries
    }

    /// Addressable byte size of on-device DRAM, 0 if there is none.
    #[must_use]
    pub const fn tpu_dram_size_bytes(&self) -> u64 {
        self.tpu_dram_size_bytes
    }

    /// Total size of narrow memory per tile in bytes.
    #[must_use]
    pub const fn narrow_memory_capacity(&self) -> u64 {
        self.narrow_memory_capacity
    }

    /// Size of an address translation entry for the external narrow memory
    /// interface.
    #[must_use]
    pub const fn external_narrow_memory_translate_entry_size_bytes(&self) -> u64 {
        self.external_narrow_memory_translate_entry_size_bytes
    }

    // ── Topology ─────────────────────────────────────────────────────────────

    /// Number of X tiles.
    #[must_use]
    pub const fn number_x_tiles(&self) -> u64 {
        self.number_x_tiles
    }

    /// Number of Y tiles.
    #[must_use]
    pub const fn number_y_tiles(&self) -> u64 {
        self.number_y_tiles
    }

    /// Number of compute threads.
    #[must_use]
    pub const fn number_compute_threads(&self) -> u64 {
        self.number_compute_threads
    }

    /// Number of ring virtual networks.
    #[must_use]
    pub const fn number_of_ring_virtual_networks(&self) -> u64 {
        self.number_of_ring_virtual_networks
    }

    /// Number of scalar core contexts. 1 is legacy behavior with no context
    /// switching.
    #[must_use]
    pub const fn number_of_scalar_core_contexts(&self) -> u64 {
        self.number_of_scalar_core_contexts
    }

    // ── Transport ────────────────────────────────────────────────────────────

    /// Controls AXI burst length.
    #[must_use]
    pub const fn axi_dma_burst_limiter(&self) -> u64 {
        self.axi_dma_burst_limiter
    }

    /// Number of wire interrupts.
    #[must_use]
    pub const fn num_wire_interrupts(&self) -> u64 {
        self.num_wire_interrupts
    }

    /// Mesh queue depth.
    #[must_use]
    pub const fn mesh_rx_queue_depth(&self) -> u64 {
        self.mesh_rx_queue_depth
    }

    /// Default VN buffer size in memory lines.
    #[must_use]
    pub const fn default_vn_buffer_memory_lines(&self) -> u64 {
        self.default_vn_buffer_memory_lines
    }

    // ── CSR mapping ──────────────────────────────────────────────────────────

    /// Base offset of the CSR region.
    #[must_use]
    pub const fn csr_region_base_offset(&self) -> u64 {
        self.csr_region_base_offset
    }

    /// Size of the CSR region in bytes.
    #[must_use]
    pub const fn csr_region_size_bytes(&self) -> u64 {
        self.csr_region_size_bytes
    }

    // ── Feature flags ────────────────────────────────────────────────────────

    /// Raw `last_z_out_cell_disable_incompatible_with_sparsity` value.
    #[must_use]
    pub const fn last_z_out_cell_disable_incompatible_with_sparsity(&self) -> u64 {
        self.last_z_out_cell_disable_incompatible_with_sparsity
    }

    /// Raw `nlu_buffer_backpressure_causes_assertion` value.
    #[must_use]
    pub const fn nlu_buffer_backpressure_causes_assertion(&self) -> u64 {
        self.nlu_buffer_backpressure_causes_assertion
    }

    /// Raw `support_trace_arch_registers` value.
    #[must_use]
    pub const fn support_trace_arch_registers(&self) -> u64 {
        self.support_trace_arch_registers
    }

    /// Raw `support_tile_thread_gcsr_node` value.
    #[must_use]
    pub const fn support_tile_thread_gcsr_node(&self) -> u64 {
        self.support_tile_thread_gcsr_node
    }

    /// Disabling the last Z-out cell cannot be combined with sparsity.
    #[must_use]
    pub const fn z_out_cell_disable_conflicts_with_sparsity(&self) -> bool {
        self.last_z_out_cell_disable_incompatible_with_sparsity != 0
    }

    /// NLU buffer backpressure raises a hardware assertion.
    #[must_use]
    pub const fn nlu_backpressure_asserts(&self) -> bool {
        self.nlu_buffer_backpressure_causes_assertion != 0
    }

    /// Trace architectural registers are present.
    #[must_use]
    pub const fn supports_trace_arch_registers(&self) -> bool {
        self.support_trace_arch_registers != 0
    }

    /// Tile thread GCSR node is present.
    #[must_use]
    pub const fn supports_tile_thread_gcsr_node(&self) -> bool {
        self.support_tile_thread_gcsr_node != 0
    }

    // ── Derived ──────────────────────────────────────────────────────────────

    /// Total tiles in the compute grid. Never zero, never overflows.
    #[must_use]
    pub const fn tile_count(&self) -> u64 {
        self.number_x_tiles * self.number_y_tiles
    }

    /// The chip has addressable on-device DRAM.
    #[must_use]
    pub const fn has_tpu_dram(&self) -> bool {
        self.tpu_dram_size_bytes != 0
    }

    /// The chip declares a CSR window.
    #[must_use]
    pub const fn has_csr_region(&self) -> bool {
        self.csr_region_size_bytes != 0
    }

    /// More than one scalar core context is available.
    #[must_use]
    pub const fn supports_context_switching(&self) -> bool {
        self.number_of_scalar_core_contexts > 1
    }

    /// Check `tpu_dram_size_bytes` against the host page-table size.
    ///
    /// The descriptor does not keep its variant label, so the caller names
    /// it for the diagnostic.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfiguration`](crate::ConfigError) if
    /// `table_size` is zero or does not evenly divide the DRAM size.
    pub fn check_host_table_size(&self, variant: &str, table_size: u64) -> Result<()> {
        validate::host_table_size(self, variant, table_size)
    }

    // ── Generic access ───────────────────────────────────────────────────────

    /// Value of `field`.
    #[must_use]
    pub const fn get(&self, field: Field) -> u64 {
        match field {
            Field::MinimumAlignmentBytes => self.minimum_alignment_bytes,
            Field::AllocationAlignmentBytes => self.allocation_alignment_bytes,
            Field::AxiDmaBurstLimiter => self.axi_dma_burst_limiter,
            Field::NumWireInterrupts => self.num_wire_interrupts,
            Field::NumPageTableEntries => self.num_page_table_entries,
            Field::PhysicalAddressBits => self.physical_address_bits,
            Field::TpuDramSizeBytes => self.tpu_dram_size_bytes,
            Field::NarrowMemoryCapacity => self.narrow_memory_capacity,
            Field::ExternalNarrowMemoryTranslateEntrySizeBytes => {
                self.external_narrow_memory_translate_entry_size_bytes
            }
            Field::NumberXTiles => self.number_x_tiles,
            Field::NumberYTiles => self.number_y_tiles,
            Field::NumberComputeThreads => self.number_compute_threads,
            Field::NumberOfRingVirtualNetworks => self.number_of_ring_virtual_networks,
            Field::LastZOutCellDisableIncompatibleWithSparsity => {
                self.last_z_out_cell_disable_incompatible_with_sparsity
            }
            Field::NluBufferBackpressureCausesAssertion => {
                self.nlu_buffer_backpressure_causes_assertion
            }
            Field::MeshRxQueueDepth => self.mesh_rx_queue_depth,
            Field::DefaultVnBufferMemoryLines => self.default_vn_buffer_memory_lines,
            Field::CsrRegionBaseOffset => self.csr_region_base_offset,
            Field::CsrRegionSizeBytes => self.csr_region_size_bytes,
            Field::SupportTraceArchRegisters => self.support_trace_arch_registers,
            Field::BaseAndBoundUnitSizeBytes => self.base_and_bound_unit_size_bytes,
            Field::NumberOfScalarCoreContexts => self.number_of_scalar_core_contexts,
            Field::SupportTileThreadGcsrNode => self.support_tile_thread_gcsr_node,
        }
    }

    /// `(field, value)` pairs in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (Field, u64)> + '_ {
        Field::ALL.into_iter().map(move |field| (field, self.get(field)))
    }

    /// Builder pre-populated with every value of `self`.
    ///
    /// Handy for deriving a sibling variant that differs in a few fields.
    #[must_use]
    pub fn to_builder(&self) -> ChipStructuresBuilder {
        self.fields()
            .fold(ChipStructuresBuilder::new(), |builder, (field, value)| {
                builder.set(field, value)
            })
    }

    // ── Consumer views ───────────────────────────────────────────────────────

    /// Alignment parameters for the memory allocator.
    #[must_use]
    pub const fn alignment(&self) -> AlignmentParams {
        AlignmentParams {
            minimum: self.minimum_alignment_bytes,
            allocation: self.allocation_alignment_bytes,
            base_and_bound_unit: self.base_and_bound_unit_size_bytes,
        }
    }

    /// Addressing parameters for the page-table builder.
    #[must_use]
    pub const fn translation(&self) -> TranslationParams {
        TranslationParams {
            physical_address_bits: self.physical_address_bits,
            num_page_table_entries: self.num_page_table_entries,
            tpu_dram_size_bytes: self.tpu_dram_size_bytes,
            narrow_memory_capacity: self.narrow_memory_capacity,
            external_narrow_memory_translate_entry_size_bytes: self
                .external_narrow_memory_translate_entry_size_bytes,
        }
    }

    /// Transport limits for the DMA and interrupt layers.
    #[must_use]
    pub const fn transport(&self) -> TransportParams {
        TransportParams {
            axi_dma_burst_limiter: self.axi_dma_burst_limiter,
            num_wire_interrupts: self.num_wire_interrupts,
            mesh_rx_queue_depth: self.mesh_rx_queue_depth,
            default_vn_buffer_memory_lines: self.default_vn_buffer_memory_lines,
        }
    }

    /// CSR window for the register access layer.
    #[must_use]
    pub const fn csr_window(&self) -> CsrWindow {
        CsrWindow {
            base: self.csr_region_base_offset,
            size: self.csr_region_size_bytes,
        }
    }

    /// Grid shape and context counts for the scheduler.
    #[must_use]
    pub const fn topology(&self) -> TopologyParams {
        TopologyParams {
            x_tiles: self.number_x_tiles,
            y_tiles: self.number_y_tiles,
            compute_threads: self.number_compute_threads,
            ring_virtual_networks: self.number_of_ring_virtual_networks,
            scalar_core_contexts: self.number_of_scalar_core_contexts,
        }
    }
}
