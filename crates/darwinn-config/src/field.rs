//! Field catalogue for [`ChipStructures`](crate::ChipStructures).
//!
//! Every descriptor field has a [`Field`] tag. Diagnostics name fields by
//! tag, and registries can populate a builder by iterating [`Field::ALL`].

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Semantic grouping of descriptor fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Buffer and partition alignment granularities (memory allocator).
    MemoryAlignment,
    /// Addressing range and translation-table sizing (page-table builder).
    AddressTranslation,
    /// Compute grid shape and concurrency width (scheduler).
    Topology,
    /// Bus and on-chip network limits (DMA and interrupt layers).
    Transport,
    /// Control/status register window (CSR access layer).
    CsrMapping,
    /// Integral presence and quirk toggles.
    FeatureFlag,
}

impl Category {
    /// Short lowercase label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::MemoryAlignment => "memory-alignment",
            Self::AddressTranslation => "address-translation",
            Self::Topology => "topology",
            Self::Transport => "transport",
            Self::CsrMapping => "csr-mapping",
            Self::FeatureFlag => "feature-flag",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One descriptor field.
///
/// Variants are declared in hardware header order; [`Field::index`] is the
/// position in [`Field::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// `minimum_alignment_bytes`
    MinimumAlignmentBytes,
    /// `allocation_alignment_bytes`
    AllocationAlignmentBytes,
    /// `axi_dma_burst_limiter`
    AxiDmaBurstLimiter,
    /// `num_wire_interrupts`
    NumWireInterrupts,
    /// `num_page_table_entries`
    NumPageTableEntries,
    /// `physical_address_bits`
    PhysicalAddressBits,
    /// `tpu_dram_size_bytes`
    TpuDramSizeBytes,
    /// `narrow_memory_capacity`
    NarrowMemoryCapacity,
    /// `external_narrow_memory_translate_entry_size_bytes`
    ExternalNarrowMemoryTranslateEntrySizeBytes,
    /// `number_x_tiles`
    NumberXTiles,
    /// `number_y_tiles`
    NumberYTiles,
    /// `number_compute_threads`
    NumberComputeThreads,
    /// `number_of_ring_virtual_networks`
    NumberOfRingVirtualNetworks,
    /// `last_z_out_cell_disable_incompatible_with_sparsity`
    LastZOutCellDisableIncompatibleWithSparsity,
    /// `nlu_buffer_backpressure_causes_assertion`
    NluBufferBackpressureCausesAssertion,
    /// `mesh_rx_queue_depth`
    MeshRxQueueDepth,
    /// `default_vn_buffer_memory_lines`
    DefaultVnBufferMemoryLines,
    /// `csr_region_base_offset`
    CsrRegionBaseOffset,
    /// `csr_region_size_bytes`
    CsrRegionSizeBytes,
    /// `support_trace_arch_registers`
    SupportTraceArchRegisters,
    /// `base_and_bound_unit_size_bytes`
    BaseAndBoundUnitSizeBytes,
    /// `number_of_scalar_core_contexts`
    NumberOfScalarCoreContexts,
    /// `support_tile_thread_gcsr_node`
    SupportTileThreadGcsrNode,
}

/// Number of descriptor fields.
pub const FIELD_COUNT: usize = 23;

impl Field {
    /// All fields in declaration order.
    pub const ALL: [Self; FIELD_COUNT] = [
        Self::MinimumAlignmentBytes,
        Self::AllocationAlignmentBytes,
        Self::AxiDmaBurstLimiter,
        Self::NumWireInterrupts,
        Self::NumPageTableEntries,
        Self::PhysicalAddressBits,
        Self::TpuDramSizeBytes,
        Self::NarrowMemoryCapacity,
        Self::ExternalNarrowMemoryTranslateEntrySizeBytes,
        Self::NumberXTiles,
        Self::NumberYTiles,
        Self::NumberComputeThreads,
        Self::NumberOfRingVirtualNetworks,
        Self::LastZOutCellDisableIncompatibleWithSparsity,
        Self::NluBufferBackpressureCausesAssertion,
        Self::MeshRxQueueDepth,
        Self::DefaultVnBufferMemoryLines,
        Self::CsrRegionBaseOffset,
        Self::CsrRegionSizeBytes,
        Self::SupportTraceArchRegisters,
        Self::BaseAndBoundUnitSizeBytes,
        Self::NumberOfScalarCoreContexts,
        Self::SupportTileThreadGcsrNode,
    ];

    /// Position in [`Field::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Snake-case field name as it appears in the hardware header.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MinimumAlignmentBytes => "minimum_alignment_bytes",
            Self::AllocationAlignmentBytes => "allocation_alignment_bytes",
            Self::AxiDmaBurstLimiter => "axi_dma_burst_limiter",
            Self::NumWireInterrupts => "num_wire_interrupts",
            Self::NumPageTableEntries => "num_page_table_entries",
            Self::PhysicalAddressBits => "physical_address_bits",
            Self::TpuDramSizeBytes => "tpu_dram_size_bytes",
            Self::NarrowMemoryCapacity => "narrow_memory_capacity",
            Self::ExternalNarrowMemoryTranslateEntrySizeBytes => {
                "external_narrow_memory_translate_entry_size_bytes"
            }
            Self::NumberXTiles => "number_x_tiles",
            Self::NumberYTiles => "number_y_tiles",
            Self::NumberComputeThreads => "number_compute_threads",
            Self::NumberOfRingVirtualNetworks => "number_of_ring_virtual_networks",
            Self::LastZOutCellDisableIncompatibleWithSparsity => {
                "last_z_out_cell_disable_incompatible_with_sparsity"
            }
            Self::NluBufferBackpressureCausesAssertion => {
                "nlu_buffer_backpressure_causes_assertion"
            }
            Self::MeshRxQueueDepth => "mesh_rx_queue_depth",
            Self::DefaultVnBufferMemoryLines => "default_vn_buffer_memory_lines",
            Self::CsrRegionBaseOffset => "csr_region_base_offset",
            Self::CsrRegionSizeBytes => "csr_region_size_bytes",
            Self::SupportTraceArchRegisters => "support_trace_arch_registers",
            Self::BaseAndBoundUnitSizeBytes => "base_and_bound_unit_size_bytes",
            Self::NumberOfScalarCoreContexts => "number_of_scalar_core_contexts",
            Self::SupportTileThreadGcsrNode => "support_tile_thread_gcsr_node",
        }
    }

    /// Semantic category of this field.
    #[must_use]
    pub const fn category(self) -> Category {
        match self {
            Self::MinimumAlignmentBytes
            | Self::AllocationAlignmentBytes
            | Self::BaseAndBoundUnitSizeBytes => Category::MemoryAlignment,

            Self::PhysicalAddressBits
            | Self::NumPageTableEntries
            | Self::TpuDramSizeBytes
            | Self::NarrowMemoryCapacity
            | Self::ExternalNarrowMemoryTranslateEntrySizeBytes => Category::AddressTranslation,

            Self::NumberXTiles
            | Self::NumberYTiles
            | Self::NumberComputeThreads
            | Self::NumberOfRingVirtualNetworks
            | Self::NumberOfScalarCoreContexts => Category::Topology,

            Self::AxiDmaBurstLimiter
            | Self::NumWireInterrupts
            | Self::MeshRxQueueDepth
            | Self::DefaultVnBufferMemoryLines => Category::Transport,

            Self::CsrRegionBaseOffset | Self::CsrRegionSizeBytes => Category::CsrMapping,

            Self::LastZOutCellDisableIncompatibleWithSparsity
            | Self::NluBufferBackpressureCausesAssertion
            | Self::SupportTraceArchRegisters
            | Self::SupportTileThreadGcsrNode => Category::FeatureFlag,
        }
    }

    /// Whether this field is an integral feature toggle.
    #[must_use]
    pub const fn is_flag(self) -> bool {
        matches!(self.category(), Category::FeatureFlag)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned by [`Field::from_str`] for a name that is not a descriptor field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown chip structures field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for Field {
    type Err = UnknownField;

    /// Accepts the snake-case name, or the kebab-case spelling used on the
    /// command line.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|field| field.name() == normalized)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}
