//! Validating builder for [`ChipStructures`].

use crate::chip_structures::ChipStructures;
use crate::error::{ConfigError, Result, UNNAMED_VARIANT};
use crate::field::{Field, FIELD_COUNT};
use crate::validate;

/// Collects a complete constant set and validates it into a [`ChipStructures`].
///
/// Every field must be supplied; there are no defaults. The variant label and
/// host table size are optional and not stored in the descriptor.
///
/// ```
/// use darwinn_config::{ChipStructures, Field};
///
/// # fn main() -> darwinn_config::Result<()> {
/// let chip = ChipStructures::builder()
///     .variant("example")
///     .host_table_size(4096)
///     .minimum_alignment_bytes(4096)
///     .allocation_alignment_bytes(4096)
///     .axi_dma_burst_limiter(0)
///     .num_wire_interrupts(4)
///     .num_page_table_entries(8192)
///     .physical_address_bits(37)
///     .tpu_dram_size_bytes(8 << 30)
///     .narrow_memory_capacity(128 * 1024)
///     .external_narrow_memory_translate_entry_size_bytes(0)
///     .number_x_tiles(4)
///     .number_y_tiles(4)
///     .number_compute_threads(1)
///     .number_of_ring_virtual_networks(7)
///     .last_z_out_cell_disable_incompatible_with_sparsity(0)
///     .nlu_buffer_backpressure_causes_assertion(0)
///     .mesh_rx_queue_depth(16)
///     .default_vn_buffer_memory_lines(16)
///     .csr_region_base_offset(0)
///     .csr_region_size_bytes(0x4_0000)
///     .support_trace_arch_registers(1)
///     .base_and_bound_unit_size_bytes(0)
///     .number_of_scalar_core_contexts(1)
///     .support_tile_thread_gcsr_node(0)
///     .build()?;
///
/// assert_eq!(chip.get(Field::NumberXTiles), 4);
/// assert!(chip.supports_trace_arch_registers());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChipStructuresBuilder {
    values: [Option<u64>; FIELD_COUNT],
    variant: Option<String>,
    host_table_size: Option<u64>,
}

macro_rules! field_setters {
    ($($setter:ident => $field:ident),* $(,)?) => {
        $(
            #[doc = concat!("Set `", stringify!($setter), "`.")]
            #[must_use]
            pub fn $setter(self, value: u64) -> Self {
                self.set(Field::$field, value)
            }
        )*
    };
}

impl ChipStructuresBuilder {
    /// Empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Label the chip variant; used only in diagnostics.
    #[must_use]
    pub fn variant(mut self, name: impl Into<String>) -> Self {
        self.variant = Some(name.into());
        self
    }

    /// Host-side page table size to check `tpu_dram_size_bytes` against.
    #[must_use]
    pub fn host_table_size(mut self, bytes: u64) -> Self {
        self.host_table_size = Some(bytes);
        self
    }

    /// Set `field` to `value`, replacing any earlier value.
    #[must_use]
    pub fn set(mut self, field: Field, value: u64) -> Self {
        self.values[field.index()] = Some(value);
        self
    }

    /// Value supplied for `field` so far.
    #[must_use]
    pub fn value(&self, field: Field) -> Option<u64> {
        self.values[field.index()]
    }

    /// Fields that still need a value, in declaration order.
    pub fn missing(&self) -> impl Iterator<Item = Field> + '_ {
        Field::ALL
            .into_iter()
            .filter(move |field| self.values[field.index()].is_none())
    }

    field_setters! {
        minimum_alignment_bytes => MinimumAlignmentBytes,
        allocation_alignment_bytes => AllocationAlignmentBytes,
        axi_dma_burst_limiter => AxiDmaBurstLimiter,
        num_wire_interrupts => NumWireInterrupts,
        num_page_table_entries => NumPageTableEntries,
        physical_address_bits => PhysicalAddressBits,
        tpu_dram_size_bytes => TpuDramSizeBytes,
        narrow_memory_capacity => NarrowMemoryCapacity,
        external_narrow_memory_translate_entry_size_bytes => ExternalNarrowMemoryTranslateEntrySizeBytes,
        number_x_tiles => NumberXTiles,
        number_y_tiles => NumberYTiles,
        number_compute_threads => NumberComputeThreads,
        number_of_ring_virtual_networks => NumberOfRingVirtualNetworks,
        last_z_out_cell_disable_incompatible_with_sparsity => LastZOutCellDisableIncompatibleWithSparsity,
        nlu_buffer_backpressure_causes_assertion => NluBufferBackpressureCausesAssertion,
        mesh_rx_queue_depth => MeshRxQueueDepth,
        default_vn_buffer_memory_lines => DefaultVnBufferMemoryLines,
        csr_region_base_offset => CsrRegionBaseOffset,
        csr_region_size_bytes => CsrRegionSizeBytes,
        support_trace_arch_registers => SupportTraceArchRegisters,
        base_and_bound_unit_size_bytes => BaseAndBoundUnitSizeBytes,
        number_of_scalar_core_contexts => NumberOfScalarCoreContexts,
        support_tile_thread_gcsr_node => SupportTileThreadGcsrNode,
    }

    /// Validate and produce the descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfiguration`] naming the first missing
    /// field, or the first field that breaks an invariant.
    pub fn build(&self) -> Result<ChipStructures> {
        let variant = self.variant.as_deref().unwrap_or(UNNAMED_VARIANT);

        let result = self.assemble(variant).and_then(|chip| {
            validate::chip_structures(&chip, variant)?;
            if let Some(table_size) = self.host_table_size {
                validate::host_table_size(&chip, variant, table_size)?;
            }
            Ok(chip)
        });

        match &result {
            Ok(chip) => tracing::debug!(
                "Validated chip structures for {variant}: {}x{} tiles, {} address bits",
                chip.number_x_tiles(),
                chip.number_y_tiles(),
                chip.physical_address_bits()
            ),
            Err(e) => tracing::warn!("Rejected chip structures: {e}"),
        }

        result
    }

    fn assemble(&self, variant: &str) -> Result<ChipStructures> {
        let value = |field: Field| {
            self.values[field.index()]
                .ok_or_else(|| ConfigError::invalid(variant, field, "no value supplied"))
        };

        Ok(ChipStructures {
            minimum_alignment_bytes: value(Field::MinimumAlignmentBytes)?,
            allocation_alignment_bytes: value(Field::AllocationAlignmentBytes)?,
            axi_dma_burst_limiter: value(Field::AxiDmaBurstLimiter)?,
            num_wire_interrupts: value(Field::NumWireInterrupts)?,
            num_page_table_entries: value(Field::NumPageTableEntries)?,
            physical_address_bits: value(Field::PhysicalAddressBits)?,
            tpu_dram_size_bytes: value(Field::TpuDramSizeBytes)?,
            narrow_memory_capacity: value(Field::NarrowMemoryCapacity)?,
            external_narrow_memory_translate_entry_size_bytes: value(
                Field::ExternalNarrowMemoryTranslateEntrySizeBytes,
            )?,
            number_x_tiles: value(Field::NumberXTiles)?,
            number_y_tiles: value(Field::NumberYTiles)?,
            number_compute_threads: value(Field::NumberComputeThreads)?,
            number_of_ring_virtual_networks: value(Field::NumberOfRingVirtualNetworks)?,
            last_z_out_cell_disable_incompatible_with_sparsity: value(
                Field::LastZOutCellDisableIncompatibleWithSparsity,
            )?,
            nlu_buffer_backpressure_causes_assertion: value(
                Field::NluBufferBackpressureCausesAssertion,
            )?,
            mesh_rx_queue_depth: value(Field::MeshRxQueueDepth)?,
            default_vn_buffer_memory_lines: value(Field::DefaultVnBufferMemoryLines)?,
            csr_region_base_offset: value(Field::CsrRegionBaseOffset)?,
            csr_region_size_bytes: value(Field::CsrRegionSizeBytes)?,
            support_trace_arch_registers: value(Field::SupportTraceArchRegisters)?,
            base_and_bound_unit_size_bytes: value(Field::BaseAndBoundUnitSizeBytes)?,
            number_of_scalar_core_contexts: value(Field::NumberOfScalarCoreContexts)?,
            support_tile_thread_gcsr_node: value(Field::SupportTileThreadGcsrNode)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::reference_builder;

    #[test]
    fn empty_builder_reports_first_missing_field() {
        let err = ChipStructuresBuilder::new().build().unwrap_err();
        assert_eq!(err.field(), Field::MinimumAlignmentBytes);
        assert_eq!(err.variant(), UNNAMED_VARIANT);
        assert_eq!(ChipStructuresBuilder::new().missing().count(), FIELD_COUNT);
    }

    #[test]
    fn single_missing_field_is_named() {
        let mut builder = ChipStructuresBuilder::new().variant("partial");
        for field in Field::ALL {
            if field != Field::MeshRxQueueDepth {
                builder = builder.set(field, 1);
            }
        }
        assert_eq!(builder.missing().collect::<Vec<_>>(), [Field::MeshRxQueueDepth]);

        let err = builder.build().unwrap_err();
        assert_eq!(err.field(), Field::MeshRxQueueDepth);
        assert_eq!(err.variant(), "partial");
        assert_eq!(err.reason(), "no value supplied");
    }

    #[test]
    fn later_set_replaces_earlier() {
        let chip = reference_builder()
            .mesh_rx_queue_depth(8)
            .mesh_rx_queue_depth(32)
            .build()
            .unwrap();
        assert_eq!(chip.mesh_rx_queue_depth(), 32);
    }

    #[test]
    fn named_setters_and_set_agree() {
        let named = reference_builder().num_wire_interrupts(9);
        let generic = reference_builder().set(Field::NumWireInterrupts, 9);
        assert_eq!(named, generic);
        assert_eq!(named.value(Field::NumWireInterrupts), Some(9));
    }

    #[test]
    fn host_table_size_is_checked_at_build() {
        assert!(reference_builder().host_table_size(4096).build().is_ok());

        let err = reference_builder()
            .variant("odd-dram")
            .tpu_dram_size_bytes(8_589_934_593)
            .host_table_size(4096)
            .build()
            .unwrap_err();
        assert_eq!(err.field(), Field::TpuDramSizeBytes);
        assert_eq!(err.variant(), "odd-dram");
    }

    #[test]
    fn builder_is_reusable_after_build() {
        let builder = reference_builder();
        let a = builder.build().unwrap();
        let b = builder.build().unwrap();
        assert_eq!(a, b);
    }
}
