//! Invariant checks run by [`ChipStructuresBuilder::build`](crate::ChipStructuresBuilder::build).
//!
//! Checks run in a fixed order and stop at the first violation, so a given
//! bad constant set always reports the same field.

use crate::chip_structures::ChipStructures;
use crate::error::{ConfigError, Result};
use crate::field::Field;

/// Widest physical address the descriptor can describe.
pub const MAX_PHYSICAL_ADDRESS_BITS: u64 = 64;

/// Check every descriptor invariant.
pub(crate) fn chip_structures(chip: &ChipStructures, variant: &str) -> Result<()> {
    alignment(chip, variant)?;
    topology(chip, variant)?;
    address_bits(chip, variant)?;
    csr_window(chip, variant)?;
    Ok(())
}

fn alignment(chip: &ChipStructures, variant: &str) -> Result<()> {
    let minimum = chip.minimum_alignment_bytes;
    let allocation = chip.allocation_alignment_bytes;

    if !minimum.is_power_of_two() {
        return Err(ConfigError::invalid(
            variant,
            Field::MinimumAlignmentBytes,
            format!("{minimum} is not a power of two"),
        ));
    }
    if !allocation.is_power_of_two() {
        return Err(ConfigError::invalid(
            variant,
            Field::AllocationAlignmentBytes,
            format!("{allocation} is not a power of two"),
        ));
    }
    if allocation < minimum {
        return Err(ConfigError::invalid(
            variant,
            Field::AllocationAlignmentBytes,
            format!("{allocation} is smaller than minimum_alignment_bytes ({minimum})"),
        ));
    }
    Ok(())
}

fn topology(chip: &ChipStructures, variant: &str) -> Result<()> {
    if chip.number_x_tiles == 0 {
        return Err(ConfigError::invalid(
            variant,
            Field::NumberXTiles,
            "a chip has at least one tile column",
        ));
    }
    if chip.number_y_tiles == 0 {
        return Err(ConfigError::invalid(
            variant,
            Field::NumberYTiles,
            "a chip has at least one tile row",
        ));
    }
    if chip.number_x_tiles.checked_mul(chip.number_y_tiles).is_none() {
        return Err(ConfigError::invalid(
            variant,
            Field::NumberYTiles,
            format!(
                "{} x {} tiles overflows a 64-bit tile count",
                chip.number_x_tiles, chip.number_y_tiles
            ),
        ));
    }
    if chip.number_of_scalar_core_contexts == 0 {
        return Err(ConfigError::invalid(
            variant,
            Field::NumberOfScalarCoreContexts,
            "must be at least 1 (1 is legacy, no context switching)",
        ));
    }
    Ok(())
}

fn address_bits(chip: &ChipStructures, variant: &str) -> Result<()> {
    if chip.physical_address_bits > MAX_PHYSICAL_ADDRESS_BITS {
        return Err(ConfigError::invalid(
            variant,
            Field::PhysicalAddressBits,
            format!(
                "{} exceeds {MAX_PHYSICAL_ADDRESS_BITS} bits",
                chip.physical_address_bits
            ),
        ));
    }
    Ok(())
}

// A zero base with a zero size means the chip declares no CSR window.
fn csr_window(chip: &ChipStructures, variant: &str) -> Result<()> {
    let base = chip.csr_region_base_offset;
    let size = chip.csr_region_size_bytes;

    if base != 0 && size == 0 {
        return Err(ConfigError::invalid(
            variant,
            Field::CsrRegionSizeBytes,
            format!("CSR region at {base:#x} declares an empty window"),
        ));
    }
    if base.checked_add(size).is_none() {
        return Err(ConfigError::invalid(
            variant,
            Field::CsrRegionSizeBytes,
            format!("CSR region {base:#x} + {size:#x} overflows the address space"),
        ));
    }
    Ok(())
}

/// `tpu_dram_size_bytes` must be a whole number of host tables.
pub(crate) fn host_table_size(chip: &ChipStructures, variant: &str, table_size: u64) -> Result<()> {
    dram_divisible(variant, chip.tpu_dram_size_bytes, table_size)
}

pub(crate) fn dram_divisible(variant: &str, dram: u64, table_size: u64) -> Result<()> {
    if table_size == 0 {
        return Err(ConfigError::invalid(
            variant,
            Field::TpuDramSizeBytes,
            "host table size must be non-zero",
        ));
    }
    if dram % table_size != 0 {
        return Err(ConfigError::invalid(
            variant,
            Field::TpuDramSizeBytes,
            format!("{dram} is not divisible by host table size {table_size}"),
        ));
    }
    Ok(())
}
