//! Per-consumer projections of a [`ChipStructures`](crate::ChipStructures).
//!
//! Each driver subsystem reads a handful of fields. These views hand it just
//! those, along with the small amount of arithmetic it does on them.
//!
//! | View | Consumer |
//! |------|----------|
//! | [`AlignmentParams`] | memory allocator |
//! | [`TranslationParams`] | page-table / address-translation builder |
//! | [`TransportParams`] | DMA, transport and interrupt layers |
//! | [`CsrWindow`] | CSR access layer |
//! | [`TopologyParams`] | scheduler / compute-context manager |
//!
//! Views only come out of a validated descriptor, so they carry its
//! invariants (power-of-two alignments, non-zero grid, address bits ≤ 64,
//! CSR window inside the address space). Their fields are private:
//!
//! ```compile_fail
//! use darwinn_config::AlignmentParams;
//!
//! let bogus = AlignmentParams { minimum: 0, allocation: 0, base_and_bound_unit: 0 };
//! ```

use crate::error::Result;
use crate::validate;

/// Alignment granularities for buffers and shared memory partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlignmentParams {
    pub(crate) minimum: u64,
    pub(crate) allocation: u64,
    pub(crate) base_and_bound_unit: u64,
}

impl AlignmentParams {
    /// Hardware required minimum buffer alignment (power of two).
    #[must_use]
    pub const fn minimum(&self) -> u64 {
        self.minimum
    }

    /// Allocation alignment and granularity (power of two, ≥ `minimum`).
    #[must_use]
    pub const fn allocation(&self) -> u64 {
        self.allocation
    }

    /// Shared memory base-and-bound unit size; 0 if the chip has none.
    #[must_use]
    pub const fn base_and_bound_unit(&self) -> u64 {
        self.base_and_bound_unit
    }

    /// Round `size` up to the allocation granularity.
    ///
    /// Returns `None` if the rounded size does not fit in `u64`.
    #[must_use]
    pub const fn align_up(&self, size: u64) -> Option<u64> {
        let mask = self.allocation - 1;
        match size.checked_add(mask) {
            Some(v) => Some(v & !mask),
            None => None,
        }
    }

    /// `address` meets the hardware minimum alignment.
    #[must_use]
    pub const fn is_aligned(&self, address: u64) -> bool {
        address & (self.minimum - 1) == 0
    }

    /// Whole base-and-bound units needed to cover `bytes`.
    ///
    /// `None` if the chip has no base-and-bound unit.
    #[must_use]
    pub const fn base_and_bound_units(&self, bytes: u64) -> Option<u64> {
        if self.base_and_bound_unit == 0 {
            return None;
        }
        Some(bytes.div_ceil(self.base_and_bound_unit))
    }
}

/// Addressing range and translation-table sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TranslationParams {
    pub(crate) physical_address_bits: u64,
    pub(crate) num_page_table_entries: u64,
    pub(crate) tpu_dram_size_bytes: u64,
    pub(crate) narrow_memory_capacity: u64,
    pub(crate) external_narrow_memory_translate_entry_size_bytes: u64,
}

impl TranslationParams {
    /// Physical address bits generated by the hardware.
    #[must_use]
    pub const fn physical_address_bits(&self) -> u64 {
        self.physical_address_bits
    }

    /// Number of page table entries.
    #[must_use]
    pub const fn num_page_table_entries(&self) -> u64 {
        self.num_page_table_entries
    }

    /// On-device DRAM size in bytes.
    #[must_use]
    pub const fn tpu_dram_size_bytes(&self) -> u64 {
        self.tpu_dram_size_bytes
    }

    /// Narrow memory per tile in bytes.
    #[must_use]
    pub const fn narrow_memory_capacity(&self) -> u64 {
        self.narrow_memory_capacity
    }

    /// External narrow memory translation entry size in bytes.
    #[must_use]
    pub const fn external_narrow_memory_translate_entry_size_bytes(&self) -> u64 {
        self.external_narrow_memory_translate_entry_size_bytes
    }

    /// Highest physical address the hardware can generate.
    #[must_use]
    pub const fn max_physical_address(&self) -> u64 {
        match self.physical_address_bits {
            0 => 0,
            bits if bits >= 64 => u64::MAX,
            bits => (1 << bits) - 1,
        }
    }

    /// Size of the physical address space, `None` if it is the full 2^64.
    #[must_use]
    pub const fn addressable_bytes(&self) -> Option<u64> {
        if self.physical_address_bits >= 64 {
            None
        } else {
            Some(1 << self.physical_address_bits)
        }
    }

    /// Check that DRAM is a whole number of host tables of `table_size` bytes.
    ///
    /// `variant` labels the diagnostic.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidConfiguration`](crate::ConfigError) if
    /// `table_size` is zero or does not divide `tpu_dram_size_bytes`.
    pub fn check_host_table_size(&self, variant: &str, table_size: u64) -> Result<()> {
        validate::dram_divisible(variant, self.tpu_dram_size_bytes, table_size)
    }

    /// Host tables of `table_size` bytes needed to map DRAM, `None` if
    /// `table_size` is zero.
    #[must_use]
    pub const fn host_table_count(&self, table_size: u64) -> Option<u64> {
        if table_size == 0 {
            None
        } else {
            Some(self.tpu_dram_size_bytes.div_ceil(table_size))
        }
    }
}

/// Bus and on-chip network limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransportParams {
    pub(crate) axi_dma_burst_limiter: u64,
    pub(crate) num_wire_interrupts: u64,
    pub(crate) mesh_rx_queue_depth: u64,
    pub(crate) default_vn_buffer_memory_lines: u64,
}

impl TransportParams {
    /// AXI burst length control.
    #[must_use]
    pub const fn axi_dma_burst_limiter(&self) -> u64 {
        self.axi_dma_burst_limiter
    }

    /// Wire interrupt lines.
    #[must_use]
    pub const fn num_wire_interrupts(&self) -> u64 {
        self.num_wire_interrupts
    }

    /// Mesh receive queue depth.
    #[must_use]
    pub const fn mesh_rx_queue_depth(&self) -> u64 {
        self.mesh_rx_queue_depth
    }

    /// Default VN buffer size in memory lines.
    #[must_use]
    pub const fn default_vn_buffer_memory_lines(&self) -> u64 {
        self.default_vn_buffer_memory_lines
    }

    /// `line` is a valid wire interrupt index.
    #[must_use]
    pub const fn has_wire_interrupt(&self, line: u64) -> bool {
        line < self.num_wire_interrupts
    }
}

/// Control/status register window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CsrWindow {
    pub(crate) base: u64,
    pub(crate) size: u64,
}

impl CsrWindow {
    /// Base offset.
    #[must_use]
    pub const fn base(&self) -> u64 {
        self.base
    }

    /// Size in bytes; 0 when the chip declares no window.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// One past the last offset in the window. Does not overflow.
    #[must_use]
    pub const fn end(&self) -> u64 {
        self.base + self.size
    }

    /// No window declared.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// `offset` falls inside the window.
    #[must_use]
    pub const fn contains(&self, offset: u64) -> bool {
        offset >= self.base && offset < self.end()
    }
}

/// Compute grid shape and concurrency width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TopologyParams {
    pub(crate) x_tiles: u64,
    pub(crate) y_tiles: u64,
    pub(crate) compute_threads: u64,
    pub(crate) ring_virtual_networks: u64,
    pub(crate) scalar_core_contexts: u64,
}

impl TopologyParams {
    /// Tiles in X.
    #[must_use]
    pub const fn x_tiles(&self) -> u64 {
        self.x_tiles
    }

    /// Tiles in Y.
    #[must_use]
    pub const fn y_tiles(&self) -> u64 {
        self.y_tiles
    }

    /// Compute threads.
    #[must_use]
    pub const fn compute_threads(&self) -> u64 {
        self.compute_threads
    }

    /// Ring virtual networks.
    #[must_use]
    pub const fn ring_virtual_networks(&self) -> u64 {
        self.ring_virtual_networks
    }

    /// Scalar core contexts (≥ 1).
    #[must_use]
    pub const fn scalar_core_contexts(&self) -> u64 {
        self.scalar_core_contexts
    }

    /// Total tiles. Never zero, never overflows.
    #[must_use]
    pub const fn tile_count(&self) -> u64 {
        self.x_tiles * self.y_tiles
    }

    /// Row-major linear index of tile `(x, y)`, `None` if outside the grid.
    #[must_use]
    pub const fn tile_index(&self, x: u64, y: u64) -> Option<u64> {
        if x < self.x_tiles && y < self.y_tiles {
            Some(y * self.x_tiles + x)
        } else {
            None
        }
    }

    /// More than one scalar core context.
    #[must_use]
    pub const fn supports_context_switching(&self) -> bool {
        self.scalar_core_contexts > 1
    }
}
