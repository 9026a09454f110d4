//! Hardware capability descriptor for DarwiNN accelerator chip variants.
//!
//! A [`ChipStructures`] holds the constants that differ between silicon
//! revisions of the same accelerator family: address width, tile grid shape,
//! queue depths, alignment rules, the CSR window and a handful of hardware
//! quirk flags. It is built once at driver bring-up, validated, and then read
//! by every driver subsystem for the rest of the session.
//!
//! This crate does not know which chips exist. A registry elsewhere supplies
//! the constant set; this crate checks it and hands out read-only views.
//!
//! # Crate organisation
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`ChipStructures`] | The descriptor and its accessors |
//! | [`ChipStructuresBuilder`] | Complete-or-nothing construction with invariant checks |
//! | [`field`] | [`Field`] catalogue and [`Category`] grouping |
//! | [`views`] | Per-consumer projections (allocator, page tables, DMA, CSR, scheduler) |
//!
//! # Example
//!
//! ```
//! use darwinn_config::{ChipStructures, Field};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = ChipStructures::builder().variant("synthetic");
//! for field in Field::ALL {
//!     builder = builder.set(field, 1);
//! }
//! let chip = builder
//!     .minimum_alignment_bytes(64)
//!     .allocation_alignment_bytes(4096)
//!     .build()?;
//!
//! assert_eq!(chip.alignment().align_up(100), Some(4096));
//! assert_eq!(chip.tile_count(), 1);
//!
//! let err = chip.to_builder().number_x_tiles(0).build().unwrap_err();
//! assert_eq!(err.field(), Field::NumberXTiles);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod builder;
mod chip_structures;
mod error;
pub mod field;
mod validate;
pub mod views;

#[cfg(test)]
mod testing;

pub use builder::ChipStructuresBuilder;
pub use chip_structures::ChipStructures;
pub use error::{ConfigError, Result, UNNAMED_VARIANT};
pub use field::{Category, Field, UnknownField, FIELD_COUNT};
pub use validate::MAX_PHYSICAL_ADDRESS_BITS;
pub use views::{AlignmentParams, CsrWindow, TopologyParams, TranslationParams, TransportParams};

/// Commonly used types.
pub mod prelude {
    pub use crate::{ChipStructures, ChipStructuresBuilder, ConfigError, Field, Result};
}
