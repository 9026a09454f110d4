//! `darwinn` — command-line checker for DarwiNN chip structures.
//!
//! ```text
//! USAGE:
//!   darwinn check --<field> <value> ...   Validate a constant set and print consumer views
//!   darwinn fields                        List descriptor fields and their categories
//! ```
//!
//! Values accept decimal or `0x`-prefixed hex. Set `RUST_LOG=debug` to see
//! validation logging.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use darwinn_config::{ChipStructures, ChipStructuresBuilder, Field};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "darwinn", about = "DarwiNN chip structures checker", version)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Validate a complete constant set and print what each driver subsystem sees.
    Check {
        /// Chip variant label used in diagnostics.
        #[arg(long, default_value = "candidate")]
        variant: String,
        /// Host page-table size to check tpu_dram_size_bytes against.
        #[arg(long, value_parser = parse_u64)]
        host_table_size: Option<u64>,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// List descriptor fields in declaration order.
    Fields,
}

/// One required flag per descriptor field.
#[derive(Args)]
struct FieldArgs {
    /// Hardware required minimum buffer alignment in bytes (power of two).
    #[arg(long, value_parser = parse_u64)]
    minimum_alignment_bytes: u64,
    /// Allocation alignment and granularity in bytes (power of two, at least the minimum).
    #[arg(long, value_parser = parse_u64)]
    allocation_alignment_bytes: u64,
    /// AXI burst length control.
    #[arg(long, value_parser = parse_u64)]
    axi_dma_burst_limiter: u64,
    /// Number of wire interrupt lines.
    #[arg(long, value_parser = parse_u64)]
    num_wire_interrupts: u64,
    /// Number of page table entries.
    #[arg(long, value_parser = parse_u64)]
    num_page_table_entries: u64,
    /// Physical address bits generated by the hardware (at most 64).
    #[arg(long, value_parser = parse_u64)]
    physical_address_bits: u64,
    /// On-device DRAM size in bytes; 0 if the chip has none.
    #[arg(long, value_parser = parse_u64)]
    tpu_dram_size_bytes: u64,
    /// Narrow memory per tile in bytes.
    #[arg(long, value_parser = parse_u64)]
    narrow_memory_capacity: u64,
    /// External narrow memory translation entry size in bytes.
    #[arg(long, value_parser = parse_u64)]
    external_narrow_memory_translate_entry_size_bytes: u64,
    /// Tiles in X (at least 1).
    #[arg(long, value_parser = parse_u64)]
    number_x_tiles: u64,
    /// Tiles in Y (at least 1).
    #[arg(long, value_parser = parse_u64)]
    number_y_tiles: u64,
    /// Compute threads.
    #[arg(long, value_parser = parse_u64)]
    number_compute_threads: u64,
    /// Ring virtual networks.
    #[arg(long, value_parser = parse_u64)]
    number_of_ring_virtual_networks: u64,
    /// Flag: last z-out cell disable cannot be combined with sparsity.
    #[arg(long, value_parser = parse_u64)]
    last_z_out_cell_disable_incompatible_with_sparsity: u64,
    /// Flag: NLU buffer backpressure raises an assertion.
    #[arg(long, value_parser = parse_u64)]
    nlu_buffer_backpressure_causes_assertion: u64,
    /// Mesh receive queue depth.
    #[arg(long, value_parser = parse_u64)]
    mesh_rx_queue_depth: u64,
    /// Default VN buffer size in memory lines.
    #[arg(long, value_parser = parse_u64)]
    default_vn_buffer_memory_lines: u64,
    /// CSR region base offset; 0 with a zero size means no window.
    #[arg(long, value_parser = parse_u64)]
    csr_region_base_offset: u64,
    /// CSR region size in bytes; non-zero when a base offset is given.
    #[arg(long, value_parser = parse_u64)]
    csr_region_size_bytes: u64,
    /// Flag: trace architecture registers are present.
    #[arg(long, value_parser = parse_u64)]
    support_trace_arch_registers: u64,
    /// Shared memory base-and-bound unit size in bytes.
    #[arg(long, value_parser = parse_u64)]
    base_and_bound_unit_size_bytes: u64,
    /// Scalar core contexts (at least 1; 1 means no context switching).
    #[arg(long, value_parser = parse_u64)]
    number_of_scalar_core_contexts: u64,
    /// Flag: tile thread GCSR node is present.
    #[arg(long, value_parser = parse_u64)]
    support_tile_thread_gcsr_node: u64,
}

impl FieldArgs {
    fn into_builder(self) -> ChipStructuresBuilder {
        ChipStructures::builder()
            .minimum_alignment_bytes(self.minimum_alignment_bytes)
            .allocation_alignment_bytes(self.allocation_alignment_bytes)
            .axi_dma_burst_limiter(self.axi_dma_burst_limiter)
            .num_wire_interrupts(self.num_wire_interrupts)
            .num_page_table_entries(self.num_page_table_entries)
            .physical_address_bits(self.physical_address_bits)
            .tpu_dram_size_bytes(self.tpu_dram_size_bytes)
            .narrow_memory_capacity(self.narrow_memory_capacity)
            .external_narrow_memory_translate_entry_size_bytes(
                self.external_narrow_memory_translate_entry_size_bytes,
            )
            .number_x_tiles(self.number_x_tiles)
            .number_y_tiles(self.number_y_tiles)
            .number_compute_threads(self.number_compute_threads)
            .number_of_ring_virtual_networks(self.number_of_ring_virtual_networks)
            .last_z_out_cell_disable_incompatible_with_sparsity(
                self.last_z_out_cell_disable_incompatible_with_sparsity,
            )
            .nlu_buffer_backpressure_causes_assertion(self.nlu_buffer_backpressure_causes_assertion)
            .mesh_rx_queue_depth(self.mesh_rx_queue_depth)
            .default_vn_buffer_memory_lines(self.default_vn_buffer_memory_lines)
            .csr_region_base_offset(self.csr_region_base_offset)
            .csr_region_size_bytes(self.csr_region_size_bytes)
            .support_trace_arch_registers(self.support_trace_arch_registers)
            .base_and_bound_unit_size_bytes(self.base_and_bound_unit_size_bytes)
            .number_of_scalar_core_contexts(self.number_of_scalar_core_contexts)
            .support_tile_thread_gcsr_node(self.support_tile_thread_gcsr_node)
    }
}

fn parse_u64(s: &str) -> std::result::Result<u64, String> {
    let s = s.trim().replace('_', "");
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("{s:?} is not a 64-bit unsigned value: {e}"))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Cmd::Check { variant, host_table_size, fields } => {
            cmd_check(&variant, host_table_size, fields)?;
        }
        Cmd::Fields => cmd_fields(),
    }

    Ok(())
}

fn cmd_check(variant: &str, host_table_size: Option<u64>, fields: FieldArgs) -> Result<()> {
    let mut builder = fields.into_builder().variant(variant);
    if let Some(size) = host_table_size {
        builder = builder.host_table_size(size);
    }
    let chip = builder.build()?;

    println!("Chip variant {variant}: valid");
    println!();

    let a = chip.alignment();
    println!("Memory allocator");
    println!("  min alignment    : {} B", a.minimum());
    println!("  alloc alignment  : {} B", a.allocation());
    println!("  base-and-bound   : {} B", a.base_and_bound_unit());

    let t = chip.translation();
    println!("Page tables");
    println!(
        "  address bits     : {} (max {:#x})",
        t.physical_address_bits(),
        t.max_physical_address()
    );
    println!("  page table size  : {} entries", t.num_page_table_entries());
    if chip.has_tpu_dram() {
        print!("  DRAM             : {} B", t.tpu_dram_size_bytes());
        match host_table_size.and_then(|size| t.host_table_count(size)) {
            Some(count) => println!(" ({count} host tables)"),
            None => println!(),
        }
    } else {
        println!("  DRAM             : none");
    }
    println!("  narrow memory    : {} B/tile", t.narrow_memory_capacity());
    println!(
        "  ext narrow xlate : {} B/entry",
        t.external_narrow_memory_translate_entry_size_bytes()
    );

    let x = chip.transport();
    println!("DMA / interrupts");
    println!("  AXI burst limit  : {}", x.axi_dma_burst_limiter());
    println!("  wire interrupts  : {}", x.num_wire_interrupts());
    println!("  mesh rx depth    : {}", x.mesh_rx_queue_depth());
    println!("  VN buffer lines  : {}", x.default_vn_buffer_memory_lines());

    let w = chip.csr_window();
    println!("CSR");
    if w.is_empty() {
        println!("  window           : none");
    } else {
        println!("  window           : {:#x}..{:#x}", w.base(), w.end());
    }

    let g = chip.topology();
    println!("Scheduler");
    println!(
        "  tiles            : {}x{} ({} total)",
        g.x_tiles(),
        g.y_tiles(),
        g.tile_count()
    );
    println!("  compute threads  : {}", g.compute_threads());
    println!("  ring VNs         : {}", g.ring_virtual_networks());
    println!(
        "  scalar contexts  : {}{}",
        g.scalar_core_contexts(),
        if g.supports_context_switching() { "" } else { " (legacy)" }
    );

    println!("Feature flags");
    for (field, value) in chip.fields().filter(|(field, _)| field.is_flag()) {
        println!("  {:<52}: {value}", field.name());
    }

    Ok(())
}

fn cmd_fields() {
    for field in Field::ALL {
        println!("{:<52} {}", field.name(), field.category());
    }
}
