//! Construction contract: complete input, invariant checks, exact read-back.

mod common;

use common::{synthetic_builder, valid_alternative, DRAM_8_GIB, HOST_TABLE_SIZE};
use darwinn_config::{ChipStructures, ConfigError, Field, FIELD_COUNT};

#[test]
fn valid_set_builds() {
    let chip = synthetic_builder()
        .host_table_size(HOST_TABLE_SIZE)
        .build()
        .expect("synthetic chip is valid");
    assert_eq!(chip.tile_count(), 16);
    assert!(chip.has_tpu_dram());
    assert!(chip.has_csr_region());
    assert!(chip.supports_context_switching());
}

#[test]
fn allocation_smaller_than_minimum_fails() {
    let err = synthetic_builder()
        .minimum_alignment_bytes(64)
        .allocation_alignment_bytes(32)
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidConfiguration {
            field: Field::AllocationAlignmentBytes,
            ..
        }
    ));
}

#[test]
fn zero_x_tiles_fails() {
    let err = synthetic_builder().number_x_tiles(0).build().unwrap_err();
    assert_eq!(err.field(), Field::NumberXTiles);
}

#[test]
fn dram_divisible_by_host_table_passes() {
    let chip = synthetic_builder()
        .physical_address_bits(37)
        .tpu_dram_size_bytes(DRAM_8_GIB)
        .host_table_size(HOST_TABLE_SIZE)
        .build()
        .unwrap();
    assert_eq!(chip.physical_address_bits(), 37);
    assert_eq!(chip.tpu_dram_size_bytes(), DRAM_8_GIB);
    assert!(chip.check_host_table_size("synthetic", HOST_TABLE_SIZE).is_ok());
    assert_eq!(chip.translation().host_table_count(HOST_TABLE_SIZE), Some(2_097_152));
}

#[test]
fn dram_not_divisible_by_host_table_fails() {
    let err = synthetic_builder()
        .physical_address_bits(37)
        .tpu_dram_size_bytes(DRAM_8_GIB + 1)
        .host_table_size(HOST_TABLE_SIZE)
        .build()
        .unwrap_err();
    assert_eq!(err.field(), Field::TpuDramSizeBytes);
    assert_eq!(err.variant(), "synthetic");

    // Without the table size the descriptor itself is fine; the check is the
    // page-table builder's to make.
    let chip = synthetic_builder()
        .tpu_dram_size_bytes(DRAM_8_GIB + 1)
        .build()
        .unwrap();
    let err = chip
        .check_host_table_size("rev-c", HOST_TABLE_SIZE)
        .unwrap_err();
    assert_eq!(err.field(), Field::TpuDramSizeBytes);
    assert_eq!(err.variant(), "rev-c");
    assert!(err.to_string().contains("rev-c"));
}

#[test]
fn diagnostic_names_field_and_variant() {
    let err = synthetic_builder()
        .variant("rev-b")
        .number_of_scalar_core_contexts(0)
        .build()
        .unwrap_err();
    let message = err.to_string();
    assert!(message.contains("rev-b"), "{message}");
    assert!(message.contains("number_of_scalar_core_contexts"), "{message}");
}

#[test]
fn csr_base_without_size_fails() {
    let err = synthetic_builder()
        .csr_region_base_offset(0x4_0000)
        .csr_region_size_bytes(0)
        .build()
        .unwrap_err();
    assert_eq!(err.field(), Field::CsrRegionSizeBytes);
}

#[test]
fn every_field_reads_back_exactly() {
    let mut builder = ChipStructures::builder();
    let mut expected = [0u64; FIELD_COUNT];
    for field in Field::ALL {
        let value = synthetic_builder().value(field).unwrap();
        expected[field.index()] = value;
        builder = builder.set(field, value);
    }
    let chip = builder.build().unwrap();

    for (field, value) in chip.fields() {
        assert_eq!(value, expected[field.index()], "{field}");
    }
    // Reads do not drift.
    let first: Vec<_> = chip.fields().collect();
    let second: Vec<_> = chip.fields().collect();
    assert_eq!(first, second);
}

#[test]
fn identical_sets_are_equal() {
    let a = synthetic_builder().build().unwrap();
    let b = synthetic_builder().variant("other-label").build().unwrap();
    assert_eq!(a, b, "variant label is not part of the descriptor");
}

#[test]
fn changing_any_field_breaks_equality() {
    let base = synthetic_builder().build().unwrap();
    for field in Field::ALL {
        let changed_value = valid_alternative(field, base.get(field));
        let changed = base
            .to_builder()
            .set(field, changed_value)
            .build()
            .unwrap_or_else(|e| panic!("{field}: {e}"));
        assert_ne!(base, changed, "{field}");
        assert_eq!(changed.get(field), changed_value);
    }
}

#[test]
fn missing_field_is_reported() {
    let mut builder = ChipStructures::builder().variant("incomplete");
    for field in Field::ALL.into_iter().skip(1) {
        builder = builder.set(field, synthetic_builder().value(field).unwrap());
    }
    let err = builder.build().unwrap_err();
    assert_eq!(err.field(), Field::MinimumAlignmentBytes);
    assert_eq!(err.variant(), "incomplete");
}

#[test]
fn flag_fields_keep_raw_value() {
    let chip = synthetic_builder()
        .support_trace_arch_registers(3)
        .nlu_buffer_backpressure_causes_assertion(0)
        .build()
        .unwrap();
    assert_eq!(chip.support_trace_arch_registers(), 3);
    assert!(chip.supports_trace_arch_registers());
    assert_eq!(chip.nlu_buffer_backpressure_causes_assertion(), 0);
    assert!(!chip.nlu_backpressure_asserts());
    assert!(chip.z_out_cell_disable_conflicts_with_sparsity());
    assert!(chip.supports_tile_thread_gcsr_node());
}
