// ==========================================
// 订单导入管道集成测试
// ==========================================
// 测试目标: 标准化 → 转换 → JSON 全流程行为
// ==========================================


use order_normalizer::domain::types::{PipelineStage, SkipReason};
use order_normalizer::importer::{products_from_json, ComponentMapperImpl, DataCleanerImpl};
use order_normalizer::{
    ConversionError, ConverterSettings, CsvOrderNormalizer, DetectionConfig, NormalizationError,
    OrderImporter, OrderPipeline, PipelineError, PresetRegistry, ProductConverter,
    ZeroQuantityPolicy,
};
use test_helpers::{builtin_pipeline, cable_supplier_csv, csv_bytes};

#[test]
fn test_well_formed_rows_all_kept() {
    init_logging();
    let bytes = csv_bytes(&[
        &["SKU001", "5"],
        &["SKU002", "3"],
        &["SKU003", "8"],
        &["SKU004", "1"],
    ]);

    let config = DetectionConfig::single(0, 1);
    let order = CsvOrderNormalizer::new(&config)
        .convert_to_component_list(&bytes)
        .unwrap();

    assert_eq!(order.components.len(), 4);
    let quantities: Vec<i64> = order.components.iter().map(|c| c.quantity).collect();
    assert_eq!(quantities, vec![5, 3, 8, 1]);
}

#[test]
fn test_single_strategy_example() {
    let config = DetectionConfig::single(0, 1);
    let order = CsvOrderNormalizer::new(&config)
        .convert_to_component_list(b"SKU123,5\n")
        .unwrap();

    assert_eq!(order.components[0].identifier, "SKU123");
    assert_eq!(order.components[0].quantity, 5);
}

#[test]
fn test_concat_strategy_example() {
    let bytes = csv_bytes(&[&["X", "Jane", "M", "Doe", "Smith", "2"]]);

    let config = DetectionConfig::concat(vec![1, 2, 3], " ", 5).unwrap();
    let order = CsvOrderNormalizer::new(&config)
        .convert_to_component_list(&bytes)
        .unwrap();
    assert_eq!(order.components[0].identifier, "Jane M Doe");

    let config = DetectionConfig::concat(vec![1, 2, 3, 4], " ", 5).unwrap();
    let order = CsvOrderNormalizer::new(&config)
        .convert_to_component_list(&bytes)
        .unwrap();
    assert_eq!(order.components[0].identifier, "Jane M Doe Smith");
}

#[test]
fn test_cable_supplier_end_to_end() {
    let outcome = builtin_pipeline()
        .run("Cable Supplier", &cable_supplier_csv())
        .unwrap();

    let identifiers: Vec<&str> = outcome
        .products
        .iter()
        .map(|p| p.identifier.as_str())
        .collect();
    assert_eq!(
        identifiers,
        vec![
            "Belden Cat6 UTP 305m",
            "Nexans H07RN-F 3G2.5 100m",
            "Panduit Cat6A S/FTP 500m"
        ]
    );
    assert_eq!(outcome.products[1].quantity, 2);
    assert!(outcome.batch.header_skipped);
    assert!(outcome.diagnostics().is_empty());
}

#[test]
fn test_empty_quantity_rows_excluded() {
    let bytes = csv_bytes(&[
        &["A", "1"],
        &["B", ""],
        &["C", "3"],
        &["D", ""],
        &["E", "5"],
    ]);

    let outcome = builtin_pipeline().run("Clinic Supplier", &bytes).unwrap();

    // 5 行中 2 行数量为空 → 3 行
    assert_eq!(outcome.products.len(), 3);
    assert_eq!(outcome.batch.component_rows, 3);
    assert!(outcome
        .diagnostics()
        .iter()
        .all(|d| d.reason == SkipReason::EmptyQuantity && d.stage == PipelineStage::Normalize));
    let skipped_rows: Vec<usize> = outcome.diagnostics().iter().map(|d| d.row_number).collect();
    assert_eq!(skipped_rows, vec![2, 4]);
}

#[test]
fn test_all_rows_invalid_is_normalization_error() {
    let bytes = csv_bytes(&[&["A", "one"], &["B", "two"], &["C", ""]]);

    let err = builtin_pipeline()
        .run("DrugTops Supplier", &bytes)
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Normalization(NormalizationError::NoValidRows { .. })
    ));
}

#[test]
fn test_quoted_fields_in_pipeline() {
    let bytes = b"\"Gauze, sterile\",\"12\"\n\"Tape \"\"3M\"\"\",4\n";

    let outcome = builtin_pipeline().run("Clinic Supplier", bytes).unwrap();

    assert_eq!(outcome.products[0].identifier, "Gauze, sterile");
    assert_eq!(outcome.products[0].quantity, 12);
    assert_eq!(outcome.products[1].identifier, "Tape \"3M\"");
}

#[test]
fn test_json_round_trip() {
    let outcome = builtin_pipeline()
        .run("Cable Supplier", &cable_supplier_csv())
        .unwrap();

    let json = outcome.to_json().unwrap();
    let parsed = products_from_json(&json).unwrap();

    assert_eq!(parsed, outcome.products);

    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let first = &value[0];
    assert!(first.get("identifier").is_some());
    assert!(first.get("quantity").is_some());
}

#[test]
fn test_idempotent_json_output() {
    let pipeline = builtin_pipeline();
    let bytes = cable_supplier_csv();

    let first = pipeline.run("Cable Supplier", &bytes).unwrap();
    let second = pipeline.run("Cable Supplier", &bytes).unwrap();

    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
    assert_ne!(first.batch.batch_id, second.batch.batch_id);
}

#[test]
fn test_zero_quantity_policy_end_to_end() {
    let bytes = csv_bytes(&[&["A", "0"], &["B", "2"]]);

    let accepting = builtin_pipeline().run("Clinic Supplier", &bytes).unwrap();
    assert_eq!(accepting.products.len(), 2);
    assert_eq!(accepting.products[0].quantity, 0);

    let skipping = OrderPipeline::new(
        PresetRegistry::builtin(),
        ConverterSettings {
            zero_quantity: ZeroQuantityPolicy::Skip,
        },
    )
    .run("Clinic Supplier", &bytes)
    .unwrap();
    assert_eq!(skipping.products.len(), 1);
    assert_eq!(skipping.diagnostics()[0].stage, PipelineStage::Convert);
}

#[test]
fn test_negative_quantity_dropped_by_converter() {
    let bytes = csv_bytes(&[&["A", "-1"], &["B", "2"]]);

    let outcome = builtin_pipeline().run("Clinic Supplier", &bytes).unwrap();

    assert_eq!(outcome.products.len(), 1);
    assert_eq!(
        outcome.diagnostics()[0].reason,
        SkipReason::NegativeQuantity { value: -1 }
    );
}

#[test]
fn test_custom_components_injected() {
    let config = DetectionConfig::single(1, 0);
    let normalizer = CsvOrderNormalizer::with_components(
        &config,
        Box::new(order_normalizer::importer::CsvRowReader::default()),
        Box::new(ComponentMapperImpl::new(Box::new(DataCleanerImpl))),
    );

    let order = normalizer.convert_to_component_list(b"7,Bolt\n").unwrap();
    assert_eq!(order.components[0].identifier, "Bolt");
    assert_eq!(order.components[0].quantity, 7);
}

#[test]
fn test_converter_rejects_empty_input() {
    let err = ProductConverter::default()
        .convert_single_order(Vec::new())
        .unwrap_err();

    assert!(matches!(
        err,
        PipelineError::Conversion(ConversionError::EmptyInput)
    ));
}

#[test]
fn test_order_importer_trait_object() {
    let importer: Box<dyn OrderImporter> = Box::new(builtin_pipeline());

    let outcome = importer
        .import_order("DrugTops Supplier", b"Item,Qty\nAspirin,10\n")
        .unwrap();

    assert_eq!(outcome.products[0].identifier, "Aspirin");
    assert_eq!(outcome.products[0].normalized_identifier, "ASPIRIN");
}

#[test]
fn test_shared_pipeline_across_threads() {
    let pipeline = std::sync::Arc::new(builtin_pipeline());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let pipeline = pipeline.clone();
            std::thread::spawn(move || {
                let bytes = format!("SKU{},{}\n", i, i + 1).into_bytes();
                pipeline.run("Clinic Supplier", &bytes).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let outcome = handle.join().unwrap();
        assert_eq!(outcome.products[0].quantity, i as u64 + 1);
    }
}

fn init_logging() {
    order_normalizer::logging::init_test();
}
