// ==========================================
// 订单标准化系统 - 订单导入管道实现
// ==========================================
// 职责: 整合导入流程，从 CSV 字节到产品订单 JSON
// 流程: 预设查找 → 标准化 → 转换 → 批次汇总
// ==========================================

use crate::config::{ConverterSettings, PresetStore};
use crate::domain::detection::DetectionConfig;
use crate::domain::order::{ConversionBatch, ProductOrder, RowDiagnostic};
use crate::importer::converter::ProductConverter;
use crate::importer::error::{OutputError, PipelineResult};
use crate::importer::normalizer::CsvOrderNormalizer;
use crate::importer::order_pipeline_trait::OrderImporter;
use crate::OUTPUT_FILE_NAME;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument};
use uuid::Uuid;

// ==========================================
// ConversionOutcome - 一次转换的完整结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutcome {
    pub batch: ConversionBatch,          // 批次信息
    pub products: Vec<ProductOrder>,     // 产品订单（按原始行序）
    pub diagnostics: Vec<RowDiagnostic>, // 两个阶段丢弃的行（按行号）
}

impl ConversionOutcome {
    /// 产品订单 JSON（2 空格缩进，非 ASCII 原样保留）
    ///
    /// 只包含产品数组，相同输入得到逐字节相同的输出
    pub fn to_json(&self) -> Result<String, OutputError> {
        Ok(serde_json::to_string_pretty(&self.products)?)
    }

    /// 将 to_json 的输出写入 <dir>/converted_order.json（目录不存在时创建）
    ///
    /// # 返回
    /// - Ok(PathBuf): 写出的文件路径
    /// - Err(OutputError::FileWrite): 目录创建或写入失败
    pub fn write_json(&self, dir: &Path) -> Result<PathBuf, OutputError> {
        let json = self.to_json()?;
        let path = dir.join(OUTPUT_FILE_NAME);
        let to_error = |e: std::io::Error| OutputError::FileWrite {
            path: path.display().to_string(),
            message: e.to_string(),
        };

        std::fs::create_dir_all(dir).map_err(to_error)?;
        std::fs::write(&path, json).map_err(to_error)?;

        info!(path = %path.display(), "JSON 已写出");
        Ok(path)
    }

    pub fn diagnostics(&self) -> &[RowDiagnostic] {
        &self.diagnostics
    }
}

/// 解析 to_json 的输出
pub fn products_from_json(raw: &str) -> Result<Vec<ProductOrder>, OutputError> {
    Ok(serde_json::from_str(raw)?)
}

// ==========================================
// OrderPipeline - 订单导入管道
// ==========================================
pub struct OrderPipeline<S>
where
    S: PresetStore,
{
    // 预设来源（显式注入）
    store: S,

    // 转换参数
    settings: ConverterSettings,
}

impl<S> OrderPipeline<S>
where
    S: PresetStore,
{
    pub fn new(store: S, settings: ConverterSettings) -> Self {
        Self { store, settings }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 按供应商预设执行完整管道
    #[instrument(skip(self, bytes), fields(bytes = bytes.len()))]
    pub fn run(&self, supplier: &str, bytes: &[u8]) -> PipelineResult<ConversionOutcome> {
        let config = self.store.require_preset(supplier)?;
        self.run_with_config(config, supplier, bytes)
    }

    /// 使用给定检测配置执行管道（不经过预设表）
    pub fn run_with_config(
        &self,
        config: &DetectionConfig,
        supplier: &str,
        bytes: &[u8],
    ) -> PipelineResult<ConversionOutcome> {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        info!(
            batch_id = %batch_id,
            supplier,
            strategy = config.mixed().kind(),
            "开始转换订单"
        );

        // === 步骤 1: 标准化 ===
        debug!("步骤 1: 标准化");
        let normalized = CsvOrderNormalizer::new(config).convert_to_component_list(bytes)?;
        let component_rows = normalized.components.len();

        // === 步骤 2: 转换 ===
        debug!("步骤 2: 产品转换");
        let converted = ProductConverter::new(self.settings)
            .convert_single_order(normalized.components)?;

        // === 步骤 3: 汇总诊断 ===
        let mut diagnostics = normalized.skipped;
        diagnostics.extend(converted.dropped);
        diagnostics.sort_by_key(|d| d.row_number);

        let elapsed = start_time.elapsed();
        let batch = ConversionBatch {
            batch_id,
            supplier: supplier.to_string(),
            total_rows: normalized.total_rows,
            header_skipped: normalized.header_skipped,
            component_rows,
            product_rows: converted.products.len(),
            skipped_rows: diagnostics.len(),
            converted_at: Utc::now(),
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        };

        info!(
            batch_id = %batch.batch_id,
            total = batch.total_rows,
            products = batch.product_rows,
            skipped = batch.skipped_rows,
            elapsed_ms = batch.elapsed_ms,
            "订单转换完成"
        );

        Ok(ConversionOutcome {
            batch,
            products: converted.products,
            diagnostics,
        })
    }
}

impl<S> OrderImporter for OrderPipeline<S>
where
    S: PresetStore,
{
    fn import_order(&self, supplier: &str, bytes: &[u8]) -> PipelineResult<ConversionOutcome> {
        self.run(supplier, bytes)
    }
}
