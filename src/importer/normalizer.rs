// ==========================================
// 订单标准化系统 - CSV 订单标准化器
// ==========================================
// 阶段 1: 原始 CSV 字节 → 有序组件记录
// 策略: 坏行跳过并记录诊断；零有效行才整体失败
// ==========================================

use crate::domain::detection::DetectionConfig;
use crate::domain::order::{NormalizedOrder, RowDiagnostic};
use crate::domain::types::HeaderMode;
use crate::importer::component_mapper::ComponentMapper as ComponentMapperImpl;
use crate::importer::csv_reader::{CsvRowReader, RawRow};
use crate::importer::data_cleaner::DataCleaner as DataCleanerImpl;
use crate::importer::error::{NormalizationError, PipelineResult};
use crate::importer::order_pipeline_trait::{ComponentMapper, RowReader};
use tracing::{debug, info, warn};

pub struct CsvOrderNormalizer<'a> {
    config: &'a DetectionConfig,
    row_reader: Box<dyn RowReader>,
    component_mapper: Box<dyn ComponentMapper>,
}

impl<'a> CsvOrderNormalizer<'a> {
    /// 使用默认读取器与映射器
    pub fn new(config: &'a DetectionConfig) -> Self {
        Self::with_components(
            config,
            Box::new(CsvRowReader::new(config.encoding())),
            Box::new(ComponentMapperImpl::new(Box::new(DataCleanerImpl))),
        )
    }

    pub fn with_components(
        config: &'a DetectionConfig,
        row_reader: Box<dyn RowReader>,
        component_mapper: Box<dyn ComponentMapper>,
    ) -> Self {
        Self {
            config,
            row_reader,
            component_mapper,
        }
    }

    /// 将 CSV 字节转换为组件列表
    ///
    /// # 返回
    /// - Ok(NormalizedOrder): 组件记录（保持原顺序）+ 被跳过行的诊断
    /// - Err(NormalizationError::NoValidRows): 无任何有效数据行
    /// - Err(NormalizationError::CsvParse): CSV 结构损坏
    pub fn convert_to_component_list(&self, bytes: &[u8]) -> PipelineResult<NormalizedOrder> {
        let rows = self.row_reader.read_rows(bytes)?;
        let total_rows = rows.len();
        debug!(total_rows, "CSV 解析完成");

        let header_skipped = rows
            .first()
            .map(|first| self.is_header(first))
            .unwrap_or(false);
        if header_skipped {
            debug!(row_number = rows[0].row_number, "首行判定为表头，已跳过");
        }

        let mut components = Vec::with_capacity(total_rows);
        let mut skipped = Vec::new();
        let data_rows = rows.iter().skip(usize::from(header_skipped));
        for row in data_rows {
            match self.component_mapper.map_to_component(row, self.config) {
                Ok(component) => components.push(component),
                Err(reason) => {
                    warn!(row_number = row.row_number, reason = %reason, "跳过无效行");
                    skipped.push(RowDiagnostic::normalize(row.row_number, reason));
                }
            }
        }

        if components.is_empty() {
            return Err(NormalizationError::NoValidRows {
                total_rows,
                skipped: skipped.len(),
            }
            .into());
        }

        info!(
            valid = components.len(),
            skipped = skipped.len(),
            header_skipped,
            "标准化完成"
        );

        Ok(NormalizedOrder {
            components,
            skipped,
            total_rows,
            header_skipped,
        })
    }

    fn is_header(&self, first: &RawRow) -> bool {
        match self.config.header() {
            HeaderMode::Present => true,
            HeaderMode::Absent => false,
            HeaderMode::Auto => !self.component_mapper.quantity_parses(first, self.config),
        }
    }
}
