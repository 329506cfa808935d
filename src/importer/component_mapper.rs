// ==========================================
// 订单标准化系统 - 组件映射器实现
// ==========================================
// 职责: 原始行 → ComponentRecord（按 mixed 策略 + quantity_col）
// ==========================================

use crate::domain::detection::{ColumnStrategy, DetectionConfig};
use crate::domain::order::ComponentRecord;
use crate::domain::types::SkipReason;
use crate::importer::csv_reader::RawRow;
use crate::importer::order_pipeline_trait::{
    ComponentMapper as ComponentMapperTrait, DataCleaner,
};

pub struct ComponentMapper {
    data_cleaner: Box<dyn DataCleaner>,
}

impl ComponentMapper {
    pub fn new(data_cleaner: Box<dyn DataCleaner>) -> Self {
        Self { data_cleaner }
    }

    /// 取单元格，缺列返回 MissingColumn
    fn get_cell<'a>(&self, row: &'a RawRow, column: usize) -> Result<&'a str, SkipReason> {
        row.cell(column).ok_or(SkipReason::MissingColumn {
            column,
            row_len: row.len(),
        })
    }

    /// 按策略提取产品标识
    fn extract_identifier(
        &self,
        row: &RawRow,
        strategy: &ColumnStrategy,
    ) -> Result<String, SkipReason> {
        match strategy {
            ColumnStrategy::Single { col } => {
                let value = self.get_cell(row, *col)?;
                Ok(self.data_cleaner.clean_text(value, false))
            }
            ColumnStrategy::Concat { cols, sep } => {
                let parts = cols
                    .iter()
                    .map(|&c| {
                        self.get_cell(row, c)
                            .map(|v| self.data_cleaner.clean_text(v, false))
                    })
                    .collect::<Result<Vec<String>, SkipReason>>()?;
                Ok(parts.join(sep))
            }
        }
    }
}

impl ComponentMapperTrait for ComponentMapper {
    fn map_to_component(
        &self,
        row: &RawRow,
        config: &DetectionConfig,
    ) -> Result<ComponentRecord, SkipReason> {
        // 行长度不足最大引用列 → 整行无效
        let max_column = config.max_column();
        if row.len() <= max_column {
            return Err(SkipReason::MissingColumn {
                column: max_column,
                row_len: row.len(),
            });
        }

        let identifier = self.extract_identifier(row, config.mixed())?;
        let quantity = self
            .data_cleaner
            .parse_quantity(self.get_cell(row, config.quantity_col())?)?;

        Ok(ComponentRecord {
            identifier,
            quantity,
            row_number: row.row_number,
        })
    }

    fn quantity_parses(&self, row: &RawRow, config: &DetectionConfig) -> bool {
        row.cell(config.quantity_col())
            .map(|v| self.data_cleaner.parse_quantity(v).is_ok())
            .unwrap_or(false)
    }
}
