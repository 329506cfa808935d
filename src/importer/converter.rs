// ==========================================
// 订单标准化系统 - 产品转换器
// ==========================================
// 阶段 2: 组件记录 → 产品订单
// 校验: 标识非空 / 数量非负 / 零数量按策略处理
// ==========================================

use crate::config::ConverterSettings;
use crate::domain::order::{ComponentRecord, ConvertedOrder, ProductOrder, RowDiagnostic};
use crate::domain::types::{SkipReason, ZeroQuantityPolicy};
use crate::importer::data_cleaner::DataCleaner as DataCleanerImpl;
use crate::importer::error::{ConversionError, PipelineResult};
use crate::importer::order_pipeline_trait::DataCleaner;
use tracing::{info, warn};

pub struct ProductConverter {
    settings: ConverterSettings,
    data_cleaner: Box<dyn DataCleaner>,
}

impl Default for ProductConverter {
    fn default() -> Self {
        Self::new(ConverterSettings::default())
    }
}

impl ProductConverter {
    pub fn new(settings: ConverterSettings) -> Self {
        Self {
            settings,
            data_cleaner: Box::new(DataCleanerImpl),
        }
    }

    /// 转换一份订单的组件列表
    ///
    /// # 返回
    /// - Ok(ConvertedOrder): 保持顺序的产品订单 + 被丢弃记录的诊断
    /// - Err(ConversionError::EmptyInput): 输入为空
    /// - Err(ConversionError::OutOfOrder): 记录号非严格递增
    pub fn convert_single_order(
        &self,
        components: Vec<ComponentRecord>,
    ) -> PipelineResult<ConvertedOrder> {
        if components.is_empty() {
            return Err(ConversionError::EmptyInput.into());
        }
        Self::check_order(&components)?;

        let mut products = Vec::with_capacity(components.len());
        let mut dropped = Vec::new();
        for component in components {
            let row_number = component.row_number;
            match self.convert_component(component) {
                Ok(product) => products.push(product),
                Err(reason) => {
                    warn!(row_number, reason = %reason, "丢弃无效组件记录");
                    dropped.push(RowDiagnostic::convert(row_number, reason));
                }
            }
        }

        info!(
            products = products.len(),
            dropped = dropped.len(),
            "产品转换完成"
        );

        Ok(ConvertedOrder { products, dropped })
    }

    fn check_order(components: &[ComponentRecord]) -> Result<(), ConversionError> {
        for pair in components.windows(2) {
            if pair[1].row_number <= pair[0].row_number {
                return Err(ConversionError::OutOfOrder {
                    previous: pair[0].row_number,
                    current: pair[1].row_number,
                });
            }
        }
        Ok(())
    }

    fn convert_component(&self, component: ComponentRecord) -> Result<ProductOrder, SkipReason> {
        // 标识保持提取结果原样，只去首尾空白
        let identifier = component.identifier.trim();
        if identifier.is_empty() {
            return Err(SkipReason::EmptyIdentifier);
        }

        let quantity = match component.quantity {
            q if q < 0 => return Err(SkipReason::NegativeQuantity { value: q }),
            0 if self.settings.zero_quantity == ZeroQuantityPolicy::Skip => {
                return Err(SkipReason::ZeroQuantity)
            }
            q => q.unsigned_abs(),
        };

        Ok(ProductOrder {
            line: component.row_number,
            normalized_identifier: self
                .data_cleaner
                .clean_text(&self.data_cleaner.collapse_whitespace(identifier), true),
            identifier: identifier.to_string(),
            quantity,
        })
    }
}
