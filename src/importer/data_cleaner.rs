// ==========================================
// 订单标准化系统 - 数据清洗器实现
// ==========================================
// 职责: TRIM、空白折叠、大写匹配键与数量解析
// ==========================================

use crate::domain::types::SkipReason;
use crate::importer::order_pipeline_trait::DataCleaner as DataCleanerTrait;

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn clean_text(&self, value: &str, uppercase: bool) -> String {
        let trimmed = value.trim();
        if uppercase {
            trimmed.to_uppercase()
        } else {
            trimmed.to_string()
        }
    }

    fn collapse_whitespace(&self, value: &str) -> String {
        value.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn parse_quantity(&self, value: &str) -> Result<i64, SkipReason> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(SkipReason::EmptyQuantity);
        }
        trimmed
            .parse::<i64>()
            .map_err(|_| SkipReason::InvalidQuantity {
                value: trimmed.to_string(),
            })
    }
}
