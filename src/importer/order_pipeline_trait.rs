// ==========================================
// 订单标准化系统 - 导入管道 Trait
// ==========================================
// 职责: 定义管道各阶段接口（不包含实现）
// ==========================================

use crate::domain::detection::DetectionConfig;
use crate::domain::order::ComponentRecord;
use crate::domain::types::SkipReason;
use crate::importer::csv_reader::RawRow;
use crate::importer::error::{NormalizationError, PipelineResult};
use crate::importer::order_pipeline::ConversionOutcome;

// ==========================================
// OrderImporter Trait
// ==========================================
// 用途: 订单导入主接口
// 实现者: OrderPipeline
pub trait OrderImporter: Send + Sync {
    /// 按供应商预设导入一份 CSV 订单
    ///
    /// # 参数
    /// - supplier: 供应商预设名
    /// - bytes: 原始 CSV 字节
    ///
    /// # 返回
    /// - Ok(ConversionOutcome): 产品订单 + 诊断 + 批次信息
    /// - Err: 配置错误、无有效行、输入结构错误
    ///
    /// # 流程
    /// 1. 查找预设
    /// 2. 标准化（CSV → 组件记录）
    /// 3. 转换（组件记录 → 产品订单）
    fn import_order(&self, supplier: &str, bytes: &[u8]) -> PipelineResult<ConversionOutcome>;
}

// ==========================================
// RowReader Trait
// ==========================================
// 用途: 字节解析为原始行（阶段 0）
// 实现者: CsvRowReader
pub trait RowReader: Send + Sync {
    /// 解析为原始行，跳过完全空白的记录
    ///
    /// # 返回
    /// - Ok(Vec<RawRow>): 行列表（保留原始记录号）
    /// - Err: CSV 结构错误
    fn read_rows(&self, bytes: &[u8]) -> Result<Vec<RawRow>, NormalizationError>;
}

// ==========================================
// ComponentMapper Trait
// ==========================================
// 用途: 原始行 → 组件记录（阶段 1）
// 实现者: ComponentMapperImpl
pub trait ComponentMapper: Send + Sync {
    /// 按检测配置提取标识与数量
    ///
    /// # 返回
    /// - Ok(ComponentRecord): 提取成功
    /// - Err(SkipReason): 行缺陷（缺列 / 数量无法解析）
    fn map_to_component(
        &self,
        row: &RawRow,
        config: &DetectionConfig,
    ) -> Result<ComponentRecord, SkipReason>;

    /// 仅检查数量列能否解析（表头启发式使用）
    fn quantity_parses(&self, row: &RawRow, config: &DetectionConfig) -> bool;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 文本清洗与数量解析
// 实现者: DataCleanerImpl
pub trait DataCleaner: Send + Sync {
    /// 清洗文本字段（TRIM + 可选 UPPER）
    fn clean_text(&self, value: &str, uppercase: bool) -> String;

    /// 折叠内部连续空白为单个空格
    fn collapse_whitespace(&self, value: &str) -> String;

    /// 解析数量（TRIM 后按有符号整数解析）
    ///
    /// # 返回
    /// - Err(SkipReason::EmptyQuantity): 空值
    /// - Err(SkipReason::InvalidQuantity): 非整数
    fn parse_quantity(&self, value: &str) -> Result<i64, SkipReason>;
}
