// ==========================================
// 订单标准化系统 - 订单领域模型
// ==========================================
// 管道: CSV 行 → ComponentRecord → ProductOrder
// 每个阶段按值消费上一阶段的输出
// ==========================================

use crate::domain::types::{PipelineStage, SkipReason};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// ComponentRecord - 标准化中间结构体
// ==========================================
// 用途: 标准化阶段产物，转换阶段立即消费
// 生命周期: 仅在一次转换内
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub identifier: String, // 按 mixed 策略提取的产品标识
    pub quantity: i64,      // 数量（已解析，尚未做业务校验）
    pub row_number: usize,  // 原始 CSV 记录号（从 1 开始）
}

// ==========================================
// ProductOrder - 产品订单行（最终输出）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductOrder {
    pub line: usize,                   // 原始 CSV 记录号
    pub identifier: String,            // 去空白 + 内部空白折叠
    pub normalized_identifier: String, // 大写匹配键
    pub quantity: u64,                 // 非负整数
}

// ==========================================
// RowDiagnostic - 行级诊断
// ==========================================
// 被跳过/丢弃的行只进入诊断，不产生错误
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowDiagnostic {
    pub row_number: usize,
    pub stage: PipelineStage,
    pub reason: SkipReason,
}

impl RowDiagnostic {
    pub fn normalize(row_number: usize, reason: SkipReason) -> Self {
        Self {
            row_number,
            stage: PipelineStage::Normalize,
            reason,
        }
    }

    pub fn convert(row_number: usize, reason: SkipReason) -> Self {
        Self {
            row_number,
            stage: PipelineStage::Convert,
            reason,
        }
    }
}

// ==========================================
// NormalizedOrder - 标准化结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedOrder {
    pub components: Vec<ComponentRecord>, // 按原始顺序
    pub skipped: Vec<RowDiagnostic>,      // 被跳过的数据行
    pub total_rows: usize,                // 非空白记录数（含表头）
    pub header_skipped: bool,             // 首行是否按表头跳过
}

// ==========================================
// ConvertedOrder - 转换结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertedOrder {
    pub products: Vec<ProductOrder>,
    pub dropped: Vec<RowDiagnostic>,
}

// ==========================================
// ConversionBatch - 一次转换的元信息
// ==========================================
// 不进入产品 JSON，保证产品输出可重复
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionBatch {
    pub batch_id: String,              // 批次 ID（UUID）
    pub supplier: String,              // 供应商预设名
    pub total_rows: usize,             // 非空白记录数
    pub header_skipped: bool,          // 是否跳过表头
    pub component_rows: usize,         // 标准化成功行数
    pub product_rows: usize,           // 最终产品行数
    pub skipped_rows: usize,           // 标准化 + 转换阶段丢弃行数
    pub converted_at: DateTime<Utc>,   // 完成时间
    pub elapsed_ms: u64,               // 耗时（毫秒）
}
