// ==========================================
// 订单标准化系统 - 领域类型定义
// ==========================================
// 职责: 表头策略、管道阶段、跳过原因、零数量策略
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 表头策略 (Header Mode)
// ==========================================
// Auto: 首行数量列无法解析为整数时视为表头
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderMode {
    #[default]
    Auto,    // 启发式判断
    Present, // 首行必为表头
    Absent,  // 首行必为数据
}

impl fmt::Display for HeaderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderMode::Auto => write!(f, "auto"),
            HeaderMode::Present => write!(f, "present"),
            HeaderMode::Absent => write!(f, "absent"),
        }
    }
}

// ==========================================
// 管道阶段 (Pipeline Stage)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Normalize, // 标准化（CSV → 组件记录）
    Convert,   // 转换（组件记录 → 产品订单）
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineStage::Normalize => write!(f, "normalize"),
            PipelineStage::Convert => write!(f, "convert"),
        }
    }
}

// ==========================================
// 行跳过原因 (Skip Reason)
// ==========================================
// 行级缺陷只记录诊断，不中断整个文件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// 行长度不足，缺少被引用的列
    MissingColumn { column: usize, row_len: usize },
    /// 数量列为空
    EmptyQuantity,
    /// 数量列无法解析为整数
    InvalidQuantity { value: String },
    /// 去除空白后标识为空
    EmptyIdentifier,
    /// 数量为负数
    NegativeQuantity { value: i64 },
    /// 数量为 0（仅当零数量策略为 Skip）
    ZeroQuantity,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingColumn { column, row_len } => {
                write!(f, "缺少第 {} 列（该行仅 {} 列）", column, row_len)
            }
            SkipReason::EmptyQuantity => write!(f, "数量为空"),
            SkipReason::InvalidQuantity { value } => write!(f, "数量无法解析为整数: {}", value),
            SkipReason::EmptyIdentifier => write!(f, "产品标识为空"),
            SkipReason::NegativeQuantity { value } => write!(f, "数量为负数: {}", value),
            SkipReason::ZeroQuantity => write!(f, "数量为 0"),
        }
    }
}

// ==========================================
// 零数量策略 (Zero Quantity Policy)
// ==========================================
// 供应商可能用 0 表示取消行，默认放行
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroQuantityPolicy {
    #[default]
    Accept, // 原样输出
    Skip,   // 丢弃并记录诊断
}

impl fmt::Display for ZeroQuantityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZeroQuantityPolicy::Accept => write!(f, "accept"),
            ZeroQuantityPolicy::Skip => write!(f, "skip"),
        }
    }
}

impl std::str::FromStr for ZeroQuantityPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "accept" => Ok(ZeroQuantityPolicy::Accept),
            "skip" => Ok(ZeroQuantityPolicy::Skip),
            other => Err(format!("未知的零数量策略: {}（可选 accept/skip）", other)),
        }
    }
}
