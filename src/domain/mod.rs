// ==========================================
// 订单标准化系统 - 领域模型层
// ==========================================
// 职责: 检测配置、订单记录、领域类型
// 红线: 不含 CSV 解析逻辑，不含 I/O
// ==========================================

pub mod detection;
pub mod order;
pub mod types;

// 重导出核心类型
pub use detection::{ColumnStrategy, DetectionConfig, DetectionSpec, MixedSpec};
pub use order::{
    ComponentRecord, ConversionBatch, ConvertedOrder, NormalizedOrder, ProductOrder,
    RowDiagnostic,
};
pub use types::{HeaderMode, PipelineStage, SkipReason, ZeroQuantityPolicy};
