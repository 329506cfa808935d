// ==========================================
// 订单标准化系统 - 核心库
// ==========================================
// 职责: 供应商 CSV 采购订单 → 标准产品订单
// 管道: 检测配置 → 标准化 → 转换 → JSON
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 检测配置与订单记录
pub mod domain;

// 导入层 - CSV 标准化与产品转换
pub mod importer;

// 配置层 - 供应商预设与转换参数
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

pub use config::{ConverterSettings, PresetRegistry, PresetStore};
pub use domain::{
    ColumnStrategy, ComponentRecord, DetectionConfig, HeaderMode, ProductOrder, RowDiagnostic,
    SkipReason, ZeroQuantityPolicy,
};
pub use importer::{
    ConfigError, ConversionError, ConversionOutcome, CsvOrderNormalizer, NormalizationError,
    OrderImporter, OrderPipeline, PipelineError, PipelineResult, ProductConverter,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 默认输出文件名
pub const OUTPUT_FILE_NAME: &str = "converted_order.json";
