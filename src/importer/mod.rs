// ==========================================
// 订单标准化系统 - 导入层
// ==========================================
// 职责: 供应商 CSV 订单 → 组件记录 → 产品订单
// 流程: 读取 → 标准化 → 转换
// ==========================================

// 模块声明
pub mod component_mapper;
pub mod converter;
pub mod csv_reader;
pub mod data_cleaner;
pub mod error;
pub mod normalizer;
pub mod order_pipeline;
pub mod order_pipeline_trait;

// 重导出核心类型
pub use component_mapper::ComponentMapper as ComponentMapperImpl;
pub use converter::ProductConverter;
pub use csv_reader::{CsvRowReader, RawRow};
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use error::{
    ConfigError, ConversionError, NormalizationError, OutputError, PipelineError, PipelineResult,
};
pub use normalizer::CsvOrderNormalizer;
pub use order_pipeline::{products_from_json, ConversionOutcome, OrderPipeline};

// 重导出 Trait 接口
pub use order_pipeline_trait::{ComponentMapper, DataCleaner, OrderImporter, RowReader};
