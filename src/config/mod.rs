// ==========================================
// 订单标准化系统 - 配置层
// ==========================================
// 职责: 供应商预设（检测配置）与转换参数
// 来源: 内置预设 / JSON 预设文件 / 命令行与环境变量
// ==========================================

pub mod converter_settings;
pub mod preset_registry;
pub mod preset_store_trait;

// 重导出
pub use converter_settings::ConverterSettings;
pub use preset_registry::PresetRegistry;
pub use preset_store_trait::PresetStore;
