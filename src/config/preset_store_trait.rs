// ==========================================
// 订单标准化系统 - 预设读取 Trait
// ==========================================
// 职责: 供应商名 → 检测配置 的只读查询接口
// 红线: 显式注入，不使用进程级全局表
// ==========================================

use crate::domain::detection::DetectionConfig;
use crate::importer::error::ConfigError;

// ==========================================
// PresetStore Trait
// ==========================================
// 实现者: PresetRegistry（内置预设 + JSON 文件）
pub trait PresetStore: Send + Sync {
    /// 按供应商名查找检测配置
    fn get_preset(&self, supplier: &str) -> Option<&DetectionConfig>;

    /// 所有供应商名（有序）
    fn supplier_names(&self) -> Vec<String>;

    /// 查找，不存在时返回 ConfigError::UnknownPreset
    fn require_preset(&self, supplier: &str) -> Result<&DetectionConfig, ConfigError> {
        self.get_preset(supplier)
            .ok_or_else(|| ConfigError::UnknownPreset(supplier.to_string()))
    }
}
