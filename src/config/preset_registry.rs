// ==========================================
// 订单标准化系统 - 供应商预设注册表
// ==========================================
// 职责: 内置预设 + JSON 预设文件加载、合并、查询
// 格式: { "<供应商名>": { "mixed": {...}, "quantity_col": N } }
// ==========================================

use crate::config::preset_store_trait::PresetStore;
use crate::domain::detection::{DetectionConfig, DetectionSpec};
use crate::importer::error::ConfigError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 默认预设文件名
pub const PRESETS_FILE_NAME: &str = "presets.json";

/// 应用配置目录名
pub const APP_DIR_NAME: &str = "order-normalizer";

// ==========================================
// PresetRegistry - 预设注册表
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresetRegistry {
    presets: BTreeMap<String, DetectionConfig>,
}

impl PresetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 内置供应商预设
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.insert(
            "Default Example",
            DetectionConfig::concat(vec![0, 1], " ", 2).expect("内置预设 cols 非空"),
        );
        registry.insert("DrugTops Supplier", DetectionConfig::single(0, 1));
        registry.insert(
            "Cable Supplier",
            DetectionConfig::concat(vec![1, 2, 3, 4], " ", 5).expect("内置预设 cols 非空"),
        );
        registry.insert("Clinic Supplier", DetectionConfig::single(0, 1));
        registry
    }

    /// 从 JSON 字符串加载（逐个预设校验，错误带供应商名）
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let specs: BTreeMap<String, serde_json::Value> =
            serde_json::from_str(raw).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;

        let mut registry = Self::new();
        for (supplier, value) in specs {
            let config = DetectionConfig::from_json_value(value).map_err(|e| {
                ConfigError::InvalidPreset {
                    supplier: supplier.clone(),
                    message: e.to_string(),
                }
            })?;
            registry.insert(supplier, config);
        }

        debug!(count = registry.len(), "预设解析完成");
        Ok(registry)
    }

    /// 从 JSON 文件加载
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::PresetFileRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let registry = Self::from_json_str(&raw)?;
        info!(path = %path.display(), count = registry.len(), "预设文件加载完成");
        Ok(registry)
    }

    /// 分层加载: 内置 → 默认文件（存在时）→ 指定文件，后者覆盖前者
    pub fn layered(default_file: Option<&Path>, extra: Option<&Path>) -> Result<Self, ConfigError> {
        let mut registry = Self::builtin();

        if let Some(path) = default_file.filter(|p| p.exists()) {
            registry.merge(Self::from_path(path)?);
        }

        if let Some(path) = extra {
            registry.merge(Self::from_path(path)?);
        }

        Ok(registry)
    }

    /// 默认预设文件路径: <config_dir>/order-normalizer/presets.json
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(PRESETS_FILE_NAME))
    }

    /// 插入或覆盖预设
    pub fn insert(&mut self, supplier: impl Into<String>, config: DetectionConfig) {
        self.presets.insert(supplier.into(), config);
    }

    /// 合并另一注册表（同名以 other 为准）
    pub fn merge(&mut self, other: PresetRegistry) {
        self.presets.extend(other.presets);
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// 导出为 JSON 值（预设展示用）
    pub fn to_json_value(&self) -> serde_json::Value {
        let specs: BTreeMap<&str, DetectionSpec> = self
            .presets
            .iter()
            .map(|(name, config)| (name.as_str(), DetectionSpec::from(config)))
            .collect();
        serde_json::to_value(specs).unwrap_or_default()
    }
}

impl PresetStore for PresetRegistry {
    fn get_preset(&self, supplier: &str) -> Option<&DetectionConfig> {
        self.presets.get(supplier)
    }

    fn supplier_names(&self) -> Vec<String> {
        self.presets.keys().cloned().collect()
    }
}
