// ==========================================
// 订单标准化系统 - 检测配置
// ==========================================
// 职责: 描述如何从供应商 CSV 列布局重建标准行
// 边界: 非类型化输入 (JSON) → DetectionSpec → 校验 → DetectionConfig
// 生命周期: 每次转换构造一次，之后只读
// ==========================================

use crate::domain::types::HeaderMode;
use crate::importer::error::ConfigError;
use encoding_rs::{Encoding, UTF_8};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// concat 策略未指定分隔符时使用
pub const DEFAULT_CONCAT_SEPARATOR: &str = " ";

// ==========================================
// DetectionSpec - 预设的原始结构（序列化边界）
// ==========================================
// 未知字段 / 缺失字段在此处直接拒绝
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetectionSpec {
    pub mixed: MixedSpec,
    pub quantity_col: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<HeaderMode>,
    /// 文本编码标签（WHATWG 标签，如 "windows-1252"），缺省 UTF-8
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encoding: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MixedSpec {
    #[serde(rename = "type")]
    pub kind: String,
    pub cols: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sep: Option<String>,
}

// ==========================================
// ColumnStrategy - 产品标识列提取策略
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnStrategy {
    /// 取单列
    Single { col: usize },
    /// 按顺序取多列，用分隔符拼接
    Concat { cols: Vec<usize>, sep: String },
}

impl ColumnStrategy {
    /// 策略引用的列（按配置顺序）
    pub fn columns(&self) -> &[usize] {
        match self {
            ColumnStrategy::Single { col } => std::slice::from_ref(col),
            ColumnStrategy::Concat { cols, .. } => cols,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ColumnStrategy::Single { .. } => "single",
            ColumnStrategy::Concat { .. } => "concat",
        }
    }
}

// ==========================================
// DetectionConfig - 已校验的检测配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionConfig {
    mixed: ColumnStrategy,
    quantity_col: usize,
    header: HeaderMode,
    encoding: &'static Encoding,
}

impl DetectionConfig {
    /// 单列策略
    pub fn single(col: usize, quantity_col: usize) -> Self {
        Self {
            mixed: ColumnStrategy::Single { col },
            quantity_col,
            header: HeaderMode::Auto,
            encoding: UTF_8,
        }
    }

    /// 多列拼接策略
    ///
    /// # 错误
    /// - cols 为空 → ConfigError::EmptyColumns
    pub fn concat(
        cols: Vec<usize>,
        sep: impl Into<String>,
        quantity_col: usize,
    ) -> Result<Self, ConfigError> {
        if cols.is_empty() {
            return Err(ConfigError::EmptyColumns);
        }
        Ok(Self {
            mixed: ColumnStrategy::Concat {
                cols,
                sep: sep.into(),
            },
            quantity_col,
            header: HeaderMode::Auto,
            encoding: UTF_8,
        })
    }

    pub fn with_header(mut self, header: HeaderMode) -> Self {
        self.header = header;
        self
    }

    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// 从 JSON 字符串解析并校验
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let spec: DetectionSpec =
            serde_json::from_str(raw).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        Self::try_from(spec)
    }

    /// 从 JSON 值解析并校验
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        let spec: DetectionSpec =
            serde_json::from_value(value).map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;
        Self::try_from(spec)
    }

    pub fn mixed(&self) -> &ColumnStrategy {
        &self.mixed
    }

    pub fn quantity_col(&self) -> usize {
        self.quantity_col
    }

    pub fn header(&self) -> HeaderMode {
        self.header
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// 最大被引用列索引（行长度必须大于该值）
    pub fn max_column(&self) -> usize {
        self.mixed
            .columns()
            .iter()
            .copied()
            .chain(std::iter::once(self.quantity_col))
            .max()
            .unwrap_or(self.quantity_col)
    }
}

/// 列索引: i64 → usize，负数拒绝
fn to_column_index(field: &str, value: i64) -> Result<usize, ConfigError> {
    usize::try_from(value).map_err(|_| ConfigError::NegativeColumn {
        field: field.to_string(),
        value,
    })
}

impl TryFrom<DetectionSpec> for DetectionConfig {
    type Error = ConfigError;

    fn try_from(spec: DetectionSpec) -> Result<Self, Self::Error> {
        let quantity_col = to_column_index("quantity_col", spec.quantity_col)?;

        let kind = spec.mixed.kind.trim().to_lowercase();
        if kind != "single" && kind != "concat" {
            return Err(ConfigError::UnknownStrategy(spec.mixed.kind));
        }

        if spec.mixed.cols.is_empty() {
            return Err(ConfigError::EmptyColumns);
        }

        let cols = spec
            .mixed
            .cols
            .iter()
            .map(|&c| to_column_index("mixed.cols", c))
            .collect::<Result<Vec<usize>, ConfigError>>()?;

        let mixed = if kind == "single" {
            if cols.len() > 1 {
                warn!(cols = ?cols, "single 策略配置了多列，仅使用第一列");
            }
            ColumnStrategy::Single { col: cols[0] }
        } else {
            ColumnStrategy::Concat {
                cols,
                sep: spec
                    .mixed
                    .sep
                    .unwrap_or_else(|| DEFAULT_CONCAT_SEPARATOR.to_string()),
            }
        };

        let encoding = match spec.encoding {
            Some(label) => Encoding::for_label(label.as_bytes())
                .ok_or(ConfigError::UnknownEncoding(label))?,
            None => UTF_8,
        };

        Ok(Self {
            mixed,
            quantity_col,
            header: spec.header.unwrap_or_default(),
            encoding,
        })
    }
}

impl From<&DetectionConfig> for DetectionSpec {
    fn from(config: &DetectionConfig) -> Self {
        let (kind, cols, sep) = match &config.mixed {
            ColumnStrategy::Single { col } => ("single", vec![*col], None),
            ColumnStrategy::Concat { cols, sep } => ("concat", cols.clone(), Some(sep.clone())),
        };
        DetectionSpec {
            mixed: MixedSpec {
                kind: kind.to_string(),
                cols: cols.into_iter().map(|c| c as i64).collect(),
                sep,
            },
            quantity_col: config.quantity_col as i64,
            header: match config.header {
                HeaderMode::Auto => None,
                other => Some(other),
            },
            encoding: (config.encoding != UTF_8).then(|| config.encoding.name().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_concat_preset() {
        let config = DetectionConfig::from_json_value(json!({
            "mixed": {"type": "concat", "cols": [1, 2, 3, 4], "sep": " "},
            "quantity_col": 5
        }))
        .unwrap();

        assert_eq!(
            config.mixed(),
            &ColumnStrategy::Concat {
                cols: vec![1, 2, 3, 4],
                sep: " ".to_string()
            }
        );
        assert_eq!(config.quantity_col(), 5);
        assert_eq!(config.header(), HeaderMode::Auto);
        assert_eq!(config.max_column(), 5);
    }

    #[test]
    fn test_parse_single_preset() {
        let config = DetectionConfig::from_json_str(
            r#"{"mixed": {"type": "single", "cols": [0]}, "quantity_col": 1}"#,
        )
        .unwrap();

        assert_eq!(config.mixed(), &ColumnStrategy::Single { col: 0 });
        assert_eq!(config.max_column(), 1);
    }

    #[test]
    fn test_concat_default_separator() {
        let config = DetectionConfig::from_json_value(json!({
            "mixed": {"type": "concat", "cols": [0, 1]},
            "quantity_col": 2
        }))
        .unwrap();

        match config.mixed() {
            ColumnStrategy::Concat { sep, .. } => assert_eq!(sep, DEFAULT_CONCAT_SEPARATOR),
            other => panic!("期望 concat 策略，实际 {:?}", other),
        }
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let err = DetectionConfig::from_json_value(json!({
            "mixed": {"type": "split", "cols": [0]},
            "quantity_col": 1
        }))
        .unwrap_err();

        assert_eq!(err, ConfigError::UnknownStrategy("split".to_string()));
    }

    #[test]
    fn test_empty_cols_rejected() {
        let err = DetectionConfig::from_json_value(json!({
            "mixed": {"type": "single", "cols": []},
            "quantity_col": 1
        }))
        .unwrap_err();

        assert_eq!(err, ConfigError::EmptyColumns);
        assert_eq!(
            DetectionConfig::concat(vec![], " ", 1).unwrap_err(),
            ConfigError::EmptyColumns
        );
    }

    #[test]
    fn test_negative_quantity_col_rejected() {
        let err = DetectionConfig::from_json_value(json!({
            "mixed": {"type": "single", "cols": [0]},
            "quantity_col": -1
        }))
        .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::NegativeColumn { ref field, value: -1 } if field == "quantity_col"
        ));
    }

    #[test]
    fn test_negative_mixed_col_rejected() {
        let err = DetectionConfig::from_json_value(json!({
            "mixed": {"type": "concat", "cols": [0, -2], "sep": "-"},
            "quantity_col": 1
        }))
        .unwrap_err();

        assert!(matches!(err, ConfigError::NegativeColumn { value: -2, .. }));
    }

    #[test]
    fn test_unknown_and_missing_fields_rejected() {
        let unknown = DetectionConfig::from_json_value(json!({
            "mixed": {"type": "single", "cols": [0]},
            "quantity_col": 1,
            "price_col": 2
        }));
        assert!(matches!(unknown, Err(ConfigError::InvalidFormat(_))));

        let missing = DetectionConfig::from_json_value(json!({
            "mixed": {"type": "single", "cols": [0]}
        }));
        assert!(matches!(missing, Err(ConfigError::InvalidFormat(_))));
    }

    #[test]
    fn test_header_mode_parsed() {
        let config = DetectionConfig::from_json_value(json!({
            "mixed": {"type": "single", "cols": [0]},
            "quantity_col": 1,
            "header": "absent"
        }))
        .unwrap();

        assert_eq!(config.header(), HeaderMode::Absent);
    }

    #[test]
    fn test_encoding_label_parsed() {
        let config = DetectionConfig::from_json_value(json!({
            "mixed": {"type": "single", "cols": [0]},
            "quantity_col": 1,
            "encoding": "latin1"
        }))
        .unwrap();
        assert_eq!(config.encoding(), encoding_rs::WINDOWS_1252);

        let default = DetectionConfig::single(0, 1);
        assert_eq!(default.encoding(), UTF_8);
        assert_eq!(DetectionSpec::from(&default).encoding, None);
        assert_eq!(
            DetectionSpec::from(&config).encoding.as_deref(),
            Some("windows-1252")
        );
    }

    #[test]
    fn test_unknown_encoding_rejected() {
        let err = DetectionConfig::from_json_value(json!({
            "mixed": {"type": "single", "cols": [0]},
            "quantity_col": 1,
            "encoding": "klingon"
        }))
        .unwrap_err();

        assert_eq!(err, ConfigError::UnknownEncoding("klingon".to_string()));
    }

    #[test]
    fn test_detection_spec_from_config() {
        let config = DetectionConfig::concat(vec![0, 1], "/", 2).unwrap();
        let spec = DetectionSpec::from(&config);

        assert_eq!(spec.mixed.kind, "concat");
        assert_eq!(spec.mixed.cols, vec![0, 1]);
        assert_eq!(spec.mixed.sep.as_deref(), Some("/"));
        assert_eq!(DetectionConfig::try_from(spec).unwrap(), config);
    }
}
