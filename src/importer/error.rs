// ==========================================
// 订单标准化系统 - 管道错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分类: 配置 / 标准化 / 转换 / 输出
// 行级缺陷不在此列，走诊断记录
// ==========================================

use thiserror::Error;

/// 检测配置错误（整个调用无法继续）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("未知的列提取策略: {0}（仅支持 single/concat）")]
    UnknownStrategy(String),

    #[error("列提取策略的 cols 为空")]
    EmptyColumns,

    #[error("列索引不能为负数 (字段 {field}): {value}")]
    NegativeColumn { field: String, value: i64 },

    #[error("未知的文本编码: {0}")]
    UnknownEncoding(String),

    #[error("配置格式错误: {0}")]
    InvalidFormat(String),

    #[error("供应商预设 {supplier} 无效: {message}")]
    InvalidPreset { supplier: String, message: String },

    #[error("供应商预设不存在: {0}")]
    UnknownPreset(String),

    #[error("预设文件读取失败 ({path}): {message}")]
    PresetFileRead { path: String, message: String },
}

/// 标准化错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizationError {
    #[error("no valid rows: 共 {total_rows} 行，{skipped} 行被跳过")]
    NoValidRows { total_rows: usize, skipped: usize },

    #[error("CSV 解析失败: {0}")]
    CsvParse(String),
}

/// 转换错误（输入结构本身有问题）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    #[error("组件列表为空")]
    EmptyInput,

    #[error("组件记录顺序错乱: 行 {current} 出现在行 {previous} 之后")]
    OutOfOrder { previous: usize, current: usize },
}

/// 输出错误（序列化 / 写文件）
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("JSON 序列化失败: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("文件写入失败 ({path}): {message}")]
    FileWrite { path: String, message: String },
}

/// 管道统一错误类型
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Normalization(#[from] NormalizationError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

impl PipelineError {
    /// 错误类别标签（供调用方分类展示）
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Config(_) => "config",
            PipelineError::Normalization(_) => "normalization",
            PipelineError::Conversion(_) => "conversion",
            PipelineError::Output(_) => "output",
        }
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for NormalizationError {
    fn from(err: csv::Error) -> Self {
        NormalizationError::CsvParse(err.to_string())
    }
}

/// Result 类型别名
pub type PipelineResult<T> = Result<T, PipelineError>;
