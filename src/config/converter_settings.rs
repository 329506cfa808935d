use crate::domain::types::ZeroQuantityPolicy;
use serde::{Deserialize, Serialize};

/// 产品转换参数
///
/// 来源：命令行 / 环境变量（ORDER_NORMALIZER_ZERO_QUANTITY），缺省全部取默认值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConverterSettings {
    /// 零数量行的处理方式（默认 accept：供应商可能用 0 表示取消行）
    #[serde(default)]
    pub zero_quantity: ZeroQuantityPolicy,
}
