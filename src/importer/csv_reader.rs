// ==========================================
// 订单标准化系统 - CSV 行读取器
// ==========================================
// 阶段 0: 原始字节 → 原始行
// 规则: 逗号分隔，双引号转义，无表头（表头判定在标准化阶段）
// ==========================================

use crate::importer::error::NormalizationError;
use crate::importer::order_pipeline_trait::RowReader;
use csv::ReaderBuilder;
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use std::borrow::Cow;
use tracing::{debug, warn};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// 原始行（已 TRIM 前的单元格）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub row_number: usize, // 记录起始行号（从 1 开始）
    pub cells: Vec<String>,
}

impl RawRow {
    pub fn new(row_number: usize, cells: Vec<String>) -> Self {
        Self { row_number, cells }
    }

    pub fn cell(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }

    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.trim().is_empty())
    }
}

// ==========================================
// CsvRowReader 实现
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct CsvRowReader {
    encoding: &'static Encoding,
}

impl Default for CsvRowReader {
    fn default() -> Self {
        Self::new(UTF_8)
    }
}

impl CsvRowReader {
    pub fn new(encoding: &'static Encoding) -> Self {
        Self { encoding }
    }

    /// 按配置编码解码（BOM 优先）
    ///
    /// UTF-8 解码失败时回退 WINDOWS-1252（供应商导出常见编码），
    /// 其他编码的无法解码字节替换为 U+FFFD
    fn decode<'b>(&self, bytes: &'b [u8]) -> Cow<'b, str> {
        let (text, used, had_errors) = self.encoding.decode(bytes);
        if !had_errors {
            if used != self.encoding {
                debug!(encoding = used.name(), "按 BOM 识别编码");
            }
            return text;
        }

        if used == UTF_8 {
            warn!("CSV 不是合法 UTF-8，按 WINDOWS-1252 解码");
            let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
            return WINDOWS_1252.decode_without_bom_handling(body).0;
        }

        warn!(encoding = used.name(), "CSV 含无法解码的字节，已替换为 U+FFFD");
        text
    }
}

impl RowReader for CsvRowReader {
    fn read_rows(&self, bytes: &[u8]) -> Result<Vec<RawRow>, NormalizationError> {
        let text = self.decode(bytes);

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // 允许行长度不一致
            .from_reader(text.as_bytes());

        let mut rows = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            let row_number = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(idx + 1);

            let row = RawRow::new(row_number, record.iter().map(str::to_string).collect());

            // 跳过完全空白的行
            if row.is_blank() {
                debug!(row_number, "跳过空白行");
                continue;
            }

            rows.push(row);
        }

        Ok(rows)
    }
}
