// ==========================================
// Sweet Hub - 导入模块错误类型
// ==========================================
// 文件级错误中断导入;行级错误 (Invalid*) 由 StockImporter 收集后跳过该行
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件级 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("不支持的库存文件格式: .{0}（支持 csv/xlsx/xls/ods）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV 解析失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("表格解析失败: {0}")]
    Spreadsheet(String),

    #[error("缺少必需列: {0}")]
    MissingColumn(String),

    // ===== 行级 =====
    #[error("第 {row} 行 {column} 不是数字: {raw}")]
    InvalidNumber {
        row: usize,
        column: String,
        raw: String,
    },

    #[error("第 {row} 行 {column} 无效: {message}")]
    InvalidField {
        row: usize,
        column: String,
        message: String,
    },
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::Spreadsheet(err.to_string())
    }
}

pub type ImportResult<T> = Result<T, ImportError>;
