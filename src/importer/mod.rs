// ==========================================
// Sweet Hub - 导入层
// ==========================================
// 职责: 储藏室库存文件 (CSV / Excel) 解析与映射
// ==========================================

pub mod error;
pub mod file_parser;
pub mod stock_importer;

pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawRow, UniversalFileParser};
pub use stock_importer::{RowError, StockImportOutcome, StockImporter};
