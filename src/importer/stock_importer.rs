// ==========================================
// Sweet Hub - 储藏室库存导入映射
// ==========================================
// 职责: 原始行记录 → StoreStockRecord
// 列名: name / quantity / unit / min_quantity（大小写不敏感）
// 红线: 单行错误只记录不中断,缺少必需列则整体失败
// ==========================================

use crate::domain::ingredient::StoreStockRecord;
use crate::engine::unit_registry::UnitRegistry;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{RawRow, UniversalFileParser};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

const COL_NAME: &str = "name";
const COL_QUANTITY: &str = "quantity";
const COL_UNIT: &str = "unit";
const COL_MIN_QUANTITY: &str = "min_quantity";

/// 行级错误
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowError {
    pub row: usize, // 文件行号（表头为第 1 行）
    pub message: String,
}

/// 导入映射结果
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockImportOutcome {
    pub records: Vec<StoreStockRecord>,
    pub row_errors: Vec<RowError>,
}

// ==========================================
// StockImporter - 库存导入映射器
// ==========================================
pub struct StockImporter<'a> {
    registry: Option<&'a UnitRegistry>,
}

impl<'a> StockImporter<'a> {
    /// 不校验单位的导入器
    pub fn new() -> Self {
        Self { registry: None }
    }

    /// 导入时校验单位已注册
    pub fn with_registry(registry: &'a UnitRegistry) -> Self {
        Self {
            registry: Some(registry),
        }
    }

    /// 解析文件并映射
    pub fn import_file<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<StockImportOutcome> {
        let rows = UniversalFileParser.parse(file_path.as_ref())?;
        let outcome = self.map_rows(&rows)?;
        info!(
            file = %file_path.as_ref().display(),
            records = outcome.records.len(),
            row_errors = outcome.row_errors.len(),
            "库存文件解析完成"
        );
        Ok(outcome)
    }

    /// 映射原始行
    pub fn map_rows(&self, rows: &[RawRow]) -> ImportResult<StockImportOutcome> {
        let mut outcome = StockImportOutcome::default();
        let Some(first) = rows.first() else {
            return Ok(outcome);
        };

        for required in [COL_NAME, COL_QUANTITY, COL_UNIT] {
            if lookup(first, required).is_none() {
                return Err(ImportError::MissingColumn(required.to_string()));
            }
        }

        for row in rows {
            let row_no = row.line;
            match self.map_row(row, row_no) {
                Ok(record) => outcome.records.push(record),
                Err(e) => {
                    warn!(row = row_no, error = %e, "库存行映射失败,已跳过");
                    outcome.row_errors.push(RowError {
                        row: row_no,
                        message: e.to_string(),
                    });
                }
            }
        }

        Ok(outcome)
    }

    fn map_row(&self, row: &RawRow, row_no: usize) -> ImportResult<StoreStockRecord> {
        let name = lookup(row, COL_NAME).unwrap_or("").trim();
        if name.is_empty() {
            return Err(ImportError::InvalidField {
                row: row_no,
                column: COL_NAME.to_string(),
                message: "原料名称为空".to_string(),
            });
        }

        let quantity = parse_quantity(row, COL_QUANTITY, row_no)?.ok_or_else(|| {
            ImportError::InvalidField {
                row: row_no,
                column: COL_QUANTITY.to_string(),
                message: "数量为空".to_string(),
            }
        })?;

        let unit = lookup(row, COL_UNIT).unwrap_or("").trim();
        if unit.is_empty() {
            return Err(ImportError::InvalidField {
                row: row_no,
                column: COL_UNIT.to_string(),
                message: "单位为空".to_string(),
            });
        }
        if let Some(registry) = self.registry {
            if !registry.contains(unit) {
                return Err(ImportError::InvalidField {
                    row: row_no,
                    column: COL_UNIT.to_string(),
                    message: format!("未知单位 {}", unit),
                });
            }
        }

        let min_quantity = parse_quantity(row, COL_MIN_QUANTITY, row_no)?;

        Ok(StoreStockRecord {
            name: name.to_string(),
            quantity,
            unit: unit.to_string(),
            min_quantity,
            updated_at: None,
        })
    }
}

impl Default for StockImporter<'_> {
    fn default() -> Self {
        Self::new()
    }
}

// 表头大小写不敏感查找
fn lookup<'r>(row: &'r RawRow, column: &str) -> Option<&'r str> {
    row.cells
        .iter()
        .find(|(k, _)| k.trim().eq_ignore_ascii_case(column))
        .map(|(_, v)| v.as_str())
}

// 空值 → None;非数字/负数/非有限数 → 错误
fn parse_quantity(row: &RawRow, column: &str, row_no: usize) -> ImportResult<Option<f64>> {
    let raw = lookup(row, column).unwrap_or("").trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let value = raw.parse::<f64>().map_err(|_| ImportError::InvalidNumber {
        row: row_no,
        column: column.to_string(),
        raw: raw.to_string(),
    })?;

    if !value.is_finite() || value < 0.0 {
        return Err(ImportError::InvalidField {
            row: row_no,
            column: column.to_string(),
            message: format!("数量必须为非负数, 实际 {}", raw),
        });
    }
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn row(line: usize, pairs: &[(&str, &str)]) -> RawRow {
        RawRow {
            line,
            cells: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        }
    }

    #[test]
    fn test_map_rows_collects_row_errors() {
        let rows = vec![
            row(2, &[("Name", "Sugar"), ("Quantity", "25"), ("Unit", "kg"), ("Min_Quantity", "10")]),
            row(3, &[("Name", "Ghee"), ("Quantity", "abc"), ("Unit", "kg"), ("Min_Quantity", "")]),
            row(4, &[("Name", "Milk"), ("Quantity", "-1"), ("Unit", "liter"), ("Min_Quantity", "")]),
            row(5, &[("Name", ""), ("Quantity", "1"), ("Unit", "kg"), ("Min_Quantity", "")]),
        ];

        let outcome = StockImporter::new().map_rows(&rows).unwrap();

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].min_quantity, Some(10.0));
        let error_rows: Vec<usize> = outcome.row_errors.iter().map(|e| e.row).collect();
        assert_eq!(error_rows, vec![3, 4, 5]);
    }

    #[test]
    fn test_missing_required_column() {
        let rows = vec![row(2, &[("name", "Sugar"), ("qty", "25"), ("unit", "kg")])];
        let result = StockImporter::new().map_rows(&rows);
        assert!(matches!(result, Err(ImportError::MissingColumn(c)) if c == "quantity"));
    }

    #[test]
    fn test_unknown_unit_rejected_with_registry() {
        let registry = UnitRegistry::standard();
        let rows = vec![row(2, &[("name", "Boxes"), ("quantity", "3"), ("unit", "carton")])];

        let outcome = StockImporter::with_registry(&registry).map_rows(&rows).unwrap();

        assert!(outcome.records.is_empty());
        assert_eq!(outcome.row_errors.len(), 1);
    }

    #[test]
    fn test_row_error_points_at_source_line_after_blank_rows() {
        use std::io::Write;

        let mut temp_file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        for line in ["name,quantity,unit", "Sugar,25,kg", ",,", "", "Ghee,abc,kg"] {
            writeln!(temp_file, "{}", line).unwrap();
        }

        let outcome = StockImporter::new().import_file(temp_file.path()).unwrap();

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.row_errors.len(), 1);
        assert_eq!(outcome.row_errors[0].row, 5);
    }
}
