//! Contingency Sheet Comparison 共通ライブラリ
//!
//! GUIから共有される型と抽出・比較ロジック

pub mod compare;
pub mod error;
pub mod extract;
#[cfg(feature = "excel")]
pub mod export;
pub mod types;
pub mod workbook;

pub use compare::{compare_sheet_pair, compare_tables, CompareRow, RowStatus, TableComparison};
pub use error::{Error, Result};
pub use extract::extract_tables;
pub use types::{SheetTables, Table, TableKind, TableRow, WorkbookData};
pub use workbook::load_workbook;
