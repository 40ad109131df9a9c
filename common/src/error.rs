//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    #[error("Export error: {0}")]
    Export(String),
}

#[cfg(feature = "excel")]
impl From<rust_xlsxwriter::XlsxError> for Error {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        Error::Export(e.to_string())
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
