//! ワークブック読み込み
//!
//! ファイルを一度だけ開いて全シートを走査し、シートストアを構築する。

use std::path::Path;

use calamine::{open_workbook_auto, Reader};
use tracing::info;

use crate::error::Result;
use crate::extract::extract_tables;
use crate::types::WorkbookData;

/// ワークブックを読み込み、全シートからテーブルを抽出する
///
/// xlsx / xlsm / xls を受け付ける。シートが0枚でも空のストアを返す。
pub fn load_workbook(path: &Path) -> Result<WorkbookData> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_names = workbook.sheet_names().to_vec();

    let mut data = WorkbookData::default();
    for name in sheet_names {
        let range = workbook.worksheet_range(&name)?;
        let tables = extract_tables(&name, &range);
        data.push_sheet(name, tables);
    }

    info!(
        path = %path.display(),
        sheets = data.sheet_names().len(),
        "workbook loaded"
    );
    Ok(data)
}
