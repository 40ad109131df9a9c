//! シートのセルグリッドからのテーブル抽出
//!
//! シート上のテーブルブロックの前提:
//! - 本体ヘッダ行の先頭セルが "Contingency Events"
//! - その1行上のどこかにテーブル名（ACCA Long Term / ACCA / DCwAC）がある
//! - データ行はヘッダ行の直後から、完全な空行（またはシート末尾）まで続く

use calamine::{Data, Range};
use tracing::{debug, info};

use crate::types::{SheetTables, TableKind, TableRow};

/// テーブル本体のヘッダ行を示すセルテキスト
const EVENTS_HEADER: &str = "contingency events";

/// シート1枚分のグリッドから3種のテーブルを抽出する
///
/// 見つからなかった種別は結果に含まれない（エラーではない）。
/// ヘッダ行はあるがテーブル名の行が無いブロックは読み飛ばす。
pub fn extract_tables(sheet_name: &str, grid: &Range<Data>) -> SheetTables {
    let mut tables = SheetTables::default();
    let rows: Vec<&[Data]> = grid.rows().collect();

    for i in 0..rows.len() {
        let Some(Data::String(first)) = rows[i].first() else {
            continue;
        };
        if !first.trim().eq_ignore_ascii_case(EVENTS_HEADER) {
            continue;
        }

        // テーブル名は1行上のどこかのセルにある
        let kind = if i > 0 {
            rows[i - 1].iter().find_map(|cell| match cell {
                Data::String(s) => TableKind::from_label(s),
                _ => None,
            })
        } else {
            None
        };
        let Some(kind) = kind else {
            debug!(
                sheet = sheet_name,
                row = i,
                "events header without a table name row, skipped"
            );
            continue;
        };

        let columns = HeaderColumns::resolve(rows[i]);
        let mut parsed = Vec::new();
        for row in rows.iter().skip(i + 1) {
            if row_is_blank(row) {
                break;
            }
            if let Some(table_row) = columns.parse_row(row) {
                parsed.push(table_row);
            }
        }

        info!(
            sheet = sheet_name,
            table = kind.label(),
            rows = parsed.len(),
            "found table"
        );
        tables.append(kind, parsed);
    }

    tables
}

/// ヘッダ行から解決した列位置
///
/// 前方一致（大文字小文字無視）で最初に一致した列を使う。
/// 識別子の "contingency" は "Contingency Events" 列自身に一致する。
struct HeaderColumns {
    contingency: Option<usize>,
    issue: Option<usize>,
    value: Option<usize>,
    percent: Option<usize>,
}

impl HeaderColumns {
    fn resolve(header: &[Data]) -> Self {
        Self {
            contingency: find_col_by_prefix(header, "contingency"),
            issue: find_col_by_prefix(header, "resulting"),
            value: find_col_by_prefix(header, "contingency value"),
            percent: find_col_by_prefix(header, "percent"),
        }
    }

    /// データ行を1件に解釈する
    ///
    /// 識別子セルが空の行は行として扱わない。
    /// 数値セルが解釈できない場合はそのフィールドだけNoneになる。
    fn parse_row(&self, row: &[Data]) -> Option<TableRow> {
        let contingency = self
            .contingency
            .and_then(|c| row.get(c))
            .map(cell_text)
            .unwrap_or_default();
        if contingency.is_empty() {
            return None;
        }

        let issue = self
            .issue
            .and_then(|c| row.get(c))
            .map(cell_text)
            .unwrap_or_default();
        let value = self.value.and_then(|c| row.get(c)).and_then(cell_number);
        let percent = self.percent.and_then(|c| row.get(c)).and_then(cell_number);

        Some(TableRow {
            contingency,
            issue,
            value,
            percent,
        })
    }
}

fn find_col_by_prefix(header: &[Data], prefix: &str) -> Option<usize> {
    header.iter().position(|cell| match cell {
        Data::String(s) => s.trim().to_ascii_lowercase().starts_with(prefix),
        _ => false,
    })
}

/// セルを表示用文字列にする（数値セルの識別子も許容）
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// セルを数値として解釈する
///
/// 文字列セルは "88.2%" のような%付き表記を許容する。
/// 解釈できないセルはNone（行ごと捨てない）。
fn cell_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => {
            let text = s.replace('%', "");
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            match text.parse::<f64>() {
                Ok(v) => Some(v),
                Err(_) => {
                    debug!(cell = %s, "unparsed numeric cell");
                    None
                }
            }
        }
        _ => None,
    }
}

fn row_is_blank(row: &[Data]) -> bool {
    row.iter().all(|cell| match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(cells: &[(u32, u32, Data)], rows: u32, cols: u32) -> Range<Data> {
        let mut range = Range::new((0, 0), (rows - 1, cols - 1));
        for (r, c, value) in cells {
            range.set_value((*r, *c), value.clone());
        }
        range
    }

    fn s(text: &str) -> Data {
        Data::String(text.to_string())
    }

    /// ACCA Long Term と ACCA の2ブロックを持つシート
    fn two_table_sheet() -> Range<Data> {
        grid(
            &[
                (0, 0, s("ACCA Long Term")),
                (1, 0, s("Contingency Events")),
                (1, 1, s("Resulting Issue")),
                (1, 2, s("Contingency Value")),
                (1, 3, s("Percent Loading")),
                (2, 0, s("LN-101 Outage")),
                (2, 1, s("Overload on LN-102")),
                (2, 2, Data::Float(132.0)),
                (2, 3, Data::Float(95.5)),
                (3, 0, s("TX-7 Outage")),
                (3, 1, s("XFMR overload")),
                (3, 2, Data::Int(80)),
                (3, 3, s("88.2%")),
                // 4行目は空行でブロック終端
                (5, 2, s("ACCA")),
                (6, 0, s("Contingency Events")),
                (6, 1, s("Resulting Issue")),
                (6, 2, s("Contingency Value")),
                (6, 3, s("Percent Loading")),
                (7, 0, s("C1")),
                (7, 1, s("Bus undervoltage")),
                (7, 3, Data::Float(50.0)),
            ],
            8,
            4,
        )
    }

    #[test]
    fn test_extract_finds_tables_by_kind() {
        let tables = extract_tables("Case A", &two_table_sheet());

        let long_term = tables.get(TableKind::AccaLongTerm).unwrap();
        assert_eq!(long_term.len(), 2);
        assert_eq!(long_term.rows[0].contingency, "LN-101 Outage");
        assert_eq!(long_term.rows[0].issue, "Overload on LN-102");
        assert_eq!(long_term.rows[0].value, Some(132.0));
        assert_eq!(long_term.rows[0].percent, Some(95.5));

        let acca = tables.get(TableKind::Acca).unwrap();
        assert_eq!(acca.len(), 1);
        assert_eq!(acca.rows[0].contingency, "C1");
        assert_eq!(acca.rows[0].percent, Some(50.0));

        // DCwACブロックが無くても他の抽出には影響しない
        assert!(tables.get(TableKind::DcWAc).is_none());
    }

    #[test]
    fn test_extract_percent_suffix_and_int_cells() {
        let tables = extract_tables("Case A", &two_table_sheet());
        let long_term = tables.get(TableKind::AccaLongTerm).unwrap();

        assert_eq!(long_term.rows[1].value, Some(80.0));
        assert_eq!(long_term.rows[1].percent, Some(88.2));
    }

    #[test]
    fn test_extract_malformed_percent_kept_as_none() {
        let range = grid(
            &[
                (0, 0, s("DCwAC")),
                (1, 0, s("Contingency Events")),
                (1, 1, s("Resulting Issue")),
                (1, 2, s("Percent Loading")),
                (2, 0, s("D1")),
                (2, 1, s("Overload")),
                (2, 2, s("n/a")),
            ],
            3,
            3,
        );
        let tables = extract_tables("Case A", &range);

        let dcwac = tables.get(TableKind::DcWAc).unwrap();
        assert_eq!(dcwac.len(), 1);
        assert_eq!(dcwac.rows[0].contingency, "D1");
        assert_eq!(dcwac.rows[0].percent, None);
    }

    #[test]
    fn test_extract_skips_row_without_identifier() {
        let range = grid(
            &[
                (0, 1, s("ACCA")),
                (1, 0, s("Contingency Events")),
                (1, 1, s("Resulting Issue")),
                (1, 2, s("Percent Loading")),
                (2, 1, s("issue only, no identifier")),
                (2, 2, Data::Float(90.0)),
                (3, 0, s("C2")),
                (3, 2, Data::Float(70.0)),
            ],
            4,
            3,
        );
        let tables = extract_tables("Case A", &range);

        let acca = tables.get(TableKind::Acca).unwrap();
        assert_eq!(acca.len(), 1);
        assert_eq!(acca.rows[0].contingency, "C2");
    }

    #[test]
    fn test_extract_header_without_name_row_is_skipped() {
        // 先頭行のヘッダには「1行上のテーブル名」が存在しない
        let range = grid(
            &[
                (0, 0, s("Contingency Events")),
                (0, 1, s("Percent Loading")),
                (1, 0, s("C1")),
                (1, 1, Data::Float(55.0)),
            ],
            2,
            2,
        );
        let tables = extract_tables("Case A", &range);
        assert!(tables.is_empty());
    }

    #[test]
    fn test_extract_unknown_name_row_is_skipped() {
        let range = grid(
            &[
                (0, 0, s("Some other table")),
                (1, 0, s("Contingency Events")),
                (1, 1, s("Percent Loading")),
                (2, 0, s("C1")),
                (2, 1, Data::Float(55.0)),
            ],
            3,
            2,
        );
        let tables = extract_tables("Case A", &range);
        assert!(tables.is_empty());
    }

    #[test]
    fn test_extract_duplicate_blocks_are_concatenated() {
        let range = grid(
            &[
                (0, 0, s("ACCA")),
                (1, 0, s("Contingency Events")),
                (1, 1, s("Percent Loading")),
                (2, 0, s("C1")),
                (2, 1, Data::Float(50.0)),
                (4, 0, s("ACCA")),
                (5, 0, s("Contingency Events")),
                (5, 1, s("Percent Loading")),
                (6, 0, s("C2")),
                (6, 1, Data::Float(60.0)),
            ],
            7,
            2,
        );
        let tables = extract_tables("Case A", &range);

        let acca = tables.get(TableKind::Acca).unwrap();
        assert_eq!(acca.len(), 2);
        assert_eq!(acca.rows[0].contingency, "C1");
        assert_eq!(acca.rows[1].contingency, "C2");
    }

    #[test]
    fn test_extract_empty_grid() {
        let range = Range::new((0, 0), (0, 0));
        let tables = extract_tables("Empty", &range);
        assert!(tables.is_empty());
    }
}
