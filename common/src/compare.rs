//! シート間のテーブル比較
//!
//! 同じ種別のテーブル2つを想定事故の識別子で突き合わせ、
//! 一致（Δ%付き）/ 左のみ / 右のみ に分類する。

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;
use tracing::warn;

use crate::error::{Error, Result};
use crate::types::{Table, TableKind, TableRow, WorkbookData};

/// 行の突き合わせ結果区分
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    /// 両シートに存在
    Both,
    /// 左シートのみ（削除された想定事故）
    OnlyLeft,
    /// 右シートのみ（追加された想定事故）
    OnlyRight,
}

impl RowStatus {
    pub fn label(self) -> &'static str {
        match self {
            RowStatus::Both => "both",
            RowStatus::OnlyLeft => "only in left",
            RowStatus::OnlyRight => "only in right",
        }
    }
}

/// 突き合わせ結果1行
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRow {
    pub contingency: String,
    pub issue: String,
    pub value_left: Option<f64>,
    pub value_right: Option<f64>,
    pub percent_left: Option<f64>,
    pub percent_right: Option<f64>,
    /// 右% - 左%（どちらかが未解釈ならNone）
    pub delta_percent: Option<f64>,
    pub status: RowStatus,
}

/// (左シート, 右シート, テーブル種別) 1組の比較結果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableComparison {
    pub kind: TableKind,
    pub sheet_left: String,
    pub sheet_right: String,
    pub rows: Vec<CompareRow>,
    /// 片側のテーブル内で重複していた識別子（先に出現した行を採用）
    pub duplicate_ids: Vec<String>,
}

impl TableComparison {
    pub fn count(&self, status: RowStatus) -> usize {
        self.rows.iter().filter(|row| row.status == status).count()
    }
}

/// 同じ種別のテーブル2つを比較する
///
/// 出力順は決定的: 区分（both → only in left → only in right）、
/// Δ%の降順（未解釈は末尾）、識別子の昇順。
pub fn compare_tables(
    left: &Table,
    right: &Table,
    sheet_left: &str,
    sheet_right: &str,
) -> TableComparison {
    debug_assert_eq!(left.kind, right.kind);

    let mut duplicate_ids = Vec::new();
    let left_map = index_rows(left, &mut duplicate_ids);
    let right_map = index_rows(right, &mut duplicate_ids);
    duplicate_ids.sort();
    duplicate_ids.dedup();
    if !duplicate_ids.is_empty() {
        warn!(
            table = left.kind.label(),
            ids = ?duplicate_ids,
            "duplicate contingency identifiers, first occurrence wins"
        );
    }

    // 和集合を出現順で作る（左の行、続いて右にしかない行）
    let mut ordered_ids: Vec<&str> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for row in left.rows.iter().chain(right.rows.iter()) {
        if seen.insert(row.contingency.as_str()) {
            ordered_ids.push(row.contingency.as_str());
        }
    }

    let mut rows: Vec<CompareRow> = ordered_ids
        .into_iter()
        .filter_map(|id| {
            let (l, r) = (left_map.get(id), right_map.get(id));
            let status = match (l, r) {
                (Some(_), Some(_)) => RowStatus::Both,
                (Some(_), None) => RowStatus::OnlyLeft,
                (None, Some(_)) => RowStatus::OnlyRight,
                (None, None) => return None,
            };
            let issue = match (l, r) {
                (Some(l), _) if !l.issue.is_empty() => l.issue.clone(),
                (_, Some(r)) => r.issue.clone(),
                (Some(l), None) => l.issue.clone(),
                (None, None) => String::new(),
            };
            let percent_left = l.and_then(|row| row.percent);
            let percent_right = r.and_then(|row| row.percent);
            let delta_percent = match (percent_left, percent_right) {
                (Some(a), Some(b)) => Some(b - a),
                _ => None,
            };
            Some(CompareRow {
                contingency: id.to_string(),
                issue,
                value_left: l.and_then(|row| row.value),
                value_right: r.and_then(|row| row.value),
                percent_left,
                percent_right,
                delta_percent,
                status,
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        a.status
            .cmp(&b.status)
            .then_with(|| match (a.delta_percent, b.delta_percent) {
                (Some(da), Some(db)) => db.total_cmp(&da),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            })
            .then_with(|| a.contingency.cmp(&b.contingency))
    });

    TableComparison {
        kind: left.kind,
        sheet_left: sheet_left.to_string(),
        sheet_right: sheet_right.to_string(),
        rows,
        duplicate_ids,
    }
}

/// 識別子から行へのマップを作る（重複は先勝ち）
fn index_rows<'a>(table: &'a Table, duplicates: &mut Vec<String>) -> HashMap<&'a str, &'a TableRow> {
    let mut map: HashMap<&str, &TableRow> = HashMap::with_capacity(table.rows.len());
    for row in &table.rows {
        if map.contains_key(row.contingency.as_str()) {
            duplicates.push(row.contingency.clone());
        } else {
            map.insert(row.contingency.as_str(), row);
        }
    }
    map
}

/// 2シートを全種別について比較する
///
/// 両方のシートに存在する種別だけが結果に含まれる。
pub fn compare_sheet_pair(
    data: &WorkbookData,
    sheet_left: &str,
    sheet_right: &str,
) -> Result<BTreeMap<TableKind, TableComparison>> {
    let left = data
        .sheet(sheet_left)
        .ok_or_else(|| Error::SheetNotFound(sheet_left.to_string()))?;
    let right = data
        .sheet(sheet_right)
        .ok_or_else(|| Error::SheetNotFound(sheet_right.to_string()))?;

    let mut results = BTreeMap::new();
    for kind in TableKind::ALL {
        let (Some(l), Some(r)) = (left.get(kind), right.get(kind)) else {
            continue;
        };
        results.insert(kind, compare_tables(l, r, sheet_left, sheet_right));
    }
    Ok(results)
}
