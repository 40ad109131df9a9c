//! 想定事故テーブルの型定義
//!
//! GUIと共有される型:
//! - TableKind / TableRow / Table: シートから抽出した結果テーブル
//! - SheetTables: 1シート分の抽出結果
//! - WorkbookData: ワークブック全体のシートストア

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

/// 結果テーブルの種別
///
/// 宣言順がそのまま表示順（ACCA Long Term → ACCA → DCwAC）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum TableKind {
    AccaLongTerm,
    Acca,
    DcWAc,
}

impl TableKind {
    pub const ALL: [TableKind; 3] = [TableKind::AccaLongTerm, TableKind::Acca, TableKind::DcWAc];

    /// シート上の見出しテキスト
    pub fn label(self) -> &'static str {
        match self {
            TableKind::AccaLongTerm => "ACCA Long Term",
            TableKind::Acca => "ACCA",
            TableKind::DcWAc => "DCwAC",
        }
    }

    /// 見出しテキストから種別を判定（大文字小文字は無視）
    pub fn from_label(text: &str) -> Option<TableKind> {
        let text = text.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.label().eq_ignore_ascii_case(text))
    }
}

/// 想定事故1件分の行
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    /// 想定事故の識別子（Contingency Events列）
    pub contingency: String,
    /// 発生する問題の説明（Resulting Issue列）
    pub issue: String,
    /// Contingency Value列（解釈できない場合はNone）
    pub value: Option<f64>,
    /// Percent Loading列（解釈できない場合はNone）
    pub percent: Option<f64>,
}

/// 1シート上の1テーブル
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub kind: TableKind,
    pub rows: Vec<TableRow>,
}

impl Table {
    pub fn new(kind: TableKind) -> Self {
        Self {
            kind,
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// 1シート分の抽出結果（見つからなかった種別は含まれない）
#[derive(Debug, Clone, Default)]
pub struct SheetTables {
    tables: BTreeMap<TableKind, Table>,
}

impl SheetTables {
    /// 行を追加する
    ///
    /// 同じ種別のブロックがシート上に複数ある場合は出現順に連結される
    pub fn append(&mut self, kind: TableKind, mut rows: Vec<TableRow>) {
        self.tables
            .entry(kind)
            .or_insert_with(|| Table::new(kind))
            .rows
            .append(&mut rows);
    }

    pub fn get(&self, kind: TableKind) -> Option<&Table> {
        self.tables.get(&kind)
    }

    pub fn kinds(&self) -> impl Iterator<Item = TableKind> + '_ {
        self.tables.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// ワークブック全体のシートストア
///
/// 読み込み時に一度だけ構築され、以後は読み取り専用
#[derive(Debug, Clone, Default)]
pub struct WorkbookData {
    sheet_names: Vec<String>,
    sheets: HashMap<String, SheetTables>,
}

impl WorkbookData {
    pub fn push_sheet(&mut self, name: String, tables: SheetTables) {
        self.sheets.insert(name.clone(), tables);
        self.sheet_names.push(name);
    }

    /// ワークブック上の並び順のままのシート名
    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }

    pub fn sheet(&self, name: &str) -> Option<&SheetTables> {
        self.sheets.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.sheet_names.is_empty()
    }
}
