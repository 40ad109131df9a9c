use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use ctg_compare_common::{export, TableComparison, TableKind};

pub fn save_comparison_excel(
    path: &Path,
    results: &BTreeMap<TableKind, TableComparison>,
) -> Result<()> {
    export::write_comparison(path, results)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

pub fn save_comparison_json(
    path: &Path,
    results: &BTreeMap<TableKind, TableComparison>,
) -> Result<()> {
    let comparisons: Vec<&TableComparison> = results.values().collect();
    let content = serde_json::to_string_pretty(&comparisons)?;
    fs::write(path, content).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
