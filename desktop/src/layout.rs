/// 比較パネルの分割レイアウト
///
/// 1 → 全面1枚 / 2 → 左右2枚 / 3 → 上2枚+下1枚 / 4 → 2x2
pub fn panel_rows(count: usize) -> Vec<Vec<usize>> {
    match count {
        0 | 1 => vec![vec![0]],
        2 => vec![vec![0, 1]],
        3 => vec![vec![0, 1], vec![2]],
        _ => vec![vec![0, 1], vec![2, 3]],
    }
}
