use pathlab_core::Pos;

/// Manhattan (L1) distance between two positions.
///
/// With unit-cost, 4-directional moves this never overestimates the true
/// distance, so it is an admissible and consistent A* heuristic.
#[inline]
pub fn manhattan(a: Pos, b: Pos) -> i32 {
    (a.row - b.row).abs() + (a.col - b.col).abs()
}
