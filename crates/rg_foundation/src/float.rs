// crates/rg_foundation/src/float.rs

//! 浮点数值工具和常量
//!
//! 径向几何按步长生成序列（半径环、方位角），
//! 需要在浮点累积误差下稳定地判定“端点是否恰好落在步长上”。

// ============================================================================
// 数值常量
// ============================================================================

/// 步长计数的相对容差
///
/// `(end - start) / step` 与最近整数之差小于该值时视为整数。
pub const STEP_COUNT_TOLERANCE: f64 = 1e-9;

// ============================================================================
// 工具函数
// ============================================================================

/// 近似相等（绝对容差）
#[inline]
pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}

/// 近似相等（相对容差，带绝对下限）
#[inline]
pub fn approx_eq_rel(a: f64, b: f64, rel: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= rel * scale
}

/// 区间 `span` 内可容纳的完整步数（含容差）
///
/// 返回满足 `k * step <= span` 的最大 `k`；当 `span / step` 仅因舍入误差
/// 略小于某个整数时，取该整数。调用方需保证 `step > 0`、`span >= 0`。
///
/// ```
/// use rg_foundation::float::whole_steps;
///
/// assert_eq!(whole_steps(150.0, 50.0), 3);
/// assert_eq!(whole_steps(0.3, 0.1), 3);
/// assert_eq!(whole_steps(170.0, 50.0), 3);
/// ```
#[inline]
pub fn whole_steps(span: f64, step: f64) -> usize {
    let ratio = span / step;
    let nearest = ratio.round();
    let k = if (ratio - nearest).abs() <= STEP_COUNT_TOLERANCE * nearest.max(1.0) {
        nearest
    } else {
        ratio.floor()
    };
    if k <= 0.0 {
        0
    } else {
        k as usize
    }
}
