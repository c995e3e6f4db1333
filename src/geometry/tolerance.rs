// Centralized tolerances and iteration counts for border smoothing

pub const SIMPLIFY_EPS_TIGHT: f32 = 0.25;   // RDP tolerance between Chaikin stages (px)
pub const SIMPLIFY_EPS_LOOSE: f32 = 0.8;    // final RDP tolerance (px)
pub const CHAIKIN_ROUNDS_PRE: usize = 2;    // corner-cut rounds before the tight pass
pub const CHAIKIN_ROUNDS_POST: usize = 6;   // corner-cut rounds before the loose pass

pub const EPS_POS: f32 = 1e-4;              // point coincidence threshold (px)

#[inline]
pub fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}
