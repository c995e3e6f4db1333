use crate::model::Vec2;

/// Ramer-Douglas-Peucker polyline simplification. Endpoints are always kept;
/// the output is a subsequence of the input.
pub fn simplify_rdp(points: &[Vec2], eps: f32) -> Vec<Vec2> {
    if points.len() <= 2 {
        return points.to_vec();
    }
    let mut out = Vec::with_capacity(points.len());
    out.push(points[0]);
    rdp_rec(points, 0, points.len() - 1, eps * eps, &mut out);
    out
}

fn rdp_rec(points: &[Vec2], start: usize, end: usize, eps2: f32, out: &mut Vec<Vec2>) {
    let mut max_d2 = 0.0f32;
    let mut max_i = start;
    for i in start + 1..end {
        let d2 = dist_point_to_seg_sq(points[i], points[start], points[end]);
        if d2 > max_d2 {
            max_d2 = d2;
            max_i = i;
        }
    }
    if max_d2 > eps2 {
        rdp_rec(points, start, max_i, eps2, out);
        rdp_rec(points, max_i, end, eps2, out);
    } else {
        out.push(points[end]);
    }
}

fn dist_point_to_seg_sq(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let vx = b.x - a.x;
    let vy = b.y - a.y;
    let wx = p.x - a.x;
    let wy = p.y - a.y;
    let len2 = vx * vx + vy * vy;
    let t = if len2 > 0.0 {
        ((wx * vx + wy * vy) / len2).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let dx = wx - t * vx;
    let dy = wy - t * vy;
    dx * dx + dy * dy
}
