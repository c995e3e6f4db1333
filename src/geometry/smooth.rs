use crate::geometry::simplify::simplify_rdp;
use crate::geometry::tolerance::{
    CHAIKIN_ROUNDS_POST, CHAIKIN_ROUNDS_PRE, SIMPLIFY_EPS_LOOSE, SIMPLIFY_EPS_TIGHT,
};
use crate::model::{GridPoint, Vec2};

/// One round of Chaikin corner cutting on an open polyline. Endpoints are
/// pinned; every interior edge is replaced by its 1/4 and 3/4 points.
pub fn chaikin_open(points: &[Vec2]) -> Vec<Vec2> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let mut out = Vec::with_capacity(points.len() * 2);
    out.push(points[0]);
    for w in points.windows(2) {
        let (p, q) = (w[0], w[1]);
        out.push(Vec2 {
            x: 0.75 * p.x + 0.25 * q.x,
            y: 0.75 * p.y + 0.25 * q.y,
        });
        out.push(Vec2 {
            x: 0.25 * p.x + 0.75 * q.x,
            y: 0.25 * p.y + 0.75 * q.y,
        });
    }
    out.push(points[points.len() - 1]);
    out
}

/// Smooth one border segment's interior polyline. `raw` holds only the turn
/// points; the incident node positions are passed in and pinned throughout,
/// then stripped back off so the cached result stays endpoint-free.
pub fn smooth_segment(raw: &[GridPoint], start: GridPoint, end: GridPoint) -> Vec<Vec2> {
    let mut pts = Vec::with_capacity(raw.len() + 2);
    pts.push(start.to_vec2());
    pts.extend(raw.iter().map(|p| p.to_vec2()));
    pts.push(end.to_vec2());

    for _ in 0..CHAIKIN_ROUNDS_PRE {
        pts = chaikin_open(&pts);
    }
    pts = simplify_rdp(&pts, SIMPLIFY_EPS_TIGHT);
    for _ in 0..CHAIKIN_ROUNDS_POST {
        pts = chaikin_open(&pts);
    }
    pts = simplify_rdp(&pts, SIMPLIFY_EPS_LOOSE);

    pts.pop();
    if !pts.is_empty() {
        pts.remove(0);
    }
    pts
}
