use crate::error::TraceError;
use crate::model::{BorderSegment, DirectedSegment, Direction, GridPoint, NodeId, Slot};
use crate::Tracer;

pub(crate) struct TracedEdge {
    pub end: NodeId,
    pub seg: DirectedSegment,
    pub preexisted: bool,
}

/// The two pixels flanking the crack segment leaving grid point `p` in
/// direction `d`, left rail first. y grows down.
pub(crate) fn rail_pixels(p: GridPoint, d: Direction) -> (GridPoint, GridPoint) {
    match d {
        Direction::East => (GridPoint::new(p.x, p.y - 1), GridPoint::new(p.x, p.y)),
        Direction::South => (GridPoint::new(p.x, p.y), GridPoint::new(p.x - 1, p.y)),
        Direction::West => (
            GridPoint::new(p.x - 1, p.y),
            GridPoint::new(p.x - 1, p.y - 1),
        ),
        Direction::North => (
            GridPoint::new(p.x - 1, p.y - 1),
            GridPoint::new(p.x, p.y - 1),
        ),
    }
}

/// Follow the crack leaving `start` along `dir` to the next junction,
/// recording turn points on the way. The rail colors sampled at the start
/// point stay invariant for the whole segment; a junction is any point where
/// the resampled rails no longer fit a straight step or a plain turn.
pub(crate) fn trace_edge(
    t: &mut Tracer,
    start: NodeId,
    dir: Direction,
) -> Result<TracedEdge, TraceError> {
    let start_pos = t.nodes[start as usize].pos;
    let (lp, rp) = rail_pixels(start_pos, dir);
    let a = t.raster.color_at_checked(lp.x, lp.y);
    let b = t.raster.color_at_checked(rp.x, rp.y);
    debug_assert_ne!(a, b, "traced slot must sit on a crack");

    let mut pos = start_pos;
    let mut d = dir;
    let mut points: Vec<GridPoint> = Vec::new();
    loop {
        pos = pos.step(d);
        let (lp, rp) = rail_pixels(pos, d);
        let nl = t.raster.color_at_checked(lp.x, lp.y);
        let nr = t.raster.color_at_checked(rp.x, rp.y);
        if nl == a && nr == b {
            continue;
        }
        if nl == a && nr == a {
            points.push(pos);
            d = d.rotate_right();
            continue;
        }
        if nl == b && nr == b {
            points.push(pos);
            d = d.rotate_left();
            continue;
        }

        // three cracks meet here; classify which two leave the junction
        let continuations = if nr == b {
            [d, d.rotate_left()]
        } else if nl == a {
            [d, d.rotate_right()]
        } else if nl == nr {
            [d.rotate_left(), d.rotate_right()]
        } else {
            return Err(TraceError::FourWayJunction { x: pos.x, y: pos.y });
        };

        let back = d.invert();
        let (end, preexisted) = match t.pending.get(&(pos.x, pos.y)) {
            Some(&id) => (id, true),
            None => {
                let slots = [
                    Slot::stub(back),
                    Slot::stub(continuations[0]),
                    Slot::stub(continuations[1]),
                ];
                (t.add_node(pos, slots, a), false)
            }
        };
        // an existing node must have an open slot facing our arrival; a
        // mismatch means a fourth crack converges on this point
        let open = t.nodes[end as usize]
            .slot(back)
            .map_or(false, |s| s.link.is_none());
        if !open {
            return Err(TraceError::FourWayJunction { x: pos.x, y: pos.y });
        }

        t.draw_polyline(start_pos, &points, pos);
        let seg = t.add_segment(BorderSegment::new(points, a, b));
        t.link(start, dir, end, back, seg);
        return Ok(TracedEdge {
            end,
            seg: DirectedSegment { seg, forward: true },
            preexisted,
        });
    }
}
