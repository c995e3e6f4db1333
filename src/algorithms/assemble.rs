use crate::algorithms::trace_edge::trace_edge;
use crate::error::TraceError;
use crate::model::{Color, DirectedSegment, Direction, Node, NodeId, Polygon};
use crate::Tracer;

/// Trace every interior stub (second as-created slot) to a fixpoint. Nodes
/// created while tracing join the scan on the next round.
pub(crate) fn trace_stubs(t: &mut Tracer) -> Result<(), TraceError> {
    loop {
        let work: Vec<NodeId> = t
            .pending
            .values()
            .copied()
            .filter(|&id| t.nodes[id as usize].slots[1].link.is_none())
            .collect();
        if work.is_empty() {
            return Ok(());
        }
        for id in work {
            // an earlier trace in this round may have filled the slot
            if t.nodes[id as usize].slots[1].link.is_some() {
                continue;
            }
            let dir = t.nodes[id as usize].slots[1].dir;
            trace_edge(t, id, dir)?;
        }
    }
}

/// Assemble every face of the border graph, consuming the pending cache.
/// The single face whose region color is the outside sentinel is walked for
/// bookkeeping but not emitted; every interior face is emitted exactly once.
pub(crate) fn assemble_all(t: &mut Tracer) -> Result<Vec<Polygon>, TraceError> {
    let mut polygons = Vec::new();
    while let Some(start) = t.pending.values().next().copied() {
        for k in 0..3 {
            let (visited, dir) = {
                let s = &t.nodes[start as usize].slots[k];
                (s.visited, s.dir)
            };
            if visited {
                continue;
            }
            let poly = assemble_polygon(t, start, dir)?;
            if !poly.color.is_outside() {
                polygons.push(poly);
            }
        }
        debug_assert!(t.nodes[start as usize].fully_visited());
    }
    Ok(polygons)
}

/// Walk one closed face starting out of `start` along `dir`, tracing
/// uncached segments lazily and marking each departing slot visited. At
/// every arrival the walk takes the rightmost available turn, which keeps
/// one region on the right-hand side for the whole loop; that region is the
/// polygon's color.
pub(crate) fn assemble_polygon(
    t: &mut Tracer,
    start: NodeId,
    dir: Direction,
) -> Result<Polygon, TraceError> {
    let mut entries: Vec<(NodeId, DirectedSegment)> = Vec::new();
    let mut color: Option<Color> = None;
    let mut cur = start;
    let mut d = dir;
    loop {
        let cached = t.nodes[cur as usize].slot(d).and_then(|s| s.link);
        let (next, dseg) = match cached {
            Some(link) => link,
            None => {
                let traced = trace_edge(t, cur, d)?;
                (traced.end, traced.seg)
            }
        };
        mark_visited(t, cur, d);
        entries.push((cur, dseg));

        let side = {
            let seg = &t.segments[dseg.seg as usize];
            if dseg.forward {
                seg.right
            } else {
                seg.left
            }
        };
        debug_assert!(color.map_or(true, |c| c == side));
        color.get_or_insert(side);

        if next == start {
            break;
        }
        let arrival = reverse_slot_dir(&t.nodes[next as usize], dseg)
            .expect("segment wired on both endpoints")
            .invert();
        d = continuation_dir(&t.nodes[next as usize], arrival);
        cur = next;
    }
    Ok(Polygon {
        entries,
        color: color.unwrap_or(Color::OUTSIDE),
        holes: Vec::new(),
    })
}

fn mark_visited(t: &mut Tracer, node: NodeId, dir: Direction) {
    let n = &mut t.nodes[node as usize];
    if let Some(s) = n.slot_mut(dir) {
        s.visited = true;
    }
    if n.fully_visited() {
        let pos = n.pos;
        t.pending.remove(&(pos.x, pos.y));
    }
}

/// Direction of the slot on `node` holding the reverse traversal of `dseg`.
fn reverse_slot_dir(node: &Node, dseg: DirectedSegment) -> Option<Direction> {
    node.slots
        .iter()
        .find(|s| match s.link {
            Some((_, link)) => link.seg == dseg.seg && link.forward != dseg.forward,
            None => false,
        })
        .map(|s| s.dir)
}

/// Rightmost available turn: clockwise of arrival, straight on, then
/// counterclockwise. A three-slot node always offers at least one.
fn continuation_dir(node: &Node, arrival: Direction) -> Direction {
    [arrival.rotate_right(), arrival, arrival.rotate_left()]
        .into_iter()
        .find(|&c| node.slot(c).is_some())
        .expect("three-way junction always has a continuation")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::boundary::scan_border;
    use crate::model::Slot;
    use crate::RasterSampler;

    #[test]
    fn rightmost_turn_prefers_clockwise() {
        use crate::model::GridPoint;
        let node = Node {
            pos: GridPoint::new(2, 2),
            slots: [
                Slot::stub(Direction::West),
                Slot::stub(Direction::North),
                Slot::stub(Direction::East),
            ],
        };
        // arriving eastward: clockwise is south (absent), straight is east
        assert_eq!(continuation_dir(&node, Direction::East), Direction::East);
        // arriving southward: clockwise is west
        assert_eq!(continuation_dir(&node, Direction::South), Direction::West);
    }

    #[test]
    fn stub_tracing_reaches_a_fixpoint() {
        let a = Color::from_rgb(200, 0, 0);
        let b = Color::from_rgb(0, 200, 0);
        let c = Color::from_rgb(0, 0, 200);
        // top half a; bottom half split into b and c
        let mut buf = vec![0u8; 4 * 4 * 3];
        for y in 0..4 {
            for x in 0..4 {
                let col = if y < 2 {
                    a
                } else if x < 2 {
                    b
                } else {
                    c
                };
                let o = (y * 4 + x) * 3;
                buf[o] = col.r();
                buf[o + 1] = col.g();
                buf[o + 2] = col.b();
            }
        }
        let raster = RasterSampler::new(&buf, 4, 4, 12).unwrap();
        let mut t = Tracer::new(raster);
        scan_border(&mut t).unwrap();
        assert_eq!(t.nodes.len(), 3);
        trace_stubs(&mut t).unwrap();
        // the b/c crack meets the band crack at an interior junction
        assert_eq!(t.nodes.len(), 4);
        assert_eq!(t.nodes[3].pos, crate::model::GridPoint::new(2, 2));
        for n in &t.nodes {
            assert!(n.slots[1].link.is_some());
        }
    }
}
