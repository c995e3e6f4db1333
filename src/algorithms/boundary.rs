use crate::error::TraceError;
use crate::model::{BorderSegment, Color, Direction, GridPoint, NodeId, Slot};
use crate::Tracer;
use std::mem;

/// Walk the four image edges with the interior on the left of travel,
/// starting at pixel (0,0): down the left edge, east along the bottom, north
/// up the right edge, west along the top. Every color transition between
/// consecutive border pixels becomes a border node at the separating grid
/// point; the stretches in between become border segments that accumulate
/// only the image corner points. The last open stretch wraps around to the
/// first node, closing the border ring.
pub(crate) fn scan_border(t: &mut Tracer) -> Result<(), TraceError> {
    let w = t.raster.width();
    let h = t.raster.height();
    if w == 0 || h == 0 {
        return Err(TraceError::NoBorderNode);
    }

    let mut scan = BorderScan {
        first: None,
        head_points: Vec::new(),
        last: None,
        run_points: Vec::new(),
        run_color: t.raster.color_at(0, 0),
    };

    // left edge, pixels (0, y)
    for y in 1..h {
        let c = t.raster.color_at(0, y);
        if c != scan.run_color {
            scan.transition(t, GridPoint::new(0, y), Direction::South, c);
        }
    }
    scan.corner(GridPoint::new(0, h));
    // bottom edge, pixels (x, h-1)
    for x in 1..w {
        let c = t.raster.color_at(x, h - 1);
        if c != scan.run_color {
            scan.transition(t, GridPoint::new(x, h), Direction::East, c);
        }
    }
    scan.corner(GridPoint::new(w, h));
    // right edge, pixels (w-1, y), bottom to top
    for y in (0..h - 1).rev() {
        let c = t.raster.color_at(w - 1, y);
        if c != scan.run_color {
            scan.transition(t, GridPoint::new(w, y + 1), Direction::North, c);
        }
    }
    scan.corner(GridPoint::new(w, 0));
    // top edge, pixels (x, 0), right to left
    for x in (0..w - 1).rev() {
        let c = t.raster.color_at(x, 0);
        if c != scan.run_color {
            scan.transition(t, GridPoint::new(x + 1, 0), Direction::West, c);
        }
    }
    scan.finish(t)
}

struct BorderScan {
    first: Option<NodeId>,
    head_points: Vec<GridPoint>,
    last: Option<NodeId>,
    run_points: Vec<GridPoint>,
    run_color: Color,
}

impl BorderScan {
    /// Slot creation order is fixed: back toward the previous node, the
    /// interior stub, then the open forward continuation.
    fn transition(&mut self, t: &mut Tracer, at: GridPoint, travel: Direction, color: Color) {
        let slots = [
            Slot::stub(travel.invert()),
            Slot::stub(travel.rotate_left()),
            Slot::stub(travel),
        ];
        let id = t.add_node(at, slots, self.run_color);
        match self.last {
            Some(prev) => {
                let prev_pos = t.nodes[prev as usize].pos;
                t.draw_polyline(prev_pos, &self.run_points, at);
                let points = mem::take(&mut self.run_points);
                let seg =
                    t.add_segment(BorderSegment::new(points, self.run_color, Color::OUTSIDE));
                let prev_fwd = t.nodes[prev as usize].slots[2].dir;
                t.link(prev, prev_fwd, id, travel.invert(), seg);
            }
            None => {
                self.first = Some(id);
                self.head_points = mem::take(&mut self.run_points);
            }
        }
        self.last = Some(id);
        self.run_color = color;
    }

    fn corner(&mut self, p: GridPoint) {
        self.run_points.push(p);
    }

    fn finish(mut self, t: &mut Tracer) -> Result<(), TraceError> {
        let (first, last) = match (self.first, self.last) {
            (Some(f), Some(l)) => (f, l),
            _ => return Err(TraceError::NoBorderNode),
        };
        let mut points = mem::take(&mut self.run_points);
        points.push(GridPoint::new(0, 0));
        points.append(&mut self.head_points);
        let last_pos = t.nodes[last as usize].pos;
        let first_pos = t.nodes[first as usize].pos;
        t.draw_polyline(last_pos, &points, first_pos);
        let seg = t.add_segment(BorderSegment::new(points, self.run_color, Color::OUTSIDE));
        let last_fwd = t.nodes[last as usize].slots[2].dir;
        let first_back = t.nodes[first as usize].slots[0].dir;
        t.link(last, last_fwd, first, first_back, seg);
        Ok(())
    }
}
