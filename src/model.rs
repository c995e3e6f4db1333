use crate::error::TraceError;
use serde::{Deserialize, Serialize};

pub type NodeId = u32;
pub type SegmentId = u32;

/// Packed region color: 0xAARRGGBB with alpha forced to 0xFF for every
/// sampled pixel. The outside-of-image sentinel has alpha 0 and therefore
/// never collides with a sampled color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub const OUTSIDE: Color = Color(0);

    pub fn from_rgb(r: u8, g: u8, b: u8) -> Color {
        Color(0xFF00_0000 | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub fn is_outside(self) -> bool {
        self == Color::OUTSIDE
    }

    pub fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }
    pub fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }
    pub fn b(self) -> u8 {
        self.0 as u8
    }
}

/// Point on the crack lattice (pixel corners). For a w*h image the on-image
/// range is x in [0, w], y in [0, h]; y grows down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub fn new(x: i32, y: i32) -> GridPoint {
        GridPoint { x, y }
    }

    pub fn step(self, d: Direction) -> GridPoint {
        let (dx, dy) = d.delta();
        GridPoint {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2 {
            x: self.x as f32,
            y: self.y as f32,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Clockwise quarter turn (screen coordinates, y down).
    pub fn rotate_right(self) -> Direction {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    /// Counterclockwise quarter turn.
    pub fn rotate_left(self) -> Direction {
        match self {
            Direction::North => Direction::West,
            Direction::West => Direction::South,
            Direction::South => Direction::East,
            Direction::East => Direction::North,
        }
    }

    pub fn invert(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
        }
    }

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }
}

/// One segment traversed in a fixed orientation. Every segment is referenced
/// by exactly two slots, one per incident node, with opposite flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectedSegment {
    pub seg: SegmentId,
    pub forward: bool,
}

#[derive(Clone, Debug)]
pub struct Slot {
    pub dir: Direction,
    pub visited: bool,
    pub link: Option<(NodeId, DirectedSegment)>,
}

impl Slot {
    pub fn stub(dir: Direction) -> Slot {
        Slot {
            dir,
            visited: false,
            link: None,
        }
    }
}

/// A three-way junction on the crack lattice. The slot set is fixed at
/// creation; a node is consumed once all three slots have been visited.
#[derive(Clone, Debug)]
pub struct Node {
    pub pos: GridPoint,
    pub slots: [Slot; 3],
}

impl Node {
    pub fn slot(&self, dir: Direction) -> Option<&Slot> {
        self.slots.iter().find(|s| s.dir == dir)
    }

    pub fn slot_mut(&mut self, dir: Direction) -> Option<&mut Slot> {
        self.slots.iter_mut().find(|s| s.dir == dir)
    }

    pub fn fully_visited(&self) -> bool {
        self.slots.iter().all(|s| s.visited)
    }
}

/// Border polyline between two nodes. `points` holds only the interior turn
/// points; the endpoint positions belong to the incident nodes. `left` and
/// `right` are the region colors flanking the forward orientation.
#[derive(Clone, Debug)]
pub struct BorderSegment {
    pub points: Vec<GridPoint>,
    pub left: Color,
    pub right: Color,
    smoothed: Option<Vec<Vec2>>,
}

impl BorderSegment {
    pub fn new(points: Vec<GridPoint>, left: Color, right: Color) -> BorderSegment {
        BorderSegment {
            points,
            left,
            right,
            smoothed: None,
        }
    }

    pub fn has_smoothed(&self) -> bool {
        self.smoothed.is_some()
    }

    pub fn set_smoothed(&mut self, pts: Vec<Vec2>) -> Result<(), TraceError> {
        if self.smoothed.is_some() {
            return Err(TraceError::SmoothedAlreadySet);
        }
        self.smoothed = Some(pts);
        Ok(())
    }

    pub fn smoothed(&self) -> Result<&[Vec2], TraceError> {
        match &self.smoothed {
            Some(pts) => Ok(pts),
            None => Err(TraceError::SmoothedNotSet),
        }
    }
}

/// Closed face walk: alternating (node, outgoing directed segment) entries.
/// `color` is the region kept on the right-hand side of travel.
#[derive(Clone, Debug)]
pub struct Polygon {
    pub entries: Vec<(NodeId, DirectedSegment)>,
    pub color: Color,
    pub holes: Vec<Polygon>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_rotations_cycle() {
        let mut d = Direction::North;
        for _ in 0..4 {
            assert_eq!(d.rotate_right().rotate_left(), d);
            assert_eq!(d.invert().invert(), d);
            d = d.rotate_right();
        }
        assert_eq!(d, Direction::North);
        assert_eq!(Direction::East.rotate_right(), Direction::South);
        assert_eq!(Direction::East.rotate_left(), Direction::North);
    }

    #[test]
    fn delta_matches_screen_orientation() {
        assert_eq!(Direction::North.delta(), (0, -1));
        assert_eq!(Direction::South.delta(), (0, 1));
        let p = GridPoint::new(3, 3).step(Direction::East);
        assert_eq!(p, GridPoint::new(4, 3));
    }

    #[test]
    fn outside_color_never_collides_with_sampled() {
        assert!(Color::OUTSIDE.is_outside());
        assert!(!Color::from_rgb(0, 0, 0).is_outside());
        assert_eq!(Color::from_rgb(0x12, 0x34, 0x56).0, 0xFF12_3456);
    }

    #[test]
    fn smoothed_cache_is_set_once() {
        let mut seg = BorderSegment::new(Vec::new(), Color::from_rgb(1, 2, 3), Color::OUTSIDE);
        assert!(matches!(seg.smoothed(), Err(TraceError::SmoothedNotSet)));
        seg.set_smoothed(vec![Vec2 { x: 1.0, y: 2.0 }]).unwrap();
        assert_eq!(seg.smoothed().unwrap().len(), 1);
        assert!(matches!(
            seg.set_smoothed(Vec::new()),
            Err(TraceError::SmoothedAlreadySet)
        ));
    }
}
