use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceError {
    /// The whole image border is a single color, so no border node exists to
    /// anchor the trace.
    NoBorderNode,
    /// Four cracks meet at one grid point. Junctions of degree four are not
    /// representable in the three-slot node model.
    FourWayJunction { x: i32, y: i32 },
    /// Pixel buffer too short for the declared dimensions, or stride smaller
    /// than a row.
    InvalidRaster,
    /// A segment's smoothed polyline was computed twice.
    SmoothedAlreadySet,
    /// A segment's smoothed polyline was read before being computed.
    SmoothedNotSet,
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceError::NoBorderNode => write!(f, "image border has a single color"),
            TraceError::FourWayJunction { x, y } => {
                write!(f, "four-way junction at grid point ({}, {})", x, y)
            }
            TraceError::InvalidRaster => write!(f, "pixel buffer does not match dimensions"),
            TraceError::SmoothedAlreadySet => write!(f, "smoothed polyline already set"),
            TraceError::SmoothedNotSet => write!(f, "smoothed polyline not yet computed"),
        }
    }
}

impl std::error::Error for TraceError {}
