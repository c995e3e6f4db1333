pub mod debug;
pub mod error;
pub mod model;
pub mod raster;
pub mod geometry {
    pub mod simplify;
    pub mod smooth;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod assemble;
    pub mod boundary;
    pub mod trace_edge;
}
mod json;

use std::collections::BTreeMap;

pub use debug::DebugSink;
pub use error::TraceError;
pub use model::{
    BorderSegment, Color, DirectedSegment, Direction, GridPoint, Node, NodeId, Polygon, SegmentId,
    Slot, Vec2,
};
pub use raster::RasterSampler;

/// Caller-supplied triangulator. Input is one closed outline in order;
/// output is a vertex buffer plus triangle indices into it.
pub trait Tessellator {
    fn triangulate(&mut self, outline: &[Vec2]) -> (Vec<Vec2>, Vec<u32>);
}

/// State for one pipeline run over one raster. Nodes and segments live in
/// arenas addressed by u32 ids; `pending` maps grid points to nodes that
/// still have unvisited slots and doubles as the junction lookup.
pub struct Tracer<'a> {
    pub(crate) raster: RasterSampler<'a>,
    pub(crate) nodes: Vec<Node>,
    pub(crate) segments: Vec<BorderSegment>,
    pub(crate) pending: BTreeMap<(i32, i32), NodeId>,
    pub(crate) debug: Option<&'a mut dyn DebugSink>,
}

impl<'a> Tracer<'a> {
    pub fn new(raster: RasterSampler<'a>) -> Tracer<'a> {
        Tracer {
            raster,
            nodes: Vec::new(),
            segments: Vec::new(),
            pending: BTreeMap::new(),
            debug: None,
        }
    }

    pub fn with_debug_sink(raster: RasterSampler<'a>, sink: &'a mut dyn DebugSink) -> Tracer<'a> {
        Tracer {
            debug: Some(sink),
            ..Tracer::new(raster)
        }
    }

    /// Run the full pipeline: border scan, interior stub tracing to a
    /// fixpoint, then face assembly. Consumes the tracer; the arenas move
    /// into the result.
    pub fn trace(mut self) -> Result<TraceResult, TraceError> {
        #[cfg(feature = "trace_prof")]
        let t_all = std::time::Instant::now();

        #[cfg(feature = "trace_prof")]
        let t_border = std::time::Instant::now();
        algorithms::boundary::scan_border(&mut self)?;
        #[cfg(feature = "trace_prof")]
        let border_ms = t_border.elapsed().as_secs_f64() * 1000.0;

        #[cfg(feature = "trace_prof")]
        let t_stubs = std::time::Instant::now();
        algorithms::assemble::trace_stubs(&mut self)?;
        #[cfg(feature = "trace_prof")]
        let stubs_ms = t_stubs.elapsed().as_secs_f64() * 1000.0;

        #[cfg(feature = "trace_prof")]
        let t_faces = std::time::Instant::now();
        let polygons = algorithms::assemble::assemble_all(&mut self)?;
        #[cfg(feature = "trace_prof")]
        eprintln!(
            "trace_full border_ms={:.3} stubs_ms={:.3} faces_ms={:.3} total_ms={:.3}",
            border_ms,
            stubs_ms,
            t_faces.elapsed().as_secs_f64() * 1000.0,
            t_all.elapsed().as_secs_f64() * 1000.0
        );

        debug_assert!(self.pending.is_empty());
        Ok(TraceResult {
            width: self.raster.width(),
            height: self.raster.height(),
            nodes: self.nodes,
            segments: self.segments,
            polygons,
        })
    }

    pub(crate) fn add_node(&mut self, pos: GridPoint, slots: [Slot; 3], color: Color) -> NodeId {
        let id = self.nodes.len() as NodeId;
        self.nodes.push(Node { pos, slots });
        self.pending.insert((pos.x, pos.y), id);
        if let Some(sink) = self.debug.as_deref_mut() {
            sink.draw_node(pos.x as f32, pos.y as f32, color);
        }
        id
    }

    pub(crate) fn add_segment(&mut self, seg: BorderSegment) -> SegmentId {
        let id = self.segments.len() as SegmentId;
        self.segments.push(seg);
        id
    }

    /// Wire one segment between two slots, forward out of `from`, reverse
    /// out of `to`. Both slots must exist and be unlinked.
    pub(crate) fn link(
        &mut self,
        from: NodeId,
        from_dir: Direction,
        to: NodeId,
        to_dir: Direction,
        seg: SegmentId,
    ) {
        if let Some(s) = self.nodes[from as usize].slot_mut(from_dir) {
            debug_assert!(s.link.is_none());
            s.link = Some((to, DirectedSegment { seg, forward: true }));
        }
        if let Some(s) = self.nodes[to as usize].slot_mut(to_dir) {
            debug_assert!(s.link.is_none());
            s.link = Some((
                from,
                DirectedSegment {
                    seg,
                    forward: false,
                },
            ));
        }
    }

    pub(crate) fn draw_polyline(&mut self, from: GridPoint, pts: &[GridPoint], to: GridPoint) {
        if let Some(sink) = self.debug.as_deref_mut() {
            let mut prev = from;
            for &p in pts.iter().chain(std::iter::once(&to)) {
                sink.draw_line(prev.x as f32, prev.y as f32, p.x as f32, p.y as f32);
                prev = p;
            }
        }
    }
}

/// Output of one trace: the border graph arenas plus the assembled interior
/// faces. Smoothed outlines are computed lazily and cached per segment, so
/// outline access takes `&mut self`.
pub struct TraceResult {
    pub width: i32,
    pub height: i32,
    pub nodes: Vec<Node>,
    pub segments: Vec<BorderSegment>,
    pub polygons: Vec<Polygon>,
}

impl TraceResult {
    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    /// Ordered closed outline of one polygon: per entry, the node position
    /// followed by the segment's smoothed interior points (reversed when
    /// the segment is traversed backward). Panics on an out-of-range index.
    pub fn polygon_outline(&mut self, index: usize) -> Result<Vec<Vec2>, TraceError> {
        let entries = self.polygons[index].entries.clone();
        let mut out = Vec::new();
        for i in 0..entries.len() {
            let (nid, dseg) = entries[i];
            let (next_nid, _) = entries[(i + 1) % entries.len()];
            let pos = self.nodes[nid as usize].pos;
            let next_pos = self.nodes[next_nid as usize].pos;
            out.push(pos.to_vec2());
            self.ensure_smoothed(dseg, pos, next_pos)?;
            let pts = self.segments[dseg.seg as usize].smoothed()?;
            if dseg.forward {
                out.extend_from_slice(pts);
            } else {
                out.extend(pts.iter().rev().copied());
            }
        }
        Ok(out)
    }

    pub fn tessellate_polygon(
        &mut self,
        index: usize,
        tess: &mut dyn Tessellator,
    ) -> Result<(Vec<Vec2>, Vec<u32>), TraceError> {
        let outline = self.polygon_outline(index)?;
        Ok(tess.triangulate(&outline))
    }

    pub fn to_json_value(&mut self) -> Result<serde_json::Value, TraceError> {
        json::result_to_json(self)
    }

    // Smoothed points are cached in the segment's forward orientation no
    // matter which traversal direction asked first.
    fn ensure_smoothed(
        &mut self,
        dseg: DirectedSegment,
        from: GridPoint,
        to: GridPoint,
    ) -> Result<(), TraceError> {
        if self.segments[dseg.seg as usize].has_smoothed() {
            return Ok(());
        }
        let (s, e) = if dseg.forward { (from, to) } else { (to, from) };
        let pts = geometry::smooth::smooth_segment(&self.segments[dseg.seg as usize].points, s, e);
        self.segments[dseg.seg as usize].set_smoothed(pts)
    }
}
