use crate::model::Color;

/// Optional visualization hook. The tracer reports every traced border
/// polyline as a line strip and every created node; the pipeline result is
/// identical with no sink attached.
pub trait DebugSink {
    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32);
    fn draw_node(&mut self, x: f32, y: f32, color: Color);
}
