use crate::error::TraceError;
use crate::TraceResult;
use serde::Serialize;
use serde_json::Value;

/// Flat snapshot of a trace: image dimensions plus one record per interior
/// polygon with its packed color and the smoothed outline as [x0, y0, x1,
/// y1, ...].
pub(crate) fn result_to_json(res: &mut TraceResult) -> Result<Value, TraceError> {
    #[derive(Serialize)]
    struct PolySer {
        color: u32,
        points: Vec<f32>,
    }
    #[derive(Serialize)]
    struct Doc {
        width: i32,
        height: i32,
        polygons: Vec<PolySer>,
    }
    let mut polygons = Vec::with_capacity(res.polygon_count());
    for i in 0..res.polygon_count() {
        let outline = res.polygon_outline(i)?;
        let mut points = Vec::with_capacity(outline.len() * 2);
        for p in outline {
            points.push(p.x);
            points.push(p.y);
        }
        polygons.push(PolySer {
            color: res.polygons[i].color.0,
            points,
        });
    }
    Ok(serde_json::to_value(Doc {
        width: res.width,
        height: res.height,
        polygons,
    })
    .unwrap())
}
