use proptest::prelude::*;
use provmap::{Color, RasterSampler, TraceError, TraceResult, Tracer};

fn palette(i: usize) -> Color {
    Color::from_rgb(30 + 37 * i as u8, 60, 90 + 23 * i as u8)
}

fn image(w: usize, h: usize, f: impl Fn(usize, usize) -> Color) -> Vec<u8> {
    let mut buf = vec![0u8; w * h * 3];
    for y in 0..h {
        for x in 0..w {
            let c = f(x, y);
            let o = (y * w + x) * 3;
            buf[o] = c.r();
            buf[o + 1] = c.g();
            buf[o + 2] = c.b();
        }
    }
    buf
}

fn trace(buf: &[u8], w: usize, h: usize) -> Result<TraceResult, TraceError> {
    let raster = RasterSampler::new(buf, w, h, w * 3).unwrap();
    Tracer::new(raster).trace()
}

fn assert_graph_invariants(res: &TraceResult) {
    // segment sharing: exactly one forward and one reverse reference each
    let mut fwd = vec![0u32; res.segments.len()];
    let mut rev = vec![0u32; res.segments.len()];
    for n in &res.nodes {
        assert!(n.fully_visited(), "unconsumed node at {:?}", n.pos);
        for s in &n.slots {
            let (_, link) = s.link.expect("unlinked slot after assembly");
            if link.forward {
                fwd[link.seg as usize] += 1;
            } else {
                rev[link.seg as usize] += 1;
            }
        }
    }
    for i in 0..res.segments.len() {
        assert_eq!(fwd[i], 1);
        assert_eq!(rev[i], 1);
    }
    // interior face count, Euler's formula for one connected planar graph
    assert_eq!(
        res.polygon_count(),
        res.segments.len() - res.nodes.len() + 1
    );
}

fn bands_strategy() -> impl Strategy<Value = (usize, Vec<usize>)> {
    (3usize..12, prop::collection::vec(1usize..4, 2..6))
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 1_000, .. ProptestConfig::default() })]

    #[test]
    fn horizontal_bands_trace_cleanly((w, heights) in bands_strategy()) {
        let h: usize = heights.iter().sum();
        let buf = image(w, h, |_, y| {
            let mut acc = 0;
            for (i, bh) in heights.iter().enumerate() {
                acc += bh;
                if y < acc {
                    return palette(i);
                }
            }
            unreachable!()
        });
        let res = trace(&buf, w, h).unwrap();

        let n = heights.len();
        prop_assert_eq!(res.polygon_count(), n);
        prop_assert_eq!(res.nodes.len(), 2 * (n - 1));
        prop_assert_eq!(res.segments.len(), 3 * (n - 1));
        for (i, _) in heights.iter().enumerate() {
            prop_assert_eq!(
                res.polygons.iter().filter(|p| p.color == palette(i)).count(),
                1
            );
        }
        assert_graph_invariants(&res);
    }

    #[test]
    fn vertical_stripes_trace_cleanly((h, widths) in bands_strategy()) {
        let w: usize = widths.iter().sum();
        let buf = image(w, h, |x, _| {
            let mut acc = 0;
            for (i, bw) in widths.iter().enumerate() {
                acc += bw;
                if x < acc {
                    return palette(i);
                }
            }
            unreachable!()
        });
        let res = trace(&buf, w, h).unwrap();

        let n = widths.len();
        prop_assert_eq!(res.polygon_count(), n);
        prop_assert_eq!(res.nodes.len(), 2 * (n - 1));
        prop_assert_eq!(res.segments.len(), 3 * (n - 1));
        assert_graph_invariants(&res);
    }

    #[test]
    fn four_distinct_quadrants_always_fail(
        w in 2usize..10,
        h in 2usize..10,
        sx in 1usize..9,
        sy in 1usize..9,
    ) {
        let sx = sx.min(w - 1);
        let sy = sy.min(h - 1);
        let buf = image(w, h, |x, y| match (x < sx, y < sy) {
            (true, true) => palette(0),
            (false, true) => palette(1),
            (true, false) => palette(2),
            (false, false) => palette(3),
        });
        prop_assert_eq!(
            trace(&buf, w, h).err(),
            Some(TraceError::FourWayJunction {
                x: sx as i32,
                y: sy as i32
            })
        );
    }

    #[test]
    fn outlines_are_idempotent((w, heights) in bands_strategy()) {
        let h: usize = heights.iter().sum();
        let buf = image(w, h, |_, y| {
            let mut acc = 0;
            for (i, bh) in heights.iter().enumerate() {
                acc += bh;
                if y < acc {
                    return palette(i);
                }
            }
            unreachable!()
        });
        let mut res = trace(&buf, w, h).unwrap();
        for i in 0..res.polygon_count() {
            let first = res.polygon_outline(i).unwrap();
            let second = res.polygon_outline(i).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
