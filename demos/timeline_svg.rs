//! Renders a timeline with its handles as svg to stdout.
//!
//! Clamped handles are drawn solid, the handles as stored dashed.
//! The small dots are values returned by `Timeline::query`.

use bezier_timeline::{Anchor, PathConfig, Timeline, TimelineConfig, Vector};

#[path = "common/svg.rs"]
mod svg;
use svg::{Circle, Line, Path, Svg};

const HEIGHT: f64 = 400.0;

fn main() -> Result<(), bezier_timeline::CurveError> {
    let mut timeline = Timeline::with_anchors(
        vec![
            Anchor::new(0.0, 0.0).with_post(150.0, 250.0),
            Anchor::new(300.0, 300.0)
                .with_pre(100.0, 0.0)
                .with_post(250.0, 0.0),
            Anchor::new(450.0, 100.0).with_pre(50.0, 80.0),
            Anchor::new(800.0, 50.0),
        ],
        TimelineConfig::default(),
    )?;
    timeline.add_anchor(650.0, None)?;

    // svg's y axis points down
    let config = PathConfig {
        zoom: Vector::new(1.0, -1.0),
        offset: Vector::new(0.0, HEIGHT),
        range: None,
    };
    let flip = |point: Vector| point * config.zoom + config.offset;

    let mut svg = Svg::new((-20.0, -20.0, 840.0, HEIGHT + 40.0));
    svg.add(Path {
        d: timeline.d(&config),
        color: "black",
        width: 2.0,
    });
    for anchor in timeline.clamped_anchors() {
        for handle in [anchor.pre, anchor.post].into_iter().flatten() {
            svg.add(Line {
                from: flip(anchor.position),
                to: flip(handle.unclamped),
                color: "grey",
                dashed: true,
            });
            svg.add(Line {
                from: flip(anchor.position),
                to: flip(handle.clamped),
                color: "blue",
                dashed: false,
            });
            svg.add(Circle {
                center: flip(handle.clamped),
                radius: 3.0,
                color: "blue",
            });
        }
        svg.add(Circle {
            center: flip(anchor.position),
            radius: 5.0,
            color: "red",
        });
    }
    for point in timeline.sample(0.0, 800.0, 41) {
        svg.add(Circle {
            center: flip(point),
            radius: 1.5,
            color: "green",
        });
    }

    println!("{}", svg);
    Ok(())
}
