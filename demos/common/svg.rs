//! Small svg writer used by the demos, not part of the library.

use bezier_timeline::Vector;
use std::fmt::{Display, Formatter};

type Rect = (f64, f64, f64, f64);

pub struct Svg {
    pub view_box: Rect,
    pub elements: Vec<Box<dyn Display>>,
}

impl Svg {
    pub fn new(view_box: Rect) -> Self {
        Svg {
            view_box,
            elements: Vec::new(),
        }
    }

    pub fn add<E: Display + 'static>(&mut self, element: E) {
        self.elements.push(Box::new(element));
    }
}

impl Display for Svg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "<svg viewBox=\"{} {} {} {}\" xmlns=\"http://www.w3.org/2000/svg\">",
            self.view_box.0, self.view_box.1, self.view_box.2, self.view_box.3
        )?;
        for element in self.elements.iter() {
            element.fmt(f)?;
        }
        writeln!(f, "</svg>")
    }
}

pub struct Line {
    pub from: Vector,
    pub to: Vector,
    pub color: &'static str,
    pub dashed: bool,
}

impl Display for Line {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\"",
            self.from.x, self.from.y, self.to.x, self.to.y, self.color
        )?;
        if self.dashed {
            write!(f, " stroke-dasharray=\"4\"")?;
        }
        writeln!(f, "/>")
    }
}

pub struct Circle {
    pub center: Vector,
    pub radius: f64,
    pub color: &'static str,
}

impl Display for Circle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"/>",
            self.center.x, self.center.y, self.radius, self.color
        )
    }
}

/// A `<path>` around an already built `d` attribute
pub struct Path {
    pub d: String,
    pub color: &'static str,
    pub width: f64,
}

impl Display for Path {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "<path stroke=\"{}\" fill=\"none\" stroke-width=\"{}\" d=\"{}\"/>",
            self.color, self.width, self.d
        )
    }
}
