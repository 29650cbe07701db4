//! Turtle state and the drawing-sink collaborator.
//!
//! The worker owns the turtle. Every change is pushed to a [`DrawingSink`]
//! as a fire-and-forget [`DrawCommand`]; the sink never answers and never
//! blocks. Pen-down moves are also kept in a segment history so SAVEPICT
//! can write the picture without asking the front end.
//!
//! Heading 0 points north and angles grow clockwise.

use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;

/// The 16 standard colours, as red/green/blue percentages.
pub const PALETTE: [[u8; 3]; 16] = [
    [0, 0, 0],
    [0, 0, 100],
    [0, 100, 0],
    [0, 100, 100],
    [100, 0, 0],
    [100, 0, 100],
    [100, 100, 0],
    [100, 100, 100],
    [61, 38, 23],
    [77, 53, 7],
    [39, 64, 25],
    [47, 73, 73],
    [100, 58, 47],
    [56, 44, 82],
    [100, 64, 0],
    [72, 72, 72],
];

pub type Point = (f64, f64);

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Where the turtle is and where it faces.
    Pose {
        x: f64,
        y: f64,
        heading: f64,
        pen_down: bool,
    },
    Line { from: Point, to: Point, color: usize },
    Polygon { points: Vec<Point>, color: usize },
    Label { at: Point, text: String, color: usize },
    Bounds { width: f64, height: f64 },
    Background(usize),
    Clear,
}

/// Receiver of drawing updates.
pub trait DrawingSink {
    fn submit(&mut self, command: DrawCommand);
}

/// Discards everything.
pub struct NullCanvas;

impl DrawingSink for NullCanvas {
    fn submit(&mut self, _command: DrawCommand) {}
}

/// Keeps every command in a shared buffer.
#[derive(Clone, Default)]
pub struct RecordingCanvas {
    commands: Arc<Mutex<Vec<DrawCommand>>>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> Vec<DrawCommand> {
        self.commands.lock().clone()
    }
}

impl DrawingSink for RecordingCanvas {
    fn submit(&mut self, command: DrawCommand) {
        self.commands.lock().push(command);
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Segment {
    from: Point,
    to: Point,
    color: usize,
}

#[derive(Clone, Debug, PartialEq)]
struct Label {
    at: Point,
    text: String,
    color: usize,
}

/// Turtle pose, pen and the picture drawn so far.
pub struct Canvas {
    sink: Box<dyn DrawingSink>,
    x: f64,
    y: f64,
    heading: f64,
    pen_down: bool,
    pen_color: usize,
    background: usize,
    bounds: (f64, f64),
    segments: Vec<Segment>,
    polygons: Vec<(Vec<Point>, usize)>,
    labels: Vec<Label>,
    /// Vertices collected by an active FILLED.
    fill: Option<Vec<Point>>,
}

impl Canvas {
    pub fn new(sink: Box<dyn DrawingSink>) -> Self {
        Canvas {
            sink,
            x: 0.0,
            y: 0.0,
            heading: 0.0,
            pen_down: true,
            pen_color: 7,
            background: 0,
            bounds: (500.0, 500.0),
            segments: Vec::new(),
            polygons: Vec::new(),
            labels: Vec::new(),
            fill: None,
        }
    }

    fn pose(&mut self) {
        self.sink.submit(DrawCommand::Pose {
            x: self.x,
            y: self.y,
            heading: self.heading,
            pen_down: self.pen_down,
        });
    }

    fn move_to(&mut self, to: Point) {
        let from = (self.x, self.y);
        (self.x, self.y) = to;
        if let Some(points) = &mut self.fill {
            points.push(to);
        }
        if self.pen_down {
            let color = self.pen_color;
            self.segments.push(Segment { from, to, color });
            self.sink.submit(DrawCommand::Line { from, to, color });
        }
        self.pose();
    }

    pub fn forward(&mut self, distance: f64) {
        let radians = self.heading.to_radians();
        let to = (
            self.x + distance * radians.sin(),
            self.y + distance * radians.cos(),
        );
        self.move_to(to);
    }

    /// Turn clockwise by `degrees`.
    pub fn right(&mut self, degrees: f64) {
        self.set_heading(self.heading + degrees);
    }

    pub fn set_heading(&mut self, degrees: f64) {
        self.heading = degrees.rem_euclid(360.0);
        self.pose();
    }

    pub fn set_xy(&mut self, x: f64, y: f64) {
        self.move_to((x, y));
    }

    pub fn home(&mut self) {
        self.move_to((0.0, 0.0));
        self.set_heading(0.0);
    }

    pub fn set_pen_down(&mut self, down: bool) {
        self.pen_down = down;
        self.pose();
    }

    pub fn pen_color(&self) -> usize {
        self.pen_color
    }

    pub fn set_pen_color(&mut self, index: usize) {
        self.pen_color = index % PALETTE.len();
    }

    pub fn background(&self) -> usize {
        self.background
    }

    pub fn set_background(&mut self, index: usize) {
        self.background = index % PALETTE.len();
        self.sink.submit(DrawCommand::Background(self.background));
    }

    pub fn position(&self) -> Point {
        (self.x, self.y)
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn label(&mut self, text: &str) {
        let label = Label {
            at: (self.x, self.y),
            text: text.to_string(),
            color: self.pen_color,
        };
        self.sink.submit(DrawCommand::Label {
            at: label.at,
            text: label.text.clone(),
            color: label.color,
        });
        self.labels.push(label);
    }

    /// Erase the picture and send the turtle home.
    pub fn clear_screen(&mut self) {
        self.segments.clear();
        self.polygons.clear();
        self.labels.clear();
        self.sink.submit(DrawCommand::Clear);
        (self.x, self.y) = (0.0, 0.0);
        self.set_heading(0.0);
    }

    pub fn set_bounds(&mut self, width: f64, height: f64) {
        self.bounds = (width, height);
        self.sink.submit(DrawCommand::Bounds { width, height });
    }

    /// Start collecting the vertices of a filled shape.
    pub fn begin_fill(&mut self) {
        self.fill = Some(vec![(self.x, self.y)]);
    }

    /// Emit the collected shape as a polygon in `color`.
    pub fn end_fill(&mut self, color: usize) {
        let Some(points) = self.fill.take() else {
            return;
        };
        if points.len() > 2 {
            let color = color % PALETTE.len();
            self.polygons.push((points.clone(), color));
            self.sink.submit(DrawCommand::Polygon { points, color });
        }
    }

    /// The picture as an SVG document. Logo's y axis points up.
    pub fn to_svg(&self) -> String {
        let (width, height) = self.bounds;
        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {width} {height}">"#,
            -width / 2.0,
            -height / 2.0,
        );
        let _ = writeln!(
            svg,
            r#"<rect x="{}" y="{}" width="{width}" height="{height}" fill="{}"/>"#,
            -width / 2.0,
            -height / 2.0,
            rgb(self.background)
        );
        for (points, color) in &self.polygons {
            let coords: Vec<String> = points.iter().map(|(x, y)| format!("{x},{}", -y)).collect();
            let _ = writeln!(
                svg,
                r#"<polygon points="{}" fill="{}"/>"#,
                coords.join(" "),
                rgb(*color)
            );
        }
        for segment in &self.segments {
            let _ = writeln!(
                svg,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}"/>"#,
                segment.from.0,
                -segment.from.1,
                segment.to.0,
                -segment.to.1,
                rgb(segment.color)
            );
        }
        for label in &self.labels {
            let _ = writeln!(
                svg,
                r#"<text x="{}" y="{}" fill="{}">{}</text>"#,
                label.at.0,
                -label.at.1,
                rgb(label.color),
                escape_xml(&label.text)
            );
        }
        svg.push_str("</svg>\n");
        svg
    }

    pub fn save_svg(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.to_svg())
    }
}

fn rgb(index: usize) -> String {
    let [r, g, b] = PALETTE[index % PALETTE.len()];
    let scale = |c: u8| u32::from(c) * 255 / 100;
    format!("#{:02x}{:02x}{:02x}", scale(r), scale(g), scale(b))
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests;
