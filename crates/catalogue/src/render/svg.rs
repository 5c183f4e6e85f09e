//! Minimal SVG document model.
//!
//! Only the shapes the map needs: circles, polylines and text.

use std::fmt::{self, Write as _};

#[derive(Clone, Debug, Default, PartialEq)]
pub enum Color {
    #[default]
    None,
    Named(String),
    Rgb(u8, u8, u8),
    Rgba(u8, u8, u8, f64),
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Named(name) => f.write_str(name),
            Self::Rgb(r, g, b) => write!(f, "rgb({r},{g},{b})"),
            Self::Rgba(r, g, b, a) => write!(f, "rgba({r},{g},{b},{a})"),
        }
    }
}

impl From<&str> for Color {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

/// Colours arrive either as a name or as `[r, g, b]` / `[r, g, b, opacity]`.
#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Named(String),
            Rgb(u8, u8, u8),
            Rgba(u8, u8, u8, f64),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Named(name) if name == "none" => Self::None,
            Repr::Named(name) => Self::Named(name),
            Repr::Rgb(r, g, b) => Self::Rgb(r, g, b),
            Repr::Rgba(r, g, b, a) => Self::Rgba(r, g, b, a),
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(from = "[f64; 2]"))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrokeLineCap {
    Butt,
    Round,
    Square,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrokeLineJoin {
    Arcs,
    Bevel,
    Miter,
    MiterClip,
    Round,
}

impl fmt::Display for StrokeLineCap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        })
    }
}

impl fmt::Display for StrokeLineJoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Arcs => "arcs",
            Self::Bevel => "bevel",
            Self::Miter => "miter",
            Self::MiterClip => "miter-clip",
            Self::Round => "round",
        })
    }
}

/// Fill and stroke attributes shared by every shape
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathProps {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: Option<f64>,
    pub line_cap: Option<StrokeLineCap>,
    pub line_join: Option<StrokeLineJoin>,
}

impl fmt::Display for PathProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(fill) = &self.fill {
            write!(f, " fill=\"{fill}\"")?;
        }
        if let Some(stroke) = &self.stroke {
            write!(f, " stroke=\"{stroke}\"")?;
        }
        if let Some(width) = self.stroke_width {
            write!(f, " stroke-width=\"{width}\"")?;
        }
        if let Some(cap) = self.line_cap {
            write!(f, " stroke-linecap=\"{cap}\"")?;
        }
        if let Some(join) = self.line_join {
            write!(f, " stroke-linejoin=\"{join}\"")?;
        }
        Ok(())
    }
}

macro_rules! impl_path_props {
    ($shape:ident) => {
        impl $shape {
            pub fn fill(mut self, color: impl Into<Color>) -> Self {
                self.props.fill = Some(color.into());
                self
            }

            pub fn stroke(mut self, color: impl Into<Color>) -> Self {
                self.props.stroke = Some(color.into());
                self
            }

            pub fn stroke_width(mut self, width: f64) -> Self {
                self.props.stroke_width = Some(width);
                self
            }

            pub fn line_cap(mut self, cap: StrokeLineCap) -> Self {
                self.props.line_cap = Some(cap);
                self
            }

            pub fn line_join(mut self, join: StrokeLineJoin) -> Self {
                self.props.line_join = Some(join);
                self
            }
        }
    };
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
    pub props: PathProps,
}

impl Circle {
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            center,
            radius,
            props: PathProps::default(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub props: PathProps,
}

impl Polyline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn point(mut self, point: Point) -> Self {
        self.points.push(point);
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Text {
    pub position: Point,
    pub offset: Point,
    pub font_size: u32,
    pub font_family: Option<String>,
    pub font_weight: Option<String>,
    pub data: String,
    pub props: PathProps,
}

impl Text {
    pub fn new(position: Point, data: impl Into<String>) -> Self {
        Self {
            position,
            data: data.into(),
            ..Self::default()
        }
    }

    pub fn offset(mut self, offset: Point) -> Self {
        self.offset = offset;
        self
    }

    pub fn font_size(mut self, size: u32) -> Self {
        self.font_size = size;
        self
    }

    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn font_weight(mut self, weight: impl Into<String>) -> Self {
        self.font_weight = Some(weight.into());
        self
    }
}

impl_path_props!(Circle);
impl_path_props!(Polyline);
impl_path_props!(Text);

#[derive(Clone, Debug, PartialEq)]
pub enum Object {
    Circle(Circle),
    Polyline(Polyline),
    Text(Text),
}

impl From<Circle> for Object {
    fn from(circle: Circle) -> Self {
        Self::Circle(circle)
    }
}

impl From<Polyline> for Object {
    fn from(polyline: Polyline) -> Self {
        Self::Polyline(polyline)
    }
}

impl From<Text> for Object {
    fn from(text: Text) -> Self {
        Self::Text(text)
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Circle(c) => write!(
                f,
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"{}/>",
                c.center.x, c.center.y, c.radius, c.props
            ),
            Self::Polyline(p) => {
                f.write_str("<polyline points=\"")?;
                for (i, point) in p.points.iter().enumerate() {
                    if i > 0 {
                        f.write_char(' ')?;
                    }
                    write!(f, "{},{}", point.x, point.y)?;
                }
                write!(f, "\"{}/>", p.props)
            }
            Self::Text(t) => {
                write!(
                    f,
                    "<text x=\"{}\" y=\"{}\" dx=\"{}\" dy=\"{}\" font-size=\"{}\"",
                    t.position.x, t.position.y, t.offset.x, t.offset.y, t.font_size
                )?;
                if let Some(family) = &t.font_family {
                    write!(f, " font-family=\"{family}\"")?;
                }
                if let Some(weight) = &t.font_weight {
                    write!(f, " font-weight=\"{weight}\"")?;
                }
                write!(f, "{}>{}</text>", t.props, escape(&t.data))
            }
        }
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            _ => out.push(c),
        }
    }
    out
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    objects: Vec<Object>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, object: impl Into<Object>) {
        self.objects.push(object.into());
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>")?;
        writeln!(f, "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\">")?;
        for object in &self.objects {
            writeln!(f, "  {object}")?;
        }
        f.write_str("</svg>")
    }
}
