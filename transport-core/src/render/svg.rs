//! Minimal SVG document model: circles, polylines and text

use std::fmt::{self, Display, Formatter};

use geo::Coord;

use super::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Round,
    Square,
}

impl Display for LineCap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineJoin {
    Arcs,
    Bevel,
    Miter,
    MiterClip,
    Round,
}

impl Display for LineJoin {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LineJoin::Arcs => "arcs",
            LineJoin::Bevel => "bevel",
            LineJoin::Miter => "miter",
            LineJoin::MiterClip => "miter-clip",
            LineJoin::Round => "round",
        })
    }
}

/// Presentation attributes shared by every element; unset ones are omitted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathProps {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: Option<f64>,
    pub line_cap: Option<LineCap>,
    pub line_join: Option<LineJoin>,
}

impl PathProps {
    pub fn fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn stroke(mut self, color: Color) -> Self {
        self.stroke = Some(color);
        self
    }

    pub fn stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = Some(width);
        self
    }

    /// Round caps and joins
    pub fn rounded(mut self) -> Self {
        self.line_cap = Some(LineCap::Round);
        self.line_join = Some(LineJoin::Round);
        self
    }
}

impl Display for PathProps {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if let Some(fill) = &self.fill {
            write!(f, " fill=\"{}\"", Escaped(&fill.to_string()))?;
        }
        if let Some(stroke) = &self.stroke {
            write!(f, " stroke=\"{}\"", Escaped(&stroke.to_string()))?;
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

#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub center: Coord<f64>,
    pub radius: f64,
    pub props: PathProps,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    pub points: Vec<Coord<f64>>,
    pub props: PathProps,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub position: Coord<f64>,
    pub offset: Coord<f64>,
    pub font_size: u32,
    pub font_family: Option<String>,
    pub font_weight: Option<String>,
    pub data: String,
    pub props: PathProps,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Circle(Circle),
    Polyline(Polyline),
    Text(Text),
}

impl From<Circle> for Element {
    fn from(circle: Circle) -> Self {
        Element::Circle(circle)
    }
}

impl From<Polyline> for Element {
    fn from(polyline: Polyline) -> Self {
        Element::Polyline(polyline)
    }
}

impl From<Text> for Element {
    fn from(text: Text) -> Self {
        Element::Text(text)
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Element::Circle(circle) => write!(
                f,
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"{}/>",
                circle.center.x, circle.center.y, circle.radius, circle.props
            ),
            Element::Polyline(polyline) => {
                f.write_str("<polyline points=\"")?;
                for (i, point) in polyline.points.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{},{}", point.x, point.y)?;
                }
                write!(f, "\"{}/>", polyline.props)
            }
            Element::Text(text) => {
                write!(
                    f,
                    "<text{} x=\"{}\" y=\"{}\" dx=\"{}\" dy=\"{}\" font-size=\"{}\"",
                    text.props,
                    text.position.x,
                    text.position.y,
                    text.offset.x,
                    text.offset.y,
                    text.font_size
                )?;
                if let Some(family) = &text.font_family {
                    write!(f, " font-family=\"{}\"", Escaped(family))?;
                }
                if let Some(weight) = &text.font_weight {
                    write!(f, " font-weight=\"{}\"", Escaped(weight))?;
                }
                write!(f, ">{}</text>", Escaped(&text.data))
            }
        }
    }
}

/// Ordered list of elements; later elements are drawn on top
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, element: impl Into<Element>) {
        self.elements.push(element.into());
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>")?;
        writeln!(f, "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\">")?;
        for element in &self.elements {
            writeln!(f, "  {element}")?;
        }
        write!(f, "</svg>")
    }
}

/// XML-escapes text content and attribute values
struct Escaped<'a>(&'a str);

impl Display for Escaped<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&apos;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '&' => f.write_str("&amp;")?,
                c => write!(f, "{c}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circle_renders_center_radius_and_fill() {
        let circle = Circle {
            center: Coord { x: 20.0, y: 20.5 },
            radius: 5.0,
            props: PathProps::default().fill(Color::from("white")),
        };
        assert_eq!(
            Element::from(circle).to_string(),
            r#"<circle cx="20" cy="20.5" r="5" fill="white"/>"#
        );
    }

    #[test]
    fn polyline_lists_points_and_stroke() {
        let polyline = Polyline {
            points: vec![Coord { x: 1.0, y: 2.0 }, Coord { x: 3.5, y: 4.0 }],
            props: PathProps::default()
                .fill(Color::None)
                .stroke(Color::Rgb(255, 0, 0))
                .stroke_width(14.0)
                .rounded(),
        };
        assert_eq!(
            Element::from(polyline).to_string(),
            r#"<polyline points="1,2 3.5,4" fill="none" stroke="rgb(255,0,0)" stroke-width="14" stroke-linecap="round" stroke-linejoin="round"/>"#
        );
    }

    #[test]
    fn empty_polyline_has_empty_points() {
        assert_eq!(
            Element::from(Polyline::default()).to_string(),
            r#"<polyline points=""/>"#
        );
    }

    #[test]
    fn text_escapes_its_content() {
        let text = Text {
            position: Coord { x: 10.0, y: 20.0 },
            offset: Coord { x: 7.0, y: -3.0 },
            font_size: 12,
            font_family: Some("Verdana".to_string()),
            font_weight: None,
            data: "Tom & \"Jerry\" <3".to_string(),
            props: PathProps::default().fill(Color::from("black")),
        };
        assert_eq!(
            Element::from(text).to_string(),
            r#"<text fill="black" x="10" y="20" dx="7" dy="-3" font-size="12" font-family="Verdana">Tom &amp; &quot;Jerry&quot; &lt;3</text>"#
        );
    }

    #[test]
    fn document_wraps_elements_in_svg_root() {
        let mut document = Document::new();
        document.add(Circle {
            center: Coord { x: 1.0, y: 1.0 },
            radius: 2.0,
            props: PathProps::default(),
        });
        assert_eq!(
            document.to_string(),
            "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n\
             <svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\">\n  \
             <circle cx=\"1\" cy=\"1\" r=\"2\"/>\n\
             </svg>"
        );
    }

    #[test]
    fn line_attributes_use_svg_keywords() {
        let caps: Vec<_> = [LineCap::Butt, LineCap::Round, LineCap::Square]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(caps, ["butt", "round", "square"]);

        let joins: Vec<_> = [
            LineJoin::Arcs,
            LineJoin::Bevel,
            LineJoin::Miter,
            LineJoin::MiterClip,
            LineJoin::Round,
        ]
        .iter()
        .map(ToString::to_string)
        .collect();
        assert_eq!(joins, ["arcs", "bevel", "miter", "miter-clip", "round"]);
    }
}
