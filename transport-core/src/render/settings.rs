use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::Error;

/// SVG paint value
///
/// Deserializes from `null`, a colour name, `[r, g, b]` or `[r, g, b, opacity]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Color {
    #[default]
    None,
    Named(String),
    Rgb(u8, u8, u8),
    Rgba(u8, u8, u8, f64),
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Color::None => write!(f, "none"),
            Color::Named(name) => write!(f, "{name}"),
            Color::Rgb(r, g, b) => write!(f, "rgb({r},{g},{b})"),
            Color::Rgba(r, g, b, opacity) => write!(f, "rgba({r},{g},{b},{opacity})"),
        }
    }
}

impl From<&str> for Color {
    fn from(name: &str) -> Self {
        Color::Named(name.to_string())
    }
}

/// Canvas and styling of the rendered map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub line_width: f64,
    pub stop_radius: f64,
    pub bus_label_font_size: u32,
    pub bus_label_offset: [f64; 2],
    pub stop_label_font_size: u32,
    pub stop_label_offset: [f64; 2],
    pub underlayer_color: Color,
    pub underlayer_width: f64,
    pub color_palette: Vec<Color>,
}

impl RenderSettings {
    /// # Errors
    ///
    /// Returns [`Error::InvalidData`] for negative or non-finite sizes and a
    /// padding that leaves no room on the canvas
    pub fn validate(&self) -> Result<(), Error> {
        let sizes = [
            ("width", self.width),
            ("height", self.height),
            ("padding", self.padding),
            ("line_width", self.line_width),
            ("stop_radius", self.stop_radius),
            ("underlayer_width", self.underlayer_width),
        ];
        for (name, value) in sizes {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidData(format!(
                    "render_settings.{name} must be a non-negative number, got {value}"
                )));
            }
        }

        if self.padding > self.width.min(self.height) / 2.0 {
            return Err(Error::InvalidData(format!(
                "render_settings.padding {} does not fit a {}x{} canvas",
                self.padding, self.width, self.height
            )));
        }

        let mut offsets = self.bus_label_offset.iter().chain(&self.stop_label_offset);
        if offsets.any(|offset| !offset.is_finite()) {
            return Err(Error::InvalidData(
                "render_settings label offsets must be finite".to_string(),
            ));
        }
        Ok(())
    }

    /// Palette colour of the `index`-th drawn route, cycling through the palette
    pub fn palette_color(&self, index: usize) -> Color {
        if self.color_palette.is_empty() {
            return Color::None;
        }
        self.color_palette[index % self.color_palette.len()].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_print_as_svg_paint() {
        assert_eq!(Color::None.to_string(), "none");
        assert_eq!(Color::from("white").to_string(), "white");
        assert_eq!(Color::Rgb(255, 16, 12).to_string(), "rgb(255,16,12)");
        assert_eq!(Color::Rgba(255, 200, 23, 0.85).to_string(), "rgba(255,200,23,0.85)");
    }

    #[test]
    fn colors_deserialize_from_every_json_form() {
        let colors: Vec<Color> =
            serde_json::from_str(r#"["green", [255, 160, 0], [255, 255, 255, 0.85], null]"#).unwrap();
        assert_eq!(
            colors,
            vec![
                Color::from("green"),
                Color::Rgb(255, 160, 0),
                Color::Rgba(255, 255, 255, 0.85),
                Color::None,
            ]
        );
    }

    #[test]
    fn settings_deserialize_from_document() {
        let settings: RenderSettings = serde_json::from_str(
            r#"{
                "width": 1200.0,
                "height": 1200.0,
                "padding": 50.0,
                "line_width": 14.0,
                "stop_radius": 5.0,
                "bus_label_font_size": 20,
                "bus_label_offset": [7.0, 15.0],
                "stop_label_font_size": 20,
                "stop_label_offset": [7.0, -3.0],
                "underlayer_color": [255, 255, 255, 0.85],
                "underlayer_width": 3.0,
                "color_palette": ["green", [255, 160, 0], "red"]
            }"#,
        )
        .unwrap();

        assert_eq!(settings.bus_label_offset, [7.0, 15.0]);
        assert_eq!(settings.color_palette.len(), 3);
        assert!(settings.validate().is_ok());
        assert_eq!(settings.palette_color(4), Color::Rgb(255, 160, 0));
    }

    #[test]
    fn default_settings_are_valid() {
        let settings = RenderSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.palette_color(0), Color::None);
    }

    #[test]
    fn oversized_padding_is_rejected() {
        let settings = RenderSettings {
            width: 100.0,
            height: 80.0,
            padding: 41.0,
            ..RenderSettings::default()
        };
        assert!(matches!(settings.validate(), Err(Error::InvalidData(_))));
    }

    #[test]
    fn negative_sizes_are_rejected() {
        let settings = RenderSettings {
            line_width: -1.0,
            ..RenderSettings::default()
        };
        assert!(settings.validate().is_err());
    }
}
