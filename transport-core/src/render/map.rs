use geo::Coord;
use hashbrown::HashSet;
use itertools::Itertools;
use log::debug;

use super::svg::{Circle, Document, PathProps, Polyline, Text};
use super::{Color, RenderSettings, SphereProjector};
use crate::model::{Bus, Stop};
use crate::{StopId, TransportCatalogue};

const FONT_FAMILY: &str = "Verdana";

/// Draws bus lines and their stops as an SVG document
///
/// Layers are emitted bottom to top: route lines, bus labels, stop circles,
/// stop labels. Buses are drawn in name order and only stops served by at
/// least one bus appear on the map.
pub struct MapRenderer<'a> {
    settings: &'a RenderSettings,
}

impl<'a> MapRenderer<'a> {
    pub fn new(settings: &'a RenderSettings) -> Self {
        Self { settings }
    }

    pub fn render(&self, catalogue: &TransportCatalogue) -> String {
        self.document(catalogue).to_string()
    }

    pub fn document(&self, catalogue: &TransportCatalogue) -> Document {
        let buses: Vec<&Bus> = catalogue
            .buses()
            .iter()
            .filter(|bus| !bus.stops.is_empty())
            .sorted_by(|a, b| a.name.cmp(&b.name))
            .collect();

        let served: HashSet<_> = buses.iter().flat_map(|bus| bus.stops.iter().copied()).collect();
        let stops: Vec<&Stop> = catalogue
            .stops()
            .iter()
            .enumerate()
            .filter(|(id, _)| served.contains(id))
            .map(|(_, stop)| stop)
            .sorted_by(|a, b| a.name.cmp(&b.name))
            .collect();

        let projector = SphereProjector::new(
            stops.iter().map(|stop| stop.geometry),
            self.settings.width,
            self.settings.height,
            self.settings.padding,
        );
        let position = |stop: StopId| projector.project(catalogue.stops()[stop].geometry);

        let mut document = Document::new();

        for (index, bus) in buses.iter().enumerate() {
            document.add(Polyline {
                points: bus.effective_path().map(position).collect(),
                props: PathProps::default()
                    .fill(Color::None)
                    .stroke(self.settings.palette_color(index))
                    .stroke_width(self.settings.line_width)
                    .rounded(),
            });
        }

        for (index, bus) in buses.iter().enumerate() {
            let color = self.settings.palette_color(index);
            for terminal in terminals(bus) {
                let at = position(terminal);
                document.add(self.bus_label(&bus.name, at, self.underlayer()));
                document.add(self.bus_label(&bus.name, at, PathProps::default().fill(color.clone())));
            }
        }

        for stop in &stops {
            document.add(Circle {
                center: projector.project(stop.geometry),
                radius: self.settings.stop_radius,
                props: PathProps::default().fill(Color::from("white")),
            });
        }

        for stop in &stops {
            let at = projector.project(stop.geometry);
            document.add(self.stop_label(&stop.name, at, self.underlayer()));
            document.add(self.stop_label(&stop.name, at, PathProps::default().fill(Color::from("black"))));
        }

        debug!(
            "Rendered map: {} buses, {} stops, {} elements",
            buses.len(),
            stops.len(),
            document.elements().len()
        );
        document
    }

    fn underlayer(&self) -> PathProps {
        PathProps::default()
            .fill(self.settings.underlayer_color.clone())
            .stroke(self.settings.underlayer_color.clone())
            .stroke_width(self.settings.underlayer_width)
            .rounded()
    }

    fn bus_label(&self, name: &str, at: Coord<f64>, props: PathProps) -> Text {
        Text {
            position: at,
            offset: offset(self.settings.bus_label_offset),
            font_size: self.settings.bus_label_font_size,
            font_family: Some(FONT_FAMILY.to_string()),
            font_weight: Some("bold".to_string()),
            data: name.to_string(),
            props,
        }
    }

    fn stop_label(&self, name: &str, at: Coord<f64>, props: PathProps) -> Text {
        Text {
            position: at,
            offset: offset(self.settings.stop_label_offset),
            font_size: self.settings.stop_label_font_size,
            font_family: Some(FONT_FAMILY.to_string()),
            font_weight: None,
            data: name.to_string(),
            props,
        }
    }
}

/// Stops where a bus label is drawn: the first stop, plus the last one for
/// an out-and-back line whose ends differ
fn terminals(bus: &Bus) -> Vec<StopId> {
    match (bus.stops.first(), bus.stops.last()) {
        (Some(&first), Some(&last)) if !bus.is_roundtrip && first != last => vec![first, last],
        (Some(&first), _) => vec![first],
        _ => Vec::new(),
    }
}

fn offset([dx, dy]: [f64; 2]) -> Coord<f64> {
    Coord { x: dx, y: dy }
}
