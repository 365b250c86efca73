use geo::{Coord, Point};

const EPSILON: f64 = 1e-6;

/// Linear projection of geographic points onto a padded canvas
///
/// Longitude grows to the right and latitude grows upwards. The zoom is the
/// tighter of the two axis zooms; an axis with no extent is ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereProjector {
    padding: f64,
    min_lon: f64,
    max_lat: f64,
    zoom: f64,
}

impl SphereProjector {
    pub fn new<I>(points: I, max_width: f64, max_height: f64, padding: f64) -> Self
    where
        I: IntoIterator<Item = Point<f64>>,
    {
        let mut points = points.into_iter().peekable();
        if points.peek().is_none() {
            return Self {
                padding,
                min_lon: 0.0,
                max_lat: 0.0,
                zoom: 0.0,
            };
        }

        let (mut min_lon, mut max_lon) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut min_lat, mut max_lat) = (f64::INFINITY, f64::NEG_INFINITY);
        for point in points {
            min_lon = min_lon.min(point.x());
            max_lon = max_lon.max(point.x());
            min_lat = min_lat.min(point.y());
            max_lat = max_lat.max(point.y());
        }

        let width_zoom =
            (!is_zero(max_lon - min_lon)).then(|| (max_width - 2.0 * padding) / (max_lon - min_lon));
        let height_zoom =
            (!is_zero(max_lat - min_lat)).then(|| (max_height - 2.0 * padding) / (max_lat - min_lat));

        let zoom = match (width_zoom, height_zoom) {
            (Some(w), Some(h)) => w.min(h),
            (Some(w), None) => w,
            (None, Some(h)) => h,
            (None, None) => 0.0,
        };

        Self {
            padding,
            min_lon,
            max_lat,
            zoom,
        }
    }

    pub fn project(&self, point: Point<f64>) -> Coord<f64> {
        Coord {
            x: (point.x() - self.min_lon) * self.zoom + self.padding,
            y: (self.max_lat - point.y()) * self.zoom + self.padding,
        }
    }
}

fn is_zero(value: f64) -> bool {
    value.abs() < EPSILON
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn tighter_axis_sets_the_zoom() {
        // 2 degrees wide, 1 degree tall on a 220x220 canvas with padding 10
        let points = [Point::new(10.0, 50.0), Point::new(12.0, 51.0)];
        let projector = SphereProjector::new(points, 220.0, 220.0, 10.0);

        let top_left = projector.project(Point::new(10.0, 51.0));
        assert_relative_eq!(top_left.x, 10.0);
        assert_relative_eq!(top_left.y, 10.0);

        let bottom_right = projector.project(Point::new(12.0, 50.0));
        assert_relative_eq!(bottom_right.x, 210.0);
        assert_relative_eq!(bottom_right.y, 110.0);
    }

    #[test]
    fn flat_axis_is_ignored() {
        let points = [Point::new(30.0, 60.0), Point::new(30.0, 62.0)];
        let projector = SphereProjector::new(points, 500.0, 120.0, 10.0);

        let south = projector.project(Point::new(30.0, 60.0));
        assert_relative_eq!(south.x, 10.0);
        assert_relative_eq!(south.y, 110.0);
    }

    #[test]
    fn single_point_lands_on_padding() {
        let projector = SphereProjector::new([Point::new(37.6, 55.7)], 600.0, 400.0, 25.0);
        let coord = projector.project(Point::new(37.6, 55.7));
        assert_relative_eq!(coord.x, 25.0);
        assert_relative_eq!(coord.y, 25.0);
    }

    #[test]
    fn no_points_project_to_padding() {
        let projector = SphereProjector::new(Vec::new(), 600.0, 400.0, 30.0);
        let coord = projector.project(Point::new(1.0, 1.0));
        assert_relative_eq!(coord.x, 30.0);
        assert_relative_eq!(coord.y, 30.0);
    }
}
