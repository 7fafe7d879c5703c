// crates/gazetteer-core/src/spatial.rs

//! # Spatial helpers
//!
//! Search areas and extents around place geometries. Shapes use WGS84
//! lon/lat coordinates throughout.

use crate::error::{GazetteerError, Result};
use geo::{
    Area, Buffer, Centroid, ConvexHull, Destination, Euclidean, Geometry, HausdorffDistance, HaversineMeasure,
    Length, MinimumRotatedRect, MultiPoint, MultiPolygon, Point, Polygon,
};

/// WGS84 equatorial radius, in meters.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Termini of a bubble are spaced `180 / BEARING_STEPS` degrees apart.
const BEARING_STEPS: u32 = 19;

/// Sizing of a [`bubble`]. Distances are in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubbleOptions {
    /// Added to the radius derived from the shape's length.
    pub buffer_distance: f64,
    /// Scales half the shape's length.
    pub radius_multiplier: f64,
    pub radius_minimum: f64,
    pub radius_maximum: f64,
}

impl Default for BubbleOptions {
    fn default() -> Self {
        Self {
            buffer_distance: 0.0,
            radius_multiplier: 1.0,
            radius_minimum: 1.0,
            radius_maximum: 10_000.0,
        }
    }
}

impl BubbleOptions {
    /// Radius for a shape `length` meters long.
    pub fn radius(&self, length: f64) -> f64 {
        (length / 2.0 * self.radius_multiplier + self.buffer_distance)
            .max(self.radius_minimum)
            .min(self.radius_maximum)
    }
}

/// Area around `shape` for proximity searches.
///
/// Termini are projected from the centroid along evenly spaced bearings at
/// the radius given by `opts`. A point yields the hull of the termini; any
/// other shape yields its hull grown by the widest terminus distance.
pub fn bubble(shape: &Geometry<f64>, opts: &BubbleOptions) -> Result<MultiPolygon<f64>> {
    let origin = shape
        .centroid()
        .ok_or_else(|| GazetteerError::InvalidData("cannot take the centroid of an empty geometry".into()))?;
    let sphere = HaversineMeasure::new(EARTH_RADIUS);
    let distance = opts.radius(sphere_length(shape, &sphere));
    let termini: Vec<Point<f64>> = (0..2 * BEARING_STEPS)
        .map(|step| sphere.destination(origin, f64::from(step) * 180.0 / f64::from(BEARING_STEPS), distance))
        .collect();
    log::debug!("bubble of radius {distance} m around {:?}", origin.x_y());

    if let Geometry::Point(_) = shape {
        return Ok(MultiPolygon::new(vec![MultiPoint::new(termini).convex_hull()]));
    }
    let reach = termini
        .iter()
        .map(|t| t.hausdorff_distance(shape))
        .fold(0.0_f64, f64::max);
    let hull = shape.convex_hull();
    if hull.unsigned_area() > 0.0 {
        Ok(hull.buffer(reach))
    } else {
        Ok(shape.buffer(reach))
    }
}

/// Major and minor axis of the minimum rotated rectangle around `shape`,
/// in coordinate units rounded to two decimals.
pub fn axes(shape: &Geometry<f64>) -> Result<(f64, f64)> {
    let rect = shape
        .minimum_rotated_rect()
        .ok_or_else(|| GazetteerError::InvalidData("no bounding rectangle for geometry".into()))?;
    let sides: Vec<f64> = rect.exterior().lines().map(|side| Euclidean.length(&side)).collect();
    if sides.is_empty() {
        return Err(GazetteerError::InvalidData("degenerate bounding rectangle".into()));
    }
    let major = sides.iter().copied().fold(f64::MIN, f64::max);
    let minor = sides.iter().copied().fold(f64::MAX, f64::min);
    Ok((round2(major), round2(minor)))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Great-circle length of lines and polygon rings. Points have none.
fn sphere_length(shape: &Geometry<f64>, sphere: &HaversineMeasure) -> f64 {
    match shape {
        Geometry::Point(_) | Geometry::MultiPoint(_) => 0.0,
        Geometry::Line(line) => sphere.length(line),
        Geometry::LineString(ls) => sphere.length(ls),
        Geometry::MultiLineString(mls) => sphere.length(mls),
        Geometry::Polygon(p) => ring_length(p, sphere),
        Geometry::MultiPolygon(mp) => mp.iter().map(|p| ring_length(p, sphere)).sum(),
        Geometry::Rect(r) => ring_length(&r.to_polygon(), sphere),
        Geometry::Triangle(t) => ring_length(&t.to_polygon(), sphere),
        Geometry::GeometryCollection(gc) => gc.iter().map(|g| sphere_length(g, sphere)).sum(),
    }
}

fn ring_length(polygon: &Polygon<f64>, sphere: &HaversineMeasure) -> f64 {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(|ring| sphere.length(ring))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{polygon, BoundingRect, Contains, Distance, LineString};

    fn roma() -> Point<f64> {
        Point::new(12.4853, 41.8919)
    }

    #[test]
    fn point_bubble_sits_on_the_radius() {
        let opts = BubbleOptions { buffer_distance: 1_000.0, ..BubbleOptions::default() };
        let area = bubble(&Geometry::Point(roma()), &opts).unwrap();
        assert!(area.contains(&roma()));
        let sphere = HaversineMeasure::new(EARTH_RADIUS);
        for c in area.0[0].exterior().coords() {
            let d = sphere.distance(roma(), Point::from(*c));
            assert!((d - 1_000.0).abs() < 1e-3, "vertex {c:?} is {d} m away");
        }
    }

    #[test]
    fn radius_is_clamped() {
        let opts = BubbleOptions::default();
        assert_eq!(opts.radius(0.0), 1.0);
        assert_eq!(opts.radius(1_000.0), 500.0);
        let wide = BubbleOptions { buffer_distance: 50_000.0, ..opts };
        assert_eq!(wide.radius(0.0), 10_000.0);
    }

    #[test]
    fn polygon_bubble_covers_the_polygon() {
        let shape = Geometry::Polygon(polygon![
            (x: 10.0, y: 40.0),
            (x: 10.1, y: 40.0),
            (x: 10.1, y: 40.1),
            (x: 10.0, y: 40.1),
            (x: 10.0, y: 40.0),
        ]);
        let area = bubble(&shape, &BubbleOptions::default()).unwrap();
        let outer = area.bounding_rect().unwrap();
        let inner = shape.bounding_rect().unwrap();
        assert!(outer.min().x < inner.min().x && outer.max().y > inner.max().y);
        assert!(area.contains(&Point::new(10.05, 40.05)));
    }

    #[test]
    fn line_bubble_uses_the_line_itself() {
        let line = LineString::from(vec![(2.2, 36.3), (2.3, 36.3)]);
        let area = bubble(&Geometry::LineString(line), &BubbleOptions::default()).unwrap();
        assert!(!area.0.is_empty());
        assert!(area.contains(&Point::new(2.25, 36.3)));
    }

    #[test]
    fn empty_geometry_has_no_bubble() {
        let empty = Geometry::MultiPoint(MultiPoint::<f64>::new(vec![]));
        assert!(matches!(
            bubble(&empty, &BubbleOptions::default()),
            Err(GazetteerError::InvalidData(_))
        ));
    }

    #[test]
    fn axes_of_a_rectangle() {
        let shape = Geometry::Polygon(polygon![
            (x: 0.0, y: 0.0),
            (x: 4.0, y: 0.0),
            (x: 4.0, y: 2.0),
            (x: 0.0, y: 2.0),
            (x: 0.0, y: 0.0),
        ]);
        assert_eq!(axes(&shape).unwrap(), (4.0, 2.0));
    }
}
