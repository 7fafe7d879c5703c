// crates/gazetteer-core/src/model/geometry.rs

//! # Geometry
//!
//! GeoJSON geometries are read into [`geo::Geometry`] values and a
//! feature's shapes are collapsed into a [`FeatureGeometry`]: nothing, one
//! bare shape, or a `GeometryCollection` of two or more.
//!
//! Positions are held as `f64` x/y pairs. Integer ordinates come back out
//! as floats (`[10, 20]` is written as `[10.0, 20.0]`) and any third or
//! later ordinate is discarded with a debug log line.

use crate::error::{GazetteerError, Result};
use crate::serialization::ToValue;
use geo::{
    Coord, Geometry, GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon,
    Point, Polygon,
};
use serde_json::{json, Map, Value};

/// The geometry slot of a feature.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FeatureGeometry {
    /// No geometry. Serialized as an empty list.
    #[default]
    Empty,
    Single(Geometry<f64>),
    Collection(GeometryCollection<f64>),
}

impl FeatureGeometry {
    /// Zero shapes give [`Empty`](Self::Empty), one gives
    /// [`Single`](Self::Single), more give [`Collection`](Self::Collection).
    pub fn from_shapes(mut shapes: Vec<Geometry<f64>>) -> Self {
        match shapes.len() {
            0 => FeatureGeometry::Empty,
            1 => match shapes.pop() {
                Some(shape) => FeatureGeometry::Single(shape),
                None => FeatureGeometry::Empty,
            },
            _ => FeatureGeometry::Collection(GeometryCollection::new_from(shapes)),
        }
    }

    /// Read a GeoJSON geometry. A `GeometryCollection` is collapsed again,
    /// so a collection of one comes back as a bare shape. An empty list or
    /// `null` is [`Empty`](Self::Empty).
    pub fn from_geojson(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(FeatureGeometry::Empty),
            Value::Array(items) if items.is_empty() => Ok(FeatureGeometry::Empty),
            _ => match parse_geometry(value)? {
                Geometry::GeometryCollection(gc) => Ok(Self::from_shapes(gc.0)),
                shape => Ok(FeatureGeometry::Single(shape)),
            },
        }
    }

    /// Read a list of GeoJSON geometries and collapse them.
    pub fn from_geojson_list(values: &[Value]) -> Result<Self> {
        let shapes = values.iter().map(parse_geometry).collect::<Result<Vec<_>>>()?;
        Ok(Self::from_shapes(shapes))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, FeatureGeometry::Empty)
    }

    /// Number of shapes held.
    pub fn len(&self) -> usize {
        match self {
            FeatureGeometry::Empty => 0,
            FeatureGeometry::Single(_) => 1,
            FeatureGeometry::Collection(gc) => gc.0.len(),
        }
    }

    pub fn shapes(&self) -> Vec<&Geometry<f64>> {
        match self {
            FeatureGeometry::Empty => Vec::new(),
            FeatureGeometry::Single(shape) => vec![shape],
            FeatureGeometry::Collection(gc) => gc.0.iter().collect(),
        }
    }

    pub fn to_geojson(&self) -> Value {
        match self {
            FeatureGeometry::Empty => Value::Array(Vec::new()),
            FeatureGeometry::Single(shape) => geometry_to_geojson(shape),
            FeatureGeometry::Collection(gc) => collection_to_geojson(gc),
        }
    }
}

impl ToValue for FeatureGeometry {
    fn to_value(&self) -> Result<Value> {
        Ok(self.to_geojson())
    }
}

impl ToValue for Geometry<f64> {
    fn to_value(&self) -> Result<Value> {
        Ok(geometry_to_geojson(self))
    }
}

// -----------------------------------------------------------------------------
// GEOJSON -> GEO
// -----------------------------------------------------------------------------

/// Parse one GeoJSON geometry object.
pub fn parse_geometry(value: &Value) -> Result<Geometry<f64>> {
    let obj = value
        .as_object()
        .ok_or_else(|| invalid(format!("geometry must be an object, got {value}")))?;
    let kind = obj
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid("geometry without a 'type'".to_string()))?;

    if kind == "GeometryCollection" {
        let members = obj
            .get("geometries")
            .and_then(Value::as_array)
            .ok_or_else(|| invalid("GeometryCollection without 'geometries'".to_string()))?;
        let shapes = members.iter().map(parse_geometry).collect::<Result<Vec<_>>>()?;
        return Ok(Geometry::GeometryCollection(GeometryCollection::new_from(shapes)));
    }

    let coords = obj
        .get("coordinates")
        .ok_or_else(|| invalid(format!("{kind} without 'coordinates'")))?;
    let shape = match kind {
        "Point" => Geometry::Point(Point::from(position(coords)?)),
        "MultiPoint" => Geometry::MultiPoint(MultiPoint::new(
            list(coords)?
                .iter()
                .map(|c| position(c).map(Point::from))
                .collect::<Result<_>>()?,
        )),
        "LineString" => Geometry::LineString(line_string(coords)?),
        "MultiLineString" => Geometry::MultiLineString(MultiLineString::new(
            list(coords)?.iter().map(line_string).collect::<Result<_>>()?,
        )),
        "Polygon" => Geometry::Polygon(polygon(coords)?),
        "MultiPolygon" => Geometry::MultiPolygon(MultiPolygon::new(
            list(coords)?.iter().map(polygon).collect::<Result<_>>()?,
        )),
        other => {
            return Err(GazetteerError::Unsupported(format!(
                "geometry type '{other}'"
            )))
        }
    };
    Ok(shape)
}

fn invalid(msg: String) -> GazetteerError {
    GazetteerError::InvalidData(msg)
}

fn list(value: &Value) -> Result<&Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| invalid(format!("expected a coordinate array, got {value}")))
}

/// `[x, y]` or `[x, y, z]`; extra ordinates are dropped.
fn position(value: &Value) -> Result<Coord<f64>> {
    let items = list(value)?;
    let ordinate = |i: usize| -> Result<f64> {
        items
            .get(i)
            .and_then(Value::as_f64)
            .ok_or_else(|| invalid(format!("bad position {value}")))
    };
    if items.len() > 2 {
        log::debug!("dropping {} extra ordinate(s) from {value}", items.len() - 2);
    }
    Ok(Coord {
        x: ordinate(0)?,
        y: ordinate(1)?,
    })
}

fn line_string(value: &Value) -> Result<LineString<f64>> {
    Ok(LineString::new(
        list(value)?.iter().map(position).collect::<Result<_>>()?,
    ))
}

fn polygon(value: &Value) -> Result<Polygon<f64>> {
    let mut rings = list(value)?
        .iter()
        .map(line_string)
        .collect::<Result<Vec<_>>>()?
        .into_iter();
    let exterior = rings
        .next()
        .ok_or_else(|| invalid("polygon without rings".to_string()))?;
    Ok(Polygon::new(exterior, rings.collect()))
}

// -----------------------------------------------------------------------------
// GEO -> GEOJSON
// -----------------------------------------------------------------------------

fn coord_json(c: &Coord<f64>) -> Value {
    json!([c.x, c.y])
}

fn line_json(ls: &LineString<f64>) -> Value {
    Value::Array(ls.0.iter().map(coord_json).collect())
}

fn polygon_json(p: &Polygon<f64>) -> Value {
    let mut rings = vec![line_json(p.exterior())];
    rings.extend(p.interiors().iter().map(line_json));
    Value::Array(rings)
}

fn typed(kind: &str, key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert("type".to_string(), Value::String(kind.to_string()));
    map.insert(key.to_string(), value);
    Value::Object(map)
}

fn collection_to_geojson(gc: &GeometryCollection<f64>) -> Value {
    typed(
        "GeometryCollection",
        "geometries",
        Value::Array(gc.0.iter().map(geometry_to_geojson).collect()),
    )
}

/// Standard GeoJSON mapping of a shape. `Line`, `Rect` and `Triangle` are
/// written as `LineString` / `Polygon`.
pub fn geometry_to_geojson(shape: &Geometry<f64>) -> Value {
    match shape {
        Geometry::Point(p) => typed("Point", "coordinates", coord_json(&p.0)),
        Geometry::Line(l) => typed(
            "LineString",
            "coordinates",
            json!([coord_json(&l.start), coord_json(&l.end)]),
        ),
        Geometry::LineString(ls) => typed("LineString", "coordinates", line_json(ls)),
        Geometry::Polygon(p) => typed("Polygon", "coordinates", polygon_json(p)),
        Geometry::MultiPoint(mp) => typed(
            "MultiPoint",
            "coordinates",
            Value::Array(mp.0.iter().map(|p| coord_json(&p.0)).collect()),
        ),
        Geometry::MultiLineString(mls) => typed(
            "MultiLineString",
            "coordinates",
            Value::Array(mls.0.iter().map(line_json).collect()),
        ),
        Geometry::MultiPolygon(mp) => typed(
            "MultiPolygon",
            "coordinates",
            Value::Array(mp.0.iter().map(polygon_json).collect()),
        ),
        Geometry::GeometryCollection(gc) => collection_to_geojson(gc),
        Geometry::Rect(r) => typed("Polygon", "coordinates", polygon_json(&r.to_polygon())),
        Geometry::Triangle(t) => typed("Polygon", "coordinates", polygon_json(&t.to_polygon())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn point(x: f64, y: f64) -> Value {
        json!({"type": "Point", "coordinates": [x, y]})
    }

    #[test]
    fn collapse_rule() {
        assert_eq!(FeatureGeometry::from_geojson_list(&[]).unwrap(), FeatureGeometry::Empty);
        assert!(matches!(
            FeatureGeometry::from_geojson_list(&[point(1.0, 2.0)]).unwrap(),
            FeatureGeometry::Single(Geometry::Point(_))
        ));
        let many = FeatureGeometry::from_geojson_list(&[point(1.0, 2.0), point(3.0, 4.0)]).unwrap();
        assert_eq!(many.len(), 2);
        assert_eq!(many.to_geojson()["type"], "GeometryCollection");
        assert_eq!(many.to_geojson()["geometries"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn empty_serializes_as_empty_list() {
        assert_eq!(FeatureGeometry::Empty.to_geojson(), json!([]));
        assert_eq!(FeatureGeometry::from_geojson(&json!([])).unwrap(), FeatureGeometry::Empty);
        assert_eq!(FeatureGeometry::from_geojson(&Value::Null).unwrap(), FeatureGeometry::Empty);
    }

    #[test]
    fn collection_of_one_collapses_to_bare_shape() {
        let gc = json!({"type": "GeometryCollection", "geometries": [point(2.2, 36.3)]});
        let g = FeatureGeometry::from_geojson(&gc).unwrap();
        assert_eq!(g.to_geojson(), point(2.2, 36.3));
    }

    #[rstest]
    #[case(json!({"type": "Point", "coordinates": [2.2, 36.3]}))]
    #[case(json!({"type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]]}))]
    #[case(json!({"type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]}))]
    #[case(json!({"type": "MultiPoint", "coordinates": [[0.0, 0.0], [1.0, 1.0]]}))]
    #[case(json!({"type": "MultiLineString", "coordinates": [[[0.0, 0.0], [1.0, 1.0]]]}))]
    #[case(json!({"type": "MultiPolygon", "coordinates": [[[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]]}))]
    fn geojson_shapes_survive(#[case] value: Value) {
        let shape = parse_geometry(&value).unwrap();
        assert_eq!(geometry_to_geojson(&shape), value);
    }

    #[test]
    fn third_ordinate_is_dropped() {
        let shape = parse_geometry(&json!({"type": "Point", "coordinates": [1.0, 2.0, 30.0]})).unwrap();
        assert_eq!(geometry_to_geojson(&shape), point(1.0, 2.0));
    }

    #[test]
    fn integer_ordinates_come_back_as_floats() {
        let shape = parse_geometry(&json!({"type": "Point", "coordinates": [10, 20]})).unwrap();
        let out = geometry_to_geojson(&shape);
        assert_eq!(out["coordinates"], json!([10.0, 20.0]));
        assert_ne!(out["coordinates"], json!([10, 20]));
    }

    #[rstest]
    #[case(json!({"type": "Circle", "coordinates": [0.0, 0.0]}), true)]
    #[case(json!({"type": "Point"}), false)]
    #[case(json!({"coordinates": [0.0, 0.0]}), false)]
    #[case(json!("POINT (0 0)"), false)]
    fn bad_geometries(#[case] value: Value, #[case] unsupported: bool) {
        let err = parse_geometry(&value).unwrap_err();
        assert_eq!(matches!(err, GazetteerError::Unsupported(_)), unsupported);
    }
}
