//! GeoJSON encoding of sample tables.
use std::io::Write;

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};
use serde_json::json;

use crate::error::Result;
use crate::grid::SpatialRef;
use crate::table::SampleTable;

/// Builds a `FeatureCollection` with one `Point` feature per row.
///
/// The CRS goes into a legacy named `crs` member: an OGC URN for EPSG codes, the
/// definition text itself for WKT.
pub fn to_feature_collection(table: &SampleTable) -> FeatureCollection {
    let features = table
        .iter()
        .map(|p| {
            let mut properties = JsonObject::new();
            properties.insert(table.class_field().to_owned(), JsonValue::from(p.class));
            Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Point(vec![
                    p.position.x,
                    p.position.y,
                ]))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    let foreign_members = table.crs().map(|crs| {
        let mut members = JsonObject::new();
        members.insert(
            "crs".to_owned(),
            json!({ "type": "name", "properties": { "name": crs_name(crs) } }),
        );
        members
    });

    FeatureCollection {
        bbox: None,
        features,
        foreign_members,
    }
}

fn crs_name(crs: &SpatialRef) -> String {
    match crs {
        SpatialRef::Epsg(_) => crs.ogc_urn().unwrap_or_else(|| crs.to_string()),
        SpatialRef::Wkt(wkt) => wkt.clone(),
    }
}

pub fn write_geojson<W: Write>(table: &SampleTable, writer: W) -> Result<()> {
    serde_json::to_writer(writer, &to_feature_collection(table))?;
    Ok(())
}
