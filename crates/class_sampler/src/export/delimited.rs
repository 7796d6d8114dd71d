//! CSV encoding of sample tables with WKT point geometry.
use std::io::Write;

use geo_types::Point;
use wkt::ToWkt;

use crate::error::Result;
use crate::sampling::config::GEOMETRY_FIELD;
use crate::table::SampleTable;

/// Writes a header `<class_field>,geometry` followed by one row per point.
///
/// CSV has no CRS slot; [`super::write_table`] stores it in a `.prj` sidecar.
pub fn write_csv<W: Write>(table: &SampleTable, writer: W) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record([table.class_field(), GEOMETRY_FIELD])?;
    for p in table {
        let geometry = Point::new(p.position.x, p.position.y).wkt_string();
        out.write_record([p.class.to_string(), geometry])?;
    }
    out.flush()?;
    Ok(())
}
