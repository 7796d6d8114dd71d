//! ESRI shapefile encoding of sample tables.
//!
//! Writes the `.shp`/`.shx` geometry pair and a `.dbf` table holding the class
//! attribute. The CRS sidecar is handled by [`super::write_table`].
use std::path::Path;

use shapefile::dbase::{FieldName, FieldValue, Record, TableWriterBuilder};
use shapefile::{Point, Writer};

use crate::error::{Error, Result};
use crate::table::SampleTable;

/// dBase III limits field names to 10 bytes.
pub const MAX_FIELD_NAME_LEN: usize = 10;

/// Width of the numeric class column; fits any `i32` including its sign.
const CLASS_FIELD_WIDTH: u8 = 11;

/// Writes `table` as a point shapefile at `path`.
pub fn write_shapefile(table: &SampleTable, path: &Path) -> Result<()> {
    let name = table.class_field();
    let field = class_field_name(name)?;
    let builder = TableWriterBuilder::new().add_numeric_field(field, CLASS_FIELD_WIDTH, 0);

    let mut writer = Writer::from_path(path, builder)?;
    for p in table {
        let mut record = Record::default();
        record.insert(name.to_owned(), FieldValue::Numeric(Some(f64::from(p.class))));
        writer.write_shape_and_record(&Point::new(p.position.x, p.position.y), &record)?;
    }
    Ok(())
}

fn class_field_name(name: &str) -> Result<FieldName> {
    if !name.is_ascii() || name.len() > MAX_FIELD_NAME_LEN {
        return Err(Error::invalid(format!(
            "shapefile attribute names must be ASCII and at most {MAX_FIELD_NAME_LEN} bytes, got '{name}'"
        )));
    }
    FieldName::try_from(name)
        .map_err(|_| Error::invalid(format!("'{name}' is not a valid dBase field name")))
}
