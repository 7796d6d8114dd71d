//! Persistence of sample tables to vector file formats.
//!
//! The format is inferred from the path extension:
//! - `.geojson` / `.json`: GeoJSON `FeatureCollection` ([`geojson`])
//! - `.csv`: class column plus WKT `POINT` geometry ([`delimited`])
//! - `.shp`: ESRI shapefile with a dBase class attribute ([`esri`])
//!
//! GeoJSON embeds the CRS. CSV and shapefile output get a `.prj` sidecar holding the
//! WKT definition. Any other extension fails with an IO error of kind
//! [`std::io::ErrorKind::Unsupported`].
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::Result;
use crate::grid::SpatialRef;
use crate::table::SampleTable;

pub mod delimited;
pub mod esri;
pub mod geojson;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    GeoJson,
    Csv,
    Shapefile,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("geojson") | Some("json") => Ok(OutputFormat::GeoJson),
            Some("csv") => Ok(OutputFormat::Csv),
            Some("shp") => Ok(OutputFormat::Shapefile),
            _ => Err(io::Error::new(
                io::ErrorKind::Unsupported,
                format!(
                    "cannot infer a vector format from '{}'; use .geojson, .json, .csv or .shp",
                    path.display()
                ),
            )
            .into()),
        }
    }

    /// Whether the CRS is stored next to the data file rather than inside it.
    pub fn uses_prj_sidecar(self) -> bool {
        matches!(self, OutputFormat::Csv | OutputFormat::Shapefile)
    }
}

/// Path of the `.prj` sidecar written next to `path`.
pub fn prj_path(path: &Path) -> PathBuf {
    path.with_extension("prj")
}

/// Writes `table` to `path`. The format is resolved before any file is created.
pub fn write_table(table: &SampleTable, path: &Path) -> Result<()> {
    let format = OutputFormat::from_path(path)?;
    debug!(
        "Writing {} sample points to '{}' as {:?}.",
        table.len(),
        path.display(),
        format
    );
    match format {
        OutputFormat::GeoJson => {
            write_stream(path, |w| self::geojson::write_geojson(table, w))?
        }
        OutputFormat::Csv => write_stream(path, |w| delimited::write_csv(table, w))?,
        OutputFormat::Shapefile => esri::write_shapefile(table, path)?,
    }
    if format.uses_prj_sidecar() {
        write_prj(table.crs(), path)?;
    }
    Ok(())
}

fn write_stream<F>(path: &Path, encode: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let mut writer = BufWriter::new(File::create(path)?);
    encode(&mut writer)?;
    writer.flush()?;
    Ok(())
}

fn write_prj(crs: Option<&SpatialRef>, path: &Path) -> Result<()> {
    match crs {
        Some(SpatialRef::Wkt(wkt)) => fs::write(prj_path(path), wkt)?,
        Some(crs @ SpatialRef::Epsg(_)) => warn!(
            "{} has no WKT definition available; '{}' is written without a .prj file.",
            crs,
            path.display()
        ),
        None => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use glam::DVec2;

    use super::*;
    use crate::error::Error;
    use crate::table::SamplePoint;

    fn table() -> SampleTable {
        SampleTable::new(
            "class",
            None,
            vec![SamplePoint {
                class: 1,
                position: DVec2::new(0.5, 0.5),
            }],
        )
    }

    #[test]
    fn format_is_inferred_from_extension() {
        assert_eq!(
            OutputFormat::from_path(Path::new("a/b.geojson")).unwrap(),
            OutputFormat::GeoJson
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("pts.JSON")).unwrap(),
            OutputFormat::GeoJson
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("pts.csv")).unwrap(),
            OutputFormat::Csv
        );
        assert_eq!(
            OutputFormat::from_path(Path::new("sample_points.SHP")).unwrap(),
            OutputFormat::Shapefile
        );
    }

    #[test]
    fn unsupported_extension_is_io_error() {
        let err = OutputFormat::from_path(Path::new("points.gpkg")).unwrap_err();
        assert!(err.is_io());
        assert!(
            matches!(err, Error::Io(ref e) if e.kind() == io::ErrorKind::Unsupported)
        );
        assert!(OutputFormat::from_path(Path::new("points")).is_err());
    }

    #[test]
    fn write_table_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("points.geojson");
        write_table(&table(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("FeatureCollection"));
    }

    #[test]
    fn unwritable_path_propagates_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("points.csv");
        let err = write_table(&table(), &path).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    const UTM_36S: &str = "PROJCS[\"WGS 84 / UTM zone 36S\"]";

    fn table_with_crs(crs: SpatialRef) -> SampleTable {
        SampleTable::new("class", Some(crs), table().into_points())
    }

    #[test]
    fn wkt_crs_survives_every_format() {
        let dir = tempfile::tempdir().unwrap();
        let table = table_with_crs(SpatialRef::Wkt(UTM_36S.into()));

        let json = dir.path().join("p.geojson");
        write_table(&table, &json).unwrap();
        assert!(std::fs::read_to_string(&json).unwrap().contains("UTM zone 36S"));
        assert!(!prj_path(&json).exists());

        for name in ["p.csv", "q.shp"] {
            let path = dir.path().join(name);
            write_table(&table, &path).unwrap();
            assert_eq!(std::fs::read_to_string(prj_path(&path)).unwrap(), UTM_36S);
        }
    }

    #[test]
    fn epsg_crs_is_named_in_geojson_only() {
        let dir = tempfile::tempdir().unwrap();
        let table = table_with_crs(SpatialRef::Epsg(32736));

        let json = dir.path().join("p.geojson");
        write_table(&table, &json).unwrap();
        assert!(std::fs::read_to_string(&json).unwrap().contains("EPSG::32736"));

        let csv = dir.path().join("p.csv");
        write_table(&table, &csv).unwrap();
        assert!(csv.exists());
        assert!(!prj_path(&csv).exists());
    }

    #[test]
    fn shapefile_output_is_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("p.shp");
        write_table(&table(), &path).unwrap();
        assert!(path.exists());
        assert!(path.with_extension("dbf").exists());
        assert!(!prj_path(&path).exists());
    }

    #[test]
    fn unsupported_extension_creates_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("points.kml");
        assert!(write_table(&table(), &path).is_err());
        assert!(!path.exists());
    }
}
