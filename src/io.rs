//! Reading and writing instance sets and tour files.
//!
//! Two set formats are supported, chosen by file extension:
//!
//! - `.tspset`: CSV without header and with variable record length. The first record is the
//!   version marker `tspset,1`; every following record is one instance written as
//!   `x0,y0,x1,y1,...`. An instance without points is written as a single empty field.
//! - `.json`: a nested list `[[[x, y], ...], ...]`, one inner list per instance.
//!
//! Coordinates are written in shortest round-trip form, so reading back a written set
//! reproduces it bit for bit. JSON cannot carry NaN or infinite coordinates.
//!
//! Tour files are header-less CSV with one tour (comma separated point indices) per line.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::instance::{Instance, Point};

/// First field of the version marker record
pub const SET_MARKER: &str = "tspset";
/// Current `.tspset` format version
pub const SET_VERSION: u32 = 1;

/// On-disk format of an instance set
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SetFormat {
    /// `.tspset` CSV records
    Csv,
    /// `.json` nested coordinate lists
    Json,
}

impl SetFormat {
    /// Pick the format from the file extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("tspset") => Ok(SetFormat::Csv),
            Some("json") => Ok(SetFormat::Json),
            _ => Err(Error::invalid_format(format!(
                "{:?}: expected a .tspset or .json instance set",
                path
            ))),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            SetFormat::Csv => "tspset",
            SetFormat::Json => "json",
        }
    }
}

/// Read the records `[offset, offset + count)` of an instance set.
///
/// A window reaching past the end of the file is truncated, so fewer than `count`
/// instances (possibly none) may be returned.
pub fn read_instances<P: AsRef<Path>>(path: P, offset: usize, count: usize) -> Result<Vec<Instance>> {
    let path = path.as_ref();
    match SetFormat::from_path(path)? {
        SetFormat::Csv => read_csv_set(path, offset, count),
        SetFormat::Json => read_json_set(path, offset, count),
    }
}

/// Write an instance set in the format given by the file extension
pub fn write_instances<P: AsRef<Path>>(path: P, instances: &[Instance]) -> Result<()> {
    write_instances_with(path, instances, |_| {})
}

/// Same as [`write_instances`], calling `on_written` with the number of instances written so far
/// after each one.
pub fn write_instances_with<P, F>(path: P, instances: &[Instance], mut on_written: F) -> Result<()>
where
    P: AsRef<Path>,
    F: FnMut(usize),
{
    let path = path.as_ref();
    match SetFormat::from_path(path)? {
        SetFormat::Csv => {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .flexible(true)
                .from_path(path)?;

            writer.write_record([SET_MARKER.to_string(), SET_VERSION.to_string()])?;
            for (i, instance) in instances.iter().enumerate() {
                writer.write_record(instance.to_flat().iter().map(|v| v.to_string()))?;
                on_written(i + 1);
            }

            writer.flush()?;
        }
        SetFormat::Json => {
            let nested: Vec<Vec<[f64; 2]>> = instances
                .iter()
                .enumerate()
                .map(|(i, instance)| {
                    on_written(i + 1);
                    instance.points().iter().map(|p| [p.x, p.y]).collect()
                })
                .collect();

            let mut writer = BufWriter::new(File::create(path)?);
            serde_json::to_writer(&mut writer, &nested)?;
            writer.flush()?;
        }
    }

    log::debug!("Wrote {} instances to {:?}", instances.len(), path);
    Ok(())
}

fn read_csv_set(path: &Path, offset: usize, count: usize) -> Result<Vec<Instance>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut records = reader.records();

    let marker = records
        .next()
        .ok_or_else(|| Error::invalid_format(format!("{:?}: empty file", path)))??;
    let version_ok = marker.len() == 2
        && marker.get(0).map(str::trim) == Some(SET_MARKER)
        && marker.get(1).map(str::trim) == Some(SET_VERSION.to_string().as_str());
    if !version_ok {
        return Err(Error::invalid_format(format!(
            "{:?}: expected marker '{},{}', found {:?}",
            path, SET_MARKER, SET_VERSION, marker
        )));
    }

    let mut instances = Vec::new();
    for record in records.skip(offset).take(count) {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() == 1 && record.get(0).map(str::is_empty).unwrap_or(false) {
            instances.push(Instance::new(Vec::new()));
            continue;
        }

        let coords = record
            .iter()
            .map(|field| {
                field.trim().parse::<f64>().map_err(|_| {
                    Error::invalid_format(format!(
                        "{:?} line {}: invalid coordinate '{}'",
                        path, line, field
                    ))
                })
            })
            .collect::<Result<Vec<f64>>>()?;

        let instance = Instance::from_flat(&coords).ok_or_else(|| {
            Error::invalid_format(format!(
                "{:?} line {}: odd number of coordinates ({})",
                path,
                line,
                coords.len()
            ))
        })?;
        instances.push(instance);
    }

    Ok(instances)
}

fn read_json_set(path: &Path, offset: usize, count: usize) -> Result<Vec<Instance>> {
    let reader = BufReader::new(File::open(path)?);
    let nested: Vec<Vec<[f64; 2]>> = serde_json::from_reader(reader)?;

    Ok(nested
        .into_iter()
        .skip(offset)
        .take(count)
        .map(|row| Instance::new(row.into_iter().map(|[x, y]| Point::new(x, y)).collect()))
        .collect())
}

/// Read tours, one comma separated list of point indices per line
pub fn read_tours<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<usize>>> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut tours = Vec::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let tour = record
            .iter()
            .filter(|field| !field.trim().is_empty())
            .map(|field| {
                field.trim().parse::<usize>().map_err(|_| {
                    Error::invalid_format(format!(
                        "{:?} line {}: invalid node index '{}'",
                        path, line, field
                    ))
                })
            })
            .collect::<Result<Vec<usize>>>()?;
        tours.push(tour);
    }

    Ok(tours)
}

/// Write tours, one per line
pub fn write_tours<P: AsRef<Path>>(path: P, tours: &[Vec<usize>]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    for tour in tours {
        writer.write_record(tour.iter().map(|i| i.to_string()))?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sample_set(n: usize, size: usize) -> Vec<Instance> {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        (0..n).map(|_| Instance::random(size, &mut rng)).collect()
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(SetFormat::from_path("a/b/tsp20.tspset").unwrap(), SetFormat::Csv);
        assert_eq!(SetFormat::from_path("tsp20.json").unwrap(), SetFormat::Json);
        assert!(matches!(
            SetFormat::from_path("tsp20.pkl"),
            Err(Error::InvalidFormat(_))
        ));
        assert!(matches!(
            SetFormat::from_path("tsp20"),
            Err(Error::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_csv_round_trip_is_exact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("set.tspset");
        let set = sample_set(6, 9);

        write_instances(&path, &set).unwrap();
        let loaded = read_instances(&path, 0, set.len()).unwrap();

        assert_eq!(loaded, set);
    }

    #[test]
    fn test_json_round_trip_is_exact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("set.json");
        let set = sample_set(4, 5);

        write_instances(&path, &set).unwrap();
        let loaded = read_instances(&path, 0, set.len()).unwrap();

        assert_eq!(loaded, set);
    }

    #[test]
    fn test_empty_instance_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("set.tspset");
        let set = vec![
            Instance::from(vec![(0.5, 0.5)]),
            Instance::new(Vec::new()),
            Instance::from(vec![(0.1, 0.2), (0.3, 0.4)]),
        ];

        write_instances(&path, &set).unwrap();
        assert_eq!(read_instances(&path, 0, 10).unwrap(), set);
    }

    #[test]
    fn test_bad_marker_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("set.tspset");
        std::fs::write(&path, "0.1,0.2,0.3,0.4\n").unwrap();

        assert!(matches!(
            read_instances(&path, 0, 1),
            Err(Error::InvalidFormat(_))
        ));

        std::fs::write(&path, "tspset,2\n0.1,0.2\n").unwrap();
        assert!(matches!(
            read_instances(&path, 0, 1),
            Err(Error::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_malformed_records_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("set.tspset");

        std::fs::write(&path, "tspset,1\n0.1,0.2,0.3\n").unwrap();
        assert!(matches!(
            read_instances(&path, 0, 1),
            Err(Error::InvalidFormat(_))
        ));

        std::fs::write(&path, "tspset,1\n0.1,abc\n").unwrap();
        assert!(matches!(
            read_instances(&path, 0, 1),
            Err(Error::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.tspset");
        assert!(matches!(read_instances(&path, 0, 1), Err(Error::Io(_))));

        let path = dir.path().join("missing.json");
        assert!(matches!(read_instances(&path, 0, 1), Err(Error::Io(_))));
    }

    #[test]
    fn test_records_outside_window_are_not_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("set.tspset");
        std::fs::write(&path, "tspset,1\n0.1,0.2\n0.3,0.4\nnot,a,number\n").unwrap();

        let loaded = read_instances(&path, 1, 1).unwrap();
        assert_eq!(loaded, vec![Instance::from(vec![(0.3, 0.4)])]);
    }

    #[test]
    fn test_tours_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tours.csv");
        let tours = vec![vec![0, 2, 1, 3], vec![1, 0], vec![0, 1, 2, 3, 4]];

        write_tours(&path, &tours).unwrap();
        assert_eq!(read_tours(&path).unwrap(), tours);
    }
}
