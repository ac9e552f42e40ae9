//! Common test utilities for wis-netcdf tests
//!
//! Provides helpers for:
//! - Writing small monthly station files with the netcdf crate
//! - Reading those files back as raw bytes

use std::path::{Path, PathBuf};

use test_utils::attributes::{FILL_VALUE, TIME_UNITS};
use test_utils::WaveColumns;

/// Layout of a synthetic station file.
pub struct StationFile<'a> {
    pub columns: &'a WaveColumns,
    pub title: Option<&'a str>,
    pub direction_name: &'a str,
    /// Sample indices written as the fill value in every data variable.
    pub fill_at: &'a [usize],
    /// Time units attribute, omitted when `None`.
    pub time_units: Option<&'a str>,
}

impl<'a> StationFile<'a> {
    pub fn new(columns: &'a WaveColumns) -> Self {
        Self {
            columns,
            title: None,
            direction_name: "waveMeanDirection",
            fill_at: &[],
            time_units: Some(TIME_UNITS),
        }
    }
}

/// Write `layout` to `dir/name` and return the path.
pub fn write_station_file(dir: &Path, name: &str, layout: &StationFile<'_>) -> PathBuf {
    let path = dir.join(name);
    let cols = layout.columns;

    let mut file = netcdf::create(&path).expect("create netcdf file");
    file.add_dimension("time", cols.time.len())
        .expect("add time dimension");

    if let Some(title) = layout.title {
        file.add_attribute("title", title).expect("add title");
    }

    {
        let mut time = file
            .add_variable::<i64>("time", &["time"])
            .expect("add time variable");
        if let Some(units) = layout.time_units {
            time.put_attribute("units", units).expect("add units");
        }
        time.put_values(&cols.time, ..).expect("write time");
    }

    for (name, values) in [
        ("waveHs", &cols.height),
        ("waveTp", &cols.period),
        (layout.direction_name, &cols.direction),
    ] {
        let mut masked = values.clone();
        for &i in layout.fill_at {
            masked[i] = FILL_VALUE;
        }

        let mut var = file
            .add_variable::<f32>(name, &["time"])
            .expect("add data variable");
        var.set_fill_value(FILL_VALUE).expect("set fill value");
        var.put_values(&masked, ..).expect("write data");
    }

    path
}
