//! Native NetCDF parsing using the netcdf library.
//!
//! # Performance Notes
//!
//! The netcdf library requires a file path (it wraps libnetcdf/HDF5 which need
//! file handles). When reading from bytes, we write to a temp file first.
//!
//! On Linux, we use `/dev/shm` (memory-backed tmpfs) to minimize I/O latency.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Once;

use netcdf::AttributeValue;
use tracing::{debug, instrument};
use wis_common::{TimeUnits, WaveDataset};

use crate::error::{NetCdfError, NetCdfResult};
use crate::variables::{WaveVariables, TITLE_ATTRIBUTE};

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints verbose error messages to stderr even when errors
/// are handled gracefully by the Rust code (e.g., when checking for optional
/// attributes that don't exist).
///
/// Call this early, before any HDF5/NetCDF operations occur. It is safe to
/// call multiple times.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and we're passing null pointers
        // to disable error output, which is a documented valid use.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// Open a station file by path or OPeNDAP URL and read its wave series.
///
/// Any failure to open the resource is reported as `ResourceUnreachable`;
/// libnetcdf does not distinguish a dead server from a missing file.
#[instrument(skip(variables))]
pub fn open_wave_dataset(locator: &str, variables: &WaveVariables) -> NetCdfResult<WaveDataset> {
    silence_hdf5_errors();

    let nc_file = netcdf::open(locator).map_err(|e| NetCdfError::ResourceUnreachable {
        locator: locator.to_string(),
        reason: e.to_string(),
    })?;

    let dataset = read_wave_dataset(&nc_file, variables)?;
    Ok(dataset.with_source(locator))
}

/// Parse a downloaded station file body.
///
/// `label` is recorded as the dataset source, normally the URL the bytes
/// came from.
#[instrument(skip(data, variables), fields(bytes = data.len()))]
pub fn load_wave_netcdf_from_bytes(
    data: &[u8],
    label: &str,
    variables: &WaveVariables,
) -> NetCdfResult<WaveDataset> {
    silence_hdf5_errors();

    with_temp_file(data, |path| {
        let nc_file = netcdf::open(path)
            .map_err(|e| NetCdfError::InvalidFormat(format!("Failed to open NetCDF: {}", e)))?;
        read_wave_dataset(&nc_file, variables)
    })
    .map(|dataset| dataset.with_source(label))
}

/// Names of every variable in a station file, by path or OPeNDAP URL.
pub fn list_variables(locator: &str) -> NetCdfResult<Vec<String>> {
    silence_hdf5_errors();

    let nc_file = netcdf::open(locator).map_err(|e| NetCdfError::ResourceUnreachable {
        locator: locator.to_string(),
        reason: e.to_string(),
    })?;
    Ok(variable_names(&nc_file))
}

/// Apply fill masking and CF packing to raw values.
///
/// Values equal to `fill` (or already NaN) become NaN, everything else is
/// `raw * scale + offset`.
pub fn unpack_values(raw: &[f32], fill: Option<f32>, scale: f32, offset: f32) -> Vec<f32> {
    raw.iter()
        .map(|&val| {
            if val.is_nan() || Some(val) == fill {
                f32::NAN
            } else {
                val * scale + offset
            }
        })
        .collect()
}

fn read_wave_dataset(nc_file: &netcdf::File, variables: &WaveVariables) -> NetCdfResult<WaveDataset> {
    debug!(variables = ?variable_names(nc_file), "NetCDF variables");

    let time_var = nc_file
        .variable(&variables.time)
        .ok_or_else(|| NetCdfError::VariableAbsent(variables.time.clone()))?;

    let raw_time: Vec<i64> = time_var.get_values(..).map_err(|e| {
        NetCdfError::InvalidFormat(format!("Failed to read {}: {}", variables.time, e))
    })?;

    let units = match get_str_attr(&time_var, "units") {
        Some(units) => {
            TimeUnits::parse_cf(&units).map_err(|e| NetCdfError::InvalidFormat(e.to_string()))?
        }
        None => TimeUnits::default(),
    };
    let times = units.convert_all(&raw_time)?;

    let height = read_series(nc_file, &variables.height)?;
    let period = read_series(nc_file, &variables.period)?;
    let direction = read_series(nc_file, &variables.direction)?;

    let title = get_global_str_attr(nc_file, TITLE_ATTRIBUTE);

    debug!(
        samples = times.len(),
        has_title = title.is_some(),
        "Read wave series"
    );

    Ok(WaveDataset::new(times, height, period, direction)?
        .with_title(title)
        .with_direction_variable(variables.direction.as_str()))
}

fn read_series(nc_file: &netcdf::File, name: &str) -> NetCdfResult<Vec<f32>> {
    let var = nc_file
        .variable(name)
        .ok_or_else(|| NetCdfError::VariableAbsent(name.to_string()))?;

    let raw: Vec<f32> = var
        .get_values(..)
        .map_err(|e| NetCdfError::InvalidFormat(format!("Failed to read {}: {}", name, e)))?;

    let fill = get_f32_attr(&var, "_FillValue").or_else(|| get_f32_attr(&var, "missing_value"));
    let scale = get_f32_attr(&var, "scale_factor").unwrap_or(1.0);
    let offset = get_f32_attr(&var, "add_offset").unwrap_or(0.0);

    Ok(unpack_values(&raw, fill, scale, offset))
}

fn variable_names(nc_file: &netcdf::File) -> Vec<String> {
    nc_file.variables().map(|v| v.name()).collect()
}

// =============================================================================
// Internal helpers
// =============================================================================

/// Write `data` to a unique temp file, run `f` on its path, then remove it.
fn with_temp_file<T, F>(data: &[u8], f: F) -> NetCdfResult<T>
where
    F: FnOnce(&Path) -> NetCdfResult<T>,
{
    // Use memory-backed filesystem on Linux for faster I/O
    let temp_file = TempFile::write(get_optimal_temp_dir().join(generate_temp_filename()), data)?;
    f(temp_file.path())
}

/// A temp file removed when dropped, including after a failed write.
struct TempFile {
    path: PathBuf,
}

impl TempFile {
    fn write(path: PathBuf, data: &[u8]) -> NetCdfResult<Self> {
        let guard = Self { path };
        let mut file = std::fs::File::create(&guard.path)?;
        file.write_all(data)?;
        Ok(guard)
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// Get the optimal temp directory for NetCDF file operations.
///
/// On Linux, uses /dev/shm (memory-backed tmpfs) if available for faster I/O.
/// Falls back to the system temp directory on other platforms or if /dev/shm is unavailable.
fn get_optimal_temp_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        let shm_path = Path::new("/dev/shm");
        if shm_path.is_dir() {
            // Verify we can write to /dev/shm
            let test_path = shm_path.join(format!(".wis_netcdf_test_{}", std::process::id()));
            if std::fs::write(&test_path, b"test").is_ok() {
                let _ = std::fs::remove_file(&test_path);
                return shm_path.to_path_buf();
            }
        }
    }

    std::env::temp_dir()
}

/// Generate a unique temp file name.
fn generate_temp_filename() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let pid = std::process::id();
    let count = COUNTER.fetch_add(1, Ordering::Relaxed);

    format!("wis_native_{}_{}.nc", pid, count)
}

/// Check if a variable has an attribute with the given name.
/// This avoids HDF5 error spam when checking for optional attributes.
fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

/// Helper to get f32 attribute.
fn get_f32_attr(var: &netcdf::Variable, name: &str) -> Option<f32> {
    if !has_attr(var, name) {
        return None;
    }
    let attr_value = var.attribute_value(name)?.ok()?;
    f32::try_from(attr_value).ok()
}

/// Helper to get string attribute.
fn get_str_attr(var: &netcdf::Variable, name: &str) -> Option<String> {
    if !has_attr(var, name) {
        return None;
    }
    match var.attribute_value(name)?.ok()? {
        AttributeValue::Str(s) => Some(s),
        _ => None,
    }
}

fn get_global_str_attr(nc_file: &netcdf::File, name: &str) -> Option<String> {
    if !nc_file.attributes().any(|attr| attr.name() == name) {
        return None;
    }
    match nc_file.attribute(name)?.value().ok()? {
        AttributeValue::Str(s) => Some(s),
        AttributeValue::Strs(parts) => Some(parts.join(" ")),
        _ => None,
    }
}
