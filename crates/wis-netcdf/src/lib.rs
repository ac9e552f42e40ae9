//! NetCDF reader for WIS ocean wave station files.
//!
//! Each monthly WIS station file carries a `time` axis (seconds since
//! 1970-01-01) and bulk wave parameters on that axis:
//!
//! | Variable            | Meaning                      | Units |
//! |---------------------|------------------------------|-------|
//! | `waveHs`            | significant wave height      | m     |
//! | `waveTp`            | peak period                  | s     |
//! | `waveMeanDirection` | mean direction (true north)  | deg   |
//!
//! Older archive files name the direction `waveDirection`; which one is
//! read is chosen through [`WaveVariables`].
//!
//! # Access paths
//!
//! - [`open_wave_dataset`] hands a path or OPeNDAP URL straight to libnetcdf.
//! - [`load_wave_netcdf_from_bytes`] parses a file body that was already
//!   downloaded, going through a temporary file.

pub mod error;
pub mod native;
pub mod variables;

pub use error::{NetCdfError, NetCdfResult};
pub use native::{
    list_variables, load_wave_netcdf_from_bytes, open_wave_dataset, silence_hdf5_errors,
    unpack_values,
};
pub use variables::WaveVariables;
