//! Common test fixtures for WIS hindcast tests.

/// Jeffreys Ledge, Gulf of Maine.
pub mod station {
    pub const STATION_ID: &str = "44098";
    pub const REGION: &str = "Atlantic";
    pub const COMPANION_ID: &str = "163";
    pub const DISPLAY_NAME: &str = "Jeffreys Ledge";
}

/// Dates used across the suite.
pub mod dates {
    /// Four-month aggregate window.
    pub const AGGREGATE_START: &str = "20080101";
    pub const AGGREGATE_END: &str = "20080430";

    /// Sub-month window.
    pub const SHORT_START: &str = "20080905";
    pub const SHORT_END: &str = "20080925";

    /// 2008-01-01T00:00:00Z as Unix seconds.
    pub const JAN_2008_UNIX: i64 = 1_199_145_600;
    /// 2008-02-01T00:00:00Z as Unix seconds.
    pub const FEB_2008_UNIX: i64 = 1_201_824_000;
}

/// NetCDF attribute values seen in WIS station files.
pub mod attributes {
    pub const TIME_UNITS: &str = "seconds since 1970-01-01 00:00:00";
    pub const TITLE: &str = "WIS Hindcast Wave Data";
    pub const FILL_VALUE: f32 = -999.0;
}
