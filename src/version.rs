// Version information for the ScrewTrue detection API

/// Full version string with feature description
pub const VERSION: &str = "v3.1.0-two-stage-cascade-2025-08-05";

/// Semantic version number
pub const VERSION_NUMBER: &str = "3.1.0";

/// Build date
pub const BUILD_DATE: &str = "2025-08-05";
