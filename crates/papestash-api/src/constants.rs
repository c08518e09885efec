//! API constants
//!
//! Every versioned route is mounted under [`API_PREFIX`].

/// API base path prefix (version-independent)
pub const API_BASE: &str = "/api";

pub const API_VERSION: &str = "v1";

/// Versioned prefix, e.g. `/api/v1`
pub const API_PREFIX: &str = "/api/v1";

/// Served OpenAPI document, also the RapiDoc spec URL
pub const OPENAPI_JSON_PATH: &str = "/api/openapi.json";

/// Pagination defaults for list endpoints
pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PER_PAGE: i64 = 25;
pub const MAX_PER_PAGE: i64 = 100;

/// Headroom on top of the max file size for multipart boundaries and headers
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;
