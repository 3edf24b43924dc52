/// Currency assumed when the remote account omits one
pub const DEFAULT_CURRENCY: &str = "USD";

/// Owner assigned to enrollments created without an explicit user
pub const DEFAULT_USER_ID: &str = "default_user";

/// Placeholder for records the remote API sends without a name or description
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Number of days covered by the weekly forecast
pub const FORECAST_DAYS: u32 = 7;
