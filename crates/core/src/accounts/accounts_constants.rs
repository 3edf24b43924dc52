/// Account type reported when the remote omits one
pub const DEFAULT_ACCOUNT_TYPE: &str = "unknown";

/// Status reported when the remote omits one
pub const DEFAULT_ACCOUNT_STATUS: &str = "open";

