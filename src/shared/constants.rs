// =============================================================================
// ROLE CONSTANTS
// =============================================================================

/// Administrator role - triages requests, volunteers, fundraisers and inventory
pub const ROLE_ADMIN: &str = "admin";

/// Standard user role - victims, volunteers and donors
pub const ROLE_USER: &str = "user";

/// Message for a non-admin session reaching an admin route
pub const ADMIN_REQUIRED_MESSAGE: &str = "You don't have admin permissions.";

// =============================================================================
// DOMAIN DEFAULTS
// =============================================================================

/// Report type used when a field report is submitted without one
pub const DEFAULT_REPORT_TYPE: &str = "Field Report";

