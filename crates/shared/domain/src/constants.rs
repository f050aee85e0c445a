//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// Roles
// =============================================================================

/// Entry-level tier assigned when no role is requested
pub const ROLE_EMPLOYEE: i32 = 1;

/// Tier allowed to read the inventory reports
pub const ROLE_MANAGER: i32 = 2;

/// Tier allowed to manage users and the catalog
pub const ROLE_ADMINISTRATOR: i32 = 3;

/// Sudo tier; only a superuser may grant it
pub const ROLE_SUPERUSER: i32 = 4;

/// Default tier-to-name mapping used when `ROLE_NAMES` is not configured
pub const DEFAULT_ROLE_NAMES: &[(i32, &str)] = &[
    (ROLE_EMPLOYEE, "Employee"),
    (ROLE_MANAGER, "Manager"),
    (ROLE_ADMINISTRATOR, "Administrator"),
    (ROLE_SUPERUSER, "Superuser"),
];

/// Default allow-list for role-gated operations
pub const DEFAULT_ALLOWED_ROLES: &[i32] = &[ROLE_ADMINISTRATOR, ROLE_SUPERUSER];

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Minimum username length requirement
pub const MIN_USERNAME_LENGTH: usize = 3;

// =============================================================================
// Authentication
// =============================================================================

/// Default token lifetime in hours (7 days)
pub const DEFAULT_JWT_EXPIRATION_HOURS: i64 = 168;

/// Longest configurable token lifetime in hours (one year)
pub const MAX_JWT_EXPIRATION_HOURS: i64 = 24 * 365;

/// Minimum JWT secret length (security requirement)
pub const MIN_JWT_SECRET_LENGTH: usize = 32;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Authorization header prefix for Bearer tokens
pub const BEARER_TOKEN_PREFIX: &str = "Bearer ";

// =============================================================================
// Reference data
// =============================================================================

/// Seed marker recorded once the address reference data is loaded
pub const SEED_ADDRESS_DATA: &str = "address_data";
