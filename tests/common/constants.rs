//! Shared constants for end-to-end tests

// ============================================================================
// Test User Credentials
// ============================================================================

/// Login of the user every authenticated client signs up with
pub const TEST_USER: &str = "testuser";

/// Password of the test user
pub const TEST_PASS: &str = "testpass123";

// ============================================================================
// Auth Settings
// ============================================================================

pub const TEST_JWT_SECRET: &str = "test-access-secret";
pub const TEST_JWT_REFRESH_SECRET: &str = "test-refresh-secret";

/// Argon2 cost kept low so tests stay fast
pub const TEST_HASH_COST: u32 = 1;

// ============================================================================
// Library IDs
// ============================================================================

/// Well-formed UUID that no entity ever gets
pub const UNKNOWN_ID: &str = "00000000-0000-4000-8000-000000000000";

/// Not a UUID
pub const MALFORMED_ID: &str = "not-a-uuid";

// ============================================================================
// Timeouts
// ============================================================================

pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 10;
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
