//! Shared constants for end-to-end tests
#![allow(dead_code)]

// ============================================================================
// Test User Credentials
// ============================================================================

/// User stored with a plain password
pub const TEST_USER: &str = "testuser";
pub const TEST_PASS: &str = "testpass123";

/// User stored with an argon2 hash
pub const HASHED_USER: &str = "hasheduser";
pub const HASHED_PASS: &str = "hashedpass123";

pub const TEST_SESSION_SECRET: &str = "e2e-session-secret-e2e-session-secret";

// ============================================================================
// Test Catalog
// ============================================================================

pub const HOUSING: &str = "housing";
pub const HOUSING_DESCRIPTION: &str = "Housing help";
pub const HOUSING_LINK: &str = "https://a.example";

pub const MENTAL_HEALTH: &str = "mental health";
pub const MENTAL_HEALTH_DESCRIPTION: &str = "Counseling and crisis lines";
pub const MENTAL_HEALTH_LINKS: [&str; 2] = ["https://b.example", "https://c.example/crisis"];

/// Listed last, no description and no links
pub const EDUCATION: &str = "education";

pub const TEST_RESOURCES_JSON: &str = r#"{
    "housing": {
        "description": "Housing help",
        "links": ["https://a.example"]
    },
    "mental health": {
        "description": "Counseling and crisis lines",
        "links": ["https://b.example", "https://c.example/crisis"]
    },
    "education": {}
}"#;

// ============================================================================
// Timeouts
// ============================================================================

pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 20;
pub const REQUEST_TIMEOUT_SECS: u64 = 10;
