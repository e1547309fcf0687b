/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for profile-adapter tests

use profile_adapter::ProfileRecord;
use wiremock::MockServer;

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Mock bearer token for testing
pub fn mock_token() -> String {
    "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.test.signature".to_string()
}

/// Signed-in user fixture
#[allow(dead_code)]
pub fn alice() -> ProfileRecord {
    ProfileRecord {
        id: "7".to_string(),
        email: "a@x.com".to_string(),
        name: "Alice".to_string(),
        wallet_addr: format!("0x{}", "1".repeat(40)),
        country: "US".to_string(),
    }
}
