use tubely_api::auth::JwtAuthenticator;
use uuid::Uuid;

/// Signing secret shared by the test router and the token helpers.
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-at-least-32-characters-long";

/// Valid one-hour access token for `user_id`.
pub fn token_for(user_id: Uuid) -> String {
    JwtAuthenticator::new(TEST_JWT_SECRET)
        .issue_token(user_id, chrono::Duration::hours(1))
        .expect("Failed to issue test token")
}

/// Token signed with a different secret.
pub fn forged_token_for(user_id: Uuid) -> String {
    JwtAuthenticator::new("some-other-secret-that-is-also-32-chars!")
        .issue_token(user_id, chrono::Duration::hours(1))
        .expect("Failed to issue test token")
}
