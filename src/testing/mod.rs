//! Shared helpers for unit tests.

use std::sync::Once;

/// Pin the security-related environment before the config singleton is
/// first touched, so tests behave the same regardless of the host's
/// APP_ENV. Safe to call from every test; only the first call acts.
pub fn init_test_env() {
    static ENV: Once = Once::new();
    ENV.call_once(|| {
        std::env::set_var("JWT_SECRET", "unit-test-jwt-secret");
        std::env::set_var("PRODUCT_KEY_SECRET", "unit-test-product-secret");
        std::env::set_var("BCRYPT_COST", "4");
    });
}
