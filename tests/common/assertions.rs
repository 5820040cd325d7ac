//! Custom assertion macros
//!
//! Failures print the response body so a wrong status is easy to diagnose.

/// Assert that an API response carries the given status and error kind
#[macro_export]
macro_rules! assert_api_error {
    ($response:expr, $status:expr, $kind:expr) => {
        let (status, body) = $response;
        assert_eq!(status, $status, "unexpected status, body: {}", body);
        assert_eq!(body["kind"], $kind, "unexpected error kind, body: {}", body);
    };
}
