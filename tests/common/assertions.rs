//! Custom assertion macros and utilities
//!
//! Provides assertion macros for API responses with more descriptive
//! failure messages.

/// Assert that a result is ok and return the value
///
/// This macro unwraps a Result, providing a better error message
/// if the result is an error.
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $message:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $message, e),
        }
    };
}

/// Assert that a string contains a substring
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "Expected '{}' to contain '{}'",
            $haystack,
            $needle
        );
    };
}

/// Assert that a response is an error with the given status and `msg`
///
/// ```rust,ignore
/// assert_error_response!(response, StatusCode::UNAUTHORIZED, "Your password is invalid.");
/// ```
#[macro_export]
macro_rules! assert_error_response {
    ($response:expr, $status:expr) => {{
        let response = &$response;
        assert_eq!(response.status_code(), $status, "unexpected status: {}", response.text());
        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], $status.as_u16(), "status field mismatch");
        body
    }};
    ($response:expr, $status:expr, $message:expr) => {{
        let body = $crate::assert_error_response!($response, $status);
        assert_eq!(body["msg"], $message, "unexpected message");
        body
    }};
}
