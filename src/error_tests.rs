//! Unit tests for error.rs
//!
//! Tests Error variants, Display formatting, and the Result alias.

use crate::error::{Error, Result};

// ============================================================================
// DISPLAY FORMATTING
// ============================================================================

#[test]
fn test_invalid_vertex_stream_display() {
    let err = Error::InvalidVertexStream("stride 8 is smaller than one position (12 bytes)".to_string());
    assert_eq!(
        format!("{}", err),
        "Invalid vertex stream: stride 8 is smaller than one position (12 bytes)"
    );
}

#[test]
fn test_empty_bounds_display() {
    let err = Error::EmptyBounds("model bounds were never grown from mesh vertices".to_string());
    assert_eq!(
        format!("{}", err),
        "Empty bounds: model bounds were never grown from mesh vertices"
    );
}

#[test]
fn test_invalid_extent_display() {
    let err = Error::InvalidExtent("max_depth must be at least 1".to_string());
    assert_eq!(format!("{}", err), "Invalid extent: max_depth must be at least 1");
}

// ============================================================================
// TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_debug() {
    let err = Error::EmptyBounds("x".to_string());
    let debug = format!("{:?}", err);
    assert!(debug.contains("EmptyBounds"));
}

#[test]
fn test_error_clone() {
    let err = Error::InvalidExtent("degenerate".to_string());
    let clone = err.clone();
    assert_eq!(format!("{}", err), format!("{}", clone));
}

#[test]
fn test_error_is_std_error() {
    fn takes_std_error(_: &dyn std::error::Error) {}
    let err = Error::InvalidVertexStream("truncated".to_string());
    takes_std_error(&err);
}

#[test]
fn test_result_alias() {
    fn fails() -> Result<()> {
        Err(Error::EmptyBounds("never grown".to_string()))
    }
    assert!(fails().is_err());

    fn succeeds() -> Result<u32> {
        Ok(7)
    }
    assert_eq!(succeeds().unwrap(), 7);
}
