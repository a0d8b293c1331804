//! Tests for logging configuration
//!
//! Only one global subscriber can be installed per process, so these tests
//! tolerate "already initialized" failures and only insist on errors that
//! come from bad settings.

use parkway::core::logging::{init_logging, LogFormat, LogSettings};
use std::str::FromStr;

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
    assert_eq!(LogFormat::from_str("Pretty").unwrap(), LogFormat::Pretty);
    assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
    assert!(LogFormat::from_str("yaml").is_err());
}

#[test]
fn test_log_format_variants() {
    let variants = LogFormat::variants();
    assert_eq!(variants.len(), 3);
    assert!(variants.contains(&"json"));
}

#[test]
fn test_settings_resolution() {
    let settings = LogSettings::resolve(Some("parkway::lot=trace"), Some("json")).unwrap();
    assert_eq!(settings.directive, "parkway::lot=trace");
    assert_eq!(settings.format, LogFormat::Json);
}

#[test]
fn test_init_logging_invalid_format() {
    assert!(init_logging(Some("info"), Some("invalid_format")).is_err());
}

#[test]
fn test_init_logging_does_not_panic() {
    let _ = init_logging(Some("debug"), Some("compact"));
    let _ = init_logging(Some("off"), Some("pretty"));
    let _ = init_logging(None, None);
}

#[test]
fn test_service_runs_with_subscriber_installed() {
    let _ = init_logging(Some("trace"), Some("compact"));
    let mut lot = parkway::ParkingService::new().unwrap();
    lot.add_car("ABC123", "P1").unwrap();
    assert!(lot.search_car("ABC123").found());
    lot.delete_car("ABC123").unwrap();
}
