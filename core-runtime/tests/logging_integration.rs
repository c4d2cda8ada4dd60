//! Integration tests for logging system

use bridge_traits::time::LogLevel;
use core_runtime::logging::{init_logging, redact_if_sensitive, LogFormat, LoggingConfig};

#[test]
fn test_logging_initializes_once() {
    let config = LoggingConfig::default()
        .with_format(LogFormat::Compact)
        .with_level(LogLevel::Debug);

    assert!(init_logging(config.clone()).is_ok());
    // A global subscriber is already installed for this process
    assert!(init_logging(config).is_err());
}

#[test]
fn test_redaction_of_credentials() {
    assert_eq!(redact_if_sensitive("access_token", "EAAB123"), "[REDACTED]");
    assert_eq!(redact_if_sensitive("oauth_token_secret", "s3cr3t"), "[REDACTED]");
    assert_eq!(redact_if_sensitive("Authorization", "Bearer EAAB123"), "[REDACTED]");
}

#[test]
fn test_redaction_leaves_api_identifiers() {
    assert_eq!(redact_if_sensitive("album_id", "10151447271460580"), "10151447271460580");
    assert_eq!(redact_if_sensitive("screen_name", "habuma"), "habuma");
    assert_eq!(redact_if_sensitive("message_id", "42"), "42");
}

#[test]
fn test_format_selection() {
    #[cfg(debug_assertions)]
    assert_eq!(LoggingConfig::default().format, LogFormat::Pretty);

    #[cfg(not(debug_assertions))]
    assert_eq!(LoggingConfig::default().format, LogFormat::Json);
}

#[test]
fn test_config_chaining() {
    let config = LoggingConfig::default()
        .with_format(LogFormat::Json)
        .with_level(LogLevel::Warn)
        .with_pii_redaction(false)
        .with_spans(false)
        .with_target(false)
        .with_thread_info(true);

    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.level, LogLevel::Warn);
    assert!(!config.redact_pii);
    assert!(!config.enable_spans);
    assert!(!config.display_target);
    assert!(config.display_thread_info);
}
