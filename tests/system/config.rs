use core::time::Duration;

use libtash::system::Error;
use libtash::system::config::{Config, DEFAULT_PROMPT};
use libtash::system::line::LINE_BUFFER_SIZE;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.prompt.as_str(), DEFAULT_PROMPT);
    assert_eq!(config.max_line_len, LINE_BUFFER_SIZE);
    assert_eq!(config.poll_timeout(), Duration::from_secs(6));
    assert_eq!(config.open_attempts(), 6);
    assert!(config.echo);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_from_json_full() {
    let json = br#"{
        "prompt": "dev> ",
        "max_line_len": 64,
        "poll_timeout_ms": 250,
        "open_retries": 2,
        "backoff_us": 1000,
        "echo": false
    }"#;

    let config = Config::from_json(json).unwrap();

    assert_eq!(config.prompt.as_str(), "dev> ");
    assert_eq!(config.max_line_len, 64);
    assert_eq!(config.poll_timeout(), Duration::from_millis(250));
    assert_eq!(config.open_attempts(), 3);
    assert_eq!(config.backoff_us, 1000);
    assert!(!config.echo);
}

#[test]
fn test_from_json_partial_uses_defaults() {
    let config = Config::from_json(br#"{"poll_timeout_ms": 10}"#).unwrap();

    assert_eq!(
        config,
        Config {
            poll_timeout_ms: 10,
            ..Config::default()
        }
    );
}

#[test]
fn test_from_json_rejects_bad_input() {
    assert_eq!(Config::from_json(b"not json"), Err(Error::InvalidConfig));
    assert_eq!(
        Config::from_json(br#"{"max_line_len": 4096}"#),
        Err(Error::InvalidConfig)
    );
    assert_eq!(
        Config::from_json(br#"{"max_line_len": 1}"#),
        Err(Error::InvalidConfig)
    );
    assert_eq!(
        Config::from_json(br#"{"prompt": "a prompt that is far too long"}"#),
        Err(Error::InvalidConfig)
    );
}

#[test]
fn test_config_to_json() {
    let mut buffer = [0u8; 256];
    let len = serde_json_core::to_slice(&Config::default(), &mut buffer).unwrap();

    assert_eq!(Config::from_json(&buffer[..len]), Ok(Config::default()));
}
