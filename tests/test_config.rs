use std::collections::HashMap;
use std::env::VarError;
use std::ffi::OsString;

use cmdport::config::{Config, DEFAULT_PORT, ListenConfig, config_path, parse_listen_spec};

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn test_config_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.listen.host, "0.0.0.0");
    assert_eq!(cfg.listen.port, DEFAULT_PORT);
    assert_eq!(cfg.listen.channel_capacity, 16);
}

#[test]
fn test_config_from_yaml() {
    let cfg = Config::from_yaml_str(
        "listen:\n  host: 127.0.0.1\n  port: 7000\n  channel_capacity: 2\n",
    )
    .unwrap();

    assert_eq!(
        cfg.listen,
        ListenConfig {
            host: "127.0.0.1".to_string(),
            port: 7000,
            channel_capacity: 2,
        }
    );
}

#[test]
fn test_config_yaml_partial_uses_defaults() {
    let cfg = Config::from_yaml_str("listen:\n  port: 0\n").unwrap();

    assert_eq!(cfg.listen.port, 0);
    assert_eq!(cfg.listen.host, "0.0.0.0");
    assert_eq!(cfg.listen.channel_capacity, 16);
}

#[test]
fn test_config_yaml_rejects_bad_port() {
    assert!(Config::from_yaml_str("listen:\n  port: 70000\n").is_err());
}

#[test]
fn test_config_listen_port_override() {
    let mut cfg = Config::default();
    cfg.apply_overrides(env(&[("LISTEN", "8000")])).unwrap();

    assert_eq!(cfg.listen.port, 8000);
    assert_eq!(cfg.listen.host, "0.0.0.0");
}

#[test]
fn test_config_listen_host_and_port_override() {
    let mut cfg = Config::default();
    cfg.apply_overrides(env(&[("LISTEN", "localhost:5000")])).unwrap();

    assert_eq!(cfg.listen.host, "localhost");
    assert_eq!(cfg.listen.port, 5000);
}

#[test]
fn test_config_listen_host_override_wins() {
    let mut cfg = Config::default();
    cfg.apply_overrides(env(&[("LISTEN", "localhost:5000"), ("LISTEN_HOST", "127.0.0.1")]))
        .unwrap();

    assert_eq!(cfg.listen.host, "127.0.0.1");
    assert_eq!(cfg.listen.port, 5000);
}

#[test]
fn test_config_listen_zero_disables() {
    let mut cfg = Config::default();
    cfg.apply_overrides(env(&[("LISTEN", "0")])).unwrap();

    assert_eq!(cfg.listen.port, 0);
}

#[test]
fn test_config_invalid_listen_spec() {
    let mut cfg = Config::default();

    assert!(cfg.apply_overrides(env(&[("LISTEN", "abc")])).is_err());
    assert!(parse_listen_spec(":6266").is_err());
    assert!(parse_listen_spec("host:").is_err());
    assert!(parse_listen_spec("99999").is_err());
}

#[test]
fn test_parse_listen_spec() {
    assert_eq!(parse_listen_spec("6266").unwrap(), (None, 6266));
    assert_eq!(
        parse_listen_spec(" 0.0.0.0:80 ").unwrap(),
        (Some("0.0.0.0".to_string()), 80)
    );
}

#[test]
fn test_config_clone() {
    let cfg1 = Config::default();
    let cfg2 = cfg1.clone();
    assert_eq!(cfg1.listen, cfg2.listen);
}

#[test]
fn test_config_path_unset_uses_defaults() {
    assert_eq!(config_path(Err(VarError::NotPresent)).unwrap(), None);
    assert_eq!(
        config_path(Ok("/etc/cmdport.yaml".to_string())).unwrap(),
        Some("/etc/cmdport.yaml".to_string())
    );
}

#[test]
fn test_config_path_not_unicode_is_error() {
    let err = config_path(Err(VarError::NotUnicode(OsString::from("bad")))).unwrap_err();

    assert!(err.to_string().contains("CMDPORT_CONFIG"));
}
