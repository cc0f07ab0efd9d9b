use std::collections::HashMap;

use rawhttp::config::Config;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn test_config_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.listen_addr, "127.0.0.1:42069");
    assert_eq!(cfg.read_buffer_size, 1024);
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_config_from_yaml() {
    let cfg = Config::from_yaml_str(
        "listen_addr: \"0.0.0.0:3000\"\nread_buffer_size: 8192\nlog_level: debug\n",
    )
    .unwrap();

    assert_eq!(cfg.listen_addr, "0.0.0.0:3000");
    assert_eq!(cfg.read_buffer_size, 8192);
    assert_eq!(cfg.max_level().unwrap(), tracing::Level::DEBUG);
}

#[test]
fn test_config_partial_yaml_keeps_defaults() {
    let cfg = Config::from_yaml_str("read_buffer_size: 4096\n").unwrap();

    assert_eq!(cfg.listen_addr, "127.0.0.1:42069");
    assert_eq!(cfg.read_buffer_size, 4096);
}

#[test]
fn test_config_rejects_tiny_buffer() {
    assert!(Config::from_yaml_str("read_buffer_size: 8\n").is_err());
}

#[test]
fn test_config_rejects_unknown_log_level() {
    assert!(Config::from_yaml_str("log_level: chatty\n").is_err());
}

#[test]
fn test_config_env_overrides() {
    let mut cfg = Config::default();

    cfg.apply_env_with(env(&[
        ("LISTEN", "0.0.0.0:5000"),
        ("READ_BUFFER_SIZE", "2048"),
        ("LOG_LEVEL", "warn"),
    ]))
    .unwrap();

    assert_eq!(cfg.listen_addr, "0.0.0.0:5000");
    assert_eq!(cfg.read_buffer_size, 2048);
    assert_eq!(cfg.max_level().unwrap(), tracing::Level::WARN);
}

#[test]
fn test_config_env_missing_keeps_values() {
    let mut cfg = Config::default();

    cfg.apply_env_with(env(&[])).unwrap();

    assert_eq!(cfg, Config::default());
}

#[test]
fn test_config_env_bad_buffer_size() {
    let mut cfg = Config::default();

    assert!(cfg.apply_env_with(env(&[("READ_BUFFER_SIZE", "big")])).is_err());
}

#[test]
fn test_config_from_file() {
    let path = std::env::temp_dir().join(format!("rawhttp-config-{}.yaml", std::process::id()));
    std::fs::write(&path, "listen_addr: \"127.0.0.1:8000\"\n").unwrap();

    let cfg = Config::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(cfg.listen_addr, "127.0.0.1:8000");
}

#[test]
fn test_config_from_missing_file() {
    assert!(Config::from_file("/definitely/not/here.yaml").is_err());
}

#[test]
fn test_config_clone() {
    let cfg1 = Config::default();
    let cfg2 = cfg1.clone();
    assert_eq!(cfg1.listen_addr, cfg2.listen_addr);
}
