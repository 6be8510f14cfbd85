use std::io::Write;

use gorest_config::*;

fn toml_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
#[serial_test::serial]
fn test_defaults_when_no_sources() {
    let manager = ConfigManager::with_path("does/not/exist.toml")
        .with_env_prefix("GOREST_TEST_EMPTY")
        .without_dotenv();

    assert!(manager.config_path().ends_with("exist.toml"));
    let config = manager.load().unwrap();
    assert_eq!(config, EnvConfig::default());
}

#[test]
#[serial_test::serial]
fn test_load_from_file() {
    let file = toml_file(
        r#"
base_url = "http://localhost:8080/v2"
auth_token = "file-token"
environment = "staging"
timeout_secs = 3
"#,
    );

    let manager = ConfigManager::with_path(file.path())
        .with_env_prefix("GOREST_TEST_FILE")
        .without_dotenv();
    let config = manager.load().unwrap();

    assert_eq!(config.base_url, "http://localhost:8080/v2");
    assert_eq!(config.require_auth_token().unwrap(), "file-token");
    assert_eq!(config.environment, "staging");
    assert_eq!(config.timeout_secs, 3);
}

#[test]
#[serial_test::serial]
fn test_environment_overrides_file() {
    let file = toml_file("auth_token = \"file-token\"\nenvironment = \"staging\"\n");

    std::env::set_var("GOREST_TEST_ENV_AUTH_TOKEN", "env-token");
    std::env::set_var("GOREST_TEST_ENV_TIMEOUT_SECS", "25");

    let manager = ConfigManager::with_path(file.path())
        .with_env_prefix("GOREST_TEST_ENV")
        .without_dotenv();
    let config = manager.load().unwrap();

    assert_eq!(config.require_auth_token().unwrap(), "env-token");
    assert_eq!(config.environment, "staging");
    assert_eq!(config.timeout_secs, 25);

    std::env::remove_var("GOREST_TEST_ENV_AUTH_TOKEN");
    std::env::remove_var("GOREST_TEST_ENV_TIMEOUT_SECS");
}

#[test]
fn test_config_validation() {
    let manager = ConfigManager::new();
    let mut config = EnvConfig::default();
    assert!(manager.validate_config(&config).is_ok());

    config.timeout_secs = 0;
    assert!(matches!(
        manager.validate_config(&config),
        Err(ConfigError::Validation(_))
    ));

    let config = EnvConfig::default().with_base_url("not a url");
    assert!(manager.validate_config(&config).is_err());

    let config = EnvConfig::default().with_base_url("ftp://example.com");
    assert!(manager.validate_config(&config).is_err());
}

#[test]
#[serial_test::serial]
fn test_invalid_file_reports_load_error() {
    let file = toml_file("timeout_secs = \"soon\"\n");

    let manager = ConfigManager::with_path(file.path())
        .with_env_prefix("GOREST_TEST_BAD")
        .without_dotenv();
    assert!(matches!(manager.load(), Err(ConfigError::Load(_))));
}

#[test]
#[serial_test::serial]
fn test_environment_selects_config_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("staging.toml"),
        "base_url = \"http://staging.local/v2\"\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("qa.toml"),
        "base_url = \"http://qa.local/v2\"\n",
    )
    .unwrap();

    let manager = ConfigManager::new()
        .with_config_dir(dir.path())
        .with_env_prefix("GOREST_TEST_STAGE")
        .without_dotenv();

    assert_eq!(manager.environment(), "QA");
    assert_eq!(manager.config_path(), dir.path().join("qa.toml"));
    assert_eq!(manager.load().unwrap().base_url, "http://qa.local/v2");

    std::env::set_var("GOREST_TEST_STAGE_ENVIRONMENT", "staging");
    let config = manager.load();
    std::env::remove_var("GOREST_TEST_STAGE_ENVIRONMENT");

    let config = config.unwrap();
    assert_eq!(config.environment, "staging");
    assert_eq!(config.base_url, "http://staging.local/v2");
}

#[test]
#[serial_test::serial]
fn test_environment_label_is_lowercased_for_file_name() {
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var("GOREST_TEST_CASE_ENVIRONMENT", "Staging");

    let manager = ConfigManager::new()
        .with_config_dir(dir.path())
        .with_env_prefix("GOREST_TEST_CASE");
    let path = manager.config_path();
    std::env::remove_var("GOREST_TEST_CASE_ENVIRONMENT");

    assert_eq!(path, dir.path().join("staging.toml"));
}
