use super::*;
use figment::Jail;

#[test]
fn test_settings_default() {
    let settings = Settings::default();

    assert_eq!(settings.server.host, "127.0.0.1");
    assert_eq!(settings.server.port, 5000);
    assert_eq!(settings.storage.database_path, PathBuf::from("data/users.db"));
    assert_eq!(settings.session.cookie_name, "gatekeeper_session");
    assert_eq!(
        settings.download_path(),
        PathBuf::from("static/files/cheat_sheet.pdf")
    );
    assert!(settings.validate().is_ok());
}

#[test]
fn test_settings_validation() {
    let settings = Settings::default();

    let mut invalid = settings.clone();
    invalid.log_level = "loud".to_string();
    assert!(invalid.validate().is_err());

    let mut invalid = settings.clone();
    invalid.server.port = 0;
    assert!(invalid.validate().is_err());

    let mut invalid = settings.clone();
    invalid.session.cookie_name = "bad name;".to_string();
    assert!(invalid.validate().is_err());

    let mut invalid = settings.clone();
    invalid.assets.download_file = PathBuf::from("../secrets.db");
    assert!(invalid.validate().is_err());

    let mut invalid = settings.clone();
    invalid.assets.download_file = PathBuf::from("/etc/passwd");
    assert!(invalid.validate().is_err());

    let mut invalid = settings;
    invalid.password.scrypt_log_n = 30;
    assert!(invalid.validate().is_err());
}

#[test]
fn test_bind_addr() {
    let mut settings = Settings::default();
    assert_eq!(settings.bind_addr().unwrap().to_string(), "127.0.0.1:5000");

    settings.server.host = "not a host".to_string();
    assert!(settings.bind_addr().is_err());
}

#[test]
fn test_load_from_file_and_env() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "gatekeeper.toml",
            r#"
            log_level = "debug"

            [server]
            host = "0.0.0.0"
            port = 8080

            [storage]
            database_path = "test_data/users.db"
            "#,
        )?;
        jail.set_env("GATEKEEPER_SERVER__PORT", "9090");
        jail.set_env("GATEKEEPER_SESSION__COOKIE_NAME", "sid");

        let settings =
            Settings::load(Some(Path::new("gatekeeper.toml"))).map_err(|e| e.to_string())?;

        assert_eq!(settings.server.host, "0.0.0.0");
        // environment takes precedence over the file
        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.session.cookie_name, "sid");
        assert_eq!(settings.log_level, "debug");
        assert_eq!(
            settings.storage.database_path,
            PathBuf::from("test_data/users.db")
        );
        // untouched sections keep their defaults
        assert_eq!(settings.assets, AssetSettings::default());
        Ok(())
    });
}

#[test]
fn test_load_without_file_uses_defaults() {
    Jail::expect_with(|_jail| {
        let settings =
            Settings::load(Some(Path::new("missing.toml"))).map_err(|e| e.to_string())?;
        assert_eq!(settings, Settings::default());
        Ok(())
    });
}

#[test]
fn test_load_rejects_invalid_values() {
    Jail::expect_with(|jail| {
        jail.set_env("GATEKEEPER_LOG_LEVEL", "chatty");
        let result = Settings::load(Some(Path::new("missing.toml")));
        assert!(matches!(result, Err(AppError::Config(_))));
        Ok(())
    });
}
