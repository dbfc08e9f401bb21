use crate::cli::output::OutputFormatter;
use crate::config::Config;
use crate::error::{HelpdeskError, Result};
use std::fs;

/// Print the effective configuration after all layers are applied
pub fn handle_config_show(config: &Config, output: &OutputFormatter) -> Result<()> {
    if output.is_json() {
        return output.print_json(config);
    }
    output.info(serde_yaml::to_string(config)?.trim_end());
    Ok(())
}

/// Set one key in the configuration file
///
/// A file that no longer parses is moved aside to `config.yaml.bak` and the
/// key is written into a fresh file, so a broken config can always be fixed
/// from the command line.
pub fn handle_config_set(key: &str, value: &str, output: &OutputFormatter) -> Result<()> {
    let path = Config::config_path()?;
    let mut backup = None;
    let mut config = match Config::load_file(&path) {
        Ok(config) => config,
        Err(HelpdeskError::Yaml(e)) => {
            let moved = path.with_extension("yaml.bak");
            fs::rename(&path, &moved)?;
            tracing::warn!(path = %path.display(), error = %e, "replacing unreadable configuration");
            output.warning(&format!(
                "{} could not be parsed ({e}); moved it to {} and started from defaults",
                path.display(),
                moved.display()
            ));
            backup = Some(moved);
            Config::default()
        },
        Err(e) => return Err(e),
    };
    config.set(key, value)?;
    config.save_to(&path)?;

    if output.is_json() {
        output.print_json(&serde_json::json!({
            "status": "success",
            "key": key,
            "value": value,
            "path": path.display().to_string(),
            "backup": backup.map(|p| p.display().to_string()),
        }))?;
    } else {
        output.success(&format!("Set {key} = {value}"));
    }
    Ok(())
}

pub fn handle_config_path(output: &OutputFormatter) -> Result<()> {
    let path = Config::config_path()?;
    if output.is_json() {
        output.print_json(&serde_json::json!({ "path": path.display().to_string() }))?;
    } else {
        output.info(&path.display().to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_DIR_ENV;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_set_writes_into_config_dir() {
        let temp = TempDir::new().unwrap();
        // SAFETY: serialized with every other env-touching test
        unsafe { std::env::set_var(CONFIG_DIR_ENV, temp.path()) };

        let output = OutputFormatter::new(true, true);
        handle_config_set("api.base_url", "https://help.example.com/api", &output).unwrap();
        let result = handle_config_set("ui.colour", "false", &output);
        let config = Config::load_file(&temp.path().join("config.yaml")).unwrap();

        unsafe { std::env::remove_var(CONFIG_DIR_ENV) };
        assert!(result.is_err());
        assert_eq!(config.api.base_url, "https://help.example.com/api");
    }

    #[test]
    #[serial]
    fn test_set_replaces_unparsable_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "api: [unclosed").unwrap();
        // SAFETY: serialized with every other env-touching test
        unsafe { std::env::set_var(CONFIG_DIR_ENV, temp.path()) };

        let result = handle_config_set(
            "api.base_url",
            "http://localhost:8080/api",
            &OutputFormatter::new(true, true),
        );

        unsafe { std::env::remove_var(CONFIG_DIR_ENV) };
        result.unwrap();
        let config = Config::load_file(&path).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080/api");
        assert_eq!(
            fs::read_to_string(temp.path().join("config.yaml.bak")).unwrap(),
            "api: [unclosed"
        );
    }
}
