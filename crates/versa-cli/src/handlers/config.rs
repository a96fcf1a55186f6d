//! Configuration command handlers

use crate::cli::{ConfigAction, ConfigArgs, ConfigFormat, ConfigInitArgs, ConfigShowArgs};
use crate::config::{Config, ConfigBuilder};
use crate::error::{Error, ErrorContext, Result};
use crate::output::OutputWriter;
use versa_core::ParseMode;

/// Handle the config command
pub fn handle_config(args: ConfigArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    match args.action {
        ConfigAction::Init(init_args) => handle_config_init(init_args, output),
        ConfigAction::Show(show_args) => handle_config_show(show_args, config, output),
    }
}

/// Handle config init subcommand
fn handle_config_init(args: ConfigInitArgs, output: &mut OutputWriter) -> Result<()> {
    let path = match (&args.path, args.user) {
        (Some(path), _) => path.clone(),
        (None, true) => Config::user_config_path()
            .ok_or_else(|| Error::config("Unable to determine user config directory"))?,
        (None, false) => Config::project_config_path(),
    };

    if path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        ))?;
        return Ok(());
    }

    let config = initial_config(&args);
    config
        .save(&path)
        .with_context(|| format!("Writing {}", path.display()))?;
    output.success(&format!("✓ Created config at {}", path.display()))?;
    output.info("Edit it to customize parsing, comparison and output settings.")?;
    Ok(())
}

/// Build the configuration written by `config init`
fn initial_config(args: &ConfigInitArgs) -> Config {
    let mut builder = ConfigBuilder::new();

    if args.strict {
        builder = builder.parse_mode(ParseMode::Strict);
    }
    if let Some(max_depth) = args.max_depth {
        builder = builder.max_depth(max_depth);
    }
    if let Some(format) = args.output_format {
        builder = builder.output_format(format);
    }
    if let Some(level) = &args.log_level {
        builder = builder.log_level(level.clone());
    }

    builder.build()
}

/// Handle config show subcommand
fn handle_config_show(args: ConfigShowArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let content = match args.format {
        ConfigFormat::Toml => toml::to_string_pretty(config)
            .map_err(|e| Error::config(format!("Failed to serialize as TOML: {}", e)))?,
        ConfigFormat::Json => serde_json::to_string_pretty(config).context("Serializing configuration")?,
        ConfigFormat::Yaml => serde_yaml::to_string(config).context("Serializing configuration")?,
    };

    output.writeln(content.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use crate::output::tests::writer;
    use tempfile::TempDir;

    fn init_args(path: std::path::PathBuf) -> ConfigInitArgs {
        ConfigInitArgs {
            path: Some(path),
            user: false,
            force: false,
            strict: false,
            max_depth: None,
            output_format: None,
            log_level: None,
        }
    }

    #[test]
    fn test_init_writes_requested_settings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("versa.yaml");
        let args = ConfigInitArgs {
            strict: true,
            max_depth: Some(12),
            output_format: Some(OutputFormat::Json),
            ..init_args(path.clone())
        };

        let (mut out, buffer) = writer(OutputFormat::Human);
        handle_config_init(args, &mut out).unwrap();
        assert!(buffer.contents().contains("Created config"));

        let saved = Config::from_file(&path).unwrap();
        assert_eq!(saved.parsing.mode, ParseMode::Strict);
        assert_eq!(saved.comparator.max_depth, 12);
        assert_eq!(saved.output.format, OutputFormat::Json);
        assert_eq!(saved.logging.level, "warn");
    }

    #[test]
    fn test_init_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".versa.toml");
        std::fs::write(&path, "[comparator]\nmax_depth = 3\n").unwrap();

        let (mut out, buffer) = writer(OutputFormat::Human);
        handle_config_init(init_args(path.clone()), &mut out).unwrap();
        assert!(buffer.contents().contains("already exists"));
        assert_eq!(Config::from_file(&path).unwrap().comparator.max_depth, 3);

        let args = ConfigInitArgs {
            force: true,
            ..init_args(path.clone())
        };
        handle_config_init(args, &mut out).unwrap();
        assert_eq!(Config::from_file(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_show_formats() {
        let config = Config::default();

        let (mut out, buffer) = writer(OutputFormat::Human);
        handle_config_show(ConfigShowArgs { format: ConfigFormat::Toml }, &config, &mut out).unwrap();
        assert!(buffer.contents().contains("[comparator]"));
        assert!(buffer.contents().contains("max_depth = 64"));

        let (mut out, buffer) = writer(OutputFormat::Human);
        handle_config_show(ConfigShowArgs { format: ConfigFormat::Json }, &config, &mut out).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&buffer.contents()).unwrap();
        assert_eq!(parsed["parsing"]["mode"], "lenient");

        let (mut out, buffer) = writer(OutputFormat::Human);
        handle_config_show(ConfigShowArgs { format: ConfigFormat::Yaml }, &config, &mut out).unwrap();
        assert!(buffer.contents().contains("format: human"));
    }
}
