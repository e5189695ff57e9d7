//! Configuration command handlers

use crate::cli::{ConfigAction, ConfigArgs, ConfigInitArgs, OutputFormat};
use crate::config::{Config, ConfigBuilder};
use crate::error::{Error, ErrorContext, Result};
use crate::output::OutputWriter;
use std::path::Path;

/// Handle the config command
pub fn handle_config(
    args: ConfigArgs,
    config: &Config,
    explicit: Option<&Path>,
    output: &mut OutputWriter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => handle_config_show(config, output),
        ConfigAction::Init(init_args) => handle_config_init(init_args, output),
        ConfigAction::Path => handle_config_path(explicit, output),
    }
}

fn handle_config_show(config: &Config, output: &mut OutputWriter) -> Result<()> {
    if output.format() == OutputFormat::Human {
        output.section("Configuration")?;
        let yaml = serde_yaml::to_string(config)?;
        return output.writeln(yaml.trim_end());
    }
    output.data(config)
}

fn handle_config_init(args: ConfigInitArgs, output: &mut OutputWriter) -> Result<()> {
    if args.path.exists() && !args.force {
        return Err(Error::AlreadyExists { path: args.path });
    }

    let mut builder = ConfigBuilder::new().include_builtin(!args.no_builtin);
    if let Some(locale) = args.default_locale {
        builder = builder.default_locale(locale);
    }
    if let Some(dir) = args.resources_dir {
        builder = builder.resources_dir(dir);
    }
    if let Some(level) = args.log_level {
        builder = builder.log_level(level);
    }

    builder
        .build()
        .save(&args.path)
        .with_context(|| format!("Failed to write {}", args.path.display()))?;

    output.success(&format!("✓ Created config at {}", args.path.display()))?;
    output.info("Edit it to adjust locale, catalog and logging settings.")
}

fn handle_config_path(explicit: Option<&Path>, output: &mut OutputWriter) -> Result<()> {
    match Config::locate(explicit) {
        Some(path) => output.data(&path.display().to_string()),
        None => {
            output.info("No configuration file found; using built-in defaults")?;
            if output.format() != OutputFormat::Human {
                output.data(&serde_json::Value::Null)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn init_args(path: &Path) -> ConfigInitArgs {
        ConfigInitArgs {
            path: path.to_path_buf(),
            force: false,
            default_locale: None,
            resources_dir: None,
            no_builtin: false,
            log_level: None,
        }
    }

    fn sink() -> OutputWriter {
        OutputWriter::with_writer(OutputFormat::Human, false, true, Box::new(std::io::sink()))
    }

    #[test]
    fn test_init_writes_loadable_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("faultline.yaml");

        let args = ConfigArgs {
            action: ConfigAction::Init(init_args(&path)),
        };
        handle_config(args, &Config::default(), None, &mut sink()).unwrap();

        assert_eq!(Config::from_file(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_init_applies_flags() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("faultline.yaml");

        let args = ConfigArgs {
            action: ConfigAction::Init(ConfigInitArgs {
                default_locale: Some("fr-FR".to_string()),
                resources_dir: Some(PathBuf::from("locales")),
                no_builtin: true,
                log_level: Some("debug".to_string()),
                ..init_args(&path)
            }),
        };
        handle_config(args, &Config::default(), None, &mut sink()).unwrap();

        let written = Config::from_file(&path).unwrap();
        assert_eq!(written.locale.default, "fr-FR");
        assert_eq!(written.resources.dir, Some(PathBuf::from("locales")));
        assert!(!written.resources.include_builtin);
        assert_eq!(written.logging.level, "debug");
        assert_eq!(written.output, Config::default().output);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("faultline.json");
        std::fs::write(&path, "{}").unwrap();

        let init = |force| ConfigArgs {
            action: ConfigAction::Init(ConfigInitArgs {
                force,
                ..init_args(&path)
            }),
        };

        let err = handle_config(init(false), &Config::default(), None, &mut sink()).unwrap_err();
        assert!(matches!(err, Error::AlreadyExists { .. }));

        handle_config(init(true), &Config::default(), None, &mut sink()).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("\"include_builtin\": true"));
    }

    #[test]
    fn test_show_and_path() {
        let args = ConfigArgs {
            action: ConfigAction::Show,
        };
        handle_config(args, &Config::default(), None, &mut sink()).unwrap();

        let args = ConfigArgs {
            action: ConfigAction::Path,
        };
        handle_config(args, &Config::default(), Some(Path::new("x.yaml")), &mut sink()).unwrap();
    }
}
