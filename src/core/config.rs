use crate::config::{Config, migrate};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    pub fn print(cfg: &Config) -> AppResult<()> {
        println!("📄 Current configuration:\n");
        println!("{}", serde_yaml::to_string(cfg)?);
        Ok(())
    }

    /// Reports keys missing from the file; returns how many are missing.
    pub fn check(path: &Path) -> AppResult<usize> {
        if !path.exists() {
            warning(format!("No configuration file at {}", path.display()));
            return Ok(0);
        }

        let missing = migrate::missing_keys(path)?;
        if missing.is_empty() {
            success("Configuration file is complete.");
        } else {
            warning(format!(
                "Missing keys: {} (run `config --migrate` to add defaults)",
                missing.join(", ")
            ));
        }

        // Also surfaces invalid values (timezone, YAML types).
        Config::load_from(path)?;
        Ok(missing.len())
    }

    pub fn migrate(path: &Path) -> AppResult<Vec<String>> {
        if !path.exists() {
            return Err(AppError::Config(format!(
                "No configuration file at {}; run `init` first",
                path.display()
            )));
        }
        migrate::add_missing_keys(path)
    }

    /// Opens the file in the requested editor, falling back to $EDITOR/$VISUAL
    /// or the platform default.
    pub fn edit(path: &Path, editor: &Option<String>) -> AppResult<()> {
        let default_editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });
        let requested = editor.clone().unwrap_or_else(|| default_editor.clone());

        let run = |ed: &str| Command::new(ed).arg(path).status().map(|s| s.success());

        match run(&requested) {
            Ok(true) => {
                success(format!("Configuration file edited using '{}'", requested));
                Ok(())
            }
            _ if requested != default_editor => {
                warning(format!(
                    "Editor '{}' not available, falling back to '{}'",
                    requested, default_editor
                ));
                match run(&default_editor) {
                    Ok(true) => {
                        success(format!(
                            "Configuration file edited using fallback '{}'",
                            default_editor
                        ));
                        Ok(())
                    }
                    _ => Err(AppError::Config(format!(
                        "Failed to edit configuration file using '{}'",
                        default_editor
                    ))),
                }
            }
            _ => Err(AppError::Config(format!(
                "Failed to edit configuration file using '{}'",
                requested
            ))),
        }
    }
}
