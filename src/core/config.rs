use crate::config::Config;
use crate::errors::{AppError, AppResult};
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    pub fn print(cfg: &Config) -> AppResult<()> {
        println!("📄 Current configuration:\n");
        println!("{}", cfg.to_yaml()?);
        Ok(())
    }

    /// Platform editor: `$EDITOR`, `$VISUAL`, then nano/notepad.
    pub fn default_editor() -> String {
        std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            })
    }

    fn open_with(editor: &str, path: &Path) -> bool {
        matches!(Command::new(editor).arg(path).status(), Ok(s) if s.success())
    }

    /// Open the config file in `editor`, falling back to the default one.
    pub fn edit(path: &Path, editor: Option<&str>) -> AppResult<()> {
        if !path.exists() {
            return Err(AppError::Config(format!(
                "configuration file not found: {} (run `init` first)",
                path.display()
            )));
        }

        let default_editor = Self::default_editor();
        let requested = editor.unwrap_or(&default_editor);

        if Self::open_with(requested, path) {
            println!("✅ Configuration file edited using '{}'", requested);
            return Ok(());
        }

        if requested != default_editor {
            eprintln!(
                "⚠️  Editor '{}' not available, falling back to '{}'",
                requested, default_editor
            );
            if Self::open_with(&default_editor, path) {
                println!(
                    "✅ Configuration file edited using fallback '{}'",
                    default_editor
                );
                return Ok(());
            }
        }

        Err(AppError::Config(format!(
            "failed to edit {} with '{}'",
            path.display(),
            default_editor
        )))
    }
}
