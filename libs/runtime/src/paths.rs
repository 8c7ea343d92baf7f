use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

/// Resolve the server home directory into an absolute path.
///
/// - `None` => `<user home>/<default_subdir>`
/// - `~` or `~/...` => expanded against the user home
/// - relative paths => joined onto the current working directory
///
/// When `create` is set the directory is created if missing.
pub fn resolve_home_dir(
    configured: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf> {
    let resolved = match configured {
        None => user_home()?.join(default_subdir),
        Some(raw) => expand(&raw)?,
    };

    if create {
        std::fs::create_dir_all(&resolved)
            .with_context(|| format!("failed to create home_dir '{}'", resolved.display()))?;
    }

    Ok(resolved)
}

fn user_home() -> Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| anyhow!("cannot determine the user home directory"))
}

fn expand(raw: &str) -> Result<PathBuf> {
    let path = if raw == "~" {
        user_home()?
    } else if let Some(rest) = raw.strip_prefix("~/") {
        user_home()?.join(rest)
    } else {
        PathBuf::from(raw)
    };

    if path.is_absolute() {
        Ok(path)
    } else {
        let cwd = std::env::current_dir().context("failed to read current directory")?;
        Ok(cwd.join(Path::new(&path)))
    }
}
