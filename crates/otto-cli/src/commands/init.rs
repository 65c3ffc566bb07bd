//! Config initialization command

use anyhow::{Context, Result};
use otto_core::DEFAULT_CONFIG_FILE;
use otto_viewer::ViewerConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// Where `init` writes: directories get `otto.toml` appended
fn target_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(DEFAULT_CONFIG_FILE)
    } else {
        path.to_path_buf()
    }
}

pub fn run(path: &Path, force: bool) -> Result<()> {
    let target = target_path(path);
    if target.exists() && !force {
        anyhow::bail!(
            "'{}' already exists (use --force to overwrite)",
            target.display()
        );
    }
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let text = ViewerConfig::default().to_toml_string()?;
    fs::write(&target, text).with_context(|| format!("Failed to write {}", target.display()))?;

    println!("Wrote {}", target.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directory_gets_default_file_name() {
        assert_eq!(target_path(Path::new(".")), Path::new(".").join("otto.toml"));
        assert_eq!(
            target_path(Path::new("configs/engine.toml")),
            PathBuf::from("configs/engine.toml")
        );
    }

    #[test]
    fn writes_loadable_config_and_refuses_overwrite() {
        let dir = std::env::temp_dir().join(format!("otto-init-{}", std::process::id()));
        let file = dir.join("otto.toml");
        let _ = fs::remove_dir_all(&dir);

        run(&file, false).unwrap();
        let loaded = ViewerConfig::load(&file).unwrap();
        assert_eq!(loaded, ViewerConfig::default());

        assert!(run(&file, false).is_err());
        run(&file, true).unwrap();

        fs::remove_dir_all(&dir).unwrap();
    }
}
