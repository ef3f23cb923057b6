//! Session kept between invocations, the CLI's stand-in for browser session
//! storage.

use anyhow::{Context, Result};
use cookbook_core::Session;
use std::path::Path;

pub fn load(path: &Path) -> Session {
    let Ok(raw) = std::fs::read_to_string(path) else {
        return Session::default();
    };
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable session file");
        Session::default()
    })
}

pub fn save(path: &Path, session: &Session) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let json = serde_json::to_string_pretty(session)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

pub fn clear(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("removing {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("session.json");
        assert_eq!(load(&path), Session::default());

        save(&path, &Session::new("tok", true)).unwrap();
        assert_eq!(load(&path), Session::new("tok", true));

        clear(&path).unwrap();
        clear(&path).unwrap();
        assert!(!load(&path).is_authenticated());
    }
}
