use anyhow::{Context, Result};
use diskgraph::prelude::*;
use std::fs;
use std::path::Path;

/// Load a snapshot file and rebuild its scene without recomputing geometry.
pub fn read_scene<P: AsRef<Path>>(path: P, cfg: GeomCfg) -> Result<Scene> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let snapshot =
        Snapshot::from_json(&text).with_context(|| format!("parsing {}", path.display()))?;
    let scene = snapshot
        .restore(cfg)
        .with_context(|| format!("restoring {}", path.display()))?;
    tracing::info!(path = %path.display(), groups = scene.groups().len(), "snapshot loaded");
    Ok(scene)
}

/// Write `scene` as pretty JSON, creating parent directories as needed.
pub fn write_scene<P: AsRef<Path>>(path: P, scene: &Scene) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating snapshot dir {}", parent.display()))?;
        }
    }
    let text = Snapshot::capture(scene).to_json_pretty()?;
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "snapshot saved");
    Ok(())
}
