//! Pool manifest loading
//!
//! Pools are declared in a RON (or JSON) file listing each tag, the template
//! it clones, its size and the container its items are grouped under.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::pool::PoolRegistry;
use crate::scene::SceneHost;

/// Declaration of a single pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSpec {
    /// Unique pool tag
    pub tag: String,
    /// Name of the template to clone
    pub template: String,
    /// Number of items to pre-instantiate
    pub size: usize,
    /// Name of the container to group items under
    #[serde(default)]
    pub container: Option<String>,
}

/// A list of pool declarations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolManifest {
    pub pools: Vec<PoolSpec>,
}

impl PoolManifest {
    /// Parse a manifest from a RON string
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid manifest
    pub fn from_ron_str(text: &str) -> Result<Self, ManifestError> {
        ron::from_str(text).map_err(|e| ManifestError::DeserializeError(e.to_string()))
    }

    /// Load a manifest from a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or deserialization fails
    pub fn load_ron(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let content =
            fs::read_to_string(path).map_err(|e| ManifestError::IoError(e.to_string()))?;
        Self::from_ron_str(&content)
    }

    /// Save the manifest to a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save_ron(&self, path: impl AsRef<Path>) -> Result<(), ManifestError> {
        let ron_string = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ManifestError::SerializeError(e.to_string()))?;
        fs::write(path, ron_string).map_err(|e| ManifestError::IoError(e.to_string()))?;
        Ok(())
    }

    /// Load a manifest from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or deserialization fails
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let content =
            fs::read_to_string(path).map_err(|e| ManifestError::IoError(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| ManifestError::DeserializeError(e.to_string()))
    }

    /// Save the manifest to a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), ManifestError> {
        let json_string = serde_json::to_string_pretty(self)
            .map_err(|e| ManifestError::SerializeError(e.to_string()))?;
        fs::write(path, json_string).map_err(|e| ManifestError::IoError(e.to_string()))?;
        Ok(())
    }

    /// Create every declared pool, in order.
    ///
    /// `template` and `container` resolve names against the host. An entry
    /// whose template can't be resolved is skipped; an entry whose container
    /// can't be resolved is created ungrouped. Duplicate tags are reported
    /// by the registry and skipped.
    ///
    /// Returns the number of pools created.
    pub fn apply<H: SceneHost>(
        &self,
        pools: &mut PoolRegistry<H>,
        host: &mut H,
        mut template: impl FnMut(&H, &str) -> Option<H::Template>,
        mut container: impl FnMut(&H, &str) -> Option<H::Container>,
    ) -> usize {
        let mut created = 0;
        for spec in &self.pools {
            let Some(prefab) = template(&*host, &spec.template) else {
                log::warn!(
                    "Skipping pool '{}': unknown template '{}'",
                    spec.tag,
                    spec.template
                );
                continue;
            };

            let parent = spec.container.as_deref().and_then(|name| {
                let found = container(&*host, name);
                if found.is_none() {
                    log::warn!(
                        "Pool '{}': unknown container '{name}', items left ungrouped",
                        spec.tag
                    );
                }
                found
            });

            if pools
                .create_pool(host, spec.tag.clone(), prefab, spec.size, parent)
                .is_ok()
            {
                created += 1;
            }
        }
        log::info!("Created {created} of {} declared pools", self.pools.len());
        created
    }

    /// Get the number of declared pools
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Check if the manifest declares no pools
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }
}

/// Errors that can occur while loading or saving a manifest
#[derive(Debug, Clone)]
pub enum ManifestError {
    /// IO error
    IoError(String),
    /// Serialization error
    SerializeError(String),
    /// Deserialization error
    DeserializeError(String),
}

impl std::fmt::Display for ManifestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO error: {e}"),
            Self::SerializeError(e) => write!(f, "Serialization error: {e}"),
            Self::DeserializeError(e) => write!(f, "Deserialization error: {e}"),
        }
    }
}

impl std::error::Error for ManifestError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Prefab, SceneWorld};

    const MANIFEST: &str = r#"(
        pools: [
            (tag: "Cards", template: "card", size: 4, container: Some("grid")),
            (tag: "AudioSource", template: "audio", size: 2),
            (tag: "Ghost", template: "missing", size: 3),
            (tag: "leaderboardEntry", template: "row", size: 2, container: Some("nowhere")),
            (tag: "Cards", template: "card", size: 9),
        ],
    )"#;

    fn world() -> SceneWorld {
        let mut world = SceneWorld::new();
        world.spawn_container("grid");
        world.register_prefab("card", Prefab::new("Card"));
        world.register_prefab("audio", Prefab::new("AudioSource"));
        world.register_prefab("row", Prefab::new("LeaderboardEntry"));
        world
    }

    fn apply(
        manifest: &PoolManifest,
        world: &mut SceneWorld,
    ) -> (PoolRegistry<SceneWorld>, usize) {
        let mut pools = PoolRegistry::new();
        let created = manifest.apply(
            &mut pools,
            world,
            |w, name| w.prefab(name).cloned(),
            |w, name| w.container(name),
        );
        (pools, created)
    }

    #[test]
    fn test_parse_ron_manifest() {
        let manifest = PoolManifest::from_ron_str(MANIFEST).unwrap();

        assert_eq!(manifest.len(), 5);
        assert_eq!(manifest.pools[1].container, None);
        assert_eq!(manifest.pools[0].container.as_deref(), Some("grid"));
    }

    #[test]
    fn test_apply_manifest() {
        let manifest = PoolManifest::from_ron_str(MANIFEST).unwrap();
        let mut world = world();

        let (pools, created) = apply(&manifest, &mut world);

        // Ghost has no template and the second Cards is a duplicate
        assert_eq!(created, 3);
        assert!(!pools.contains("Ghost"));
        assert_eq!(pools.capacity("Cards"), Some(4));

        let grid = world.container("grid").unwrap();
        assert_eq!(pools.container("Cards"), Some(grid));
        assert_eq!(world.children(grid).len(), 4);

        // Unknown container still creates the pool
        assert_eq!(pools.capacity("leaderboardEntry"), Some(2));
        assert_eq!(pools.container("leaderboardEntry"), None);
    }

    #[test]
    fn test_invalid_manifest() {
        let result = PoolManifest::from_ron_str("(pools: [(tag: 3)])");
        assert!(matches!(result, Err(ManifestError::DeserializeError(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = PoolManifest::load_ron("definitely/not/here.ron");
        assert!(matches!(result, Err(ManifestError::IoError(_))));
    }

    #[test]
    fn test_json_file_round_trip() {
        let manifest = PoolManifest::from_ron_str(MANIFEST).unwrap();
        let path = std::env::temp_dir()
            .join(format!("tagpool-manifest-{}.json", std::process::id()));

        manifest.save_json(&path).unwrap();
        let loaded = PoolManifest::load_json(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, manifest);
    }

    #[test]
    fn test_ron_file_round_trip() {
        let manifest = PoolManifest::from_ron_str(MANIFEST).unwrap();
        assert!(manifest.pools.iter().any(|p| p.container.is_some()));
        assert!(manifest.pools.iter().any(|p| p.container.is_none()));
        let path = std::env::temp_dir()
            .join(format!("tagpool-manifest-{}.ron", std::process::id()));

        manifest.save_ron(&path).unwrap();
        let loaded = PoolManifest::load_ron(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, manifest);
        assert_eq!(loaded.pools[1].container, None);
    }
}
