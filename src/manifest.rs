//! Project manifest (tilepack.yaml) parsing.
//!
//! The manifest names the inputs of a project and where its resources go.
//! Every field is optional; command-line flags override it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::compile::{CompileOptions, DEFAULT_NAME};
use crate::error::{PackError, Result};

/// Manifest filename looked up in the project directory.
pub const MANIFEST_FILENAME: &str = "tilepack.yaml";

/// Project manifest loaded from tilepack.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Symbol prefix of the generated resources.
    #[serde(default = "default_name")]
    pub name: String,

    /// Tile bitmap.
    pub image: Option<PathBuf>,

    /// Tile grid as a JSON array of rows.
    pub tilemap: Option<PathBuf>,

    /// Collision heightmap store.
    pub collision: Option<PathBuf>,

    /// Project root receiving `res/` and `src/`.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Deduplicate referenced tiles before encoding.
    #[serde(default = "default_true")]
    pub compact: bool,

    /// Where to write the hardware colour preview PNG.
    pub preview: Option<PathBuf>,

    /// Emit the `src/main.c` loader.
    #[serde(default = "default_true")]
    pub stub: bool,
}

fn default_name() -> String {
    DEFAULT_NAME.to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            name: default_name(),
            image: None,
            tilemap: None,
            collision: None,
            output: default_output(),
            compact: true,
            preview: None,
            stub: true,
        }
    }
}

impl Manifest {
    /// Load manifest from a tilepack.yaml file.
    ///
    /// Relative input and output paths are resolved against the manifest's
    /// directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| PackError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        let manifest = Self::parse(&content)?;
        match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => Ok(manifest.relative_to(dir)),
            _ => Ok(manifest),
        }
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| PackError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some(format!("Check {} syntax", MANIFEST_FILENAME)),
        })
    }

    /// Resolve every relative path against `dir`.
    pub fn relative_to(mut self, dir: &Path) -> Self {
        let join = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = dir.join(&*p);
            }
        };
        for path in [&mut self.image, &mut self.tilemap, &mut self.collision, &mut self.preview]
            .into_iter()
            .flatten()
        {
            join(path);
        }
        join(&mut self.output);
        self
    }

    /// Compile settings carried by this manifest.
    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            name: self.name.clone(),
            compact: self.compact,
            stub: self.stub,
        }
    }

    /// Default manifest text written by `tilepack init`.
    pub fn template() -> String {
        format!(
            "name: {}\nimage: tiles.png\n# tilemap: tilemap.json\n# collision: collision_map.json\noutput: .\n",
            DEFAULT_NAME
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_minimal_manifest() {
        let manifest = Manifest::parse("image: bg.png").unwrap();

        assert_eq!(manifest.image, Some(PathBuf::from("bg.png")));
        assert_eq!(manifest.name, "blue");
        assert_eq!(manifest.output, PathBuf::from("."));
        assert!(manifest.compact);
        assert!(manifest.stub);
        assert!(manifest.tilemap.is_none());
    }

    #[test]
    fn test_parse_full_manifest() {
        let yaml = r#"
name: forest
image: art/forest.png
tilemap: art/forest.json
collision: collision_map.json
output: game
compact: false
preview: build/preview.png
stub: false
"#;
        let manifest = Manifest::parse(yaml).unwrap();

        assert_eq!(manifest.name, "forest");
        assert_eq!(manifest.image, Some(PathBuf::from("art/forest.png")));
        assert_eq!(manifest.tilemap, Some(PathBuf::from("art/forest.json")));
        assert_eq!(manifest.collision, Some(PathBuf::from("collision_map.json")));
        assert_eq!(manifest.output, PathBuf::from("game"));
        assert!(!manifest.compact);
        assert_eq!(manifest.preview, Some(PathBuf::from("build/preview.png")));
        assert!(!manifest.stub);
    }

    #[test]
    fn test_parse_empty_manifest() {
        assert_eq!(Manifest::parse("").unwrap(), Manifest::default());
    }

    #[test]
    fn test_parse_invalid_manifest() {
        let err = Manifest::parse("compact: [1, 2").unwrap_err();
        assert!(matches!(err, PackError::Parse { .. }));
    }

    #[test]
    fn test_compile_options() {
        let manifest = Manifest {
            name: "cave".to_string(),
            stub: false,
            ..Default::default()
        };
        let options = manifest.compile_options();
        assert_eq!(options.name, "cave");
        assert!(options.compact);
        assert!(!options.stub);
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILENAME);
        std::fs::write(&path, "image: tiles.png\ncollision: /abs/map.json\n").unwrap();

        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(manifest.image, Some(dir.path().join("tiles.png")));
        assert_eq!(manifest.collision, Some(PathBuf::from("/abs/map.json")));
        assert_eq!(manifest.output, dir.path().join("."));
    }

    #[test]
    fn test_template_round_trips() {
        let manifest = Manifest::parse(&Manifest::template()).unwrap();
        assert_eq!(manifest.name, "blue");
        assert_eq!(manifest.image, Some(PathBuf::from("tiles.png")));
        assert!(manifest.tilemap.is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let err = Manifest::load(&dir.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(err, PackError::Io { .. }));
    }
}
