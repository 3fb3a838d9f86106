//! Init command implementation.
//!
//! Writes a starter `tilepack.yaml` into a project directory.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::error::{PackError, Result};
use crate::manifest::{Manifest, MANIFEST_FILENAME};
use crate::output::{display_path, Printer, Verb};

/// Initialize a tilepack project by generating a tilepack.yaml manifest
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing tilepack.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let manifest_path = args.path.join(MANIFEST_FILENAME);

    if manifest_path.exists() && !args.force {
        return Err(PackError::Build {
            message: format!("{} already exists", MANIFEST_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    fs::create_dir_all(&args.path).map_err(|e| PackError::Io {
        path: args.path.clone(),
        message: format!("Failed to create project directory: {}", e),
    })?;

    fs::write(&manifest_path, Manifest::template()).map_err(|e| PackError::Io {
        path: manifest_path.clone(),
        message: format!("Failed to write manifest: {}", e),
    })?;

    printer.print(Verb::Created, &display_path(&manifest_path));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_init_creates_manifest() {
        let dir = tempdir().unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
        };
        run(args, &Printer::new()).unwrap();

        let content = fs::read_to_string(dir.path().join("tilepack.yaml")).unwrap();
        assert!(content.contains("name: blue"));
        assert!(content.contains("image: tiles.png"));
    }

    #[test]
    fn test_init_errors_if_manifest_exists() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("tilepack.yaml"), "name: cave").unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
        };
        assert!(run(args, &Printer::new()).is_err());

        let content = fs::read_to_string(dir.path().join("tilepack.yaml")).unwrap();
        assert_eq!(content, "name: cave");
    }

    #[test]
    fn test_init_force_overwrites() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("tilepack.yaml"), "name: cave").unwrap();

        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: true,
        };
        run(args, &Printer::new()).unwrap();

        let content = fs::read_to_string(dir.path().join("tilepack.yaml")).unwrap();
        assert!(content.contains("name: blue"));
    }

    #[test]
    fn test_init_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let project = dir.path().join("new/game");

        let args = InitArgs {
            path: project.clone(),
            force: false,
        };
        run(args, &Printer::new()).unwrap();

        assert!(project.join("tilepack.yaml").exists());
    }
}
