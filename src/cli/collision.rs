//! Collision command implementation.
//!
//! Compacts an editor heightmap store into `res/res_collision.s` and
//! `res/res_collision.h`.

use std::path::PathBuf;

use clap::Args;

use crate::collision::load_collision_map;
use crate::compile::compile_collision;
use crate::error::Result;
use crate::loader::write_files;
use crate::output::{display_path, plural, Printer, Verb};

/// Compile a collision heightmap store into resource files
#[derive(Args, Debug)]
pub struct CollisionArgs {
    /// Heightmap store (JSON object of tile id -> 8 heights)
    #[arg(required = true)]
    pub file: PathBuf,

    /// Project root receiving res/
    #[arg(long, short, default_value = ".")]
    pub output: PathBuf,
}

pub fn run(args: CollisionArgs, printer: &Printer) -> Result<()> {
    printer.print(Verb::Compiling, &display_path(&args.file));
    let map = load_collision_map(&args.file)?;
    let out = compile_collision(&map)?;

    for path in write_files(&args.output, &out.files)? {
        printer.print(Verb::Wrote, &display_path(&path));
    }

    printer.print(
        Verb::Finished,
        &format!(
            "{} over {} tile ids",
            plural(out.compact.heightmap_count(), "heightmap", "heightmaps"),
            out.compact.index.len()
        ),
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_collision_writes_both_files() {
        let dir = tempdir().unwrap();
        let store = dir.path().join("collision_map.json");
        fs::write(&store, r#"{"5": [8,8,8,8,8,8,8,8], "10": [8,7,6,5,4,3,2,1]}"#).unwrap();

        let args = CollisionArgs {
            file: store,
            output: dir.path().to_path_buf(),
        };
        run(args, &Printer::new()).unwrap();

        let asm = fs::read_to_string(dir.path().join("res/res_collision.s")).unwrap();
        assert!(asm.contains(
            "    dc.b    0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x02\n"
        ));
        let header = fs::read_to_string(dir.path().join("res/res_collision.h")).unwrap();
        assert!(header.contains("extern const u8 heightMaps[2][8];"));
    }

    #[test]
    fn test_collision_rejects_bad_store() {
        let dir = tempdir().unwrap();
        let store = dir.path().join("collision_map.json");
        fs::write(&store, r#"{"5": [12]}"#).unwrap();

        let args = CollisionArgs {
            file: store,
            output: dir.path().to_path_buf(),
        };
        assert!(run(args, &Printer::new()).is_err());
        assert!(!dir.path().join("res").exists());
    }

    #[test]
    fn test_collision_rejects_oversized_store() {
        let dir = tempdir().unwrap();
        let store = dir.path().join("collision_map.json");
        let entries: Vec<String> = (0..256).map(|id| format!("\"{}\": [8]", id)).collect();
        fs::write(&store, format!("{{{}}}", entries.join(", "))).unwrap();

        let args = CollisionArgs {
            file: store,
            output: dir.path().to_path_buf(),
        };
        let err = run(args, &Printer::new()).unwrap_err();
        assert!(err.to_string().contains("at most 255"));
        assert!(!dir.path().join("res").exists());
    }
}
