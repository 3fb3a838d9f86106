//! Build command implementation.
//!
//! Loads the project inputs, runs the compile pipeline and writes the
//! resource files under the project root.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::collision::load_collision_map;
use crate::compile::{compile, compile_collision, CompileOutput};
use crate::error::{PackError, Result};
use crate::loader::{load_image, load_tile_grid, save_png, upscale, write_files};
use crate::manifest::{Manifest, MANIFEST_FILENAME};
use crate::output::{display_path, plural, Printer, Verb};

/// Compile a bitmap and tile grid into tileset, tilemap and palette resources
#[derive(Args, Debug, Default)]
pub struct BuildArgs {
    /// Project manifest (default: ./tilepack.yaml when present)
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Tile bitmap
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Tile grid JSON (array of rows of tile ids or null)
    #[arg(long)]
    pub tilemap: Option<PathBuf>,

    /// Collision heightmap store
    #[arg(long)]
    pub collision: Option<PathBuf>,

    /// Symbol prefix of the generated resources
    #[arg(long)]
    pub name: Option<String>,

    /// Project root receiving res/ and src/
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Encode the bitmap as-is instead of only the tiles the grid uses
    #[arg(long)]
    pub no_compact: bool,

    /// Write a PNG of the tiles in their hardware colours
    #[arg(long)]
    pub preview: Option<PathBuf>,

    /// Preview scale factor (integer upscaling)
    #[arg(long, default_value = "1")]
    pub scale: u32,

    /// Skip generating src/main.c
    #[arg(long)]
    pub no_stub: bool,

    /// Report every tile with unmatched colours
    #[arg(long, short)]
    pub verbose: bool,
}

/// Merge the manifest with command-line overrides.
fn resolve(args: &BuildArgs) -> Result<Manifest> {
    let mut manifest = match &args.manifest {
        Some(path) => Manifest::load(path)?,
        None if Path::new(MANIFEST_FILENAME).exists() => Manifest::load(Path::new(MANIFEST_FILENAME))?,
        None => Manifest::default(),
    };

    if let Some(image) = &args.image {
        manifest.image = Some(image.clone());
    }
    if let Some(tilemap) = &args.tilemap {
        manifest.tilemap = Some(tilemap.clone());
    }
    if let Some(collision) = &args.collision {
        manifest.collision = Some(collision.clone());
    }
    if let Some(name) = &args.name {
        manifest.name = name.clone();
    }
    if let Some(output) = &args.output {
        manifest.output = output.clone();
    }
    if let Some(preview) = &args.preview {
        manifest.preview = Some(preview.clone());
    }
    if args.no_compact {
        manifest.compact = false;
    }
    if args.no_stub {
        manifest.stub = false;
    }

    Ok(manifest)
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<()> {
    let manifest = resolve(&args)?;

    let image_path = manifest.image.as_ref().ok_or_else(|| PackError::Build {
        message: "No tile bitmap given".to_string(),
        help: Some(format!("Pass --image or set `image` in {}", MANIFEST_FILENAME)),
    })?;

    printer.print(
        Verb::Compiling,
        &format!("{} ({})", manifest.name, display_path(image_path)),
    );

    let image = load_image(image_path)?;
    let grid = manifest.tilemap.as_deref().map(load_tile_grid).transpose()?;
    let collision = manifest
        .collision
        .as_deref()
        .map(|path| load_collision_map(path).and_then(|map| compile_collision(&map)))
        .transpose()?;

    let out = compile(&image, grid.as_ref(), &manifest.compile_options());
    report(&out, printer, args.verbose);
    let preview = match &manifest.preview {
        Some(path) => Some((path, upscale(&out.preview, args.scale)?)),
        None => None,
    };

    // Nothing is written until every input has loaded and compiled
    let mut files = out.files;
    if let Some(collision) = collision {
        files.extend(collision.files);
    }
    for path in write_files(&manifest.output, &files)? {
        printer.print(Verb::Wrote, &display_path(&path));
    }

    if let Some((path, img)) = preview {
        save_png(&img, path)?;
        printer.print(Verb::Preview, &display_path(path));
    }

    printer.print(
        Verb::Finished,
        &format!(
            "{}, {} ({} in hardware) to {}",
            plural(out.stats.tile_count, "tile", "tiles"),
            plural(out.stats.colours, "colour", "colours"),
            out.stats.hardware_colours,
            display_path(&manifest.output)
        ),
    );

    Ok(())
}

/// Print palette usage and lookup misses. Misses never fail the build.
fn report(out: &CompileOutput, printer: &Printer, verbose: bool) {
    let stats = &out.stats;
    printer.print(
        Verb::Palettes,
        &format!(
            "PAL0 {}, PAL1 {}",
            plural(stats.palette_a_tiles, "tile", "tiles"),
            plural(stats.palette_b_tiles, "tile", "tiles")
        ),
    );

    if stats.rebalanced > 0 {
        printer.print(
            Verb::Rebalanced,
            &format!("{} into PAL1", plural(stats.rebalanced, "colour", "colours")),
        );
    }

    if verbose {
        for miss in &stats.misses {
            printer.print(
                Verb::Unmatched,
                &format!(
                    "tile {} ({}): {}",
                    miss.tile,
                    miss.slot,
                    plural(miss.not_found, "pixel", "pixels")
                ),
            );
        }
    }

    if stats.not_found > 0 {
        printer.print(
            Verb::Unmatched,
            &format!(
                "{} in {} written as colour 0",
                plural(stats.not_found, "pixel", "pixels"),
                plural(stats.misses.len(), "tile", "tiles")
            ),
        );
    }
}
