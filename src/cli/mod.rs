pub mod build;
pub mod collision;
pub mod completions;
pub mod init;
pub mod palette;

use clap::{Parser, Subcommand};

/// tilepack - Pixel art to 4bpp tile resource compiler
#[derive(Parser, Debug)]
#[command(name = "tilepack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compile a bitmap and tile grid into tileset, tilemap and palette resources
    Build(build::BuildArgs),

    /// Print the hardware palette of a bitmap
    Palette(palette::PaletteArgs),

    /// Compile a collision heightmap store into resource files
    Collision(collision::CollisionArgs),

    /// Initialize a tilepack project (generates tilepack.yaml)
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
