//! Text emission for the native build.
//!
//! Every emitter is a pure function returning file contents; writing them
//! to disk is left to the caller.

mod collision;
mod directives;
mod resource;

use std::path::PathBuf;

pub use collision::{collision_asm, collision_header};
pub use directives::{data_lines, hex_token, DataLayout, DataUnit};
pub use resource::{
    main_source, palette_list, palette_words, tilemap_asm, tileset_asm, tileset_header,
};

/// A generated file, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFile {
    pub path: PathBuf,
    pub contents: String,
}

impl ResourceFile {
    pub fn new(path: impl Into<PathBuf>, contents: String) -> Self {
        Self {
            path: path.into(),
            contents,
        }
    }
}
