use std::path::PathBuf;

use clap::Args;

use crate::error::Result;
use crate::loader::load_image;
use crate::output::{display_path, plural, Printer, Verb};
use crate::palette::{assign_palettes, quantize, ColorTable, PaletteSlot, PALETTE_SIZE};
use crate::types::{ColorKey, HardwareColor};

/// Print the hardware palette of a bitmap
#[derive(Args, Debug)]
pub struct PaletteArgs {
    /// Bitmap to read colours from
    #[arg(required = true)]
    pub file: PathBuf,
}

pub fn run(args: PaletteArgs, printer: &Printer) -> Result<()> {
    let path = &args.file;
    let image = load_image(path)?;

    let table = quantize(&image);
    let assignment = assign_palettes(&image, &table);

    printer.print(
        Verb::Sampled,
        &format!(
            "{} ({} in hardware) from {}",
            plural(table.len(), "colour", "colours"),
            table.hardware_count(),
            display_path(path)
        ),
    );

    for line in palette_lines(&assignment.encoding_table, &table) {
        println!("{}", line);
    }

    Ok(())
}

/// One stdout line per palette entry: palette slot and index, the packed
/// hardware word and the source colour chosen to represent it.
fn palette_lines(encoding_table: &[ColorKey], table: &ColorTable) -> Vec<String> {
    encoding_table
        .iter()
        .enumerate()
        .map(|(i, &key)| {
            let hardware = HardwareColor::from_key(key);
            let slot = if i < PALETTE_SIZE {
                PaletteSlot::A
            } else {
                PaletteSlot::B
            };
            let representative = table.representative(hardware).unwrap_or(key);
            format!(
                "{}[{:>2}] {:<5} {}",
                slot,
                i % PALETTE_SIZE,
                hardware.to_string(),
                representative
            )
        })
        .collect()
}
