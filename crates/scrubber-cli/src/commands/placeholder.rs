use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use scrubber_core::placeholder::placeholder_image;

#[derive(Args)]
pub struct PlaceholderArgs {
    /// Frame number (1-based)
    #[arg(long)]
    pub frame: u32,

    /// Total frames in the sequence
    #[arg(long)]
    pub total: u32,

    /// Output image path (format from extension)
    #[arg(short, long, default_value = "placeholder.png")]
    pub output: PathBuf,
}

pub fn run(args: &PlaceholderArgs) -> Result<()> {
    if args.frame == 0 {
        bail!("Frame numbers start at 1");
    }

    let img = placeholder_image(args.frame, args.total);
    img.save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!(
        "Placeholder for frame {} of {} saved to {}",
        args.frame,
        args.total,
        args.output.display()
    );
    Ok(())
}
