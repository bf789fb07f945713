use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod font;
mod icon_gen;

#[derive(Debug, Parser)]
#[clap(
    name = "pwa-icon-gen",
    about = "Generate the LiFE-iN-SYNC PWA launcher icons (192x192 and 512x512)"
)]
struct Args {
    /// Output directory for the generated PNG files.
    #[clap(short, long, value_name = "DIR", default_value = "public/icons")]
    output: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    icon_gen::generate_icons(&args.output)
}
