//! Turns source art (PNG, JPEG 2000 or ICNS) into a masked, rounded icon.
//!
//! ```shell
//! cargo run --example mkicon <path/to/art> [<config.toml>]
//! # icon will be saved to path/to/art.icon.png
//! ```
//!
//! Set `RUST_LOG=debug` to see which container entry was picked and how the
//! art was placed.

extern crate iconmask;

use iconmask::{generate_icon, IconConfig, SourceKind, StencilMask};
use std::env;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

fn main() {
    env_logger::init();
    let num_args = env::args().count();
    if num_args < 2 || num_args > 3 {
        println!("Usage: mkicon <path> [<config.toml>]");
        return;
    }
    let config = match env::args().nth(2) {
        Some(path) => {
            let text = fs::read_to_string(path).expect("failed to read config");
            IconConfig::from_toml_str(&text).expect("invalid config")
        }
        None => IconConfig::default(),
    };
    let art_path = env::args().nth(1).unwrap();
    let art_path = Path::new(&art_path);
    let data = fs::read(art_path).expect("failed to read source art");
    let kind = SourceKind::detect(&data).expect("unrecognized source format");
    let mask = StencilMask::for_config(&config);
    let icon = generate_icon(&data, kind, &config, &mask)
        .expect("failed to generate icon");
    let icon_path = art_path.with_extension("icon.png");
    let icon_file = BufWriter::new(File::create(&icon_path)
        .expect("failed to create PNG file"));
    icon.write_png(icon_file).expect("failed to write PNG file");
    println!("icon saved to {}", icon_path.display());
}
