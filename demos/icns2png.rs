//! Extracts the largest raster image from an ICNS file and saves it as PNG.
//!
//! ```shell
//! cargo run --example icns2png <path/to/file.icns>
//! # PNG will be saved to path/to/file.<ostype>.png
//! ```

extern crate iconmask;

use iconmask::{extract_container_image, PlaneRounding};
use std::env;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

fn main() {
    env_logger::init();
    if env::args().count() != 2 {
        println!("Usage: icns2png <path>");
        return;
    }
    let icns_path = env::args().nth(1).unwrap();
    let icns_path = Path::new(&icns_path);
    let data = fs::read(icns_path).expect("failed to read ICNS file");
    let element = extract_container_image(&data)
        .expect("failed to parse ICNS file")
        .expect("ICNS file holds no raster image");
    let image = element.decode_image(PlaneRounding::Nearest)
        .expect("failed to decode image");
    let png_path = icns_path.with_extension(format!("{}.png", element.ostype));
    let png_file = BufWriter::new(File::create(&png_path)
        .expect("failed to create PNG file"));
    image.write_png(png_file).expect("failed to write PNG file");
    println!("{}x{} '{}' image saved to {}",
             image.width(),
             image.height(),
             element.ostype,
             png_path.display());
}
