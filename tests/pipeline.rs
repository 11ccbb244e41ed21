extern crate iconmask;

use iconmask::{extract_container_image, generate_icon,
               generate_icon_with_fallback, Color, IconConfig, IconElement,
               IconError, IconFamily, IconType, OSType, RasterImage,
               SourceKind, StencilMask};

const RED: Color = Color::from_rgba(255, 0, 0, 255);
const GREEN: Color = Color::from_rgba(0, 255, 0, 255);

#[test]
fn opaque_source_fills_interior() {
    let source = png_bytes(&RasterImage::filled(512, 512, RED));
    let icon = default_icon(&source, SourceKind::Png).unwrap();
    assert_eq!((icon.width(), icon.height()), (1024, 1024));
    // Straight edges of the 824x824 interior are covered by the art.
    assert_pixel(&icon, 100, 512, RED);
    assert_pixel(&icon, 923, 512, RED);
    assert_pixel(&icon, 512, 100, RED);
    assert_pixel(&icon, 512, 923, RED);
    assert_pixel(&icon, 512, 512, RED);
    assert_pixel(&icon, 300, 300, RED);
    // Padding and rounded-off corners are clipped away.
    assert_pixel(&icon, 99, 512, Color::TRANSPARENT);
    assert_pixel(&icon, 924, 512, Color::TRANSPARENT);
    assert_pixel(&icon, 0, 0, Color::TRANSPARENT);
    assert_pixel(&icon, 150, 150, Color::TRANSPARENT);
    assert_pixel(&icon, 1023, 1023, Color::TRANSPARENT);
}

#[test]
fn transparent_source_is_shrunk_and_centered() {
    let mut art = RasterImage::new(512, 512);
    for y in 16..496 {
        for x in 16..496 {
            art.set_pixel(x, y, RED).unwrap();
        }
    }
    let icon = default_icon(&png_bytes(&art), SourceKind::Png).unwrap();
    assert_eq!((icon.width(), icon.height()), (1024, 1024));
    // 0.9 * 824 = 742, centered with a (824 - 742) / 2 = 41 pixel offset, so
    // the art spans 141..883 on both axes.
    assert_pixel(&icon, 100, 512, Color::WHITE);
    assert_pixel(&icon, 140, 512, Color::WHITE);
    assert_pixel(&icon, 145, 512, Color::TRANSPARENT);
    assert_pixel(&icon, 512, 512, RED);
    assert_pixel(&icon, 882, 512, Color::TRANSPARENT);
    assert_pixel(&icon, 883, 512, Color::WHITE);
    assert_pixel(&icon, 512, 120, Color::WHITE);
    assert_pixel(&icon, 0, 512, Color::TRANSPARENT);
}

#[test]
fn container_uses_largest_entry() {
    let small = RasterImage::filled(16, 16, GREEN);
    let large = RasterImage::filled(128, 128, RED);
    let mut family = IconFamily::new();
    family.elements.push(IconElement::new(OSType(*b"TOC "), vec![0; 4096]));
    family.add_icon_with_type(&small, IconType::RGBA32_16x16).unwrap();
    family.add_icon_with_type(&large, IconType::RGBA32_128x128).unwrap();
    assert!(family.elements[2].data.len() > family.elements[1].data.len());
    let container = family_bytes(&family);

    let selected = extract_container_image(&container).unwrap().unwrap();
    assert_eq!(selected.ostype, OSType(*b"ic07"));

    let icon = default_icon(&container, SourceKind::Container).unwrap();
    assert_pixel(&icon, 512, 512, RED);
}

#[test]
fn container_without_images_yields_no_selection() {
    let mut family = IconFamily::new();
    family.elements.push(IconElement::new(OSType(*b"icnV"), vec![0; 4]));
    let container = family_bytes(&family);
    assert_eq!(extract_container_image(&container).unwrap(), None);
    assert!(matches!(default_icon(&container, SourceKind::Container),
                     Err(IconError::NoImageEntry)));
}

#[test]
fn fallback_on_malformed_container() {
    let config = IconConfig::default();
    let mask = StencilMask::for_config(&config);
    let fallback = png_bytes(&RasterImage::filled(64, 64, GREEN));
    let icon = generate_icon_with_fallback(b"icns\0\0\0\x40ic08",
                                           &fallback,
                                           SourceKind::Png,
                                           &config,
                                           &mask)
        .unwrap();
    assert_pixel(&icon, 512, 512, GREEN);
}

#[test]
fn fallback_on_container_without_images() {
    let config = IconConfig::default();
    let mask = StencilMask::for_config(&config);
    let fallback = png_bytes(&RasterImage::filled(64, 64, GREEN));
    let icon = generate_icon_with_fallback(b"icns\0\0\0\x08",
                                           &fallback,
                                           SourceKind::Png,
                                           &config,
                                           &mask)
        .unwrap();
    assert_pixel(&icon, 512, 512, GREEN);
}

#[test]
fn fallback_failure_is_reported() {
    let config = IconConfig::default();
    let mask = StencilMask::for_config(&config);
    let result = generate_icon_with_fallback(b"nope",
                                             b"also nope",
                                             SourceKind::Png,
                                             &config,
                                             &mask);
    assert!(matches!(result, Err(IconError::Decode(_))));
}

#[test]
fn custom_config_and_background() {
    let config = IconConfig::from_toml_str(r##"
        output_size = 256
        inner_padding = 28
        scale_factor = 0.5
        background_color = "#000000"
        corner_radius = 40
    "##).unwrap();
    let mask = StencilMask::for_config(&config);
    let mut art = RasterImage::filled(100, 100, RED);
    art.set_pixel(0, 0, Color::TRANSPARENT).unwrap();
    let icon = generate_icon(&png_bytes(&art), SourceKind::Png, &config, &mask)
        .unwrap();
    assert_eq!((icon.width(), icon.height()), (256, 256));
    // Icon area 200, art shrunk to 100 and offset by 50: spans 78..178.
    assert_pixel(&icon, 40, 128, Color::BLACK);
    assert_pixel(&icon, 128, 128, RED);
    assert_pixel(&icon, 10, 128, Color::TRANSPARENT);
}

#[test]
fn independent_icons_in_parallel() {
    let red = png_bytes(&RasterImage::filled(32, 32, RED));
    let green = png_bytes(&RasterImage::filled(32, 32, GREEN));
    let (a, b) = std::thread::scope(|scope| {
        let a = scope.spawn(|| default_icon(&red, SourceKind::Png));
        let b = scope.spawn(|| default_icon(&green, SourceKind::Png));
        (a.join().unwrap(), b.join().unwrap())
    });
    assert_pixel(&a.unwrap(), 512, 512, RED);
    assert_pixel(&b.unwrap(), 512, 512, GREEN);
}

fn default_icon(data: &[u8], kind: SourceKind) -> Result<RasterImage, IconError> {
    let config = IconConfig::default();
    let mask = StencilMask::for_config(&config);
    generate_icon(data, kind, &config, &mask)
}

fn png_bytes(image: &RasterImage) -> Vec<u8> {
    image.to_png_bytes().expect("failed to encode PNG")
}

fn family_bytes(family: &IconFamily) -> Vec<u8> {
    let mut output = Vec::new();
    family.write(&mut output).expect("failed to write ICNS");
    output
}

fn assert_pixel(image: &RasterImage, x: u32, y: u32, expected: Color) {
    assert_eq!(image.get_pixel(x, y), Ok(expected), "pixel ({}, {})", x, y);
}
