use image::{DynamicImage, ImageBuffer, Rgba};
use pmopalette::{extract_palette, Error};

/// Crée une image de test simple
fn create_test_image(width: u32, height: u32) -> DynamicImage {
    let img: ImageBuffer<Rgba<u8>, Vec<u8>> = ImageBuffer::from_fn(width, height, |x, y| {
        if (x + y) % 2 == 0 {
            Rgba([255, 0, 0, 255])
        } else {
            Rgba([0, 0, 255, 255])
        }
    });
    DynamicImage::ImageRgba8(img)
}

fn png_bytes(img: &DynamicImage) -> Vec<u8> {
    let mut buffer = Vec::new();
    img.write_to(
        &mut std::io::Cursor::new(&mut buffer),
        image::ImageFormat::Png,
    )
    .unwrap();
    buffer
}

#[test]
fn test_extract_two_swatches_from_checkerboard() {
    let bytes = png_bytes(&create_test_image(100, 100));

    let palette = extract_palette(&bytes, 2).unwrap();
    assert_eq!(palette.len(), 2);

    // Le damier rouge/bleu doit produire un swatch rougeâtre et un bleuâtre
    assert!(palette.iter().any(|c| c.r > 150 && c.b < 100));
    assert!(palette.iter().any(|c| c.b > 150 && c.r < 100));
}

#[test]
fn test_extract_four_swatches() {
    // Quatre bandes verticales de couleurs distinctes
    let img: ImageBuffer<Rgba<u8>, Vec<u8>> = ImageBuffer::from_fn(200, 200, |x, _| {
        match x / 50 {
            0 => Rgba([220, 30, 30, 255]),
            1 => Rgba([30, 220, 30, 255]),
            2 => Rgba([30, 30, 220, 255]),
            _ => Rgba([220, 220, 30, 255]),
        }
    });
    let bytes = png_bytes(&DynamicImage::ImageRgba8(img));

    let palette = extract_palette(&bytes, 4).unwrap();
    assert_eq!(palette.len(), 4);
}

#[test]
fn test_single_color_image_pads_to_count() {
    let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
        ImageBuffer::from_pixel(50, 50, Rgba([24, 20, 20, 255]));
    let bytes = png_bytes(&DynamicImage::ImageRgba8(img));

    let palette = extract_palette(&bytes, 4).unwrap();
    assert_eq!(palette.len(), 4);
    assert_eq!(palette[0], palette[3]);
}

#[test]
fn test_white_image_still_yields_palette() {
    // Tous les pixels sont filtrés comme "blanc de fond" : le fallback doit
    // quand même produire le nombre demandé de swatches
    let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
        ImageBuffer::from_pixel(50, 50, Rgba([255, 255, 255, 255]));
    let bytes = png_bytes(&DynamicImage::ImageRgba8(img));

    let palette = extract_palette(&bytes, 2).unwrap();
    assert_eq!(palette.len(), 2);
}

#[test]
fn test_jpeg_input_is_supported() {
    let img = create_test_image(64, 64);
    let mut buffer = Vec::new();
    img.to_rgb8()
        .write_to(
            &mut std::io::Cursor::new(&mut buffer),
            image::ImageFormat::Jpeg,
        )
        .unwrap();

    let palette = extract_palette(&buffer, 4).unwrap();
    assert_eq!(palette.len(), 4);
}

#[test]
fn test_corrupt_bytes_propagate_decode_error() {
    let mut bytes = png_bytes(&create_test_image(32, 32));
    bytes.truncate(20);

    assert!(matches!(extract_palette(&bytes, 4), Err(Error::Decode(_))));
}

#[test]
fn test_same_bytes_same_palette() {
    let bytes = png_bytes(&create_test_image(80, 80));

    let first = extract_palette(&bytes, 4).unwrap();
    let second = extract_palette(&bytes, 4).unwrap();
    assert_eq!(first, second);
}
