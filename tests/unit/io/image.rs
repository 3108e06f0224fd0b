//! Tests for decoding images into density fields

#[cfg(test)]
mod tests {
    use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Rgb, RgbImage};
    use lbgstipple::StippleError;
    use lbgstipple::io::image::{density_from_image, density_from_luma, load_density_field};
    use tempfile::TempDir;

    // Tests black maps to full density and white to none
    #[test]
    fn test_density_from_luma_extremes() {
        let luma = ImageBuffer::from_vec(2, 1, vec![0_u16, u16::MAX])
            .expect("Failed to create luma buffer");
        let field = density_from_luma(&luma).expect("Failed to convert image");

        assert_eq!(field.get(0, 0), Some(1.0));
        assert_eq!(field.get(1, 0), Some(0.0));
    }

    // Tests 8-bit greys map to one minus value over 255
    #[test]
    fn test_eight_bit_grey_scale() {
        let img = GrayImage::from_fn(3, 2, |x, _| match x {
            0 => Luma([0]),
            1 => Luma([51]),
            _ => Luma([255]),
        });
        let field = density_from_image(&DynamicImage::ImageLuma8(img))
            .expect("Failed to convert image");

        assert_eq!((field.width(), field.height()), (3, 2));
        let mid = field.get(1, 1).unwrap_or_default();
        assert!((mid - (1.0 - 51.0 / 255.0)).abs() < 1e-9);
    }

    // Tests colour images are reduced to a single channel first
    #[test]
    fn test_colour_image_reduced() {
        let img = RgbImage::from_pixel(4, 4, Rgb([0, 0, 0]));
        let field = density_from_image(&DynamicImage::ImageRgb8(img))
            .expect("Failed to convert image");

        assert!((field.total_mass() - 16.0).abs() < 1e-9);
    }

    // Tests an image written to disk loads back as a field
    #[test]
    fn test_load_density_field_from_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("grey.png");
        GrayImage::from_pixel(5, 3, Luma([0])).save(&path).expect("Failed to save image");

        let field = load_density_field(&path).expect("Failed to load density field");
        assert_eq!(field.pixel_count(), 15);
        assert_eq!(field.get(4, 2), Some(1.0));
    }

    // Tests a missing file surfaces as an image load error naming the path
    #[test]
    fn test_missing_file() {
        let result = load_density_field("does/not/exist.png");
        match result {
            Err(StippleError::ImageLoad { path, .. }) => {
                assert!(path.ends_with("exist.png"));
            }
            _ => unreachable!("Expected ImageLoad error type"),
        }
    }
}
