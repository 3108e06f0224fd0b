//! Tests for the flat boundary bit mask

#[cfg(test)]
mod tests {
    use lbgstipple::spatial::geometry::Pixel;
    use lbgstipple::spatial::mask::BoundaryMask;

    // Tests a new mask has no active pixels
    #[test]
    fn test_new_mask_is_empty() {
        let mask = BoundaryMask::new(4, 3);
        assert!(mask.is_empty());
        assert_eq!(mask.active_count(), 0);
        assert_eq!((mask.width(), mask.height()), (4, 3));
    }

    // Tests activation and consumption of a single pixel
    #[test]
    fn test_activate_and_consume() {
        let mut mask = BoundaryMask::new(4, 3);
        mask.activate(Pixel::new(2, 1));
        assert!(mask.is_active(Pixel::new(2, 1)));
        assert!(!mask.is_active(Pixel::new(1, 2)));
        assert_eq!(mask.active_count(), 1);

        mask.consume(Pixel::new(2, 1));
        assert!(!mask.is_active(Pixel::new(2, 1)));
        assert!(mask.is_empty());
    }

    // Tests positions outside the mask are ignored and read as inactive
    #[test]
    fn test_out_of_bounds_ignored() {
        let mut mask = BoundaryMask::new(2, 2);
        mask.activate(Pixel::new(2, 0));
        mask.activate(Pixel::new(0, 5));
        assert!(mask.is_empty());
        assert!(!mask.is_active(Pixel::new(2, 0)));
    }

    // Tests active pixels come back in row-major order
    #[test]
    fn test_active_pixels_row_major() {
        let mut mask = BoundaryMask::new(3, 3);
        mask.activate(Pixel::new(0, 2));
        mask.activate(Pixel::new(2, 0));
        mask.activate(Pixel::new(1, 1));

        assert_eq!(
            mask.active_pixels(),
            vec![Pixel::new(2, 0), Pixel::new(1, 1), Pixel::new(0, 2)]
        );
    }

    // Tests display summarises dimensions and active count
    #[test]
    fn test_display() {
        let mut mask = BoundaryMask::new(5, 2);
        mask.activate(Pixel::new(4, 1));
        assert_eq!(mask.to_string(), "BoundaryMask(5x2, 1 active)");
    }
}
