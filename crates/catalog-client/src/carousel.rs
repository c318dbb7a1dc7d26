//! Carousel index arithmetic.
//!
//! Indices wrap in both directions. With no images the index stays at 0.

/// Index after advancing one image.
pub fn next_index(index: usize, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    (index + 1) % count
}

/// Index after going back one image.
pub fn prev_index(index: usize, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    (index % count + count - 1) % count
}
