//! Image URL resolution.
//!
//! Items may reference images as absolute URLs (what the service stores for
//! uploads) or as bare file names (a typed-in cover image). Both resolve to
//! something a browser or terminal can open.

use catalog_core::{Item, UPLOADS_PATH};

/// Shown when an item has no image at all.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/150";

/// Resolve an image reference against the API base URL.
///
/// Absent or empty references yield [`PLACEHOLDER_IMAGE`]; anything starting
/// with `http` is returned unchanged; anything else is treated as a file name
/// under the upload path.
pub fn resolve_image_url(image: Option<&str>, api_base: &str) -> String {
    match image {
        None | Some("") => PLACEHOLDER_IMAGE.to_string(),
        Some(url) if url.starts_with("http") => url.to_string(),
        Some(name) => format!(
            "{}/{UPLOADS_PATH}/{name}",
            api_base.trim_end_matches('/')
        ),
    }
}

/// URL of the image shown on an item's grid tile.
pub fn grid_image_url(item: &Item, api_base: &str) -> String {
    resolve_image_url(item.grid_image(), api_base)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://localhost:5000";

    #[test]
    fn absolute_urls_unchanged() {
        let url = "https://cdn.example.com/chair.png";
        assert_eq!(resolve_image_url(Some(url), BASE), url);
        let local = "http://localhost:5000/uploads/1-chair.png";
        assert_eq!(resolve_image_url(Some(local), BASE), local);
    }

    #[test]
    fn bare_names_prefixed_with_upload_base() {
        assert_eq!(
            resolve_image_url(Some("chair.png"), BASE),
            "http://localhost:5000/uploads/chair.png"
        );
        assert_eq!(
            resolve_image_url(Some("chair.png"), "http://localhost:5000/"),
            "http://localhost:5000/uploads/chair.png"
        );
    }

    #[test]
    fn missing_images_use_placeholder() {
        assert_eq!(resolve_image_url(None, BASE), PLACEHOLDER_IMAGE);
        assert_eq!(resolve_image_url(Some(""), BASE), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn grid_prefers_cover_then_first_image() {
        let mut item = Item::new(
            "Chair",
            "Furniture",
            "Oak",
            Some("cover.png".into()),
            vec!["http://localhost:5000/uploads/1-a.png".into()],
        );
        assert_eq!(
            grid_image_url(&item, BASE),
            "http://localhost:5000/uploads/cover.png"
        );

        item.cover_image = None;
        assert_eq!(
            grid_image_url(&item, BASE),
            "http://localhost:5000/uploads/1-a.png"
        );

        item.images.clear();
        assert_eq!(grid_image_url(&item, BASE), PLACEHOLDER_IMAGE);
    }
}
