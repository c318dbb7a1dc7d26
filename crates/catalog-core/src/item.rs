//! # Item Record
//!
//! The catalog's only persistent record. Items carry no identifier; clients
//! address them by their position in the list returned by `GET /items`.

use serde::{Deserialize, Serialize};

/// Maximum number of image files accepted in a single submission.
pub const MAX_IMAGES: usize = 10;

/// A catalog entry.
///
/// Serialized with camelCase keys (`type`, `coverImage`) to match the wire
/// format clients already consume. `images` holds absolute URLs in upload
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Display name.
    pub name: String,
    /// Free-form category.
    #[serde(rename = "type")]
    pub item_type: String,
    /// Free-form description.
    pub description: String,
    /// Optional distinguished image shown in the grid. Either a bare file
    /// name under the upload path or an absolute URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    /// Absolute URLs of the uploaded images.
    #[serde(default)]
    pub images: Vec<String>,
}

impl Item {
    /// Build an item, treating a blank cover image as absent.
    pub fn new(
        name: impl Into<String>,
        item_type: impl Into<String>,
        description: impl Into<String>,
        cover_image: Option<String>,
        images: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            item_type: item_type.into(),
            description: description.into(),
            cover_image: cover_image.filter(|c| !c.trim().is_empty()),
            images,
        }
    }

    /// The image shown on the grid tile: the cover if set, else the first
    /// uploaded image.
    pub fn grid_image(&self) -> Option<&str> {
        self.cover_image
            .as_deref()
            .filter(|c| !c.is_empty())
            .or_else(|| self.images.first().map(String::as_str))
    }
}

/// One uploaded file, before it has been written anywhere.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// File name as supplied by the client. Untrusted.
    pub original_name: String,
    /// MIME type declared by the client, if any.
    pub content_type: Option<String>,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chair() -> Item {
        Item::new(
            "Chair",
            "Furniture",
            "Oak, four legs",
            None,
            vec!["http://localhost:5000/uploads/1-a.png".to_string()],
        )
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let item = Item::new("Lamp", "Lighting", "Brass", Some("lamp.png".into()), vec![]);
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Lamp",
                "type": "Lighting",
                "description": "Brass",
                "coverImage": "lamp.png",
                "images": []
            })
        );
    }

    #[test]
    fn absent_cover_is_omitted() {
        let value = serde_json::to_value(chair()).unwrap();
        assert!(value.get("coverImage").is_none());
    }

    #[test]
    fn blank_cover_is_treated_as_absent() {
        let item = Item::new("a", "b", "c", Some("   ".into()), vec![]);
        assert_eq!(item.cover_image, None);
    }

    #[test]
    fn deserializes_without_optional_fields() {
        let item: Item = serde_json::from_value(json!({
            "name": "Desk",
            "type": "Furniture",
            "description": "Pine"
        }))
        .unwrap();
        assert!(item.images.is_empty());
        assert!(item.cover_image.is_none());
    }

    #[test]
    fn grid_image_prefers_cover() {
        let mut item = chair();
        item.cover_image = Some("cover.png".into());
        assert_eq!(item.grid_image(), Some("cover.png"));
    }

    #[test]
    fn grid_image_falls_back_to_first_image() {
        assert_eq!(
            chair().grid_image(),
            Some("http://localhost:5000/uploads/1-a.png")
        );
    }

    #[test]
    fn grid_image_none_without_images() {
        let item = Item::new("a", "b", "c", None, vec![]);
        assert_eq!(item.grid_image(), None);
    }
}
