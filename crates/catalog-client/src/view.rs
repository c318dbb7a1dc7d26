//! # Catalog View Model
//!
//! Rendering-independent UI state: the submission form, the item grid, the
//! detail modal, and the modal's carousel. A front end reads this state to
//! draw and calls the transition methods in response to user input.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use catalog_core::{Item, MAX_IMAGES};

use crate::carousel::{next_index, prev_index};
use crate::client::{ImageFile, ItemSubmission};
use crate::error::{ClientError, FormError};
use crate::images::{grid_image_url, resolve_image_url};

/// How long the success notice stays visible after a submission.
pub const SUCCESS_FLASH: Duration = Duration::from_secs(3);

/// Controlled state of the submission form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemForm {
    pub name: String,
    pub item_type: String,
    pub description: String,
    /// Optional cover image file name. Blank means none.
    pub cover_image: String,
    /// Selected image files, in upload order.
    pub images: Vec<PathBuf>,
}

impl ItemForm {
    /// Check required fields and the image limit.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.name.trim().is_empty() {
            return Err(FormError::MissingField("name"));
        }
        if self.item_type.trim().is_empty() {
            return Err(FormError::MissingField("type"));
        }
        if self.description.trim().is_empty() {
            return Err(FormError::MissingField("description"));
        }
        if self.images.len() > MAX_IMAGES {
            return Err(FormError::TooManyImages {
                count: self.images.len(),
                max: MAX_IMAGES,
            });
        }
        Ok(())
    }

    /// Read the selected files and build the request payload.
    pub async fn to_submission(&self) -> Result<ItemSubmission, ClientError> {
        let mut images = Vec::with_capacity(self.images.len());
        for path in &self.images {
            images.push(ImageFile::from_path(path).await?);
        }
        let cover = self.cover_image.trim();
        Ok(ItemSubmission {
            name: self.name.clone(),
            item_type: self.item_type.clone(),
            description: self.description.clone(),
            cover_image: (!cover.is_empty()).then(|| cover.to_string()),
            images,
        })
    }
}

/// One tile of the item grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridTile {
    pub index: usize,
    pub name: String,
    pub image_url: String,
}

/// Full UI state of the catalog.
#[derive(Debug, Clone)]
pub struct CatalogView {
    items: Vec<Item>,
    api_base: String,
    /// The submission form.
    pub form: ItemForm,
    selected: Option<usize>,
    carousel: usize,
    success_until: Option<Instant>,
}

impl CatalogView {
    /// View over an initial item list, resolving images against `api_base`.
    pub fn new(items: Vec<Item>, api_base: impl Into<String>) -> Self {
        Self {
            items,
            api_base: api_base.into(),
            form: ItemForm::default(),
            selected: None,
            carousel: 0,
            success_until: None,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Grid tiles in list order.
    pub fn grid(&self) -> Vec<GridTile> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| GridTile {
                index,
                name: item.name.clone(),
                image_url: grid_image_url(item, &self.api_base),
            })
            .collect()
    }

    /// Open the modal on item `index` with the carousel at its first image.
    /// Out-of-range indices leave the state untouched.
    pub fn select(&mut self, index: usize) -> Option<&Item> {
        if index >= self.items.len() {
            return None;
        }
        self.selected = Some(index);
        self.carousel = 0;
        self.items.get(index)
    }

    /// Close the modal.
    pub fn close(&mut self) {
        self.selected = None;
        self.carousel = 0;
    }

    /// The item shown in the modal, if open.
    pub fn selected_item(&self) -> Option<&Item> {
        self.selected.and_then(|i| self.items.get(i))
    }

    pub fn carousel_index(&self) -> usize {
        self.carousel
    }

    /// Advance the carousel. No effect when the modal is closed.
    pub fn next_image(&mut self) {
        if let Some(count) = self.selected_item().map(|item| item.images.len()) {
            self.carousel = next_index(self.carousel, count);
        }
    }

    /// Go back one image. No effect when the modal is closed.
    pub fn prev_image(&mut self) {
        if let Some(count) = self.selected_item().map(|item| item.images.len()) {
            self.carousel = prev_index(self.carousel, count);
        }
    }

    /// URL of the carousel's current image; the placeholder for an item
    /// without images. `None` when the modal is closed.
    pub fn current_image_url(&self) -> Option<String> {
        let item = self.selected_item()?;
        let image = item.images.get(self.carousel).map(String::as_str);
        Some(resolve_image_url(image, &self.api_base))
    }

    /// Append a newly created item, reset the form, and show the success
    /// notice.
    pub fn record_created(&mut self, item: Item) {
        self.record_created_at(item, Instant::now());
    }

    /// [`record_created`](Self::record_created) with an explicit clock.
    pub fn record_created_at(&mut self, item: Item, now: Instant) {
        self.items.push(item);
        self.form = ItemForm::default();
        self.success_until = Some(now + SUCCESS_FLASH);
    }

    /// Whether the success notice is visible.
    pub fn show_success(&self) -> bool {
        self.show_success_at(Instant::now())
    }

    /// [`show_success`](Self::show_success) with an explicit clock.
    pub fn show_success_at(&self, now: Instant) -> bool {
        self.success_until.is_some_and(|until| now < until)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://localhost:5000";

    fn item(name: &str, images: usize) -> Item {
        let urls = (0..images)
            .map(|i| format!("{BASE}/uploads/{i}-{name}.png"))
            .collect();
        Item::new(name, "Furniture", "Oak", None, urls)
    }

    fn filled_form() -> ItemForm {
        ItemForm {
            name: "Chair".into(),
            item_type: "Furniture".into(),
            description: "Oak".into(),
            ..ItemForm::default()
        }
    }

    #[test]
    fn form_requires_text_fields() {
        assert_eq!(
            ItemForm::default().validate(),
            Err(FormError::MissingField("name"))
        );
        let mut form = filled_form();
        form.item_type = "  ".into();
        assert_eq!(form.validate(), Err(FormError::MissingField("type")));
        let mut form = filled_form();
        form.description.clear();
        assert_eq!(form.validate(), Err(FormError::MissingField("description")));
        assert_eq!(filled_form().validate(), Ok(()));
    }

    #[test]
    fn form_limits_image_count() {
        let mut form = filled_form();
        form.images = (0..=MAX_IMAGES).map(|i| PathBuf::from(format!("{i}.png"))).collect();
        assert_eq!(
            form.validate(),
            Err(FormError::TooManyImages {
                count: MAX_IMAGES + 1,
                max: MAX_IMAGES
            })
        );
    }

    #[tokio::test]
    async fn submission_reads_files_and_drops_blank_cover() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.png");
        std::fs::write(&path, b"png").unwrap();

        let mut form = filled_form();
        form.cover_image = "   ".into();
        form.images = vec![path];
        let submission = form.to_submission().await.unwrap();

        assert_eq!(submission.cover_image, None);
        assert_eq!(submission.images.len(), 1);
        assert_eq!(submission.images[0].file_name, "a.png");
    }

    #[test]
    fn select_resets_carousel() {
        let mut view = CatalogView::new(vec![item("a", 3), item("b", 2)], BASE);
        view.select(0);
        view.next_image();
        view.next_image();
        assert_eq!(view.carousel_index(), 2);

        view.select(1);
        assert_eq!(view.carousel_index(), 0);
        assert_eq!(view.selected_item().unwrap().name, "b");
    }

    #[test]
    fn select_out_of_range_is_ignored() {
        let mut view = CatalogView::new(vec![item("a", 1)], BASE);
        assert!(view.select(5).is_none());
        assert!(view.selected_item().is_none());
    }

    #[test]
    fn carousel_wraps() {
        let mut view = CatalogView::new(vec![item("a", 3)], BASE);
        view.select(0);
        view.prev_image();
        assert_eq!(view.carousel_index(), 2);
        view.next_image();
        assert_eq!(view.carousel_index(), 0);
        assert_eq!(
            view.current_image_url().unwrap(),
            format!("{BASE}/uploads/0-a.png")
        );
    }

    #[test]
    fn item_without_images_shows_placeholder() {
        let mut view = CatalogView::new(vec![item("a", 0)], BASE);
        view.select(0);
        view.next_image();
        assert_eq!(view.carousel_index(), 0);
        assert_eq!(
            view.current_image_url().as_deref(),
            Some(crate::images::PLACEHOLDER_IMAGE)
        );
    }

    #[test]
    fn close_clears_modal() {
        let mut view = CatalogView::new(vec![item("a", 2)], BASE);
        view.select(0);
        view.close();
        assert!(view.selected_item().is_none());
        assert!(view.current_image_url().is_none());
        view.next_image();
        assert_eq!(view.carousel_index(), 0);
    }

    #[test]
    fn record_created_appends_resets_form_and_flashes() {
        let mut view = CatalogView::new(vec![item("a", 0)], BASE);
        view.form = filled_form();
        let now = Instant::now();
        view.record_created_at(item("b", 1), now);

        assert_eq!(view.items().len(), 2);
        assert_eq!(view.items()[1].name, "b");
        assert_eq!(view.form, ItemForm::default());
        assert!(view.show_success_at(now));
        assert!(view.show_success_at(now + Duration::from_millis(2_999)));
        assert!(!view.show_success_at(now + SUCCESS_FLASH));
    }

    #[test]
    fn grid_lists_tiles_in_order() {
        let view = CatalogView::new(vec![item("a", 1), item("b", 0)], BASE);
        let grid = view.grid();
        assert_eq!(grid.len(), 2);
        assert_eq!(grid[0].image_url, format!("{BASE}/uploads/0-a.png"));
        assert_eq!(grid[1].image_url, crate::images::PLACEHOLDER_IMAGE);
    }
}
