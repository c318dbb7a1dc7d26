//! In-memory [`CatalogApi`] for handler tests.

use std::sync::Mutex;

use async_trait::async_trait;
use catalog_client::{CatalogApi, ClientError, ItemSubmission};
use catalog_core::Item;

pub const BASE: &str = "http://localhost:5000";

#[derive(Default)]
pub struct FakeApi {
    pub items: Mutex<Vec<Item>>,
    pub enquiries: Mutex<Vec<String>>,
    pub fail_enquiries: bool,
}

impl FakeApi {
    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            items: Mutex::new(items),
            ..Self::default()
        }
    }

    pub fn enquiries(&self) -> Vec<String> {
        self.enquiries.lock().unwrap().clone()
    }
}

pub fn item(name: &str, images: usize) -> Item {
    let urls = (0..images)
        .map(|i| format!("{BASE}/uploads/{i}-{name}.png"))
        .collect();
    Item::new(name, "Furniture", "Oak", None, urls)
}

#[async_trait]
impl CatalogApi for FakeApi {
    async fn list_items(&self) -> Result<Vec<Item>, ClientError> {
        Ok(self.items.lock().unwrap().clone())
    }

    async fn create_item(&self, submission: &ItemSubmission) -> Result<Item, ClientError> {
        let urls = submission
            .images
            .iter()
            .enumerate()
            .map(|(i, f)| format!("{BASE}/uploads/{i}-{}", f.file_name))
            .collect();
        let item = Item::new(
            submission.name.clone(),
            submission.item_type.clone(),
            submission.description.clone(),
            submission.cover_image.clone(),
            urls,
        );
        self.items.lock().unwrap().push(item.clone());
        Ok(item)
    }

    async fn enquire(&self, item_name: &str) -> Result<String, ClientError> {
        self.enquiries.lock().unwrap().push(item_name.to_string());
        if self.fail_enquiries {
            return Err(ClientError::Api {
                endpoint: "POST /enquire".into(),
                status: 500,
                body: "Failed to send enquiry email.".into(),
            });
        }
        Ok("Enquiry email sent.".into())
    }

    fn base_url(&self) -> &str {
        BASE
    }
}
