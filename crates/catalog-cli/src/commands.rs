//! # One-shot Subcommands
//!
//! `list`, `add`, `show`, and `enquire`. Each returns the process exit code;
//! `browse` lives in [`crate::browse`].

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};

use catalog_client::{CatalogApi, CatalogView, ItemForm};

use crate::render::{render_grid, render_modal};

/// Printed after a successful submission.
pub const ITEM_ADDED: &str = "Item successfully added";

/// Printed when an enquiry was delivered.
pub const ENQUIRY_SENT: &str = "Enquiry email sent.";

/// Printed when an enquiry could not be delivered.
pub const ENQUIRY_FAILED: &str = "Failed to send enquiry.";

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every item as a grid.
    List,

    /// Submit a new item with optional images, then show the updated grid.
    Add(AddArgs),

    /// Show an item's details and first image.
    Show {
        /// Grid index of the item.
        index: usize,
    },

    /// Email an enquiry about an item.
    Enquire {
        /// Grid index of the item.
        index: usize,
    },

    /// Interactive session: open items, page through images, enquire.
    Browse,
}

/// Submission form fields.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Item name.
    #[arg(long)]
    pub name: String,

    /// Item category.
    #[arg(long = "type")]
    pub item_type: String,

    /// Item description.
    #[arg(long)]
    pub description: String,

    /// Cover image file name or URL.
    #[arg(long)]
    pub cover: Option<String>,

    /// Image file to upload. Repeat for several (at most 10).
    #[arg(long = "image")]
    pub images: Vec<PathBuf>,
}

impl From<AddArgs> for ItemForm {
    fn from(args: AddArgs) -> Self {
        Self {
            name: args.name,
            item_type: args.item_type,
            description: args.description,
            cover_image: args.cover.unwrap_or_default(),
            images: args.images,
        }
    }
}

/// Execute a subcommand.
pub async fn run<A, R, W>(command: Command, api: &A, input: R, out: &mut W) -> Result<u8>
where
    A: CatalogApi + ?Sized,
    R: BufRead,
    W: Write,
{
    match command {
        Command::List => run_list(api, out).await,
        Command::Add(args) => run_add(args, api, out).await,
        Command::Show { index } => run_show(index, api, out).await,
        Command::Enquire { index } => run_enquire(index, api, out).await,
        Command::Browse => crate::browse::run_browse(api, input, out).await,
    }
}

/// Fetch the item list into a fresh view.
pub async fn load_view<A: CatalogApi + ?Sized>(api: &A) -> Result<CatalogView> {
    let items = api
        .list_items()
        .await
        .context("failed to fetch items")?;
    Ok(CatalogView::new(items, api.base_url()))
}

async fn run_list<A: CatalogApi + ?Sized, W: Write>(api: &A, out: &mut W) -> Result<u8> {
    let view = load_view(api).await?;
    render_grid(&view, out)?;
    Ok(0)
}

async fn run_add<A: CatalogApi + ?Sized, W: Write>(
    args: AddArgs,
    api: &A,
    out: &mut W,
) -> Result<u8> {
    let mut view = load_view(api).await?;
    view.form = ItemForm::from(args);
    view.form.validate()?;
    let submission = view.form.to_submission().await?;
    let item = api
        .create_item(&submission)
        .await
        .context("failed to submit item")?;
    tracing::debug!(name = %item.name, images = item.images.len(), "item created");
    view.record_created(item);

    if view.show_success() {
        writeln!(out, "{ITEM_ADDED}")?;
    }
    render_grid(&view, out)?;
    Ok(0)
}

async fn run_show<A: CatalogApi + ?Sized, W: Write>(
    index: usize,
    api: &A,
    out: &mut W,
) -> Result<u8> {
    let mut view = load_view(api).await?;
    select(&mut view, index)?;
    render_modal(&view, out)?;
    Ok(0)
}

async fn run_enquire<A: CatalogApi + ?Sized, W: Write>(
    index: usize,
    api: &A,
    out: &mut W,
) -> Result<u8> {
    let mut view = load_view(api).await?;
    let name = select(&mut view, index)?;
    Ok(send_enquiry(api, &name, out).await?)
}

/// Open item `index`, returning its name.
fn select(view: &mut CatalogView, index: usize) -> Result<String> {
    let count = view.items().len();
    match view.select(index) {
        Some(item) => Ok(item.name.clone()),
        None => bail!("no item at index {index} ({count} items)"),
    }
}

/// Send an enquiry and print the outcome. Delivery failure is reported to
/// the user, not propagated.
pub async fn send_enquiry<A: CatalogApi + ?Sized, W: Write>(
    api: &A,
    item_name: &str,
    out: &mut W,
) -> std::io::Result<u8> {
    match api.enquire(item_name).await {
        Ok(_) => {
            writeln!(out, "{ENQUIRY_SENT}")?;
            Ok(0)
        }
        Err(e) => {
            tracing::warn!(item_name, "enquiry failed: {e}");
            writeln!(out, "{ENQUIRY_FAILED}")?;
            Ok(1)
        }
    }
}
