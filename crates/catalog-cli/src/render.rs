//! Plain-text rendering of the catalog view.

use std::io::{self, Write};

use catalog_client::CatalogView;

/// Write the item grid: one line per item with its index and cover image.
pub fn render_grid<W: Write>(view: &CatalogView, out: &mut W) -> io::Result<()> {
    let tiles = view.grid();
    if tiles.is_empty() {
        return writeln!(out, "No items yet.");
    }
    let width = tiles.iter().map(|t| t.name.chars().count()).max().unwrap_or(0);
    for tile in tiles {
        writeln!(out, "[{}] {:<width$}  {}", tile.index, tile.name, tile.image_url)?;
    }
    Ok(())
}

/// Write the detail view of the selected item, including the carousel's
/// current image. Writes nothing when no item is selected.
pub fn render_modal<W: Write>(view: &CatalogView, out: &mut W) -> io::Result<()> {
    let (Some(item), Some(url)) = (view.selected_item(), view.current_image_url()) else {
        return Ok(());
    };
    writeln!(out, "{}", item.name)?;
    writeln!(out, "Type: {}", item.item_type)?;
    writeln!(out, "Description: {}", item.description)?;
    if item.images.is_empty() {
        writeln!(out, "Image: {url}")
    } else {
        writeln!(
            out,
            "Image {}/{}: {url}",
            view.carousel_index() + 1,
            item.images.len()
        )
    }
}
