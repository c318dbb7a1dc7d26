//! # catalog-cli: Terminal Front End for the Item Catalog
//!
//! Provides the `catalog` command-line interface over [`catalog_client`].
//!
//! ## Subcommands
//!
//! - `catalog list`: item grid (index, name, cover image URL).
//! - `catalog add`: submission form; uploads image files from disk.
//! - `catalog show <INDEX>`: detail view of one item.
//! - `catalog enquire <INDEX>`: email an enquiry about one item.
//! - `catalog browse`: interactive grid/modal/carousel session on stdin.
//!
//! Handlers take a [`CatalogApi`](catalog_client::CatalogApi) and generic
//! reader/writer so they run against fakes in tests.

pub mod browse;
pub mod commands;
pub mod render;

#[cfg(test)]
pub(crate) mod testing;
