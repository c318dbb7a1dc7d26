//! # Interactive Browse Session
//!
//! Line-oriented front end over [`CatalogView`]: the grid is shown first,
//! `open N` opens the detail modal, `next`/`prev` page through its images,
//! `enquire` emails about the open item, `close` returns to the grid.
//! Ends on `quit` or end of input.

use std::io::{BufRead, Write};

use anyhow::Result;

use catalog_client::{CatalogApi, CatalogView};

use crate::commands::{load_view, send_enquiry};
use crate::render::{render_grid, render_modal};

const HELP: &str = "Commands: open N, next (n), prev (p), enquire (e), close (c), list (l), quit (q)";

/// One parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseCommand {
    Open(usize),
    Next,
    Prev,
    Enquire,
    Close,
    List,
    Quit,
}

/// Parse an input line. `Ok(None)` for a blank line.
pub fn parse_command(line: &str) -> Result<Option<BrowseCommand>, String> {
    let mut words = line.split_whitespace();
    let Some(word) = words.next() else {
        return Ok(None);
    };
    let command = match word.to_ascii_lowercase().as_str() {
        "open" | "o" => {
            let arg = words.next().ok_or("open needs an item index")?;
            let index = arg
                .parse()
                .map_err(|_| format!("not an item index: {arg}"))?;
            BrowseCommand::Open(index)
        }
        "next" | "n" => BrowseCommand::Next,
        "prev" | "p" => BrowseCommand::Prev,
        "enquire" | "e" => BrowseCommand::Enquire,
        "close" | "c" => BrowseCommand::Close,
        "list" | "l" => BrowseCommand::List,
        "quit" | "q" | "exit" => BrowseCommand::Quit,
        other => return Err(format!("unknown command: {other}")),
    };
    Ok(Some(command))
}

/// Run the session until `quit` or end of input.
pub async fn run_browse<A, R, W>(api: &A, input: R, out: &mut W) -> Result<u8>
where
    A: CatalogApi + ?Sized,
    R: BufRead,
    W: Write,
{
    let mut view = load_view(api).await?;
    render_grid(&view, out)?;
    writeln!(out, "{HELP}")?;

    for line in input.lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(msg) => {
                writeln!(out, "{msg}")?;
                writeln!(out, "{HELP}")?;
                continue;
            }
        };
        if command == BrowseCommand::Quit {
            break;
        }
        apply(command, &mut view, api, out).await?;
    }

    Ok(0)
}

async fn apply<A, W>(command: BrowseCommand, view: &mut CatalogView, api: &A, out: &mut W) -> Result<()>
where
    A: CatalogApi + ?Sized,
    W: Write,
{
    match command {
        BrowseCommand::Open(index) => {
            if view.select(index).is_some() {
                render_modal(view, out)?;
            } else {
                writeln!(out, "No item at index {index}.")?;
            }
        }
        BrowseCommand::Next | BrowseCommand::Prev => {
            if view.selected_item().is_none() {
                writeln!(out, "No item open.")?;
            } else {
                if command == BrowseCommand::Next {
                    view.next_image();
                } else {
                    view.prev_image();
                }
                render_modal(view, out)?;
            }
        }
        BrowseCommand::Enquire => match view.selected_item().map(|item| item.name.clone()) {
            Some(name) => {
                send_enquiry(api, &name, out).await?;
            }
            None => writeln!(out, "No item open.")?,
        },
        BrowseCommand::Close => {
            view.close();
            render_grid(view, out)?;
        }
        BrowseCommand::List => render_grid(view, out)?,
        BrowseCommand::Quit => {}
    }
    Ok(())
}
