//! List and tags command handlers.

use anyhow::Result;

use super::select::zettel_line;
use crate::cli::output::{Output, OutputFormat, ZettelListing};
use crate::cli::{ListArgs, TagsArgs};
use crate::domain::{TagIndex, Zettel};
use crate::repo::ZettelRepo;

pub fn handle_list(args: &ListArgs, repo: &ZettelRepo) -> Result<()> {
    let mut zettels = repo.list_all()?;
    if args.reverse {
        zettels.reverse();
    }

    match args.format {
        OutputFormat::Human => {
            for zettel in &zettels {
                println!("{}", list_line(zettel, args));
            }
        }
        OutputFormat::Json => {
            let listings: Vec<ZettelListing> = zettels.iter().map(listing).collect();
            let output = Output::new(listings);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

/// One line of `list` output; the pretty format wins over links.
pub(crate) fn list_line(zettel: &Zettel, args: &ListArgs) -> String {
    if args.link && !args.style.pretty {
        zettel.md_link()
    } else {
        zettel_line(zettel, &args.style)
    }
}

pub(crate) fn listing(zettel: &Zettel) -> ZettelListing {
    ZettelListing {
        id: zettel.id().to_string(),
        title: zettel.title().to_string(),
        created: zettel.id().timestamp().to_rfc3339(),
        tags: zettel.tags().iter().cloned().collect(),
        path: zettel.path().to_string_lossy().to_string(),
    }
}

pub fn handle_tags(args: &TagsArgs, repo: &ZettelRepo) -> Result<()> {
    let index = repo.tag_index()?;
    for line in tag_lines(&index, args) {
        println!("{line}");
    }
    Ok(())
}

/// `<count>\t#<tag>` lines, or the total alone with `--count`.
pub(crate) fn tag_lines(index: &TagIndex, args: &TagsArgs) -> Vec<String> {
    if args.count {
        return vec![index.total().to_string()];
    }
    index
        .by_count(args.reverse)
        .into_iter()
        .map(|(tag, count)| format!("{count}\t#{tag}"))
        .collect()
}
