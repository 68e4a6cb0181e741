//! Counter extraction from a witness-slip page.

use crate::error::{Error, Result};
use crate::types::SlipCounts;
use scraper::{Html, Selector};

/// CSS selector for the three counter cells on the page
const COUNTER_SELECTOR: &str = "td.tabcontrol";

/// Number of counter cells a well-formed page carries
const COUNTER_CELLS: usize = 3;

/// Pull the three slip counters out of a parsed witness-slip page.
///
/// The page marks its counters as `td.tabcontrol` cells whose text reads
/// like `Proponents: 5`; the first three in document order are taken as
/// proponents, opponents, and no-position. Fewer than three cells yields
/// [`SlipCounts::Fallback`] rather than an error. Within a cell, the count
/// is whatever follows the first colon; a cell with no colon counts as
/// zero, and non-numeric text after the colon is an error the caller
/// absorbs per bill.
pub fn extract_counts(document: &Html) -> Result<SlipCounts> {
    let selector = Selector::parse(COUNTER_SELECTOR).expect("valid counter selector");
    let cells: Vec<String> = document
        .select(&selector)
        .take(COUNTER_CELLS)
        .map(|cell| cell.text().collect::<String>())
        .collect();

    if cells.len() < COUNTER_CELLS {
        return Ok(SlipCounts::Fallback);
    }

    Ok(SlipCounts::Complete {
        proponents: parse_count(&cells[0])?,
        opponents: parse_count(&cells[1])?,
        no_position: parse_count(&cells[2])?,
    })
}

/// Parse the integer after the first colon; no colon means zero.
fn parse_count(text: &str) -> Result<u32> {
    match text.split_once(':') {
        Some((_, rest)) => rest
            .trim()
            .parse()
            .map_err(|_| Error::Counter(format!("expected a count, found {:?}", text.trim()))),
        None => Ok(0),
    }
}
