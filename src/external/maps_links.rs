use reqwest::Url;

use crate::error::{invalid_input_error, Error};

pub const DEFAULT_SEARCH_BASE: &str = "https://www.google.com/maps/search/";
pub const DEFAULT_DIRECTIONS_BASE: &str = "https://www.google.com/maps/dir/";

fn parse_base(base: &str) -> Result<Url, Error> {
    Url::parse(base).map_err(|err| invalid_input_error().with_details(err.to_string()))
}

/// Link that opens a single address in the maps web client.
pub fn search_url(base: &str, address: &str) -> Result<String, Error> {
    let mut url = parse_base(base)?;
    url.query_pairs_mut()
        .append_pair("api", "1")
        .append_pair("query", address);

    Ok(url.into())
}

/// Link that opens turn-by-turn navigation for one leg.
pub fn directions_url(base: &str, start: &str, end: &str) -> Result<String, Error> {
    let mut url = parse_base(base)?;
    url.query_pairs_mut()
        .append_pair("api", "1")
        .append_pair("origin", start)
        .append_pair("destination", end)
        .append_pair("travelmode", "driving");

    Ok(url.into())
}

#[test]
fn search_url_encodes_address() {
    let url = search_url(DEFAULT_SEARCH_BASE, "1234 Legacy Drive, Plano, TX 75024").unwrap();

    assert_eq!(
        url,
        "https://www.google.com/maps/search/?api=1&query=1234+Legacy+Drive%2C+Plano%2C+TX+75024"
    );
}

#[test]
fn directions_url_carries_both_ends() {
    let url = directions_url(DEFAULT_DIRECTIONS_BASE, "A St", "B & C St").unwrap();

    assert_eq!(
        url,
        "https://www.google.com/maps/dir/?api=1&origin=A+St&destination=B+%26+C+St&travelmode=driving"
    );
}

#[test]
fn invalid_base_is_rejected() {
    assert_eq!(search_url("not a url", "A St").unwrap_err().code, 101);
}
