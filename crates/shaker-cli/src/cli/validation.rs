use shaker_config::FacetOrder;

/// Validate a facet order given on the command line.
///
/// Accepts a `-`-joined sequence of distinct facet names, for example
/// `common-device` or `common-action-device-skin-region-lang`.
///
/// # Errors
///
/// Returns the parse error message for unknown or repeated facets.
pub fn parse_order(s: &str) -> Result<String, String> {
    FacetOrder::parse(s)
        .map(|order| order.to_string())
        .map_err(|err| err.to_string())
}
