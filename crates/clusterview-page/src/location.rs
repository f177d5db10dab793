//! Page state mirrored into the addressable location (URL query string).
//!
//! Parameters equal to their defaults are left out, so an untouched page has
//! an empty query string.

use url::form_urlencoded;

use crate::dropdown::ALL;

/// Query-string parameter for the search text.
pub const QUERY_PARAM: &str = "query";
/// Query-string parameter for the page number.
pub const PAGE_PARAM: &str = "page";
/// Query-string parameter for the page size.
pub const PER_PAGE_PARAM: &str = "perPage";

/// The subset of page state that survives a reload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationParams {
    pub query: String,
    pub page: usize,
    pub per_page: usize,
    /// Single-select dropdown values, by field. `All` entries are omitted.
    pub selections: Vec<(String, String)>,
}

impl LocationParams {
    /// Defaults for a page with the given page size.
    pub fn new(default_per_page: usize) -> Self {
        LocationParams {
            query: String::new(),
            page: 1,
            per_page: default_per_page,
            selections: Vec::new(),
        }
    }

    /// Sets a single-select value; [`ALL`] removes it.
    pub fn set_selection(&mut self, field: &str, value: &str) {
        self.selections.retain(|(f, _)| f != field);
        if value != ALL && !value.is_empty() {
            self.selections.push((field.to_string(), value.to_string()));
        }
    }

    /// The value for `field`, [`ALL`] when absent.
    pub fn selection(&self, field: &str) -> &str {
        self.selections
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, v)| v.as_str())
            .unwrap_or(ALL)
    }

    /// Encodes the parameters, skipping defaults.
    ///
    /// ```
    /// use clusterview_page::LocationParams;
    ///
    /// let mut params = LocationParams::new(10);
    /// assert_eq!(params.encode(10), "");
    ///
    /// params.query = "status:Ready memory:>=8".into();
    /// params.page = 2;
    /// assert_eq!(params.encode(10), "query=status%3AReady+memory%3A%3E%3D8&page=2");
    /// ```
    pub fn encode(&self, default_per_page: usize) -> String {
        let mut out = form_urlencoded::Serializer::new(String::new());
        if !self.query.is_empty() {
            out.append_pair(QUERY_PARAM, &self.query);
        }
        for (field, value) in &self.selections {
            out.append_pair(field, value);
        }
        if self.page != 1 {
            out.append_pair(PAGE_PARAM, &self.page.to_string());
        }
        if self.per_page != default_per_page {
            out.append_pair(PER_PAGE_PARAM, &self.per_page.to_string());
        }
        out.finish()
    }

    /// Decodes a query string (with or without the leading `?`).
    ///
    /// Only `selection_fields` are read as dropdown values. Malformed or zero
    /// numbers fall back to the defaults; unknown parameters are ignored.
    pub fn decode(input: &str, default_per_page: usize, selection_fields: &[&str]) -> Self {
        let input = input.strip_prefix('?').unwrap_or(input);
        let mut params = LocationParams::new(default_per_page);
        for (key, value) in form_urlencoded::parse(input.as_bytes()) {
            match &*key {
                QUERY_PARAM => params.query = value.into_owned(),
                PAGE_PARAM => {
                    params.page = positive(&value).unwrap_or(1);
                }
                PER_PAGE_PARAM => {
                    params.per_page = positive(&value).unwrap_or(default_per_page);
                }
                field if selection_fields.contains(&field) => {
                    params.set_selection(field, &value);
                }
                _ => {}
            }
        }
        params
    }
}

fn positive(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok().filter(|n| *n > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_encode_to_nothing() {
        assert_eq!(LocationParams::new(10).encode(10), "");
        assert_eq!(LocationParams::new(20).encode(20), "");
    }

    #[test]
    fn non_defaults_are_written() {
        let mut params = LocationParams::new(10);
        params.per_page = 25;
        params.set_selection("status", "Running");
        params.set_selection("os", ALL);
        assert_eq!(params.encode(10), "status=Running&perPage=25");
    }

    #[test]
    fn round_trip() {
        let mut params = LocationParams::new(10);
        params.query = "name:web 01".into();
        params.page = 3;
        params.per_page = 20;
        params.set_selection("os", "Red Hat");
        let encoded = params.encode(10);
        let decoded = LocationParams::decode(&encoded, 10, &["status", "os"]);
        assert_eq!(decoded, params);
    }

    #[test]
    fn decode_ignores_garbage() {
        let decoded =
            LocationParams::decode("?page=abc&perPage=0&os=All&owner=x", 10, &["status", "os"]);
        assert_eq!(decoded, LocationParams::new(10));
    }

    #[test]
    fn selection_lookup() {
        let mut params = LocationParams::new(10);
        assert_eq!(params.selection("status"), ALL);
        params.set_selection("status", "Stopped");
        params.set_selection("status", "Running");
        assert_eq!(params.selection("status"), "Running");
        assert_eq!(params.selections.len(), 1);
    }
}
