//! `Link` header decoding for paginated list endpoints.

use serde_json::Value;

use crate::{BuildkiteError, Result};

/// Decoded JSON body plus the page cursors advertised by the `Link` header.
#[derive(Clone, Debug, PartialEq)]
pub struct Paginated {
    pub body: Value,
    pub next_page: Option<u64>,
    pub previous_page: Option<u64>,
    pub first_page: Option<u64>,
    pub last_page: Option<u64>,
}

impl Paginated {
    /// Wraps `body` with every cursor unset.
    pub fn new(body: Value) -> Self {
        Self {
            body,
            next_page: None,
            previous_page: None,
            first_page: None,
            last_page: None,
        }
    }

    /// Builds a result from a body and a raw `Link` header value.
    ///
    /// An absent or empty header leaves every cursor unset. Entries look like
    /// `<https://host/path?page=2>; rel="next"` and are separated by `", "`.
    /// Relations other than `next`, `prev`, `first` and `last` are ignored;
    /// a repeated relation keeps its last value.
    pub fn from_link_header(body: Value, link: Option<&str>) -> Result<Self> {
        let mut paginated = Self::new(body);
        let Some(link) = link.filter(|value| !value.is_empty()) else {
            return Ok(paginated);
        };

        for entry in link.split(", ") {
            let Some((url, rel)) = entry.split_once("; ") else {
                continue;
            };
            let slot = match rel {
                r#"rel="next""# => &mut paginated.next_page,
                r#"rel="prev""# => &mut paginated.previous_page,
                r#"rel="first""# => &mut paginated.first_page,
                r#"rel="last""# => &mut paginated.last_page,
                _ => continue,
            };
            *slot = Some(page_from_url(url)?);
        }

        Ok(paginated)
    }

    pub fn has_next(&self) -> bool {
        self.next_page.is_some()
    }
}

/// Reads the `page` query parameter of a link target.
///
/// A missing `page` is page `0`. When `page` appears more than once the
/// first occurrence is used.
pub(crate) fn page_from_url(url: &str) -> Result<u64> {
    let url = url.trim().trim_start_matches('<').trim_end_matches('>');
    let query = url
        .split_once('?')
        .map(|(_, query)| query)
        .unwrap_or_default();
    let query = query.split_once('#').map_or(query, |(query, _)| query);

    let Some((_, value)) = url::form_urlencoded::parse(query.as_bytes()).find(|(key, _)| key == "page")
    else {
        return Ok(0);
    };

    value.parse::<u64>().map_err(|err| {
        BuildkiteError::Pagination(format!("invalid page value '{value}' in link '{url}': {err}"))
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{page_from_url, Paginated};
    use crate::BuildkiteError;

    #[test]
    fn next_and_last_are_decoded() {
        let link = r#"<https://api.buildkite.com/v2/organizations/acme/pipelines?page=2>; rel="next", <https://api.buildkite.com/v2/organizations/acme/pipelines?page=8>; rel="last""#;
        let paginated = Paginated::from_link_header(json!([{"slug": "a"}]), Some(link))
            .expect("link must decode");

        assert_eq!(paginated.next_page, Some(2));
        assert_eq!(paginated.last_page, Some(8));
        assert_eq!(paginated.first_page, None);
        assert_eq!(paginated.previous_page, None);
        assert!(paginated.has_next());
    }

    #[test]
    fn all_four_relations_are_decoded() {
        let link = r#"<https://x/builds?page=3&per_page=100>; rel="prev", <https://x/builds?per_page=100&page=5>; rel="next", <https://x/builds?page=1>; rel="first", <https://x/builds?page=9>; rel="last""#;
        let paginated = Paginated::from_link_header(json!([]), Some(link)).expect("must decode");

        assert_eq!(paginated.previous_page, Some(3));
        assert_eq!(paginated.next_page, Some(5));
        assert_eq!(paginated.first_page, Some(1));
        assert_eq!(paginated.last_page, Some(9));
    }

    #[test]
    fn absent_or_empty_header_leaves_cursors_unset() {
        for link in [None, Some("")] {
            let paginated =
                Paginated::from_link_header(json!({"k": "v"}), link).expect("must decode");
            assert_eq!(paginated, Paginated::new(json!({"k": "v"})));
        }
    }

    #[test]
    fn unknown_relations_are_ignored() {
        let link = r#"<https://x/a?page=4>; rel="related", <https://x/a?page=2>; rel="next""#;
        let paginated = Paginated::from_link_header(json!([]), Some(link)).expect("must decode");
        assert_eq!(paginated.next_page, Some(2));
        assert_eq!(paginated.last_page, None);
    }

    #[test]
    fn repeated_relation_keeps_last_value() {
        let link = r#"<https://x/a?page=2>; rel="next", <https://x/a?page=6>; rel="next""#;
        let paginated = Paginated::from_link_header(json!([]), Some(link)).expect("must decode");
        assert_eq!(paginated.next_page, Some(6));
    }

    #[test]
    fn missing_page_parameter_is_page_zero() {
        assert_eq!(page_from_url("<https://x/a?per_page=100>").expect("must parse"), 0);
        assert_eq!(page_from_url("<https://x/a>").expect("must parse"), 0);
    }

    #[test]
    fn duplicate_page_parameter_uses_first() {
        assert_eq!(page_from_url("<https://x/a?page=3&page=7>").expect("must parse"), 3);
    }

    #[test]
    fn non_numeric_page_is_an_error() {
        let link = r#"<https://x/a?page=two>; rel="next""#;
        let err = Paginated::from_link_header(json!([]), Some(link)).expect_err("must fail");
        assert!(matches!(err, BuildkiteError::Pagination(_)));
    }
}
