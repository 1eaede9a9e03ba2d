//! Link header parsing
//!
//! Format: `<https://host/api/v4/projects?page=2>; rel="next", <...>; rel="last"`

use crate::http::HttpResponse;
use std::collections::BTreeMap;

/// One target of a link header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Target URL
    pub url: String,
    /// Relation name this link was stored under
    pub rel: String,
    /// Other link parameters (`title`, `type`, ...)
    pub params: BTreeMap<String, String>,
}

/// Link targets keyed by relation name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkRelations {
    links: BTreeMap<String, Link>,
}

impl LinkRelations {
    /// Parse a link header value
    ///
    /// Entries without a `<url>` or a `rel` parameter are skipped. A `rel`
    /// listing several names registers the link under each of them.
    pub fn parse(header: &str) -> Self {
        let mut links = BTreeMap::new();
        let mut rest = header;

        while let Some(start) = rest.find('<') {
            let after = &rest[start + 1..];
            let Some(end) = after.find('>') else {
                break;
            };
            let url = after[..end].trim();
            let tail = &after[end + 1..];
            let params_end = tail.find('<').unwrap_or(tail.len());
            let params = parse_params(&tail[..params_end]);
            rest = &tail[params_end..];

            let Some(rels) = params.get("rel") else {
                continue;
            };
            for rel in rels.split_whitespace() {
                let mut link_params = params.clone();
                link_params.remove("rel");
                links.insert(
                    rel.to_string(),
                    Link {
                        url: url.to_string(),
                        rel: rel.to_string(),
                        params: link_params,
                    },
                );
            }
        }

        Self { links }
    }

    /// Parse the `link` header of a response (empty if absent)
    pub fn from_response(response: &HttpResponse) -> Self {
        response
            .header("link")
            .map(Self::parse)
            .unwrap_or_default()
    }

    /// Get the link for a relation
    pub fn get(&self, rel: &str) -> Option<&Link> {
        self.links.get(rel)
    }

    /// The `next` relation
    pub fn next(&self) -> Option<&Link> {
        self.get("next")
    }

    /// Check if no relations were found
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Number of relations
    pub fn len(&self) -> usize {
        self.links.len()
    }
}

fn parse_params(segment: &str) -> BTreeMap<String, String> {
    segment
        .split(';')
        .filter_map(|param| {
            let param = param.trim().trim_end_matches(',').trim();
            let (key, value) = param.split_once('=')?;
            let value = value.trim().trim_matches('"').trim_matches('\'');
            Some((key.trim().to_ascii_lowercase(), value.to_string()))
        })
        .collect()
}
