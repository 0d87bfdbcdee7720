//! Query construction for registry requests

/// A registry query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Query<'a> {
    /// Exact lookup by NPI number.
    Number(u64),
    /// Fuzzy lookup by name. The registry does the fuzzy matching, so the
    /// names are sent as given.
    Name {
        first_name: &'a str,
        last_name: &'a str,
    },
}

impl Query<'_> {
    /// Query parameters in key order.
    fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            Query::Number(number) => vec![("number", number.to_string())],
            Query::Name {
                first_name,
                last_name,
            } => vec![
                ("first_name", first_name.to_string()),
                ("last_name", last_name.to_string()),
            ],
        }
    }

    /// Full request URL for this query against `base_url`.
    pub(crate) fn url(&self, base_url: &str, api_version: Option<&str>) -> String {
        let mut params = self.params();
        if let Some(version) = api_version {
            params.push(("version", version.to_string()));
        }

        let query = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        format!("{}?{}", base_url, query)
    }
}
