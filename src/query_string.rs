use std::collections::HashMap;

#[derive(PartialEq, Debug)]
pub struct QueryString {
    items: HashMap<String, String>,
}

impl QueryString {
    pub fn from(buf: &str) -> Self {
        let pairs: Vec<(String, String)> =
            serde_urlencoded::from_str(buf).unwrap_or_else(|_| vec![]);
        QueryString {
            items: pairs.into_iter().collect(),
        }
    }

    /// The `page` parameter, defaulting to the first page on anything
    /// missing or unparseable.
    pub fn page(&self) -> u32 {
        self.items
            .get("page")
            .and_then(|value| value.parse().ok())
            .filter(|&page| page > 0)
            .unwrap_or(1)
    }
}
