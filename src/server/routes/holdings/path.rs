pub enum HoldingsPath {
    Query,
}

impl HoldingsPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            HoldingsPath::Query => "/holdings/query",
        }
    }
}
