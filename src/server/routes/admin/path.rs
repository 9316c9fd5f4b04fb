pub enum AdminPath {
    Vouchers,
}

impl AdminPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminPath::Vouchers => "/admin/vouchers",
        }
    }
}
