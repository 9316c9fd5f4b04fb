#[derive(Debug)]
pub enum ProfilePath {
    Profiles,
    Profile,
}

impl ProfilePath {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Profiles => "/profiles",
            Self::Profile => "/profiles/:id",
        }
    }
}
