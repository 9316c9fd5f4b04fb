pub enum ProjectPath {
    Projects,
}

impl ProjectPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectPath::Projects => "/projects",
        }
    }
}
