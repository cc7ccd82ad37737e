use std::fmt;

/// The five routes the scenario exercises, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    List,
    Detail,
    Create,
    Update,
    Delete,
}

impl Endpoint {
    pub const ALL: [Endpoint; 5] = [
        Endpoint::List,
        Endpoint::Detail,
        Endpoint::Create,
        Endpoint::Update,
        Endpoint::Delete,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Endpoint::List => "list",
            Endpoint::Detail => "detail",
            Endpoint::Create => "create",
            Endpoint::Update => "update",
            Endpoint::Delete => "delete",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
