use crate::errors::QueryError;
use std::fmt;
use std::str::FromStr;

/// Root properties understood by the query compiler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Verb {
    Get,
    Set,
    Add,
    Remove,
    Count,
    Create,
    Alter,
    Drop,
}

impl Verb {
    pub const ALL: [Verb; 8] = [
        Verb::Get,
        Verb::Set,
        Verb::Add,
        Verb::Remove,
        Verb::Count,
        Verb::Create,
        Verb::Alter,
        Verb::Drop,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "get",
            Verb::Set => "set",
            Verb::Add => "add",
            Verb::Remove => "remove",
            Verb::Count => "count",
            Verb::Create => "create",
            Verb::Alter => "alter",
            Verb::Drop => "drop",
        }
    }

    /// Whether the verb changes the schema rather than records
    pub fn is_schema(&self) -> bool {
        matches!(self, Verb::Create | Verb::Alter | Verb::Drop)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verb {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Verb::ALL
            .into_iter()
            .find(|verb| verb.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| QueryError::UnknownVerb(s.to_string()))
    }
}
