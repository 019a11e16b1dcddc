use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! count_newtype {
    ($name:ident, $inner:ty) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

count_newtype!(SyllableCount, u32);
count_newtype!(Score, i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupMode {
    Rhymes,
    SimilarMeaning,
}

impl LookupMode {
    /// Query parameter the word-lookup service expects for this mode.
    pub fn query_param(self) -> &'static str {
        match self {
            Self::Rhymes => "rel_rhy",
            Self::SimilarMeaning => "ml",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Rhymes => "rhymes",
            Self::SimilarMeaning => "similar meaning",
        }
    }
}

impl fmt::Display for LookupMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
