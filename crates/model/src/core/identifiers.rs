use serde::{Deserialize, Serialize};
use std::{fmt, num::ParseIntError, str::FromStr};

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<u64>().map(Self)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

numeric_id!(
    /// Identity of a cataloged source connection.
    SourceId
);

numeric_id!(
    /// Identity of an ETL job definition.
    JobId
);

numeric_id!(
    /// Identity of one persisted execution attempt.
    ExecutionId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_order_numerically() {
        let mut ids = vec![JobId::new(10), JobId::new(2), JobId::new(7)];
        ids.sort();
        assert_eq!(ids, vec![JobId::new(2), JobId::new(7), JobId::new(10)]);
    }

    #[test]
    fn parses_from_cli_input() {
        assert_eq!(" 42".parse::<SourceId>().unwrap(), SourceId::new(42));
        assert!("abc".parse::<ExecutionId>().is_err());
    }
}
