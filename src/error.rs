use std::fmt;

/// Which peer list a validation error refers to. Only used to label
/// diagnostics; both lists share the same rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerList {
    Bootstraps,
    Relays,
}

impl PeerList {
    pub fn entry_name(self) -> &'static str {
        match self {
            PeerList::Bootstraps => "bootstrap",
            PeerList::Relays => "relay",
        }
    }
}

impl fmt::Display for PeerList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.entry_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{list} at index {index} contains an illegal ';' character")]
    IllegalCharacter { list: PeerList, index: usize },
    #[error("{list} at index {duplicate} is the same as {list} at index {first}")]
    DuplicateEntry {
        list: PeerList,
        first: usize,
        duplicate: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_diagnostics() {
        let err = ConfigError::IllegalCharacter {
            list: PeerList::Relays,
            index: 1,
        };
        assert_eq!(
            err.to_string(),
            "relay at index 1 contains an illegal ';' character"
        );

        let err = ConfigError::DuplicateEntry {
            list: PeerList::Bootstraps,
            first: 0,
            duplicate: 2,
        };
        assert_eq!(
            err.to_string(),
            "bootstrap at index 2 is the same as bootstrap at index 0"
        );
    }
}
