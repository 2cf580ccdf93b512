//! Participant module - named members of the observed group

/// A named participant and the service they belong to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Participant {
    /// Unique, non-empty display name
    pub name: String,

    /// Service (team, department) of the participant
    pub service: String,
}

impl Participant {
    /// Create a new participant, trimming surrounding whitespace
    pub fn new(name: impl AsRef<str>, service: impl AsRef<str>) -> Self {
        Self {
            name: name.as_ref().trim().to_string(),
            service: service.as_ref().trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims() {
        let p = Participant::new("  Alice ", " RH\t");
        assert_eq!(p.name, "Alice");
        assert_eq!(p.service, "RH");
    }
}
