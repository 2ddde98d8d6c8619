use serde::{Deserialize, Serialize};

/// Report toggles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Also report agents whose lifecycle matched exactly, and announce each
    /// agent as it is checked.
    pub verbose: bool,
    /// Print aggregate creation/confirmation/failure counts before the
    /// per-agent findings.
    pub summary: bool,
}

impl AuditConfig {
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn summary(mut self, summary: bool) -> Self {
        self.summary = summary;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default_to_off() {
        let config: AuditConfig = serde_json::from_str(r#"{"summary": true}"#).unwrap();
        assert_eq!(config, AuditConfig::default().summary(true));
        assert!(!config.verbose);
    }
}
