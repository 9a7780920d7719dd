use serde::{Deserialize, Serialize};

/// The two mutually exclusive income-tax rule sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    Old,
    New,
}

impl Regime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Old => "old",
            Self::New => "new",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "old" => Some(Self::Old),
            "new" => Some(Self::New),
            _ => None,
        }
    }
}

impl std::fmt::Display for Regime {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Income-tax return form recommended for the filer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItrForm {
    #[serde(rename = "ITR-1")]
    Itr1,
    #[serde(rename = "ITR-2")]
    Itr2,
}

impl ItrForm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Itr1 => "ITR-1",
            Self::Itr2 => "ITR-2",
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_accepts_mixed_case() {
        assert_eq!(Regime::parse("OLD"), Some(Regime::Old));
        assert_eq!(Regime::parse(" new "), Some(Regime::New));
        assert_eq!(Regime::parse("legacy"), None);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Regime::New).unwrap(), "\"new\"");
        assert_eq!(serde_json::to_string(&ItrForm::Itr2).unwrap(), "\"ITR-2\"");
    }
}
