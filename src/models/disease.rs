use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Disease a risk assessment targets.
///
/// Serialized as its snake_case tag. Tags without a dedicated model
/// deserialize to `Other` and are scored with the generic profile.
///
/// Equality, ordering and hashing go through the canonical tag, so
/// `Other("Lung_Cancer ")` is the same disease as `LungCancer`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DiseaseType {
    CardiovascularDisease,
    Type2Diabetes,
    AlzheimerDisease,
    BreastCancer,
    ProstateCancer,
    ColorectalCancer,
    LungCancer,
    Other(String),
}

impl DiseaseType {
    /// Every disease with a dedicated model.
    pub const KNOWN: [DiseaseType; 7] = [
        Self::CardiovascularDisease,
        Self::Type2Diabetes,
        Self::AlzheimerDisease,
        Self::BreastCancer,
        Self::ProstateCancer,
        Self::ColorectalCancer,
        Self::LungCancer,
    ];

    /// Canonical tag: trimmed and lowercased.
    pub fn tag(&self) -> Cow<'_, str> {
        let raw = match self {
            Self::CardiovascularDisease => "cardiovascular_disease",
            Self::Type2Diabetes => "type2_diabetes",
            Self::AlzheimerDisease => "alzheimer_disease",
            Self::BreastCancer => "breast_cancer",
            Self::ProstateCancer => "prostate_cancer",
            Self::ColorectalCancer => "colorectal_cancer",
            Self::LungCancer => "lung_cancer",
            Self::Other(raw) => raw.as_str(),
        };
        let trimmed = raw.trim();
        if trimmed.len() == raw.len() && !raw.chars().any(char::is_uppercase) {
            Cow::Borrowed(raw)
        } else {
            Cow::Owned(trimmed.to_lowercase())
        }
    }

    /// Parse a tag. Never fails: unrecognized tags become `Other`.
    pub fn parse(tag: &str) -> Self {
        let normalized = tag.trim().to_lowercase();
        Self::KNOWN
            .iter()
            .find(|d| d.tag() == normalized.as_str())
            .cloned()
            .unwrap_or(Self::Other(normalized))
    }
}

impl PartialEq for DiseaseType {
    fn eq(&self, other: &Self) -> bool {
        self.tag() == other.tag()
    }
}

impl Eq for DiseaseType {}

impl Hash for DiseaseType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag().hash(state);
    }
}

impl PartialOrd for DiseaseType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DiseaseType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tag().cmp(&other.tag())
    }
}

impl From<String> for DiseaseType {
    fn from(tag: String) -> Self {
        Self::parse(&tag)
    }
}

impl From<DiseaseType> for String {
    fn from(disease: DiseaseType) -> Self {
        disease.tag().into_owned()
    }
}

impl fmt::Display for DiseaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_tags() {
        for disease in DiseaseType::KNOWN {
            assert_eq!(DiseaseType::parse(&disease.tag()), disease);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(DiseaseType::parse(" Lung_Cancer "), DiseaseType::LungCancer);
    }

    #[test]
    fn unknown_tag_falls_back_to_other() {
        let disease = DiseaseType::parse("osteoporosis");
        assert_eq!(disease, DiseaseType::Other("osteoporosis".into()));
        assert!(matches!(disease, DiseaseType::Other(_)));
    }

    #[test]
    fn serializes_as_tag() {
        let json = serde_json::to_string(&DiseaseType::Type2Diabetes).unwrap();
        assert_eq!(json, "\"type2_diabetes\"");
        let other: DiseaseType = serde_json::from_str("\"hypertension\"").unwrap();
        assert_eq!(other, DiseaseType::Other("hypertension".into()));
    }

    #[test]
    fn mixed_case_other_matches_parsed_form() {
        let raw = DiseaseType::Other("Gout ".into());
        assert_eq!(raw, DiseaseType::parse("gout"));
        assert_eq!(raw.tag(), "gout");
        assert_eq!(raw.to_string(), "gout");
    }

    #[test]
    fn other_with_known_tag_is_the_known_disease() {
        let raw = DiseaseType::Other("Lung_Cancer".into());
        assert_eq!(raw, DiseaseType::LungCancer);

        let mut set = std::collections::HashSet::new();
        set.insert(DiseaseType::LungCancer);
        assert!(set.contains(&raw));
    }

    #[test]
    fn serde_round_trip_preserves_equality() {
        for disease in [
            DiseaseType::Other("Gout".into()),
            DiseaseType::Other("breast_cancer".into()),
            DiseaseType::ColorectalCancer,
        ] {
            let json = serde_json::to_string(&disease).unwrap();
            let back: DiseaseType = serde_json::from_str(&json).unwrap();
            assert_eq!(back, disease);
        }
    }
}
