use serde::{Deserialize, Serialize};

/// Highest allowed self-rating. Ratings run 0 (No Skill) to 4 (Expert).
pub const MAX_RATING: u8 = 4;

pub const RATING_LABELS: [&str; 5] = [
    "No Skill",
    "Learned",
    "Applied at Work",
    "Have Mentored Others",
    "Expert Level",
];

pub fn rating_label(rating: u8) -> &'static str {
    RATING_LABELS
        .get(rating as usize)
        .copied()
        .unwrap_or("Unknown")
}

/// AI classification of a skill's supplied evidence.
///
/// The serialized forms are wire literals shared with the client and with the
/// validation prompt's output directive — do not rename.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupportLevel {
    #[default]
    #[serde(rename = "Not Validated")]
    NotValidated,
    #[serde(rename = "Not Supported")]
    NotSupported,
    Supported,
    #[serde(rename = "Strongly Supported")]
    StronglySupported,
}

impl SupportLevel {
    /// Parses the validation call's plain-text answer. The prompt instructs
    /// the model to reply with exactly one of three literals; a trim is the
    /// only tolerated deviation. `NotValidated` is the unset default and is
    /// never a legal model answer.
    pub fn from_validation_output(text: &str) -> Option<SupportLevel> {
        match text.trim() {
            "Strongly Supported" => Some(SupportLevel::StronglySupported),
            "Supported" => Some(SupportLevel::Supported),
            "Not Supported" => Some(SupportLevel::NotSupported),
            _ => None,
        }
    }
}

/// A certification attached to a skill entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    #[serde(default)]
    pub course_name: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub completion_date: String,
    #[serde(default)]
    pub degree: String,
}

/// One skill entry embedded in a skill profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    pub rating: u8,
    #[serde(default)]
    pub proof: String,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub support_level: SupportLevel,
}

impl Skill {
    /// A fresh, unrated entry for a generated skill name.
    pub fn from_name(name: impl Into<String>) -> Skill {
        Skill {
            name: name.into(),
            rating: 0,
            proof: String::new(),
            certifications: Vec::new(),
            support_level: SupportLevel::NotValidated,
        }
    }

    /// Boundary validation. Out-of-range ratings are rejected, never clamped.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("skill name must not be empty".to_string());
        }
        if self.rating > MAX_RATING {
            return Err(format!(
                "skill '{}' has rating {} outside 0..={MAX_RATING}",
                self.name, self.rating
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_support_level_parses_trimmed_literals() {
        assert_eq!(
            SupportLevel::from_validation_output("  Strongly Supported \n"),
            Some(SupportLevel::StronglySupported)
        );
        assert_eq!(
            SupportLevel::from_validation_output("Supported"),
            Some(SupportLevel::Supported)
        );
        assert_eq!(
            SupportLevel::from_validation_output("Not Supported"),
            Some(SupportLevel::NotSupported)
        );
    }

    #[test]
    fn test_support_level_rejects_everything_else() {
        assert_eq!(SupportLevel::from_validation_output("Not Validated"), None);
        assert_eq!(
            SupportLevel::from_validation_output("The skill is Supported."),
            None
        );
        assert_eq!(SupportLevel::from_validation_output(""), None);
    }

    #[test]
    fn test_support_level_wire_literals() {
        assert_eq!(
            serde_json::to_string(&SupportLevel::StronglySupported).unwrap(),
            "\"Strongly Supported\""
        );
        assert_eq!(
            serde_json::from_str::<SupportLevel>("\"Not Validated\"").unwrap(),
            SupportLevel::NotValidated
        );
    }

    #[test]
    fn test_new_skill_defaults() {
        let skill = Skill::from_name("Budgeting");
        assert_eq!(skill.rating, 0);
        assert_eq!(skill.support_level, SupportLevel::NotValidated);
        assert!(skill.certifications.is_empty());
        assert!(skill.validate().is_ok());
    }

    #[test]
    fn test_rating_above_max_rejected() {
        let mut skill = Skill::from_name("Forecasting");
        skill.rating = 5;
        assert!(skill.validate().is_err());
        skill.rating = MAX_RATING;
        assert!(skill.validate().is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        assert!(Skill::from_name("  ").validate().is_err());
    }

    #[test]
    fn test_skill_round_trips_with_certifications() {
        let skill = Skill {
            name: "Financial Reporting".to_string(),
            rating: 3,
            proof: "Closed quarterly books for a 40-person firm".to_string(),
            certifications: vec![Certification {
                course_name: "CPA".to_string(),
                institution: "AICPA".to_string(),
                city: "New York".to_string(),
                completion_date: "2019".to_string(),
                degree: "License".to_string(),
            }],
            support_level: SupportLevel::Supported,
        };
        let json = serde_json::to_string(&skill).unwrap();
        assert!(json.contains("\"courseName\""));
        assert!(json.contains("\"supportLevel\":\"Supported\""));
        let back: Skill = serde_json::from_str(&json).unwrap();
        assert_eq!(back, skill);
    }

    #[test]
    fn test_skill_deserializes_with_missing_optionals() {
        let skill: Skill = serde_json::from_str(r#"{"name":"Excel","rating":2}"#).unwrap();
        assert_eq!(skill.support_level, SupportLevel::NotValidated);
        assert!(skill.proof.is_empty());
    }

    #[test]
    fn test_rating_labels() {
        assert_eq!(rating_label(0), "No Skill");
        assert_eq!(rating_label(4), "Expert Level");
        assert_eq!(rating_label(9), "Unknown");
    }
}
