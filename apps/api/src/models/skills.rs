use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::skills::models::Skill;

/// A job-title-scoped skill bundle. `skills` is an embedded JSONB array:
/// it is replaced wholesale by generation and edited in place afterwards —
/// two generations are never merged.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SkillProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_title: String,
    pub skills: Json<Vec<Skill>>,
    pub summary: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::models::{Certification, SupportLevel};

    /// Persisting and reloading a generated profile must preserve skill
    /// names, ratings and certifications exactly — the JSONB column is a
    /// plain serde round-trip, no re-derivation on load.
    #[test]
    fn test_skill_profile_round_trip_is_lossless() {
        let mut skills: Vec<Skill> = ["Bookkeeping", "Tax Compliance", "Auditing"]
            .into_iter()
            .map(Skill::from_name)
            .collect();
        skills[1].rating = 3;
        skills[1].proof = "Filed returns for 120 clients".to_string();
        skills[1].support_level = SupportLevel::StronglySupported;
        skills[2].certifications.push(Certification {
            course_name: "CIA".to_string(),
            institution: "IIA".to_string(),
            city: "Lake Mary".to_string(),
            completion_date: "2021".to_string(),
            degree: "Certification".to_string(),
        });

        let row = SkillProfileRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            job_title: "Accountant".to_string(),
            skills: Json(skills.clone()),
            summary: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&row).unwrap();
        let back: SkillProfileRow = serde_json::from_str(&json).unwrap();
        assert_eq!(back.job_title, "Accountant");
        assert_eq!(back.skills.0, skills);
    }
}
