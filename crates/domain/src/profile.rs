//! Profile — the content of the portfolio page.
//!
//! Everything the page shows about its owner is data: it is deserialized
//! from a content file and only checked for a couple of invariants.

use serde::{Deserialize, Serialize};

use crate::email;
use crate::error::ProfileError;

/// Number of technologies shown on a project card before "+N more".
pub const PROJECT_TECH_PREVIEW: usize = 3;

/// Full page content.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    pub owner: Owner,
    #[serde(default)]
    pub about: About,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub skills: Skills,
    #[serde(default)]
    pub education: Vec<Education>,
    pub contact: ContactDetails,
    #[serde(default)]
    pub socials: Vec<Link>,
    #[serde(default)]
    pub footer: Footer,
}

/// Who the portfolio belongs to. Drives the hero section and the navbar logo.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Owner {
    pub name: String,
    pub initials: String,
    pub greeting: String,
    /// Typed out character by character under the name.
    pub headline: String,
    pub summary: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct About {
    pub intro: String,
    pub paragraphs: Vec<String>,
    pub highlights: Vec<Highlight>,
}

/// Icon card in the about section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Highlight {
    pub icon: String,
    pub title: String,
    pub description: String,
}

/// One position on the experience timeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub company: String,
    pub position: String,
    pub period: String,
    pub description: Vec<String>,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    /// Glyph shown in the card header.
    pub image: String,
    pub github: Option<String>,
    pub live: Option<String>,
}

impl Project {
    /// Technologies shown on the card.
    #[must_use]
    pub fn visible_technologies(&self) -> &[String] {
        let end = self.technologies.len().min(PROJECT_TECH_PREVIEW);
        &self.technologies[..end]
    }

    /// How many technologies are folded into "+N more".
    #[must_use]
    pub fn hidden_technology_count(&self) -> usize {
        self.technologies.len().saturating_sub(PROJECT_TECH_PREVIEW)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Skills {
    pub categories: Vec<SkillCategory>,
    pub competency_summary: String,
    pub competencies: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    /// Grade point average on whatever scale the institution uses.
    pub grade: Option<f64>,
    pub year: String,
    pub details: Vec<String>,
}

/// Aggregate line under the education cards.
#[derive(Debug, Clone, PartialEq)]
pub struct EducationSummary {
    /// Mean of the known grades, if any.
    pub average_grade: Option<f64>,
    pub degrees: usize,
    /// Distinct institutions in listing order.
    pub institutions: Vec<String>,
}

impl EducationSummary {
    /// Average grade truncated to two decimals, with a `+` when digits were dropped.
    #[must_use]
    pub fn average_label(&self) -> Option<String> {
        self.average_grade.map(format_grade)
    }
}

fn format_grade(value: f64) -> String {
    // Nudge up so values like 8.7 (stored as 8.6999…) are not truncated down.
    let truncated = ((value * 100.0) + 1e-9).floor() / 100.0;
    if value - truncated > 1e-9 {
        format!("{truncated:.2}+")
    } else {
        format!("{truncated:.2}")
    }
}

/// Public ways to reach the owner, shown beside the contact form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactDetails {
    pub email: String,
    pub phone: Option<String>,
    pub linkedin: Option<Link>,
}

impl ContactDetails {
    /// `tel:` URI for the phone number, digits and a leading `+` only.
    #[must_use]
    pub fn phone_href(&self) -> Option<String> {
        self.phone.as_ref().map(|phone| {
            let digits: String = phone
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '+')
                .collect();
            format!("tel:{digits}")
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Footer {
    pub blurb: String,
    /// Tail of the copyright line, e.g. "Made with care in Lisbon."
    pub signature: String,
    pub built_with: String,
}

impl Profile {
    /// Check content invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::EmptyOwnerName`] when the owner has no name
    /// and [`ProfileError::InvalidContactEmail`] when the public email does
    /// not look like an address.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.owner.name.trim().is_empty() {
            return Err(ProfileError::EmptyOwnerName);
        }
        if !email::is_valid(&self.contact.email) {
            return Err(ProfileError::InvalidContactEmail(self.contact.email.clone()));
        }
        Ok(())
    }

    /// Navbar logo text; falls back to the first letter of each name part.
    #[must_use]
    pub fn initials(&self) -> String {
        if !self.owner.initials.is_empty() {
            return self.owner.initials.clone();
        }
        self.owner
            .name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    #[must_use]
    pub fn education_summary(&self) -> EducationSummary {
        let grades: Vec<f64> = self.education.iter().filter_map(|e| e.grade).collect();
        #[allow(clippy::cast_precision_loss)]
        let average_grade =
            (!grades.is_empty()).then(|| grades.iter().sum::<f64>() / grades.len() as f64);

        let mut institutions: Vec<String> = Vec::new();
        for entry in &self.education {
            if !institutions.contains(&entry.institution) {
                institutions.push(entry.institution.clone());
            }
        }

        EducationSummary {
            average_grade,
            degrees: self.education.len(),
            institutions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> Profile {
        let mut profile = Profile::default();
        profile.owner.name = "Jane Doe".to_string();
        profile.contact.email = "jane@example.com".to_string();
        profile
    }

    fn education(institution: &str, grade: Option<f64>) -> Education {
        Education {
            degree: "BSc".to_string(),
            institution: institution.to_string(),
            grade,
            ..Education::default()
        }
    }

    #[test]
    fn should_accept_minimal_profile() {
        assert!(profile().validate().is_ok());
    }

    #[test]
    fn should_reject_blank_owner_name() {
        let mut profile = profile();
        profile.owner.name = "  ".to_string();
        assert_eq!(profile.validate(), Err(ProfileError::EmptyOwnerName));
    }

    #[test]
    fn should_reject_invalid_contact_email() {
        let mut profile = profile();
        profile.contact.email = "jane".to_string();
        assert!(matches!(
            profile.validate(),
            Err(ProfileError::InvalidContactEmail(_))
        ));
    }

    #[test]
    fn should_derive_initials_from_name() {
        assert_eq!(profile().initials(), "JD");
    }

    #[test]
    fn should_prefer_explicit_initials() {
        let mut profile = profile();
        profile.owner.initials = "J.".to_string();
        assert_eq!(profile.initials(), "J.");
    }

    #[test]
    fn should_preview_first_three_technologies() {
        let project = Project {
            technologies: ["Rust", "axum", "askama", "tokio", "serde"]
                .map(String::from)
                .to_vec(),
            ..Project::default()
        };
        assert_eq!(project.visible_technologies(), ["Rust", "axum", "askama"]);
        assert_eq!(project.hidden_technology_count(), 2);
    }

    #[test]
    fn should_show_all_technologies_when_few() {
        let project = Project {
            technologies: vec!["Rust".to_string()],
            ..Project::default()
        };
        assert_eq!(project.visible_technologies().len(), 1);
        assert_eq!(project.hidden_technology_count(), 0);
    }

    #[test]
    fn should_summarize_education() {
        let mut profile = profile();
        profile.education = vec![
            education("Uni A", Some(8.68)),
            education("Uni A", Some(8.65)),
        ];
        let summary = profile.education_summary();
        assert_eq!(summary.degrees, 2);
        assert_eq!(summary.institutions, vec!["Uni A".to_string()]);
        assert_eq!(summary.average_label().as_deref(), Some("8.66+"));
    }

    #[test]
    fn should_not_add_plus_when_average_is_exact() {
        let mut profile = profile();
        profile.education = vec![education("A", Some(9.0)), education("B", Some(8.0))];
        let summary = profile.education_summary();
        assert_eq!(summary.average_label().as_deref(), Some("8.50"));
        assert_eq!(summary.institutions.len(), 2);
    }

    #[test]
    fn should_not_truncate_values_stored_below_their_decimal() {
        assert_eq!(format_grade(8.7), "8.70");
    }

    #[test]
    fn should_skip_average_without_grades() {
        let mut profile = profile();
        profile.education = vec![education("A", None)];
        assert_eq!(profile.education_summary().average_label(), None);
    }

    #[test]
    fn should_build_phone_href() {
        let contact = ContactDetails {
            phone: Some("+1 (555) 010-2000".to_string()),
            ..ContactDetails::default()
        };
        assert_eq!(contact.phone_href().as_deref(), Some("tel:+15550102000"));
    }

    #[test]
    fn should_deserialize_from_toml() {
        let toml = r#"
            [owner]
            name = "Jane Doe"
            headline = "Rust Developer"

            [contact]
            email = "jane@example.com"

            [[projects]]
            title = "folio"
            technologies = ["Rust"]
            github = "https://example.com/folio"
        "#;
        let profile: Profile = toml::from_str(toml).unwrap();
        assert_eq!(profile.owner.headline, "Rust Developer");
        assert_eq!(profile.projects.len(), 1);
        assert!(profile.projects[0].live.is_none());
        assert!(profile.validate().is_ok());
    }
}
