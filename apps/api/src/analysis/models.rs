//! Typed contracts for the three AI tasks. Field names follow the JSON
//! shapes the prompts mandate (camelCase on the wire).
//!
//! Every analysis field carries `#[serde(default)]` so a partial model reply
//! still loads; scores are plain integers and deliberately NOT clamped to
//! [0,100] — the prompt requests the range, the code tolerates violations.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub text: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub name: String,
    pub score: i32,
    pub feedback: String,
    #[serde(default)]
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keyword {
    pub word: String,
    pub relevance: Priority,
    pub found: bool,
}

/// Structured scoring/feedback for one résumé.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(default)]
    pub overall_score: i32,
    #[serde(default)]
    pub ats_score: i32,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default)]
    pub keywords: Vec<Keyword>,
    /// Ranked: position is priority order.
    #[serde(default)]
    pub improvement_priorities: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub linkedin: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub duration: String,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub year: String,
    #[serde(default)]
    pub details: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Skills {
    #[serde(default)]
    pub technical: Vec<String>,
    #[serde(default)]
    pub soft: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub tech: Vec<String>,
}

/// An improved résumé produced from the original text plus its analysis.
/// Ephemeral: returned to the caller, never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedResume {
    #[serde(default)]
    pub contact_info: ContactInfo,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub skills: Skills,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapStep {
    pub title: String,
    pub timeframe: String,
    pub description: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub recommended_certifications: Vec<String>,
}

/// A multi-step career-progression recommendation. Ephemeral, like
/// `GeneratedResume`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerRoadmap {
    #[serde(default)]
    pub current_role: String,
    #[serde(default)]
    pub next_steps: Vec<RoadmapStep>,
    #[serde(default)]
    pub long_term_goal: String,
    #[serde(default)]
    pub skills_to_develop: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn analysis_round_trips_without_field_loss() {
        let input = json!({
            "overallScore": 78,
            "atsScore": 65,
            "summary": "Solid resume with room to grow.",
            "sections": [{
                "name": "Work Experience",
                "score": 80,
                "feedback": "Good bullet structure.",
                "suggestions": [{"text": "Add metrics", "priority": "high"}]
            }],
            "keywords": [{"word": "Rust", "relevance": "high", "found": true}],
            "improvementPriorities": ["Quantify achievements", "Add a summary"]
        });

        let analysis: AnalysisResult = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(analysis.overall_score, 78);
        assert_eq!(analysis.sections[0].suggestions[0].priority, Priority::High);
        assert_eq!(analysis.improvement_priorities.len(), 2);

        let back = serde_json::to_value(&analysis).unwrap();
        assert_eq!(back, input);
    }

    #[test]
    fn analysis_tolerates_out_of_range_scores() {
        let analysis: AnalysisResult =
            serde_json::from_value(json!({"overallScore": 150, "atsScore": -3})).unwrap();
        assert_eq!(analysis.overall_score, 150);
        assert_eq!(analysis.ats_score, -3);
    }

    #[test]
    fn analysis_defaults_missing_fields() {
        let analysis: AnalysisResult = serde_json::from_value(json!({})).unwrap();
        assert_eq!(analysis.overall_score, 0);
        assert!(analysis.sections.is_empty());
        assert!(analysis.improvement_priorities.is_empty());
        assert!(analysis.summary.is_empty());
    }

    #[test]
    fn priority_rejects_values_outside_the_enum() {
        let result: Result<Suggestion, _> =
            serde_json::from_value(json!({"text": "x", "priority": "urgent"}));
        assert!(result.is_err());
    }

    #[test]
    fn generated_resume_deserializes_the_prompted_shape() {
        let input = json!({
            "contactInfo": {
                "name": "Ada Lovelace",
                "title": "Software Engineer",
                "email": "ada@example.com",
                "phone": "555-0100",
                "location": "London, UK",
                "linkedin": ""
            },
            "summary": "Engineer with a decade of systems experience.",
            "experience": [{
                "title": "Engineer",
                "company": "Analytical Engines Ltd",
                "duration": "2015 - Present",
                "bullets": ["Reduced latency by 40%"]
            }],
            "education": [{
                "degree": "BSc Mathematics",
                "institution": "University of London",
                "year": "2014",
                "details": ""
            }],
            "skills": {"technical": ["Rust"], "soft": ["Communication"]},
            "certifications": [],
            "projects": []
        });

        let resume: GeneratedResume = serde_json::from_value(input).unwrap();
        assert_eq!(resume.contact_info.name, "Ada Lovelace");
        assert_eq!(resume.experience[0].bullets.len(), 1);
        assert!(resume.certifications.is_empty());
    }

    #[test]
    fn roadmap_deserializes_the_prompted_shape() {
        let input = json!({
            "currentRole": "Backend Engineer",
            "nextSteps": [{
                "title": "Senior Backend Engineer",
                "timeframe": "1-2 years",
                "description": "Own a service end to end.",
                "requiredSkills": ["System design"],
                "recommendedCertifications": []
            }],
            "longTermGoal": "Principal Engineer",
            "skillsToDevelop": ["Mentoring"]
        });

        let roadmap: CareerRoadmap = serde_json::from_value(input).unwrap();
        assert_eq!(roadmap.next_steps[0].timeframe, "1-2 years");
        assert_eq!(roadmap.long_term_goal, "Principal Engineer");
    }
}
