//! Resume content types.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// A structured resume ready for rendering.
///
/// Content is assumed schema-validated upstream; rendering never
/// re-validates, it only prunes absent values and omits empty sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeContent {
    /// Name, contact details and summary.
    #[serde(default)]
    pub basics: Basics,

    /// Work history, most relevant first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub work: Vec<WorkEntry>,

    /// Education history.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub education: Vec<EducationEntry>,

    /// Personal or professional projects.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<ProjectEntry>,

    /// Skill groups.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skills: Vec<SkillEntry>,

    /// Any top-level keys outside the core schema, in encounter order.
    ///
    /// These surface verbatim as extra sections in the rendered output.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResumeContent {
    /// Create an empty resume.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse resume content from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load resume content from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Check whether the resume has any content at all.
    pub fn is_empty(&self) -> bool {
        self.basics.name.is_none()
            && self.work.is_empty()
            && self.education.is_empty()
            && self.projects.is_empty()
            && self.skills.is_empty()
            && self.extra.is_empty()
    }
}

/// Name, contact details and summary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Basics {
    /// Full name.
    pub name: Option<String>,

    /// Short role label, e.g. "Web Developer".
    pub label: Option<String>,

    /// Contact email address.
    pub email: Option<String>,

    /// Contact phone number.
    pub phone: Option<String>,

    /// Personal website or portfolio URL.
    pub url: Option<String>,

    /// Professional summary paragraph.
    pub summary: Option<String>,

    /// Physical location.
    pub location: Option<Location>,

    /// Social profiles.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub profiles: Vec<Profile>,
}

/// A physical location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Location {
    pub address: Option<String>,
    #[serde(rename = "postalCode")]
    pub postal_code: Option<String>,
    pub city: Option<String>,
    #[serde(rename = "countryCode")]
    pub country_code: Option<String>,
    pub region: Option<String>,
}

/// A social network profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    /// Network name, e.g. "GitHub".
    pub network: Option<String>,
    pub username: Option<String>,
    pub url: Option<String>,
}

/// One work history entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkEntry {
    /// Company name.
    pub name: Option<String>,
    pub position: Option<String>,
    pub location: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<String>,
}

/// One education entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EducationEntry {
    pub institution: Option<String>,
    pub url: Option<String>,
    /// Field of study, e.g. "Computer Science".
    pub area: Option<String>,
    /// Degree type, e.g. "Bachelor".
    #[serde(rename = "studyType")]
    pub study_type: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    /// Grade or GPA, e.g. "3.67/4.0".
    pub score: Option<String>,
}

/// One project entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<String>,
}

/// One skill group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillEntry {
    /// Group name, e.g. "Web Development".
    pub name: Option<String>,
    /// Proficiency, e.g. "Master".
    pub level: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}
