//! Request models for resume generation and the section set the LLM returns.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::resume::latex::clean_latex_content;

/// Grade as sent by the client: either `"8.7/10"` or `8.7`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cgpa {
    Number(f64),
    Text(String),
}

impl fmt::Display for Cgpa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cgpa::Number(n) => write!(f, "{n}"),
            Cgpa::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationItem {
    pub degree: String,
    pub university: String,
    pub year: String,
    #[serde(default)]
    pub cgpa: Option<Cgpa>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectItem {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceItem {
    pub role: String,
    pub company: String,
    pub duration: String,
    pub work: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
    pub education: Vec<EducationItem>,
    pub skills: Vec<String>,
    pub projects: Vec<ProjectItem>,
    pub experience: Vec<ExperienceItem>,
    #[serde(default)]
    pub additional: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDescription {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    pub requirements: Vec<String>,
}

/// Page layout of the generated document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeLayout {
    /// Two columns, contact details on one line.
    Horizontal,
    /// Single column, contact details stacked.
    #[default]
    Vertical,
}

/// Display name → URL, in the order the client sent them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Links(pub Vec<(String, String)>);

impl<'de> Deserialize<'de> for Links {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LinksVisitor;

        impl<'de> Visitor<'de> for LinksVisitor {
            type Value = Links;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of link names to URLs")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Links, A::Error> {
                let mut links = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, url)) = map.next_entry::<String, String>()? {
                    links.push((name, url));
                }
                Ok(Links(links))
            }
        }

        deserializer.deserialize_map(LinksVisitor)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResumeGenRequest {
    #[serde(default)]
    pub links: Links,
    pub candidate: Candidate,
    pub job_description: JobDescription,
    #[serde(default)]
    pub layout: ResumeLayout,
}

/// One LaTeX fragment per resume section, as drafted by the LLM.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResumeSections {
    pub education: String,
    pub skills: String,
    pub experience: String,
    pub projects: String,
    pub additional: String,
}

impl ResumeSections {
    /// Builds sections from the LLM's JSON object.
    ///
    /// Missing or null keys become empty sections; non-string values are kept as
    /// their JSON text. Every section is cleaned of non-ASCII punctuation.
    /// Returns `None` if the reply is not a JSON object.
    pub fn from_json(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let section = |key: &str| -> String {
            match object.get(key) {
                None | Some(Value::Null) => String::new(),
                Some(Value::String(s)) => clean_latex_content(s),
                Some(other) => clean_latex_content(&other.to_string()),
            }
        };

        Some(Self {
            education: section("education"),
            skills: section("skills"),
            experience: section("experience"),
            projects: section("projects"),
            additional: section("additional"),
        })
    }
}
