//! Academic course record with embedded assignments and grades.

use crate::model::entity::{new_record_id, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub submitted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<f64>,
    #[serde(default)]
    pub weight: f64,
}

impl Assignment {
    pub fn new(title: impl Into<String>, due_date: DateTime<Utc>) -> Self {
        Self {
            id: new_record_id(),
            title: title.into(),
            description: String::new(),
            due_date,
            submitted: false,
            grade: None,
            weight: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    pub id: RecordId,
    pub name: String,
    pub score: f64,
    pub max_score: f64,
    pub weight: f64,
    pub date: DateTime<Utc>,
}

impl Grade {
    pub fn new(name: impl Into<String>, score: f64, max_score: f64, weight: f64) -> Self {
        Self {
            id: new_record_id(),
            name: name.into(),
            score,
            max_score,
            weight,
            date: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicCourse {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub credits: f64,
    #[serde(default)]
    pub instructor: String,
    #[serde(default)]
    pub schedule: String,
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    #[serde(default)]
    pub grades: Vec<Grade>,
    #[serde(default)]
    pub color: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl AcademicCourse {
    pub fn new(name: impl Into<String>, code: impl Into<String>, credits: f64) -> Self {
        Self {
            id: new_record_id(),
            name: name.into(),
            code: code.into(),
            credits,
            instructor: String::new(),
            schedule: String::new(),
            assignments: Vec::new(),
            grades: Vec::new(),
            color: "#3B82F6".to_string(),
            created_at: Utc::now(),
        }
    }
}

impl_entity!(AcademicCourse, AcademicCourse, academic_courses, created_at);
