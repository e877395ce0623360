//! UI-level records held by the store: themes, module switches and the
//! signed-in user profile.
//!
//! These are not persisted through the record repository; they travel in
//! backups and are otherwise process-local.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Colour palette. Values are CSS hex strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: String,
    pub name: String,
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub surface: String,
    pub text: String,
    pub text_secondary: String,
    pub border: String,
    pub success: String,
    pub warning: String,
    pub error: String,
    pub info: String,
}

impl Theme {
    /// Builds a light theme from three brand colours, with neutral slots
    /// filled from the default palette.
    pub fn custom(
        id: impl Into<String>,
        name: impl Into<String>,
        primary: impl Into<String>,
        secondary: impl Into<String>,
        accent: impl Into<String>,
    ) -> Self {
        let primary = primary.into();
        Self {
            id: id.into(),
            name: name.into(),
            info: primary.clone(),
            primary,
            secondary: secondary.into(),
            accent: accent.into(),
            background: "#F8FAFC".to_string(),
            surface: "#FFFFFF".to_string(),
            text: "#1F2937".to_string(),
            text_secondary: "#6B7280".to_string(),
            border: "#E5E7EB".to_string(),
            success: "#10B981".to_string(),
            warning: "#F59E0B".to_string(),
            error: "#EF4444".to_string(),
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn palette(
    id: &str,
    name: &str,
    primary: &str,
    secondary: &str,
    accent: &str,
    background: &str,
    surface: &str,
    text: &str,
    text_secondary: &str,
    border: &str,
    info: &str,
) -> Theme {
    Theme {
        id: id.to_string(),
        name: name.to_string(),
        primary: primary.to_string(),
        secondary: secondary.to_string(),
        accent: accent.to_string(),
        background: background.to_string(),
        surface: surface.to_string(),
        text: text.to_string(),
        text_secondary: text_secondary.to_string(),
        border: border.to_string(),
        success: "#10B981".to_string(),
        warning: "#F59E0B".to_string(),
        error: "#EF4444".to_string(),
        info: info.to_string(),
    }
}

/// Built-in themes; the first entry is the initial theme.
pub fn default_themes() -> Vec<Theme> {
    vec![
        palette(
            "modern-blue", "Modern Blue", "#3B82F6", "#1E40AF", "#F59E0B", "#F8FAFC",
            "#FFFFFF", "#1F2937", "#6B7280", "#E5E7EB", "#3B82F6",
        ),
        palette(
            "elegant-purple", "Elegant Purple", "#8B5CF6", "#7C3AED", "#F59E0B", "#FAFAFA",
            "#FFFFFF", "#1F2937", "#6B7280", "#E5E7EB", "#8B5CF6",
        ),
        palette(
            "nature-green", "Nature Green", "#10B981", "#059669", "#F59E0B", "#F0FDF4",
            "#FFFFFF", "#1F2937", "#6B7280", "#E5E7EB", "#06B6D4",
        ),
        palette(
            "sunset-orange", "Sunset Orange", "#F97316", "#EA580C", "#3B82F6", "#FFF7ED",
            "#FFFFFF", "#1F2937", "#6B7280", "#E5E7EB", "#06B6D4",
        ),
        palette(
            "dark-mode", "Dark Mode", "#3B82F6", "#1E40AF", "#F59E0B", "#111827", "#1F2937",
            "#F9FAFB", "#D1D5DB", "#374151", "#3B82F6",
        ),
    ]
}

/// A top-level section of the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub enabled: bool,
    pub order: u32,
    #[serde(default)]
    pub settings: BTreeMap<String, serde_json::Value>,
}

/// Built-in module list in sidebar order.
pub fn default_modules() -> Vec<Module> {
    [
        ("dashboard", "Dashboard", "LayoutDashboard", "#3B82F6"),
        ("notes", "Notes", "FileText", "#10B981"),
        ("tasks", "Tasks", "CheckSquare", "#F59E0B"),
        ("projects", "Projects", "Briefcase", "#8B5CF6"),
        ("calendar", "Calendar", "Calendar", "#EF4444"),
        ("pomodoro", "Pomodoro", "Clock", "#F97316"),
        ("finance", "Finance", "DollarSign", "#10B981"),
        ("academic", "Academic", "GraduationCap", "#3B82F6"),
        ("goals", "Goals", "Target", "#8B5CF6"),
        ("books", "Books", "Book", "#F59E0B"),
        ("journal", "Journal", "BookOpen", "#EF4444"),
        ("prayers", "Prayers", "Heart", "#8B5CF6"),
        ("bible", "Bible", "Book", "#10B981"),
        ("planning", "Planning", "Map", "#06B6D4"),
        ("settings", "Settings", "Settings", "#6B7280"),
    ]
    .into_iter()
    .enumerate()
    .map(|(order, (id, name, icon, color))| Module {
        id: id.to_string(),
        name: name.to_string(),
        icon: icon.to_string(),
        color: color.to_string(),
        enabled: true,
        order: order as u32,
        settings: BTreeMap::new(),
    })
    .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub theme: String,
    pub language: String,
    pub notifications: bool,
    pub dark_mode: bool,
    pub compact_view: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            theme: "modern-blue".to_string(),
            language: "en".to_string(),
            notifications: true,
            dark_mode: false,
            compact_view: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub preferences: UserPreferences,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            avatar: None,
            preferences: UserPreferences::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{default_modules, default_themes};

    #[test]
    fn defaults_have_expected_shape() {
        let themes = default_themes();
        assert_eq!(themes.len(), 5);
        assert_eq!(themes[0].id, "modern-blue");

        let modules = default_modules();
        assert_eq!(modules.len(), 15);
        assert!(modules.iter().all(|module| module.enabled));
        assert_eq!(modules.last().map(|m| m.order), Some(14));
    }
}
