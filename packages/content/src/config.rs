//! # Site configuration — `site.toml`
//!
//! Editable site-wide settings, stored next to the entries in the content
//! store (filename: [`SiteConfig::filename`] = `"site.toml"`).
//!
//! ```toml
//! [site]
//! title = "My Portfolio"
//! tagline = "Graphics, tools, and notes"
//! owner = "Jane Doe"
//!
//! [contact]
//! email = "jane@example.com"
//! github = "https://github.com/jane"
//!
//! [scene]
//! default_height = 300
//!
//! [resume]
//! url = "/uploads/3f2a.pdf"
//! path = "3f2a.pdf"
//! ```
//!
//! Every section and key is optional; a missing or empty file is the default
//! configuration.

use serde::{Deserialize, Serialize};

use crate::rich::DEFAULT_SCENE_HEIGHT;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub site: SiteSection,
    #[serde(default)]
    pub contact: ContactSection,
    #[serde(default)]
    pub scene: SceneSection,
    /// Uploaded resume PDF shown on `/resume`; absent until one is uploaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<ResumeAsset>,
}

/// Where the resume PDF is served from and its file name in the upload
/// directory, kept so the file can be removed again.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeAsset {
    pub url: String,
    pub path: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SiteSection {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub owner: String,
}

fn default_title() -> String {
    "Portfolio".to_string()
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: default_title(),
            tagline: String::new(),
            owner: String::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneSection {
    /// Height used by newly inserted 3D scenes.
    #[serde(default = "default_scene_height")]
    pub default_height: u32,
}

fn default_scene_height() -> u32 {
    DEFAULT_SCENE_HEIGHT
}

impl Default for SceneSection {
    fn default() -> Self {
        Self {
            default_height: default_scene_height(),
        }
    }
}

impl SiteConfig {
    pub fn filename() -> &'static str {
        "site.toml"
    }

    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        let config = SiteConfig::from_toml("").unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.site.title, "Portfolio");
        assert_eq!(config.scene.default_height, 300);
    }

    #[test]
    fn partial_sections_fill_defaults() {
        let config = SiteConfig::from_toml("[site]\nowner = \"Jane\"\n[contact]\nemail = \"j@x.io\"\n").unwrap();
        assert_eq!(config.site.owner, "Jane");
        assert_eq!(config.site.title, "Portfolio");
        assert_eq!(config.contact.email.as_deref(), Some("j@x.io"));
        assert!(config.contact.github.is_none());
    }

    #[test]
    fn toml_round_trip() {
        let mut config = SiteConfig::default();
        config.site.tagline = "Shapes".into();
        config.scene.default_height = 420;
        let back = SiteConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn resume_is_absent_by_default_and_not_written() {
        let config = SiteConfig::from_toml("[site]\ntitle = \"T\"\n").unwrap();
        assert!(config.resume.is_none());
        assert!(!config.to_toml().unwrap().contains("[resume]"));
    }

    #[test]
    fn resume_round_trips() {
        let config = SiteConfig {
            resume: Some(ResumeAsset {
                url: "/uploads/cv.pdf".into(),
                path: "cv.pdf".into(),
            }),
            ..SiteConfig::default()
        };
        let text = config.to_toml().unwrap();
        assert!(text.contains("[resume]"));
        assert_eq!(SiteConfig::from_toml(&text).unwrap(), config);
    }
}
