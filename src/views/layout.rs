use askama::Template;

use crate::models::{SettingsInfo, ThemeType};

/// Full HTML document: the side menu plus one page body, styled by the
/// viewer's settings.
#[derive(Template)]
#[template(path = "page.html")]
pub struct Page {
    pub title: String,
    pub attributes: Vec<(&'static str, String)>,
    pub nav: String,
    pub body: String,
}

impl Page {
    pub fn new(
        title: impl Into<String>,
        settings: Option<&SettingsInfo>,
        nav: String,
        body: String,
    ) -> Self {
        Self {
            title: title.into(),
            attributes: settings.map(settings_attributes).unwrap_or_default(),
            nav,
            body,
        }
    }
}

pub fn settings_attributes(settings: &SettingsInfo) -> Vec<(&'static str, String)> {
    let mut attributes = vec![
        ("data-theme", settings.theme.to_string()),
        ("data-text-size", settings.text_size.to_string()),
        ("data-text-boldness", settings.text_boldness.to_string()),
        ("data-font", settings.font.to_string()),
        ("data-line-spacing", settings.line_spacing.to_string()),
    ];
    if settings.theme == ThemeType::Custom {
        attributes.push((
            "style",
            format!(
                "--background-color: {}; --text-color: {}; --button-color: {};",
                settings.background_color, settings.text_color, settings.button_color
            ),
        ));
    }
    attributes
}
