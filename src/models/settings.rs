use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

wire_enum! {
    pub enum ThemeType {
        LightMode => "LightMode",
        DarkMode => "DarkMode",
        Pastel => "Pastel",
        Autumn => "Autumn",
        /// Uses the background, text and button colours from [`SettingsInfo`].
        Custom => "Custom",
    }
}

wire_enum! {
    pub enum FontType {
        Arial => "Arial",
        TimesNewRoman => "Times New Roman",
        CourierNew => "Courier New",
    }
}

wire_enum! {
    pub enum TextSizeType {
        Small => "small",
        Medium => "medium",
        Large => "large",
        XLarge => "x-large",
    }
}

wire_enum! {
    pub enum TextBoldnessType {
        Normal => "normal",
        Bold => "bold",
    }
}

wire_enum! {
    pub enum LineSpacingType {
        Single => "1",
        Double => "2",
        Triple => "3",
        Quadruple => "4",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsInfo {
    pub theme: ThemeType,
    pub text_size: TextSizeType,
    pub text_boldness: TextBoldnessType,
    pub font: FontType,
    pub line_spacing: LineSpacingType,
    pub background_color: String,
    pub text_color: String,
    pub button_color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<SettingsInfo>,
}

impl User {
    pub fn named(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("Times New Roman", FontType::TimesNewRoman)]
    #[case("Courier New", FontType::CourierNew)]
    #[case("Arial", FontType::Arial)]
    fn fonts_use_display_names_on_the_wire(#[case] wire: &str, #[case] font: FontType) {
        assert_eq!(wire.parse::<FontType>(), Ok(font));
        assert_eq!(serde_json::to_value(font).unwrap(), json!(wire));
    }

    #[rstest]
    fn text_size_and_line_spacing_keep_their_odd_spellings() {
        assert_eq!(TextSizeType::XLarge.as_str(), "x-large");
        assert_eq!(
            serde_json::from_value::<LineSpacingType>(json!("3")).unwrap(),
            LineSpacingType::Triple
        );
    }

    #[rstest]
    fn command_line_values_are_the_wire_strings() {
        use clap::ValueEnum;

        let names: Vec<_> = LineSpacingType::value_variants()
            .iter()
            .filter_map(ValueEnum::to_possible_value)
            .map(|value| value.get_name().to_owned())
            .collect();
        assert_eq!(names, ["1", "2", "3", "4"]);
        assert_eq!(
            <FontType as ValueEnum>::from_str("Courier New", false),
            Ok(FontType::CourierNew)
        );
    }

    #[rstest]
    fn unknown_theme_is_rejected() {
        let err = "Midnight".parse::<ThemeType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown ThemeType value: Midnight");
    }

    #[rstest]
    fn user_with_settings_deserializes_from_camel_case() {
        let user: User = serde_json::from_value(json!({
            "username": "alice",
            "email": "alice@example.com",
            "creationDateTime": "2024-03-05T10:00:00.000Z",
            "settings": {
                "theme": "Custom",
                "textSize": "large",
                "textBoldness": "bold",
                "font": "Courier New",
                "lineSpacing": "2",
                "backgroundColor": "#101010",
                "textColor": "#fafafa",
                "buttonColor": "#ff8800"
            }
        }))
        .unwrap();

        let settings = user.settings.unwrap();
        assert_eq!(settings.theme, ThemeType::Custom);
        assert_eq!(settings.line_spacing, LineSpacingType::Double);
        assert_eq!(settings.button_color, "#ff8800");
        assert!(user.password.is_none());
    }

    #[rstest]
    fn anonymous_user_serializes_username_only() {
        let value = serde_json::to_value(User::named("guest")).unwrap();
        assert_eq!(value, json!({ "username": "guest" }));
    }
}
