use askama::Template;

use super::{TtsWrapper, ViewError};

#[derive(Template)]
#[template(path = "nav_option.html")]
pub struct NavEntry {
    pub label: &'static str,
    pub to: &'static str,
    pub id: &'static str,
    pub selected: bool,
}

impl NavEntry {
    fn class(&self) -> &'static str {
        if self.selected {
            "menu_button menu_selected"
        } else {
            "menu_button "
        }
    }
}

#[derive(Template)]
#[template(path = "side_bar_nav.html")]
struct SideBarNavTemplate {
    entries: Vec<String>,
}

pub struct SideBarNav {
    pub entries: Vec<NavEntry>,
}

impl SideBarNav {
    pub fn new(current_path: &str) -> Self {
        let entry = |label, to, id| NavEntry {
            label,
            to,
            id,
            selected: is_active(current_path, to),
        };
        Self {
            entries: vec![
                entry("Questions", "/home", "menu_questions"),
                entry("Tags", "/tags", "menu_tag"),
            ],
        }
    }

    pub fn render(&self) -> Result<String, ViewError> {
        let entries = self
            .entries
            .iter()
            .map(|e| Ok(TtsWrapper::new(e.label, e.render()?).on_left().render()?))
            .collect::<Result<Vec<_>, ViewError>>()?;
        Ok(SideBarNavTemplate { entries }.render()?)
    }
}

// A link stays active on its own sub-pages.
fn is_active(current_path: &str, to: &str) -> bool {
    let current = current_path.trim_end_matches('/');
    current == to
        || current
            .strip_prefix(to)
            .is_some_and(|rest| rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("/home", true, false)]
    #[case("/home/", true, false)]
    #[case("/tags", false, true)]
    #[case("/tags/rust", false, true)]
    #[case("/tagsearch", false, false)]
    #[case("/question/q1", false, false)]
    fn highlights_the_current_section(
        #[case] path: &str,
        #[case] questions: bool,
        #[case] tags: bool,
    ) {
        let nav = SideBarNav::new(path);
        assert_eq!(nav.entries[0].selected, questions);
        assert_eq!(nav.entries[1].selected, tags);
    }

    #[rstest]
    fn entries_are_spoken_from_the_left() {
        let html = SideBarNav::new("/tags").render().unwrap();
        assert_eq!(html.matches("tts-left").count(), 2);
        assert!(html.contains("id=\"menu_tag\" class=\"menu_button menu_selected\""));
        assert!(html.contains("href=\"/home\""));
    }
}
