use askama::Template;

/// Hover-to-speak wrapper: reads `text` aloud when the pointer rests on the
/// wrapped content. The speaker icon sits on the right unless moved.
#[derive(Template)]
#[template(path = "tts_wrapper.html")]
pub struct TtsWrapper {
    pub text: String,
    pub is_on_right: bool,
    pub content: String,
}

impl TtsWrapper {
    pub fn new(text: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_on_right: true,
            content: content.into(),
        }
    }

    pub fn on_left(mut self) -> Self {
        self.is_on_right = false;
        self
    }

    fn side_class(&self) -> &'static str {
        if self.is_on_right {
            "tts-right"
        } else {
            "tts-left"
        }
    }
}

#[derive(Template)]
#[template(path = "button.html")]
pub(crate) struct Button<'a> {
    pub class: &'a str,
    pub label: &'a str,
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn wraps_content_and_escapes_spoken_text() {
        let html = TtsWrapper::new("Say \"hi\" & <wave>", "<b>hi</b>")
            .render()
            .unwrap();
        assert!(html.contains("data-tts-text=\"Say &#34;hi&#34; &#38; &#60;wave&#62;\""));
        assert!(html.contains("><b>hi</b></div>"));
        assert!(html.contains("tts-right"));
    }

    #[rstest]
    fn can_sit_on_the_left() {
        let html = TtsWrapper::new("Tags", "").on_left().render().unwrap();
        assert!(html.contains("tts-left"));
    }
}
