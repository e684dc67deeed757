use askama::filters::{escape, Html};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref MARKDOWN_LINK: Regex = Regex::new(r"\[([^\]]*)\]\((https?://[^)]*)\)").unwrap();
}

fn escape_html(text: &str) -> String {
    match escape(text, Html) {
        Ok(escaped) => escaped.to_string(),
        Err(never) => match never {},
    }
}

/// Turns `[label](https://...)` into a link opening in a new tab. Everything
/// else is escaped, so the result is safe to embed as HTML.
pub fn handle_hyperlink(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in MARKDOWN_LINK.captures_iter(text) {
        let (Some(whole), Some(label), Some(url)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        out.push_str(&escape_html(&text[last..whole.start()]));
        out.push_str(&format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
            escape_html(url.as_str()),
            escape_html(label.as_str())
        ));
        last = whole.end();
    }
    out.push_str(&escape_html(&text[last..]));
    out
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn links_become_anchors() {
        assert_eq!(
            handle_hyperlink("see [the book](https://doc.rust-lang.org/book/) first"),
            "see <a href=\"https://doc.rust-lang.org/book/\" target=\"_blank\" \
             rel=\"noopener noreferrer\">the book</a> first"
        );
    }

    #[rstest]
    #[case("[local](/etc/passwd)")]
    #[case("[ftp](ftp://example.com)")]
    #[case("no links here")]
    fn non_http_links_stay_text(#[case] text: &str) {
        assert_eq!(handle_hyperlink(text), text);
    }

    #[rstest]
    fn ampersands_and_quotes_are_escaped() {
        assert_eq!(handle_hyperlink("Tom & 'Jerry'"), "Tom &#38; &#39;Jerry&#39;");
    }

    #[rstest]
    fn markup_around_links_is_escaped() {
        assert_eq!(
            handle_hyperlink("<b>[x](http://a.b/?q=\"1\")</b>"),
            "&#60;b&#62;<a href=\"http://a.b/?q=&#34;1&#34;\" target=\"_blank\" \
             rel=\"noopener noreferrer\">x</a>&#60;/b&#62;"
        );
    }
}
