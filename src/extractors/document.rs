// src/extractors/document.rs
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

// --- CSS Selectors (Lazy Static) ---
static FIRST_CHILD_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(":nth-child(1)").expect("Failed to compile FIRST_CHILD_SELECTOR")
});

static SECOND_CHILD_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(":nth-child(2)").expect("Failed to compile SECOND_CHILD_SELECTOR")
});

/// One fetched etfdb.com page, parsed once and queried by every section extractor.
pub struct ParsedDocument {
    html: Html,
    base_url: String,
}

impl ParsedDocument {
    /// Parses `raw_html`; `base_url` is prefixed to site-relative links.
    pub fn parse(raw_html: &str, base_url: &str) -> Self {
        Self {
            html: Html::parse_document(raw_html),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn html(&self) -> &Html {
        &self.html
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// First element matching `selector`, in document order.
    pub fn find(&self, selector: &Selector) -> Option<ElementRef<'_>> {
        self.html.select(selector).next()
    }

    /// Prefixes a site-relative `href` with the base URL.
    pub fn absolute_url(&self, href: &str) -> String {
        format!("{}{}", self.base_url, href)
    }
}

impl std::fmt::Debug for ParsedDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParsedDocument")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// All text below `element`, untouched (line breaks included).
pub(crate) fn raw_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

pub(crate) fn trimmed_text(element: ElementRef<'_>) -> String {
    raw_text(element).trim().to_string()
}

/// First descendant of `element` (document order) that is the first child of its parent.
pub(crate) fn first_child_match(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.select(&FIRST_CHILD_SELECTOR).next()
}

/// First descendant of `element` (document order) that is the second child of its parent.
pub(crate) fn second_child_match(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.select(&SECOND_CHILD_SELECTOR).next()
}

/// Direct element children, skipping text and comment nodes.
pub(crate) fn child_elements(element: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    element.children().filter_map(ElementRef::wrap)
}

/// Matches the raw `class` attribute against `pattern`, for class lists CSS can't pin down.
pub(crate) fn class_matches(element: ElementRef<'_>, pattern: &Regex) -> bool {
    element
        .value()
        .attr("class")
        .map_or(false, |class| pattern.is_match(class))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select_one<'a>(doc: &'a ParsedDocument, css: &str) -> ElementRef<'a> {
        doc.find(&Selector::parse(css).unwrap()).unwrap()
    }

    #[test]
    fn test_nth_child_follows_document_order() {
        // The row's first child is the wrapping div; its own second child comes
        // before the row's second child.
        let doc = ParsedDocument::parse(
            r#"<div id="row"><div><b>label</b><i>inner</i></div><span>value</span></div>"#,
            "https://etfdb.com/",
        );
        let row = select_one(&doc, "#row");

        assert_eq!(first_child_match(row).map(trimmed_text).as_deref(), Some("labelinner"));
        assert_eq!(second_child_match(row).map(trimmed_text).as_deref(), Some("inner"));
    }

    #[test]
    fn test_nth_child_ignores_the_element_itself() {
        let doc = ParsedDocument::parse(r#"<ul><li id="only">text</li></ul>"#, "https://etfdb.com");
        let li = select_one(&doc, "#only");
        assert!(first_child_match(li).is_none());
    }

    #[test]
    fn test_absolute_url_and_trailing_slash() {
        let doc = ParsedDocument::parse("<p></p>", "https://etfdb.com/");
        assert_eq!(doc.base_url(), "https://etfdb.com");
        assert_eq!(doc.absolute_url("/etf/SPY/"), "https://etfdb.com/etf/SPY/");
    }

    #[test]
    fn test_class_matches_whole_attribute() {
        let doc = ParsedDocument::parse(
            r#"<div id="a" class="row relative-metric x"></div><div id="b" class="row"></div>"#,
            "https://etfdb.com",
        );
        let pattern = Regex::new("row relative-metric").unwrap();
        assert!(class_matches(select_one(&doc, "#a"), &pattern));
        assert!(!class_matches(select_one(&doc, "#b"), &pattern));
    }
}
