//! Page parser for book and author-profile documents
//!
//! Turns fetched HTML into the raw field strings the resolution engine
//! consumes: the author-profile link on a book page, and the biography blob
//! plus "Born" location on an author page. A missing field is a normal
//! `None`, never an error.

use scraper::{ElementRef, Html, Node, Selector};

/// Raw fields extracted from an author-profile page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthorPage {
    /// The biography text blob, whitespace-joined
    pub bio_text: Option<String>,

    /// The text following the "Born" label, e.g. "in Paris, France"
    pub born_location: Option<String>,
}

/// Extracts the author-profile link from a book page
///
/// Tries the legacy layout's `a.authorName` first, then the React layout's
/// featured-person contributor link.
pub fn extract_author_link(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    for selector in [
        "a.authorName[href]",
        ".FeaturedPerson__infoPrimary a.ContributorLink[href]",
    ] {
        if let Ok(selector) = Selector::parse(selector) {
            if let Some(href) = document
                .select(&selector)
                .next()
                .and_then(|element| element.value().attr("href"))
            {
                let href = href.trim();
                if !href.is_empty() {
                    return Some(href.to_string());
                }
            }
        }
    }

    None
}

/// Extracts the biography text and born location from an author page
pub fn parse_author_page(html: &str) -> AuthorPage {
    let document = Html::parse_document(html);

    AuthorPage {
        bio_text: extract_bio(&document),
        born_location: extract_born_location(&document),
    }
}

/// Finds the biography container and collects its text
fn extract_bio(document: &Html) -> Option<String> {
    for selector in ["div.aboutAuthorInfo", r#"[id^="freeTextContainerauthor"]"#] {
        if let Ok(selector) = Selector::parse(selector) {
            if let Some(element) = document.select(&selector).next() {
                let text = collect_text(element);
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }
    }
    None
}

/// Walks the siblings after the "Born" label for the location text
///
/// The location is either a bare text node right after the label or the text
/// of the next element; "clear" elements (layout helpers) are skipped.
fn extract_born_location(document: &Html) -> Option<String> {
    let selector = Selector::parse("div.dataTitle").ok()?;

    let born_label = document
        .select(&selector)
        .find(|element| collect_text(*element) == "Born")?;

    for sibling in born_label.next_siblings() {
        match sibling.value() {
            Node::Text(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    return Some(text.to_string());
                }
            }
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(sibling) {
                    let text = collect_text(element);
                    if !text.is_empty() && !text.eq_ignore_ascii_case("clear") {
                        return Some(text);
                    }
                }
            }
            _ => {}
        }
    }

    None
}

/// Joins an element's text nodes with single spaces, trimmed
fn collect_text(element: ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_author_link_legacy_layout() {
        let html = r#"<html><body>
            <a class="authorName" href="https://www.goodreads.com/author/show/1.Jane_Roe">Jane Roe</a>
        </body></html>"#;
        assert_eq!(
            extract_author_link(html),
            Some("https://www.goodreads.com/author/show/1.Jane_Roe".to_string())
        );
    }

    #[test]
    fn test_extract_author_link_react_layout() {
        let html = r#"<html><body>
            <div class="FeaturedPerson__infoPrimary">
                <a class="ContributorLink" href="https://www.goodreads.com/author/show/2.John_Doe">John Doe</a>
            </div>
        </body></html>"#;
        assert_eq!(
            extract_author_link(html),
            Some("https://www.goodreads.com/author/show/2.John_Doe".to_string())
        );
    }

    #[test]
    fn test_extract_author_link_missing() {
        let html = "<html><body><p>No author here</p></body></html>";
        assert_eq!(extract_author_link(html), None);
    }

    #[test]
    fn test_bio_from_about_author_info() {
        let html = r#"<html><body>
            <div class="aboutAuthorInfo"><span>She writes</span> <span>historical fiction.</span></div>
        </body></html>"#;
        let page = parse_author_page(html);
        assert_eq!(page.bio_text, Some("She writes historical fiction.".to_string()));
    }

    #[test]
    fn test_bio_from_free_text_container() {
        let html = r#"<html><body>
            <span id="freeTextContainerauthor12345">He lives in Kyoto.</span>
        </body></html>"#;
        let page = parse_author_page(html);
        assert_eq!(page.bio_text, Some("He lives in Kyoto.".to_string()));
    }

    #[test]
    fn test_bio_missing() {
        let html = "<html><body><div>nothing useful</div></body></html>";
        assert_eq!(parse_author_page(html).bio_text, None);
    }

    #[test]
    fn test_born_location_from_text_sibling() {
        let html = r#"<html><body>
            <div class="dataTitle">Born</div>
            in Paris, France
            <br/>
        </body></html>"#;
        let page = parse_author_page(html);
        assert_eq!(page.born_location, Some("in Paris, France".to_string()));
    }

    #[test]
    fn test_born_location_from_element_sibling() {
        let html = r#"<html><body>
            <div class="dataTitle">Born</div>
            <div class="dataItem">Barcelona, Spain</div>
        </body></html>"#;
        let page = parse_author_page(html);
        assert_eq!(page.born_location, Some("Barcelona, Spain".to_string()));
    }

    #[test]
    fn test_born_location_skips_clear_element() {
        let html = r#"<html><body>
            <div class="dataTitle">Born</div>
            <a class="actionLink">clear</a>
            <div>London, United Kingdom</div>
        </body></html>"#;
        let page = parse_author_page(html);
        assert_eq!(page.born_location, Some("London, United Kingdom".to_string()));
    }

    #[test]
    fn test_born_label_must_match_exactly() {
        // A different dataTitle must not be mistaken for the Born label
        let html = r#"<html><body>
            <div class="dataTitle">Died</div>
            Vienna, Austria
        </body></html>"#;
        assert_eq!(parse_author_page(html).born_location, None);
    }

    #[test]
    fn test_born_location_missing() {
        let html = "<html><body><div class='rightContainer'></div></body></html>";
        assert_eq!(parse_author_page(html).born_location, None);
    }
}
