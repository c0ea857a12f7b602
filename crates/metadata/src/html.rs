//! Small DOM helpers shared by the extraction rules.

use scraper::{ElementRef, Html, Selector};

/// First match of `selector` in document order.
pub(crate) fn first<'a>(document: &'a Html, selector: &Selector) -> Option<ElementRef<'a>> {
    document.select(selector).next()
}

/// All descendant text with runs of whitespace collapsed to one space.
pub(crate) fn text_of(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Trimmed text of the element's own text-node children, empties dropped.
pub(crate) fn own_text_nodes(element: ElementRef<'_>) -> Vec<String> {
    element
        .children()
        .filter_map(|node| node.value().as_text())
        .filter_map(|text| trim_to_none(text))
        .collect()
}

pub(crate) fn next_element_sibling(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.next_siblings().find_map(ElementRef::wrap)
}

pub(crate) fn trim_to_none(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Drop surrounding whitespace and double quotes (`"Friends"` → `Friends`).
pub(crate) fn strip_quotes(s: &str) -> String {
    s.trim().trim_matches('"').trim().to_string()
}

/// Section headings are matched with or without their trailing colon.
pub(crate) fn heading_is(heading: ElementRef<'_>, label: &str) -> bool {
    text_of(heading).trim_end_matches(':').trim() == label.trim_end_matches(':')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_quotes_handles_series_titles() {
        assert_eq!(strip_quotes("  \"The Office\" "), "The Office");
        assert_eq!(strip_quotes("Drag Me to Hell"), "Drag Me to Hell");
    }

    #[test]
    fn own_text_nodes_skip_child_elements() {
        let doc = Html::parse_fragment("<div> <a>link</a> (2009) <small>x</small> </div>");
        let sel = Selector::parse("div").unwrap();
        let div = doc.select(&sel).next().unwrap();
        assert_eq!(own_text_nodes(div), vec!["(2009)".to_string()]);
    }

    #[test]
    fn text_of_collapses_whitespace() {
        let doc = Html::parse_fragment("<p>  A \n  quiet\tplace </p>");
        let sel = Selector::parse("p").unwrap();
        assert_eq!(text_of(doc.select(&sel).next().unwrap()), "A quiet place");
    }
}
