use scraper::{ElementRef, Html, Selector};

use crate::validated::{from_option, invalid, traverse, valid, Validated};

// ============================================================================
// SELECTORS
// ============================================================================

/// Parses a CSS selector, reporting the selector text on failure
pub fn parse_selector(selector: &str) -> Validated<Selector> {
    match Selector::parse(selector) {
        Ok(parsed) => valid(parsed),
        Err(_) => invalid(format!("Invalid selector: {}", selector)),
    }
}

/// A path starting with `:scope` only walks direct children, one segment per `>`
fn scoped_segments(selector: &str) -> Option<Vec<&str>> {
    let rest = selector.trim().strip_prefix(":scope")?;
    Some(
        rest.split('>')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect(),
    )
}

fn select_scoped<'a>(element: ElementRef<'a>, segments: &[&str]) -> Validated<Vec<ElementRef<'a>>> {
    traverse(segments.iter().copied(), parse_selector).map(|selectors| {
        let mut current = vec![element];
        for selector in &selectors {
            current = current
                .into_iter()
                .flat_map(|parent| parent.children().filter_map(ElementRef::wrap))
                .filter(|child| selector.matches(child))
                .collect();
        }
        current
    })
}

// ============================================================================
// ELEMENT LOOKUP
// ============================================================================

/// Every descendant of `element` matching `selector`, in document order
pub fn select_all<'a>(element: ElementRef<'a>, selector: &str) -> Validated<Vec<ElementRef<'a>>> {
    match scoped_segments(selector) {
        Some(segments) => select_scoped(element, &segments),
        None => parse_selector(selector).map(|parsed| element.select(&parsed).collect()),
    }
}

/// Same as [`select_all`] from the document root
pub fn select_all_in<'a>(document: &'a Html, selector: &str) -> Validated<Vec<ElementRef<'a>>> {
    parse_selector(selector).map(|parsed| document.select(&parsed).collect())
}

/// First match, absence being a value rather than an error
pub fn select_nullable<'a>(element: ElementRef<'a>, selector: &str) -> Validated<Option<ElementRef<'a>>> {
    select_all(element, selector).map(|found| found.into_iter().next())
}

/// First match, or `Element not found: <selector>`
pub fn select_first<'a>(element: ElementRef<'a>, selector: &str) -> Validated<ElementRef<'a>> {
    select_nullable(element, selector)
        .and_then(|found| from_option(found, || format!("Element not found: {}", selector)))
}

/// Exactly one match
pub fn select_ensure_one<'a>(element: ElementRef<'a>, selector: &str) -> Validated<ElementRef<'a>> {
    select_all(element, selector).and_then(|mut found| match found.len() {
        0 => invalid(format!("Element not found: {}", selector)),
        1 => valid(found.remove(0)),
        n => invalid(format!("Expected exactly one element {}, got {}", selector, n)),
    })
}

/// Trimmed text of the single element matching `selector`
pub fn select_ensure_one_text(element: ElementRef<'_>, selector: &str) -> Validated<String> {
    select_ensure_one(element, selector).map(text_content)
}

pub fn element_by_id<'a>(document: &'a Html, id: &str) -> Validated<ElementRef<'a>> {
    parse_selector(&format!("#{}", id)).and_then(|selector| {
        from_option(document.select(&selector).next(), || {
            format!("Element not found: #{}", id)
        })
    })
}

// ============================================================================
// TEXT AND ATTRIBUTES
// ============================================================================

/// All descendant text, trimmed
pub fn text_content(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn node_text(node: ego_tree::NodeRef<'_, scraper::Node>) -> String {
    match node.value() {
        scraper::Node::Text(text) => text.trim().to_string(),
        _ => ElementRef::wrap(node).map(text_content).unwrap_or_default(),
    }
}

/// Trimmed text of the first child node (text or element)
pub fn first_child_text(element: ElementRef<'_>) -> Option<String> {
    element.first_child().map(node_text)
}

/// Trimmed text of the last child node (text or element)
pub fn last_child_text(element: ElementRef<'_>) -> Option<String> {
    element.last_child().map(node_text)
}

/// `data-<key>` attribute
pub fn dataset_get(element: ElementRef<'_>, key: &str) -> Validated<String> {
    let attr = format!("data-{}", key);
    from_option(element.value().attr(&attr).map(str::to_string), || {
        format!("data-{} not found", key)
    })
}

/// Named attribute; `context` describes the element in the error
pub fn attr_get(element: ElementRef<'_>, attr: &str, context: &str) -> Validated<String> {
    from_option(element.value().attr(attr).map(str::to_string), || {
        format!("No attribute \"{}\" for {}", attr, context)
    })
}
