pub mod html;

#[cfg(test)]
mod tests;

use crate::config::Query;
use crate::error::WalkError;
use scraper::{ElementRef, Html, Selector};

/// A `Query` with its selector parsed, ready to run against documents
#[derive(Debug, Clone)]
pub struct CompiledQuery {
    selector: Selector,
    contains: Option<String>,
    attr: Option<String>,
}

impl CompiledQuery {
    /// Parses the selector of `query`
    pub fn compile(query: &Query) -> Result<Self, WalkError> {
        let selector =
            Selector::parse(&query.selector).map_err(|e| WalkError::InvalidSelector {
                selector: query.selector.clone(),
                message: e.to_string(),
            })?;

        Ok(Self {
            selector,
            contains: query.contains.clone(),
            attr: query.attr.clone(),
        })
    }

    fn admits(&self, element: ElementRef<'_>) -> bool {
        match &self.contains {
            Some(needle) => own_text(element).any(|text| text.contains(needle.as_str())),
            None => true,
        }
    }
}

/// Direct text children of an element, without descending into child elements
fn own_text<'a>(element: ElementRef<'a>) -> impl Iterator<Item = &'a str> {
    element
        .children()
        .filter_map(|child| child.value().as_text())
        .map(|text| &**text)
}

/// Runs a query against a parsed document
///
/// Attribute queries yield one value per matching element that carries the
/// attribute. Text queries yield every text node whose parent element matches,
/// in document order, so a selector list such as `p, p > span` interleaves
/// the fragments exactly as they appear in the page.
///
/// A `contains` needle is looked for in every direct text child of an
/// element, not only the first one.
pub fn extract(document: &Html, query: &CompiledQuery) -> Vec<String> {
    match &query.attr {
        Some(attr) => document
            .select(&query.selector)
            .filter(|element| query.admits(*element))
            .filter_map(|element| element.value().attr(attr))
            .map(|value| value.to_string())
            .collect(),
        None => document
            .root_element()
            .descendants()
            .filter_map(|node| {
                let text = node.value().as_text()?;
                let parent = node.parent().and_then(ElementRef::wrap)?;
                if query.selector.matches(&parent) && query.admits(parent) {
                    Some(String::from(&**text))
                } else {
                    None
                }
            })
            .collect(),
    }
}
