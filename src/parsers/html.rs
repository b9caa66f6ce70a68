use crate::config::ExtractionRules;
use crate::error::WalkError;
use crate::parsers::{CompiledQuery, extract};
use scraper::Html;

/// What one chapter page yields before any fallback is applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedChapter {
    /// First non-blank title match, trimmed
    pub title: Option<String>,
    /// Body fragments in document order
    pub fragments: Vec<String>,
    /// First non-blank "next" link, as written in the page
    pub next_href: Option<String>,
}

impl ParsedChapter {
    /// Body text: the fragments joined with newlines
    pub fn body(&self) -> String {
        self.fragments.join("\n")
    }
}

/// Extraction rules compiled once for the whole walk
#[derive(Debug, Clone)]
pub struct ChapterParser {
    title: CompiledQuery,
    body: CompiledQuery,
    next: CompiledQuery,
}

impl ChapterParser {
    pub fn new(rules: &ExtractionRules) -> Result<Self, WalkError> {
        Ok(Self {
            title: CompiledQuery::compile(&rules.title)?,
            body: CompiledQuery::compile(&rules.body)?,
            next: CompiledQuery::compile(&rules.next)?,
        })
    }

    /// Parses HTML source and applies the three queries
    pub fn parse(&self, source: &str) -> ParsedChapter {
        let doc = Html::parse_document(source);

        let title = first_non_blank(extract(&doc, &self.title));
        let fragments = extract(&doc, &self.body);
        let next_href = first_non_blank(extract(&doc, &self.next));

        ::log::debug!(
            "Chapter parser found title: {}, {} body fragments, next link: {:?}",
            title.is_some(),
            fragments.len(),
            next_href
        );

        ParsedChapter {
            title,
            fragments,
            next_href,
        }
    }
}

fn first_non_blank(values: Vec<String>) -> Option<String> {
    values
        .into_iter()
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}
