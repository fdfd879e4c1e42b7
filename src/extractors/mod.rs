use crate::model::RecipeRecord;
use scraper::Html;

mod html_class;
mod json_ld;

pub use html_class::HtmlClassExtractor;
pub use json_ld::{JsonLdExtractor, Node};

pub struct ParsingContext {
    pub url: String,
    pub document: Html,
}

impl ParsingContext {
    pub fn new(url: impl Into<String>, html: &str) -> Self {
        Self {
            url: url.into(),
            document: Html::parse_document(html),
        }
    }
}

/// One extraction strategy.
///
/// `None` means "this strategy found no evidence"; it is not an error and
/// the caller moves on to the next strategy.
pub trait Extractor {
    fn name(&self) -> &'static str;
    fn parse(&self, context: &ParsingContext) -> Option<RecipeRecord>;
}

/// Look up an extractor by its configured name.
pub fn extractor_by_name(name: &str) -> Option<Box<dyn Extractor>> {
    match name {
        "json_ld" => Some(Box::new(JsonLdExtractor)),
        "html_class" => Some(Box::new(HtmlClassExtractor)),
        _ => None,
    }
}

/// Collapse runs of whitespace into single spaces and trim the ends.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extractor_by_name() {
        assert_eq!(extractor_by_name("json_ld").unwrap().name(), "json_ld");
        assert_eq!(extractor_by_name("html_class").unwrap().name(), "html_class");
        assert!(extractor_by_name("microdata").is_none());
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  2 cups\n\t flour  "), "2 cups flour");
        assert_eq!(collapse_whitespace(" \n "), "");
    }
}
