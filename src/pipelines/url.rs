use crate::config::ScraperConfig;
use crate::extractors::{extractor_by_name, Extractor, ParsingContext};
use crate::fetchers::RequestFetcher;
use crate::model::{ExtractionOutcome, RecipeRecord};
use log::{debug, warn};

/// Fetch a URL and extract a recipe from it.
///
/// This pipeline:
/// 1. Fetches HTML using RequestFetcher (one attempt, bounded timeout)
/// 2. Tries the configured extractors in order, stopping at the first hit
///
/// Fetch failures become `TransportError`; a page that was read but gave
/// no recipe signal is `NotFound`.
pub fn process(url: &str, config: &ScraperConfig) -> ExtractionOutcome {
    let html = match RequestFetcher::new(config).and_then(|fetcher| fetcher.fetch(url)) {
        Ok(html) => html,
        Err(e) => {
            warn!("Failed to fetch {}: {}", url, e);
            return ExtractionOutcome::TransportError(e.to_string());
        }
    };

    match extract_from_html(url, &html, config) {
        Some(recipe) => ExtractionOutcome::Found(recipe),
        None => ExtractionOutcome::NotFound,
    }
}

/// Run the extractor chain over already-fetched markup.
pub fn extract_from_html(url: &str, html: &str, config: &ScraperConfig) -> Option<RecipeRecord> {
    let context = ParsingContext::new(url, html);

    for extractor in build_extractors(config) {
        if let Some(recipe) = extractor.parse(&context) {
            debug!("Extractor {} matched {}", extractor.name(), url);
            return Some(recipe);
        }
        debug!("Extractor {} found nothing", extractor.name());
    }

    debug!("No extractor could parse the recipe from {}", url);
    None
}

fn build_extractors(config: &ScraperConfig) -> Vec<Box<dyn Extractor>> {
    config
        .extractors
        .order
        .iter()
        .filter_map(|name| {
            let extractor = extractor_by_name(name);
            if extractor.is_none() {
                warn!("Unknown extractor in config: {}", name);
            }
            extractor
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractorsConfig;

    const BOTH_SIGNALS: &str = r#"
        <html>
        <head>
            <script type="application/ld+json">
                {"@type": "Recipe", "name": "From JSON-LD", "recipeIngredient": ["1 egg"]}
            </script>
        </head>
        <body>
            <h1>From HTML</h1>
            <ul class="ingredients"><li>2 eggs</li></ul>
        </body>
        </html>
    "#;

    fn config_with(order: &[&str]) -> ScraperConfig {
        ScraperConfig {
            extractors: ExtractorsConfig {
                order: order.iter().map(|s| s.to_string()).collect(),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_structured_data_wins() {
        let recipe =
            extract_from_html("https://example.com", BOTH_SIGNALS, &ScraperConfig::default())
                .unwrap();
        assert_eq!(recipe.name, "From JSON-LD");
    }

    #[test]
    fn test_configured_order_is_respected() {
        let recipe =
            extract_from_html("https://example.com", BOTH_SIGNALS, &config_with(&["html_class"]))
                .unwrap();
        assert_eq!(recipe.name, "From HTML");
        assert_eq!(recipe.ingredients, vec!["2 eggs"]);
    }

    #[test]
    fn test_unknown_extractors_are_skipped() {
        let config = config_with(&["microdata", "json_ld"]);
        assert_eq!(build_extractors(&config).len(), 1);
        assert!(extract_from_html("https://example.com", BOTH_SIGNALS, &config).is_some());
    }

    #[test]
    fn test_empty_chain_finds_nothing() {
        assert!(extract_from_html("https://example.com", BOTH_SIGNALS, &config_with(&[])).is_none());
    }
}
