pub mod config;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod model;
pub mod pipelines;
pub mod transform;

pub use config::ScraperConfig;
pub use error::ScrapeError;
pub use model::{ExtractionOutcome, RecipeRecord, SavedRecipe, UNKNOWN_RECIPE};
pub use transform::{scale_line, to_metric, transform};

/// Fetch a recipe page and extract a normalized record from it, using the
/// default configuration (15 second timeout, JSON-LD then HTML classes).
///
/// # Example
/// ```no_run
/// use recipe_scrape::{extract, ExtractionOutcome};
///
/// match extract("https://example.com/recipe") {
///     ExtractionOutcome::Found(recipe) => println!("{}", recipe.name),
///     ExtractionOutcome::NotFound => println!("no recipe on that page"),
///     ExtractionOutcome::TransportError(e) => println!("could not load page: {e}"),
/// }
/// ```
pub fn extract(url: &str) -> ExtractionOutcome {
    extract_with_config(url, &ScraperConfig::default())
}

/// Same as [`extract`] with an explicit configuration.
pub fn extract_with_config(url: &str, config: &ScraperConfig) -> ExtractionOutcome {
    pipelines::url::process(url, config)
}

/// Extract a recipe from markup that has already been fetched.
///
/// `None` means neither structured data nor recognizable recipe markup
/// was found.
pub fn extract_from_html(html: &str) -> Option<RecipeRecord> {
    pipelines::url::extract_from_html("", html, &ScraperConfig::default())
}
