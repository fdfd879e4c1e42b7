use super::{Extractor, ParsingContext};
use crate::model::{RecipeRecord, UNKNOWN_RECIPE};
use html_escape::decode_html_entities;
use log::debug;
use scraper::Selector;
use serde_json::Value;
use std::sync::LazyLock;

static SCRIPT_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("script[type='application/ld+json']").expect("Invalid selector")
});

const RECIPE_TYPE: &str = "Recipe";

pub struct JsonLdExtractor;

/// Loosely-typed view over one JSON-LD entity.
///
/// Every accessor treats its field as optional and documents the value used
/// when the field is missing or has an unexpected shape.
#[derive(Debug, Clone, Copy)]
pub struct Node<'a>(&'a Value);

impl<'a> Node<'a> {
    pub fn new(value: &'a Value) -> Self {
        Node(value)
    }

    /// `@type` as a list of type names. Empty when absent; a bare string is
    /// a one-element list and non-string entries are ignored.
    pub fn types(&self) -> Vec<&'a str> {
        match self.0.get("@type") {
            Some(Value::String(t)) => vec![t.as_str()],
            Some(Value::Array(types)) => types.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Exact, case-sensitive token match against `@type`.
    pub fn is_type(&self, type_name: &str) -> bool {
        self.types().iter().any(|t| *t == type_name)
    }

    /// `name` as written, or `None` if missing, blank or not a string.
    pub fn name(&self) -> Option<String> {
        self.0
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.trim().is_empty())
            .map(decode_html_symbols)
    }

    /// `image` normalized to a single URL, or `None`.
    pub fn image(&self) -> Option<String> {
        self.0.get("image").and_then(normalize_image)
    }

    /// `recipeIngredient` (or the legacy `ingredients` key) as lines, kept
    /// as written apart from entity decoding. Non-string entries are skipped.
    /// Empty when absent.
    pub fn ingredients(&self) -> Vec<String> {
        let field = self
            .0
            .get("recipeIngredient")
            .or_else(|| self.0.get("ingredients"));

        match field {
            Some(Value::String(line)) => vec![decode_html_symbols(line)],
            Some(Value::Array(lines)) => lines
                .iter()
                .filter_map(Value::as_str)
                .map(decode_html_symbols)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// `recipeInstructions` flattened into steps in document order. Empty
    /// when absent.
    pub fn instructions(&self) -> Vec<String> {
        let mut steps = Vec::new();
        if let Some(field) = self.0.get("recipeInstructions") {
            collect_steps(field, &mut steps);
        }
        steps
    }
}

impl From<Node<'_>> for RecipeRecord {
    fn from(node: Node<'_>) -> Self {
        RecipeRecord {
            name: node.name().unwrap_or_else(|| UNKNOWN_RECIPE.to_string()),
            image: node.image(),
            ingredients: node.ingredients(),
            instructions: node.instructions(),
        }
    }
}

fn decode_html_symbols(text: &str) -> String {
    // some sites encode entities twice
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

fn normalize_image(value: &Value) -> Option<String> {
    match value {
        Value::String(url) => {
            let url = url.trim();
            (!url.is_empty()).then(|| decode_html_symbols(url))
        }
        Value::Array(images) => images.first().and_then(normalize_image),
        Value::Object(_) => value.get("url").and_then(normalize_image),
        _ => None,
    }
}

/// A string is a step, an object contributes its `text` (or the items of a
/// `HowToSection`), and a nested list contributes each of its elements.
fn collect_steps(value: &Value, steps: &mut Vec<String>) {
    match value {
        Value::String(text) => {
            let text = decode_html_symbols(text.trim());
            if !text.is_empty() {
                steps.push(text);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_steps(item, steps);
            }
        }
        Value::Object(_) => match (value.get("text"), value.get("itemListElement")) {
            (Some(text), _) if text.is_string() => collect_steps(text, steps),
            (_, Some(items)) => collect_steps(items, steps),
            _ => {}
        },
        _ => {}
    }
}

/// Normalize a parsed block into a flat sequence of candidate nodes:
/// unwrap `@graph`, then wrap anything that isn't already a list.
fn candidate_nodes(value: Value) -> Vec<Value> {
    let value = match value {
        Value::Object(mut obj) if obj.contains_key("@graph") => {
            obj.remove("@graph").unwrap_or(Value::Null)
        }
        other => other,
    };

    match value {
        Value::Array(items) => items,
        other => vec![other],
    }
}

fn sanitize_json(json_str: &str) -> &str {
    let mut cleaned = json_str.trim();

    for prefix in ["<!--", "//<![CDATA[", "<![CDATA["] {
        if let Some(rest) = cleaned.strip_prefix(prefix) {
            cleaned = rest.trim_start();
        }
    }
    for suffix in ["-->", "//]]>", "]]>"] {
        if let Some(rest) = cleaned.strip_suffix(suffix) {
            cleaned = rest.trim_end();
        }
    }

    cleaned
}

impl JsonLdExtractor {
    /// Return the first `Recipe` node on the page, in script order and then
    /// in-script order. Blocks that fail to parse are skipped.
    pub fn find_recipe(&self, context: &ParsingContext) -> Option<Value> {
        for (index, script) in context.document.select(&SCRIPT_SELECTOR).enumerate() {
            let raw = script.text().collect::<String>();

            let json_ld = match serde_json::from_str::<Value>(sanitize_json(&raw)) {
                Ok(value) => value,
                Err(e) => {
                    debug!("Skipping JSON-LD block {}: {}", index, e);
                    continue;
                }
            };

            if let Some(recipe) = candidate_nodes(json_ld)
                .into_iter()
                .find(|node| Node::new(node).is_type(RECIPE_TYPE))
            {
                debug!("Found Recipe node in JSON-LD block {} of {}", index, context.url);
                return Some(recipe);
            }
        }

        None
    }
}

impl Extractor for JsonLdExtractor {
    fn name(&self) -> &'static str {
        "json_ld"
    }

    fn parse(&self, context: &ParsingContext) -> Option<RecipeRecord> {
        debug!("Attempting to extract recipe using JSON-LD extractor");

        let recipe = self.find_recipe(context)?;
        let record = RecipeRecord::from(Node::new(&recipe));

        debug!("Recipe name: {}", record.name);
        debug!("Ingredients count: {}", record.ingredients.len());
        debug!("Instructions count: {}", record.instructions.len());

        Some(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page(blocks: &[&str]) -> ParsingContext {
        let scripts: String = blocks
            .iter()
            .map(|b| format!(r#"<script type="application/ld+json">{b}</script>"#))
            .collect();
        ParsingContext::new(
            "https://example.com/recipe",
            &format!("<html><head>{scripts}</head><body></body></html>"),
        )
    }

    #[test]
    fn test_candidate_nodes_shapes() {
        assert_eq!(candidate_nodes(json!({"@type": "Recipe"})).len(), 1);
        assert_eq!(candidate_nodes(json!([{"a": 1}, {"b": 2}])).len(), 2);
        assert_eq!(
            candidate_nodes(json!({"@context": "x", "@graph": [{"a": 1}, {"b": 2}, {"c": 3}]}))
                .len(),
            3
        );
        // a graph holding a single object is wrapped too
        assert_eq!(candidate_nodes(json!({"@graph": {"a": 1}})).len(), 1);
    }

    #[test]
    fn test_type_match_is_exact_token() {
        let recipe = json!({"@type": ["Recipe", "NewsArticle"]});
        let lowercase = json!({"@type": "recipe"});
        let substring = json!({"@type": "RecipeCollection"});

        assert!(Node::new(&recipe).is_type("Recipe"));
        assert!(!Node::new(&lowercase).is_type("Recipe"));
        assert!(!Node::new(&substring).is_type("Recipe"));
        assert!(!Node::new(&json!({"name": "x"})).is_type("Recipe"));
    }

    #[test]
    fn test_image_normalization() {
        let cases = [
            (json!({"image": "https://a/1.jpg"}), Some("https://a/1.jpg")),
            (json!({"image": ["https://a/1.jpg", "https://a/2.jpg"]}), Some("https://a/1.jpg")),
            (json!({"image": {"@type": "ImageObject", "url": "https://a/3.jpg"}}), Some("https://a/3.jpg")),
            (json!({"image": [{"url": "https://a/4.jpg"}]}), Some("https://a/4.jpg")),
            (json!({"image": []}), None),
            (json!({"image": ""}), None),
            (json!({}), None),
        ];

        for (value, expected) in cases {
            assert_eq!(Node::new(&value).image().as_deref(), expected, "{value}");
        }
    }

    #[test]
    fn test_instruction_flattening() {
        let value = json!({
            "recipeInstructions": [
                "Preheat the oven.",
                {"@type": "HowToStep", "text": "Mix the batter."},
                [{"@type": "HowToStep", "text": "Pour into tin."}, "Bake 30 minutes."],
                {
                    "@type": "HowToSection",
                    "name": "Frosting",
                    "itemListElement": [{"@type": "HowToStep", "text": "Whip the cream."}]
                },
                {"@type": "HowToStep"}
            ]
        });

        assert_eq!(
            Node::new(&value).instructions(),
            vec![
                "Preheat the oven.",
                "Mix the batter.",
                "Pour into tin.",
                "Bake 30 minutes.",
                "Whip the cream."
            ]
        );
    }

    #[test]
    fn test_bare_string_instructions() {
        let value = json!({"recipeInstructions": "Mix and bake."});
        assert_eq!(Node::new(&value).instructions(), vec!["Mix and bake."]);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let value = json!({"@type": "Recipe"});
        let record = RecipeRecord::from(Node::new(&value));

        assert_eq!(record.name, UNKNOWN_RECIPE);
        assert!(record.image.is_none());
        assert!(record.ingredients.is_empty());
        assert!(record.instructions.is_empty());
    }

    #[test]
    fn test_ingredients_and_name_kept_as_written() {
        let value = json!({
            "name": " Tomato Soup ",
            "recipeIngredient": ["  2 cups stock", "", "1 onion ", 4, "   "]
        });
        let node = Node::new(&value);

        assert_eq!(node.name().as_deref(), Some(" Tomato Soup "));
        assert_eq!(node.ingredients(), vec!["  2 cups stock", "", "1 onion ", "   "]);
        assert_eq!(Node::new(&json!({"name": "  "})).name(), None);
    }

    #[test]
    fn test_html_entities_are_decoded() {
        let value = json!({
            "name": "Mac &amp; Cheese",
            "recipeIngredient": ["1 cup cheddar &amp;amp; gruyere"]
        });
        let node = Node::new(&value);

        assert_eq!(node.name().as_deref(), Some("Mac & Cheese"));
        assert_eq!(node.ingredients(), vec!["1 cup cheddar & gruyere"]);
    }

    #[test]
    fn test_sanitize_strips_comment_wrappers() {
        assert_eq!(sanitize_json("  <!-- {\"a\": 1} -->  "), "{\"a\": 1}");
        assert_eq!(sanitize_json("//<![CDATA[\n[1]\n//]]>"), "[1]");
    }

    #[test]
    fn test_first_match_wins_across_blocks() {
        let context = page(&[
            r#"{"@type": "WebSite", "name": "Site"}"#,
            r#"{"@type": "Recipe", "name": "First"}"#,
            r#"{"@type": "Recipe", "name": "Second"}"#,
        ]);

        let record = JsonLdExtractor.parse(&context).unwrap();
        assert_eq!(record.name, "First");
    }

    #[test]
    fn test_no_recipe_node_is_no_evidence() {
        let context = page(&[r#"{"@type": "Organization", "name": "Acme"}"#, "{ not json"]);
        assert!(JsonLdExtractor.parse(&context).is_none());
    }
}
