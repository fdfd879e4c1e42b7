use super::{collapse_whitespace, Extractor, ParsingContext};
use crate::model::{RecipeRecord, UNKNOWN_RECIPE};
use log::debug;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

pub struct HtmlClassExtractor;

static OG_TITLE: LazyLock<Selector> =
    LazyLock::new(|| selector("meta[property='og:title'], meta[name='og:title']"));
static OG_IMAGE: LazyLock<Selector> =
    LazyLock::new(|| selector("meta[property='og:image'], meta[name='og:image']"));
static H1: LazyLock<Selector> = LazyLock::new(|| selector("h1"));
static LISTS: LazyLock<Selector> = LazyLock::new(|| selector("ul, ol"));
static LIST_ITEMS: LazyLock<Selector> = LazyLock::new(|| selector("li"));
static INSTRUCTION_BLOCKS: LazyLock<Selector> = LazyLock::new(|| selector("ul, ol, div"));
static HEADINGS_AND_LISTS: LazyLock<Selector> =
    LazyLock::new(|| selector("h2, h3, h4, h5, ul, ol"));

const INGREDIENT_CLASSES: &[&str] = &["ingredient"];
const INSTRUCTION_CLASSES: &[&str] = &["instruction", "direction", "step", "method"];

/// Paragraphs inside instruction blocks must be longer than this (in
/// characters) to count as a step.
const MIN_STEP_CHARS: usize = 10;

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("Invalid selector")
}

fn class_matches(element: &ElementRef, patterns: &[&str]) -> bool {
    element
        .value()
        .attr("class")
        .map(|class| class.to_lowercase())
        .is_some_and(|class| patterns.iter().any(|p| class.contains(p)))
}

fn is_list(element: &ElementRef) -> bool {
    matches!(element.value().name(), "ul" | "ol")
}

fn element_text(element: &ElementRef) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

fn meta_content(document: &Html, selector: &Selector) -> Option<String> {
    document
        .select(selector)
        .filter_map(|meta| meta.value().attr("content"))
        .map(str::trim)
        .find(|content| !content.is_empty())
        .map(str::to_string)
}

/// Gathers item texts in document order, never taking the same element
/// (or anything inside an element already taken) twice.
#[derive(Default)]
struct ItemCollector<'a> {
    items: Vec<String>,
    taken: Vec<ElementRef<'a>>,
}

impl<'a> ItemCollector<'a> {
    fn push(&mut self, element: ElementRef<'a>, min_chars: usize) {
        let already_taken = std::iter::once(element)
            .chain(element.ancestors().filter_map(ElementRef::wrap))
            .any(|el| self.taken.contains(&el));
        if already_taken {
            return;
        }

        let text = element_text(&element);
        if text.chars().count() > min_chars {
            self.taken.push(element);
            self.items.push(text);
        }
    }

    fn push_list_items(&mut self, list: ElementRef<'a>) {
        for item in list.select(&LIST_ITEMS) {
            self.push(item, 0);
        }
    }

    fn push_block_children(&mut self, block: ElementRef<'a>) {
        for child in block.children().filter_map(ElementRef::wrap) {
            if matches!(child.value().name(), "p" | "div") {
                self.push(child, MIN_STEP_CHARS);
            }
        }
    }
}

impl HtmlClassExtractor {
    fn extract_title(&self, document: &Html) -> String {
        if let Some(title) = meta_content(document, &OG_TITLE) {
            return title;
        }

        document
            .select(&H1)
            .next()
            .map(|h1| element_text(&h1))
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| UNKNOWN_RECIPE.to_string())
    }

    fn extract_ingredients(&self, document: &Html) -> Vec<String> {
        let mut collector = ItemCollector::default();
        for list in document.select(&LISTS) {
            if class_matches(&list, INGREDIENT_CLASSES) {
                collector.push_list_items(list);
            }
        }

        if collector.items.is_empty() {
            debug!("No ingredient list by class, looking for an ingredients heading");
            return self.ingredients_after_heading(document);
        }

        collector.items
    }

    /// First list following a section heading (`h2`-`h5`) that mentions
    /// ingredients. The page title (`h1`) never counts.
    fn ingredients_after_heading(&self, document: &Html) -> Vec<String> {
        let elements: Vec<ElementRef> = document.select(&HEADINGS_AND_LISTS).collect();

        for (index, heading) in elements.iter().enumerate() {
            if is_list(heading) || !element_text(heading).to_lowercase().contains("ingredient") {
                continue;
            }

            if let Some(list) = elements[index + 1..].iter().find(|el| is_list(el)) {
                let mut collector = ItemCollector::default();
                collector.push_list_items(*list);
                if !collector.items.is_empty() {
                    return collector.items;
                }
            }
        }

        Vec::new()
    }

    fn extract_instructions(&self, document: &Html) -> Vec<String> {
        let mut collector = ItemCollector::default();
        for element in document.select(&INSTRUCTION_BLOCKS) {
            if !class_matches(&element, INSTRUCTION_CLASSES) {
                continue;
            }

            if is_list(&element) {
                collector.push_list_items(element);
            } else {
                collector.push_block_children(element);
            }
        }
        collector.items
    }
}

impl Extractor for HtmlClassExtractor {
    fn name(&self) -> &'static str {
        "html_class"
    }

    fn parse(&self, context: &ParsingContext) -> Option<RecipeRecord> {
        debug!("Attempting to extract recipe using HTML class matchers");

        let document = &context.document;
        let record = RecipeRecord {
            name: self.extract_title(document),
            image: meta_content(document, &OG_IMAGE),
            ingredients: self.extract_ingredients(document),
            instructions: self.extract_instructions(document),
        };

        debug!("Recipe name: {}", record.name);
        debug!("Ingredients count: {}", record.ingredients.len());
        debug!("Instructions count: {}", record.instructions.len());

        if !record.has_content() {
            debug!("HTML class matchers found no recipe content at {}", context.url);
            return None;
        }

        Some(record)
    }
}
