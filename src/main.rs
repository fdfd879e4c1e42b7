use log::error;
use recipe_scrape::config::load_config;
use recipe_scrape::{extract_with_config, ExtractionOutcome, RecipeRecord};
use std::env;
use std::process::ExitCode;

const USAGE: &str = "Usage: recipe-scrape <url> [--scale <factor>] [--metric] [--json]";

struct Args {
    url: String,
    scale: f64,
    metric: bool,
    json: bool,
}

fn parse_args() -> Result<Args, Box<dyn std::error::Error>> {
    let mut url = None;
    let mut scale: f64 = 1.0;
    let mut metric = false;
    let mut json = false;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--metric" => metric = true,
            "--json" => json = true,
            "--scale" => {
                let value = args.next().ok_or("--scale needs a value")?;
                scale = value.parse()?;
                if scale <= 0.0 {
                    return Err("--scale must be positive".into());
                }
            }
            _ if url.is_none() && !arg.starts_with("--") => url = Some(arg.clone()),
            other => return Err(format!("Unexpected argument: {other}\n{USAGE}").into()),
        }
    }

    Ok(Args {
        url: url.ok_or(USAGE)?,
        scale,
        metric,
        json,
    })
}

fn print_recipe(recipe: &RecipeRecord, scale: f64, metric: bool) {
    println!("--- {} ---\n", recipe.name);

    if let Some(image) = &recipe.image {
        println!("[Image URL]: {image}\n");
    }

    println!("INGREDIENTS:");
    for line in recipe.scaled_ingredients(scale, metric) {
        println!("- {line}");
    }

    println!("\nINSTRUCTIONS:");
    for (i, step) in recipe.instructions.iter().enumerate() {
        println!("{}. {}", i + 1, step);
    }
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    env_logger::init();

    let args = parse_args()?;
    let config = load_config()?;

    match extract_with_config(&args.url, &config) {
        ExtractionOutcome::Found(recipe) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&recipe)?);
            } else {
                print_recipe(&recipe, args.scale, args.metric);
            }
            Ok(ExitCode::SUCCESS)
        }
        ExtractionOutcome::NotFound => {
            error!("No recipe data found at {}", args.url);
            eprintln!("Could not find recipe data on this page.");
            Ok(ExitCode::from(2))
        }
        ExtractionOutcome::TransportError(message) => {
            eprintln!("Error: could not load page: {message}");
            Ok(ExitCode::FAILURE)
        }
    }
}
