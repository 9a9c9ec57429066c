// IngreChef - ingredient-driven recipe discovery
// Entry point and command-line front end

use anyhow::Context;
use clap::{Parser, Subcommand};
use ingrechef::app::{self, AppState};
use ingrechef::commands::{self, ProfileUpdate, RecipeView};
use ingrechef::config::{self, AppConfig, CUISINES};
use ingrechef::error::AppError;
use ingrechef::models::{RecipeSummary, UserProfile};
use ingrechef::services::{QuotaStatus, UsageLevel};
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ingrechef")]
#[command(about = "Find recipes for the ingredients you have", long_about = None)]
struct Cli {
    /// Directory holding the local database
    #[arg(long, env = "INGRECHEF_DATA_DIR", default_value = ".ingrechef")]
    data_dir: PathBuf,

    /// Keep all state in memory for this run only
    #[arg(long)]
    ephemeral: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Spoonacular API key
    #[arg(long, env = "SPOONACULAR_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Override the recipe API base URL
    #[arg(long, env = "SPOONACULAR_BASE_URL")]
    api_base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search recipes by ingredients
    Search {
        /// Ingredients separated by commas or newlines
        #[arg(long, short)]
        ingredients: String,
        /// Cuisine filter (see `cuisines`)
        #[arg(long, short, default_value = "")]
        cuisine: String,
    },
    /// Show a recipe's ingredients and steps
    Show { id: i64 },
    /// Manage saved recipes
    Bookmarks {
        #[command(subcommand)]
        action: BookmarkAction,
    },
    /// View or edit your profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// View or reset today's API usage
    Quota {
        #[command(subcommand)]
        action: QuotaAction,
    },
    /// List the available cuisine filters
    Cuisines,
}

#[derive(Subcommand)]
enum BookmarkAction {
    List,
    /// Save a recipe, or unsave it if already saved
    Toggle { id: i64 },
    Remove { id: i64 },
}

#[derive(Subcommand)]
enum ProfileAction {
    Show,
    Set {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        avatar: Option<usize>,
    },
}

#[derive(Subcommand)]
enum QuotaAction {
    Show,
    Reset,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ingrechef=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::new(
        cli.data_dir.clone(),
        cli.api_key.clone(),
        cli.api_base_url.clone(),
    );

    let state = if cli.ephemeral {
        app::setup_ephemeral(&config)
    } else {
        app::setup(&config).await
    }
    .with_context(|| format!("failed to open data directory {:?}", config.data_dir))?;

    if let Err(e) = run(&state, cli.command, cli.json).await {
        tracing::debug!("Command failed: {}", e);
        if cli.json {
            println!("{}", serde_json::json!({ "error": e, "message": e.user_message() }));
        } else {
            eprintln!("Error: {}", e.user_message());
        }
        std::process::exit(1);
    }

    Ok(())
}

async fn run(state: &AppState, command: Commands, json: bool) -> Result<(), AppError> {
    match command {
        Commands::Search {
            ingredients,
            cuisine,
        } => {
            let recipes = commands::search_recipes(state, &ingredients, &cuisine).await?;
            output(json, &recipes, || {
                println!("{} ({} results)", config::cuisine_label(&cuisine), recipes.len());
                print_recipes(&recipes)
            })
        }
        Commands::Show { id } => {
            let view = commands::recipe_detail(state, id).await?;
            output(json, &view, || print_recipe_view(&view))
        }
        Commands::Bookmarks { action } => match action {
            BookmarkAction::List => {
                let recipes = commands::list_bookmarks(state).await;
                output(json, &recipes, || print_recipes(&recipes))
            }
            BookmarkAction::Toggle { id } => {
                let recipe = match commands::find_bookmark(state, id).await {
                    Some(saved) => saved,
                    None => commands::recipe_detail(state, id).await?.detail.to_summary(),
                };
                let title = recipe.title.clone();
                let bookmarked = commands::toggle_bookmark(state, recipe).await?;
                output(json, &serde_json::json!({ "id": id, "bookmarked": bookmarked }), || {
                    if bookmarked {
                        println!("Saved \"{}\"", title);
                    } else {
                        println!("Removed \"{}\"", title);
                    }
                })
            }
            BookmarkAction::Remove { id } => {
                commands::remove_bookmark(state, id).await?;
                output(json, &serde_json::json!({ "id": id, "bookmarked": false }), || {
                    println!("Removed bookmark {}", id)
                })
            }
        },
        Commands::Profile { action } => {
            let profile = match action {
                ProfileAction::Show => commands::load_profile(state).await,
                ProfileAction::Set { name, bio, avatar } => {
                    let update = ProfileUpdate {
                        display_name: name,
                        bio,
                        selected_avatar: avatar,
                    };
                    commands::save_profile(state, update).await?
                }
            };
            output(json, &profile, || print_profile(&profile))
        }
        Commands::Quota { action } => {
            let status = match action {
                QuotaAction::Show => commands::quota_status(state).await,
                QuotaAction::Reset => commands::reset_quota(state).await?,
            };
            output(json, &status, || print_quota(&status))
        }
        Commands::Cuisines => {
            let cuisines: Vec<_> = CUISINES
                .iter()
                .map(|(value, label)| serde_json::json!({ "value": value, "label": label }))
                .collect();
            output(json, &cuisines, || {
                for (value, label) in CUISINES {
                    if value.is_empty() {
                        println!("{:<16} (no filter)", label);
                    } else {
                        println!("{:<16} --cuisine \"{}\"", label, value);
                    }
                }
            })
        }
    }
}

fn output<T: Serialize>(json: bool, value: &T, text: impl FnOnce()) -> Result<(), AppError> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        text();
    }
    Ok(())
}

fn print_recipes(recipes: &[RecipeSummary]) {
    if recipes.is_empty() {
        println!("No recipes found");
        return;
    }

    for recipe in recipes {
        print!(
            "{:>8}  {}  ({} min, serves {})",
            recipe.id, recipe.title, recipe.ready_in_minutes, recipe.servings
        );
        if let (Some(used), Some(missed)) =
            (recipe.used_ingredient_count, recipe.missed_ingredient_count)
        {
            print!("  [uses {}, missing {}]", used, missed);
        }
        println!();
    }
}

fn print_recipe_view(view: &RecipeView) {
    let recipe = &view.detail.recipe;
    let marker = if view.is_bookmarked { " *" } else { "" };

    println!("{}{}", recipe.title, marker);
    println!(
        "Ready in {} min, serves {}",
        recipe.ready_in_minutes, recipe.servings
    );
    if !view.detail.cuisines.is_empty() {
        println!("Cuisines: {}", view.detail.cuisines.join(", "));
    }

    println!("\nIngredients:");
    for ingredient in &view.detail.extended_ingredients {
        println!("  - {}", ingredient.original);
    }

    println!("\nInstructions:");
    for step in view.detail.steps() {
        println!("  {}. {}", step.number, step.step);
    }
}

fn print_profile(profile: &UserProfile) {
    let name = if profile.display_name.is_empty() {
        "(no name)"
    } else {
        profile.display_name.as_str()
    };

    println!("{}", name);
    if !profile.bio.is_empty() {
        println!("{}", profile.bio);
    }
    println!(
        "Avatar {}: {}",
        profile.selected_avatar,
        config::avatar_url(profile.selected_avatar).unwrap_or("(unknown)")
    );
}

fn print_quota(status: &QuotaStatus) {
    const WIDTH: usize = 30;
    let filled = (status.percent_used as usize * WIDTH) / 100;

    println!(
        "[{}{}] {} / {} requests used today",
        "#".repeat(filled),
        "-".repeat(WIDTH - filled),
        status.used,
        status.limit
    );

    match status.level {
        UsageLevel::AtLimit => println!("Daily limit reached. Requests resume tomorrow."),
        UsageLevel::NearLimit => println!("{} requests left today", status.remaining),
        UsageLevel::Normal => {}
    }
}
