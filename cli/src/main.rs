mod render;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use mealmix_core::app::App;
use mealmix_core::config::Config;
use mealmix_core::http::{HttpClient, ReqwestClient};
use mealmix_core::mealdb::MealDb;
use mealmix_core::remix::Remixer;
use mealmix_core::store::SavedRecipes;
use mealmix_core::view;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Built-in remix themes, selectable by number. Free text works too.
const REMIX_THEMES: [&str; 5] = [
    "Give it a pirate twist",
    "Make it medieval-style",
    "Turn it into a breakfast dish",
    "Make it vegetarian",
    "Give it a space-age makeover",
];

#[derive(Parser)]
#[command(name = "mealmix")]
#[command(about = "Random recipes, themed remixes, and a saved list", long_about = None)]
struct Cli {
    /// Recipe API base URL (overrides MEALMIX_MEALDB_BASE_URL)
    #[arg(long)]
    mealdb_url: Option<String>,

    /// Remix model name (overrides MEALMIX_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Data directory for saved recipes (overrides MEALMIX_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Disable the saved-recipes feature
    #[arg(long)]
    no_save: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(url) = cli.mealdb_url {
        config.mealdb_base_url = url;
    }
    if let Some(model) = cli.model {
        if let Some(remix) = &mut config.remix {
            remix.model = model;
        }
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    let http: Arc<dyn HttpClient> = Arc::new(ReqwestClient::new()?);
    let mealdb = MealDb::new(http.clone(), config.mealdb_base_url.clone());
    let remixer = config.remix.as_ref().map(|remix| {
        Remixer::new(
            http.clone(),
            remix.base_url.clone(),
            remix.api_key.clone(),
            remix.model.clone(),
        )
    });
    let saved = if cli.no_save {
        None
    } else {
        let path = config.saved_recipes_path();
        match SavedRecipes::load(&path) {
            Ok(store) => Some(store),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e,
                    "saved recipes unavailable, continuing without them");
                None
            }
        }
    };

    let (app, mut updates) = App::new(mealdb, remixer, saved);
    let app = Arc::new(app);
    tracing::info!(
        mealdb = %config.mealdb_base_url,
        remix_enabled = app.remix_enabled(),
        saving_enabled = app.saving_enabled(),
        "starting mealmix"
    );

    println!("Welcome to mealmix! Type 'help' for commands.");
    if !app.remix_enabled() {
        println!("{}", view::REMIX_UNAVAILABLE);
    }

    app.refresh_saved().await;
    tokio::spawn({
        let app = app.clone();
        async move { app.show_random().await }
    });

    // The selected theme persists across remixes until changed.
    let mut current_theme = REMIX_THEMES[0].to_string();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            update = updates.recv() => {
                match update {
                    Some(update) => render::render(&update),
                    None => break,
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !handle_command(&app, line.trim(), &mut current_theme) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Dispatch one input line. Network operations are spawned so the loop
/// keeps rendering updates while they run. Returns false on quit.
fn handle_command(app: &Arc<App>, line: &str, current_theme: &mut String) -> bool {
    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "" => {}
        "random" | "r" => {
            let app = app.clone();
            tokio::spawn(async move { app.show_random().await });
        }
        "remix" => {
            let theme = if rest.is_empty() {
                current_theme.clone()
            } else {
                theme_from_arg(rest)
            };
            let app = app.clone();
            tokio::spawn(async move { app.remix_current(&theme).await });
        }
        "theme" => {
            if rest.is_empty() {
                println!("Current theme: {current_theme}");
            } else {
                *current_theme = theme_from_arg(rest);
                println!("Remix theme set to: {current_theme}");
            }
        }
        "themes" => render::print_themes(&REMIX_THEMES),
        "save" => {
            let app = app.clone();
            tokio::spawn(async move { app.save_current().await });
        }
        "list" => {
            let app = app.clone();
            tokio::spawn(async move { app.refresh_saved().await });
        }
        "view" => {
            if rest.is_empty() {
                println!("Usage: view <name>");
            } else {
                let app = app.clone();
                let name = rest.to_string();
                tokio::spawn(async move { app.show_named(&name).await });
            }
        }
        "delete" => {
            if rest.is_empty() {
                println!("Usage: delete <name>");
            } else {
                let app = app.clone();
                let name = rest.to_string();
                tokio::spawn(async move { app.remove_saved(&name).await });
            }
        }
        "help" => render::print_help(),
        "quit" | "exit" | "q" => return false,
        other => println!("Unknown command: {other}. Type 'help' for commands."),
    }
    true
}

/// Resolve a theme argument: a number picks from [`REMIX_THEMES`],
/// anything else is used verbatim.
fn theme_from_arg(arg: &str) -> String {
    if let Ok(index) = arg.parse::<usize>() {
        if (1..=REMIX_THEMES.len()).contains(&index) {
            return REMIX_THEMES[index - 1].to_string();
        }
    }
    arg.to_string()
}
