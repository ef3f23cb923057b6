use anyhow::Result;
use clap::{Parser, Subcommand};
use cookbook_core::page::{login, logout};
use cookbook_core::{HttpBackend, IngredientPage, Notifier, RecipePage, Session};
use std::io::{BufRead, IsTerminal};
use std::process::ExitCode;
use std::sync::Arc;

mod config;
mod logging;
mod session_file;
mod shell;
mod terminal;

use config::Settings;
use shell::{PageName, Shell};
use terminal::TerminalView;

#[derive(Parser)]
#[command(name = "cookbook", version, about = "Recipe manager client")]
struct Cli {
    /// Backend base URL (overrides settings)
    #[arg(long, global = true)]
    server: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and remember the session. Without --password, the password is
    /// read from piped stdin; a terminal is refused so it is never echoed.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: Option<String>,
    },
    /// End the current session
    Logout,
    /// Show whether a session is active and whether it is an admin
    Status {
        #[arg(long)]
        json: bool,
    },
    /// Recipe page actions
    #[command(subcommand)]
    Recipes(RecipeCmd),
    /// Ingredient page actions
    #[command(subcommand)]
    Ingredients(IngredientCmd),
    /// Interactive page that keeps its list between commands
    Shell {
        #[arg(long, value_enum, default_value_t = PageName::Recipes)]
        page: PageName,
    },
    /// Print effective settings and paths
    Config {
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum RecipeCmd {
    /// Show all recipes, or those whose name contains --search
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        json: bool,
    },
    Add {
        name: String,
        instructions: String,
        #[arg(long)]
        json: bool,
    },
    /// Replace the instructions of the recipe with this exact name
    Update {
        name: String,
        instructions: String,
        #[arg(long)]
        json: bool,
    },
    Delete {
        name: String,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum IngredientCmd {
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        json: bool,
    },
    Add {
        name: String,
        #[arg(long)]
        json: bool,
    },
    Delete {
        name: String,
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let loaded = config::load_settings();
    let settings = loaded.as_ref().cloned().unwrap_or_default();
    logging::init(&settings);
    if let Err(e) = &loaded {
        tracing::warn!(error = %e, "ignoring invalid settings");
    }

    let ok = run(cli, settings).await?;
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// First line of piped input, without its line ending.
fn password_from(input: &mut impl BufRead, interactive: bool) -> Result<String> {
    if interactive {
        anyhow::bail!("pass --password or pipe the password on stdin");
    }
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn backend(server: Option<&str>, settings: &Settings, session: Session) -> Result<Arc<HttpBackend>> {
    let base_url = server.unwrap_or(&settings.server.base_url);
    let backend = HttpBackend::with_timeout(base_url, settings.timeout())?.with_session(session);
    Ok(Arc::new(backend))
}

/// Returns false when a page action failed; the user has already been told
/// why on stderr.
async fn run(cli: Cli, settings: Settings) -> Result<bool> {
    let session_path = config::session_path();
    let session = session_file::load(&session_path);
    let server = cli.server.as_deref();

    match cli.command {
        Commands::Login { username, password } => {
            let password = match password {
                Some(p) => p,
                None => {
                    let stdin = std::io::stdin();
                    password_from(&mut stdin.lock(), stdin.is_terminal())?
                }
            };
            let backend = backend(server, &settings, Session::default())?;
            let mut view = TerminalView::new(false);
            let Ok(session) = login(&*backend, &username, &password, &mut view).await else {
                return Ok(false);
            };
            session_file::save(&session_path, &session)?;
            println!(
                "logged in as {}{}",
                username.trim(),
                if session.is_admin { " (admin)" } else { "" }
            );
        }
        Commands::Logout => {
            let mut session = session;
            let backend = backend(server, &settings, session.clone())?;
            let mut view = TerminalView::new(false);
            if logout(&*backend, &mut session, &mut view).await.is_err() {
                return Ok(false);
            }
            session_file::clear(&session_path)?;
            println!("logged out");
        }
        Commands::Status { json } => {
            if json {
                let v = serde_json::json!({
                    "logged_in": session.shows_logout(),
                    "admin": session.shows_admin_link(),
                    "server": server.unwrap_or(&settings.server.base_url),
                });
                println!("{}", serde_json::to_string_pretty(&v)?);
            } else if session.is_authenticated() {
                println!("logged in{}", if session.is_admin { " (admin)" } else { "" });
            } else {
                println!("not logged in");
            }
        }
        Commands::Recipes(cmd) => {
            let mut view = TerminalView::new(matches!(
                cmd,
                RecipeCmd::List { json: true, .. }
                    | RecipeCmd::Add { json: true, .. }
                    | RecipeCmd::Update { json: true, .. }
                    | RecipeCmd::Delete { json: true, .. }
            ));
            if !session.is_authenticated() {
                view.alert("Please log in first");
                return Ok(false);
            }
            let backend = backend(server, &settings, session.clone())?;
            let mut page = RecipePage::with_policy(backend, settings.filter_policy());
            let done = match cmd {
                RecipeCmd::List { search: Some(term), .. } => page.search(&term, &mut view).await.map(|_| ()),
                RecipeCmd::List { search: None, .. } => page.load(&session, &mut view).await,
                RecipeCmd::Add { name, instructions, .. } => {
                    page.add_recipe(&name, &instructions, &mut view).await
                }
                RecipeCmd::Update { name, instructions, .. } => {
                    page.update_recipe(&name, &instructions, &mut view).await
                }
                RecipeCmd::Delete { name, .. } => page.delete_recipe(&name, &mut view).await,
            };
            return Ok(done.is_ok());
        }
        Commands::Ingredients(cmd) => {
            let mut view = TerminalView::new(matches!(
                cmd,
                IngredientCmd::List { json: true, .. }
                    | IngredientCmd::Add { json: true, .. }
                    | IngredientCmd::Delete { json: true, .. }
            ));
            if !session.is_authenticated() {
                view.alert("Please log in first");
                return Ok(false);
            }
            let backend = backend(server, &settings, session.clone())?;
            let mut page = IngredientPage::with_policy(backend, settings.filter_policy());
            let done = match cmd {
                IngredientCmd::List { search: Some(term), .. } => {
                    page.search(&term, &mut view).await.map(|_| ())
                }
                IngredientCmd::List { search: None, .. } => page.load(&session, &mut view).await,
                IngredientCmd::Add { name, .. } => page.add_ingredient(&name, &mut view).await,
                IngredientCmd::Delete { name, .. } => page.delete_ingredient(&name, &mut view).await,
            };
            return Ok(done.is_ok());
        }
        Commands::Shell { page } => {
            let backend = backend(server, &settings, session.clone())?;
            let mut shell = Shell::new(backend, session, settings.filter_policy());
            shell.run(page).await?;
        }
        Commands::Config { json } => {
            let paths = serde_json::json!({
                "config_dir": config::config_dir(),
                "settings_path": config::settings_path(),
                "session_path": &session_path,
            });
            if json {
                let mut v = serde_json::to_value(&settings)?;
                if let (Some(obj), Some(extra)) = (v.as_object_mut(), paths.as_object()) {
                    obj.extend(extra.clone());
                }
                println!("{}", serde_json::to_string_pretty(&v)?);
            } else {
                print!("{}", toml::to_string_pretty(&settings)?);
                println!("# config dir:  {}", config::config_dir().display());
                println!("# settings:    {}", config::settings_path().display());
                println!("# session:     {}", session_path.display());
            }
        }
    }

    Ok(true)
}
