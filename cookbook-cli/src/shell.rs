//! Interactive page. Keeps one page (and its cached list) alive across
//! commands, the way a loaded browser page does; switching pages discards
//! the old one.

use crate::terminal::TerminalView;
use anyhow::Result;
use cookbook_core::{FilterPolicy, HttpBackend, IngredientPage, Notifier, RecipePage, Session, View};
use std::io::{IsTerminal, Write};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PageName {
    Recipes,
    Ingredients,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    List,
    Refresh,
    Search(String),
    Add { name: String, instructions: String },
    Update { name: String, instructions: String },
    Delete(String),
    Page(PageName),
    Help,
    Quit,
}

const HELP: &str = "\
commands:
  list                         show the current list
  refresh                      refetch and show the list
  search [TERM]                filter by name (no term clears the filter)
  add NAME | INSTRUCTIONS      add a recipe (ingredients: add NAME)
  update NAME | INSTRUCTIONS   replace a recipe's instructions
  delete NAME                  delete by exact name
  page recipes|ingredients     open another page
  help, quit";

/// Splits `NAME | REST` into its trimmed halves; a missing half is empty.
fn split_pair(args: &str) -> (String, String) {
    match args.split_once('|') {
        Some((a, b)) => (a.trim().to_string(), b.trim().to_string()),
        None => (args.trim().to_string(), String::new()),
    }
}

pub fn parse(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, args) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let cmd = match word {
        "list" | "ls" => Command::List,
        "refresh" => Command::Refresh,
        "search" => Command::Search(args.to_string()),
        "add" => {
            let (name, instructions) = split_pair(args);
            Command::Add { name, instructions }
        }
        "update" => {
            let (name, instructions) = split_pair(args);
            Command::Update { name, instructions }
        }
        "delete" | "rm" => Command::Delete(args.trim().to_string()),
        "page" => match args.trim() {
            "recipes" => Command::Page(PageName::Recipes),
            "ingredients" => Command::Page(PageName::Ingredients),
            other => return Err(format!("unknown page: {other}")),
        },
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command: {other} (try `help`)")),
    };
    Ok(Some(cmd))
}

enum Active {
    Recipes(RecipePage),
    Ingredients(IngredientPage),
}

pub struct Shell {
    backend: Arc<HttpBackend>,
    session: Session,
    policy: FilterPolicy,
    view: TerminalView,
    page: Active,
}

impl Shell {
    pub fn new(backend: Arc<HttpBackend>, session: Session, policy: FilterPolicy) -> Self {
        let page = Active::Recipes(RecipePage::with_policy(backend.clone(), policy));
        Self {
            backend,
            session,
            policy,
            view: TerminalView::new(false),
            page,
        }
    }

    /// Replaces the current page with a freshly loaded `name` page.
    pub async fn open(&mut self, name: PageName) {
        self.page = match name {
            PageName::Recipes => Active::Recipes(RecipePage::with_policy(self.backend.clone(), self.policy)),
            PageName::Ingredients => {
                Active::Ingredients(IngredientPage::with_policy(self.backend.clone(), self.policy))
            }
        };
        if !self.session.is_authenticated() {
            self.view.alert("Please log in first");
            return;
        }
        // Load failures are already shown to the user.
        let _ = match &mut self.page {
            Active::Recipes(p) => p.load(&self.session, &mut self.view).await,
            Active::Ingredients(p) => p.load(&self.session, &mut self.view).await,
        };
    }

    /// Runs one command. Returns false when the shell should exit.
    pub async fn execute(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Quit => return false,
            Command::Help => println!("{HELP}"),
            Command::Page(name) => self.open(name).await,
            _ => {}
        }
        let view = &mut self.view;
        // Page actions report their own failures; the shell keeps going.
        let _ = match (cmd, &mut self.page) {
            (Command::Quit | Command::Help | Command::Page(_), _) => Ok(()),
            (Command::List, Active::Recipes(p)) => {
                View::render(view, p.cache().display());
                Ok(())
            }
            (Command::List, Active::Ingredients(p)) => {
                View::render(view, p.cache().display());
                Ok(())
            }
            (Command::Refresh, Active::Recipes(p)) => p.refresh(view).await.map(|_| ()),
            (Command::Refresh, Active::Ingredients(p)) => p.refresh(view).await.map(|_| ()),
            (Command::Search(term), Active::Recipes(p)) => p.search(&term, view).await.map(|_| ()),
            (Command::Search(term), Active::Ingredients(p)) => p.search(&term, view).await.map(|_| ()),
            (Command::Add { name, instructions }, Active::Recipes(p)) => {
                p.add_recipe(&name, &instructions, view).await
            }
            (Command::Add { name, .. }, Active::Ingredients(p)) => p.add_ingredient(&name, view).await,
            (Command::Update { name, instructions }, Active::Recipes(p)) => {
                p.update_recipe(&name, &instructions, view).await
            }
            (Command::Update { .. }, Active::Ingredients(_)) => {
                view.alert("Ingredients can't be updated");
                Ok(())
            }
            (Command::Delete(name), Active::Recipes(p)) => p.delete_recipe(&name, view).await,
            (Command::Delete(name), Active::Ingredients(p)) => p.delete_ingredient(&name, view).await,
        };
        true
    }

    pub async fn run(&mut self, start: PageName) -> Result<()> {
        self.open(start).await;
        let interactive = std::io::stdin().is_terminal();
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            if interactive {
                print!("> ");
                std::io::stdout().flush()?;
            }
            let Some(line) = lines.next_line().await? else {
                break;
            };
            match parse(&line) {
                Ok(Some(cmd)) => {
                    if !self.execute(cmd).await {
                        break;
                    }
                }
                Ok(None) => {}
                Err(msg) => self.view.alert(&msg),
            }
        }
        Ok(())
    }
}
