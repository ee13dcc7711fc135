use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::EnvFilter;

use user_directory::client::{UserApi, UserApiClient, DEFAULT_BASE_URL};
use user_directory::presentation::{render_profile, render_user_table, CreateUserForm, Session, View};
use user_directory::domains::user::pagination::{total_pages, DEFAULT_LIMIT};

/// user-cli - browse and manage the user directory
#[derive(Parser)]
#[command(name = "user-cli")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Base URL of the API, including the /api/v1 prefix
  #[arg(long, env = "USER_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
  base_url: String,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Print one page of the user table
  List {
    #[arg(long, default_value_t = 1)]
    page: i64,
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    limit: i64,
  },
  /// Print a single user's profile
  Show { id: i32 },
  /// Create a user
  Create {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
  },
  /// Delete a user
  Delete { id: i32 },
  /// Interactive table view with paging, profile and create form
  Browse,
}

#[tokio::main]
async fn main() {
  dotenvy::dotenv().ok();

  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  let result = match UserApiClient::new(cli.base_url) {
    Ok(client) => run(client, cli.command).await,
    Err(e) => Err(e.into()),
  };

  if let Err(e) = result {
    eprintln!("Error: {:#}", e);
    std::process::exit(1);
  }
}

async fn run(client: UserApiClient, command: Commands) -> anyhow::Result<()> {
  match command {
    Commands::List { page, limit } => {
      let listing = client.fetch_users(page, limit).await?;
      print!(
        "{}",
        render_user_table(&listing.users, listing.page, total_pages(listing.total, listing.limit))
      );
      println!("{} user(s) total", listing.total);
    }
    Commands::Show { id } => {
      let user = client.fetch_user(id).await?;
      print!("{}", render_profile(&user));
    }
    Commands::Create { name, email } => {
      let user = client
        .create_user(&CreateUserForm::new(name, email).to_request())
        .await
        .context("Failed to create user")?;
      println!("Created user {} ({})", user.id, user.email);
    }
    Commands::Delete { id } => {
      client.delete_user(id).await.context("Failed to delete user")?;
      println!("Deleted user {}", id);
    }
    Commands::Browse => browse(Session::new(client)).await?,
  }

  Ok(())
}

const HELP: &str = "commands: next | prev | page <n> | view <id> | delete <id> | create | back | refresh | help | quit";

async fn browse<A: UserApi>(mut session: Session<A>) -> anyhow::Result<()> {
  let mut lines = BufReader::new(tokio::io::stdin()).lines();

  session.load_page(1).await;
  println!("{}", session.render());
  println!("{}", HELP);

  while let Some(line) = prompt(&mut lines, "> ").await? {
    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let arg = parts.next();

    match (command, arg) {
      ("", _) => {}
      ("quit" | "q" | "exit", _) => break,
      ("help" | "?", _) => {
        println!("{}", HELP);
        continue;
      }
      ("next" | "n", _) => {
        session.next_page().await;
      }
      ("prev" | "p", _) => {
        session.previous_page().await;
      }
      ("refresh" | "r", _) => {
        session.refresh().await;
      }
      ("back" | "b", _) => session.back_to_list(),
      ("page", Some(n)) => match n.parse::<i64>() {
        Ok(n) => {
          session.load_page(n).await;
        }
        Err(_) => println!("page expects a number"),
      },
      ("view" | "v", Some(id)) => match id.parse::<i32>() {
        Ok(id) => {
          session.show_user(id).await;
        }
        Err(_) => println!("view expects a user id"),
      },
      ("delete" | "d", Some(id)) => match id.parse::<i32>() {
        Ok(id) => {
          session.delete_user(id).await;
        }
        Err(_) => println!("delete expects a user id"),
      },
      ("create" | "c", _) => {
        session.open_create_form();
        println!("{}", session.render());
        let Some(name) = prompt(&mut lines, "Name: ").await? else {
          break;
        };
        let Some(email) = prompt(&mut lines, "Email: ").await? else {
          break;
        };
        session.submit_create(CreateUserForm::new(name, email)).await;
      }
      _ => {
        println!("unknown command; {}", HELP);
        continue;
      }
    }

    if matches!(session.view(), View::CreateForm) && session.field_errors().is_empty() {
      session.back_to_list();
    }
    println!("{}", session.render());
  }

  Ok(())
}

async fn prompt(lines: &mut Lines<BufReader<Stdin>>, label: &str) -> anyhow::Result<Option<String>> {
  use std::io::Write;

  print!("{}", label);
  std::io::stdout().flush().context("Failed to flush stdout")?;
  Ok(lines.next_line().await.context("Failed to read stdin")?)
}
