use clap::{Parser, Subcommand};
use dialoguer::{Input, Password, Select};
use dotenvy::dotenv;
use parent_portal_cli::accounts::{NewAccount, create_account};
use parent_portal_cli::seeder::{self, SeedConfig};
use parent_portal_config::DatabaseConfig;
use parent_portal_core::Role;
use parent_portal_db::{PgPool, init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "parent-portal-cli")]
#[command(about = "Parent Portal CLI - Administrative tools for the Parent Portal API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account with any role
    CreateUser {
        /// Full name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// 10 digit phone number
        #[arg(long)]
        phone: Option<String>,

        /// parent, teacher or admin
        #[arg(short = 'r', long)]
        role: Option<Role>,
    },
    /// Replace all data with the demo dataset and optional fake families
    Seed {
        /// Number of fake parent accounts to create
        #[arg(long, default_value = "0")]
        parents: usize,

        /// Number of children per fake parent
        #[arg(long, default_value = "2")]
        children: usize,
    },
    /// Delete all data
    Clear,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let pool = match connect().await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("❌ Error connecting to database: {:#}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::CreateUser {
            name,
            email,
            password,
            phone,
            role,
        } => handle_create_user(&pool, name, email, password, phone, role).await,
        Commands::Seed { parents, children } => handle_seed(&pool, parents, children).await,
        Commands::Clear => handle_clear(&pool).await,
    }
}

async fn connect() -> anyhow::Result<PgPool> {
    let config = DatabaseConfig::from_env()?;
    let pool = init_db_pool(&config).await;
    run_migrations(&pool).await?;
    Ok(pool)
}

fn prompt_text(prompt: &str) -> anyhow::Result<String> {
    Ok(Input::<String>::new().with_prompt(prompt).interact_text()?)
}

fn read_account(
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    phone: Option<String>,
    role: Option<Role>,
) -> anyhow::Result<NewAccount> {
    let name = name.map_or_else(|| prompt_text("Full name"), Ok)?;
    let email = email.map_or_else(|| prompt_text("Email address"), Ok)?;
    let phone = phone.map_or_else(|| prompt_text("Phone (10 digits)"), Ok)?;
    let role = role.map_or_else(prompt_role, Ok)?;
    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    Ok(NewAccount {
        name,
        email,
        password,
        phone,
        role,
    })
}

fn prompt_role() -> anyhow::Result<Role> {
    let labels: Vec<&str> = Role::ALL.iter().map(Role::as_str).collect();
    let selection = Select::new()
        .with_prompt("Role")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(Role::ALL[selection])
}

async fn handle_create_user(
    pool: &PgPool,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    phone: Option<String>,
    role: Option<Role>,
) {
    let account = read_account(name, email, password, phone, role);

    let account = match account {
        Ok(account) => account,
        Err(e) => {
            eprintln!("\n❌ Error reading account details: {}", e);
            std::process::exit(1);
        }
    };

    match create_account(pool, &account).await {
        Ok(id) => {
            println!("\n✅ User created successfully!");
            println!("   ID: {}", id);
            println!("   Email: {}", account.email.trim().to_lowercase());
            println!("   Name: {}", account.name.trim());
            println!("   Role: {}", account.role);
        }
        Err(e) => {
            eprintln!("\n❌ Error creating user: {}", e);
            std::process::exit(1);
        }
    }
}

async fn handle_seed(pool: &PgPool, parents: usize, children: usize) {
    let config = SeedConfig::new(parents).with_children(children);

    if let Err(e) = seeder::seed_all(pool, config).await {
        eprintln!("\n❌ Error seeding database: {:#}", e);
        std::process::exit(1);
    }
}

async fn handle_clear(pool: &PgPool) {
    match seeder::clear_all(pool).await {
        Ok(_) => println!("✅ Cleared all data"),
        Err(e) => {
            eprintln!("\n❌ Error clearing data: {:#}", e);
            std::process::exit(1);
        }
    }
}
