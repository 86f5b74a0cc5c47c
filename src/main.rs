//! Healthlog CLI
//!
//! Command-line front end for the Healthlog client:
//! - Sign up, log in and out
//! - Log food and activities
//! - Show today's dashboard and the profile

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use healthlog::config::generate_default_config;
use healthlog::forms::{quick_activity, QUICK_ACTIVITIES};
use healthlog::summary::{today, total_calories, total_minutes};
use healthlog::{
    logging, ActivityForm, AuthMode, Config, FileSessionStore, FoodForm, Gateway, GatewayMode,
    Goal, HttpGateway, LoginForm, MealType, MockGateway, ProfileUpdate, Store,
};

#[derive(Parser)]
#[command(name = "healthlog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Track food intake and activity")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/healthlog/config.toml or ./healthlog.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account and sign in
    Signup {
        username: String,
        email: String,
        #[arg(short, long)]
        password: String,
    },

    /// Sign in to an existing account
    Login {
        email: String,
        #[arg(short, long)]
        password: String,
    },

    /// Forget the remembered session
    Logout,

    /// Show who is signed in
    Status,

    /// Show today's totals
    Dashboard,

    /// Food log
    Food {
        #[command(subcommand)]
        command: FoodCommand,
    },

    /// Activity log
    Activity {
        #[command(subcommand)]
        command: ActivityCommand,
    },

    /// Show or edit the profile
    Profile {
        #[arg(long)]
        age: Option<u32>,
        /// Weight in kilograms
        #[arg(long)]
        weight: Option<f64>,
        /// lose, maintain or gain
        #[arg(long)]
        goal: Option<Goal>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum FoodCommand {
    /// Log a food entry
    Add {
        name: String,
        calories: u32,
        /// Breakfast, Lunch, Dinner or Snack
        #[arg(short, long)]
        meal: MealType,
    },

    /// List food entries (today by default)
    List {
        #[arg(long)]
        all: bool,
    },
}

#[derive(Subcommand)]
pub enum ActivityCommand {
    /// Log a custom activity
    Add {
        name: String,
        /// Duration in minutes
        #[arg(short, long)]
        duration: u32,
        /// Calories burned (computed for quick activities when omitted)
        #[arg(short, long)]
        calories: Option<u32>,
    },

    /// Log a quick activity (30 minutes unless overridden)
    Quick {
        name: String,
        #[arg(short, long)]
        duration: Option<u32>,
    },

    /// List activities (today by default)
    List {
        #[arg(long)]
        all: bool,
    },

    /// Show the quick activities and their burn rates
    Catalog,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                println!("Wrote default config to {}", path.display());
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    logging::init(&config.logging);

    let store = build_store(&config)?;
    store.initialize().await;

    match cli.command {
        Commands::Signup {
            username,
            email,
            password,
        } => {
            let mut form = LoginForm::new(AuthMode::SignUp);
            form.username = username;
            form.email = email;
            form.password = password;
            form.submit(&store).await.context("sign-up failed")?;
            print_status(&store);
        }

        Commands::Login { email, password } => {
            let mut form = LoginForm::new(AuthMode::Login);
            form.email = email;
            form.password = password;
            form.submit(&store).await.context("login failed")?;
            print_status(&store);
        }

        Commands::Logout => {
            store.logout();
            println!("Signed out");
        }

        Commands::Status => print_status(&store),

        Commands::Dashboard => {
            require_user(&store)?;
            let state = store.snapshot();
            let summary = state.summary(today());

            println!("Today ({})", summary.day);
            println!("  Eaten:   {} kcal", summary.consumed);
            println!("  Burned:  {} kcal", summary.burned);
            println!("  Net:     {} kcal", summary.net);
            println!("  Active:  {} min", summary.active_minutes);
            for (meal, calories) in &summary.by_meal {
                println!("  {:<10} {} kcal", meal.to_string(), calories);
            }
            if !state.onboarding_completed() {
                println!("Complete your profile with `healthlog profile --age --weight --goal`");
            }
        }

        Commands::Food { command } => {
            require_user(&store)?;
            match command {
                FoodCommand::Add {
                    name,
                    calories,
                    meal,
                } => {
                    let mut form = FoodForm::new();
                    form.quick_add(meal);
                    form.name = name;
                    form.calories = calories;
                    let entry = form.submit(&store).await?;
                    println!("Logged {} ({} kcal, {})", entry.name, entry.calories, entry.meal_type);
                }
                FoodCommand::List { all } => {
                    let state = store.snapshot();
                    let entries = if all {
                        state.food_entries.iter().collect()
                    } else {
                        state.food_on(today())
                    };
                    if entries.is_empty() {
                        println!("No food logged yet");
                    }
                    for entry in &entries {
                        println!(
                            "{}  {:<10} {:<30} {:>5} kcal",
                            entry.created_at.format("%Y-%m-%d %H:%M"),
                            entry.meal_type.to_string(),
                            entry.name,
                            entry.calories
                        );
                    }
                    println!("Total: {} kcal", total_calories(entries.iter().copied()));
                }
            }
        }

        Commands::Activity { command } => match command {
            ActivityCommand::Catalog => {
                for activity in QUICK_ACTIVITIES {
                    println!("{} {:<16} {} kcal/min", activity.emoji, activity.name, activity.rate);
                }
            }
            ActivityCommand::Add {
                name,
                duration,
                calories,
            } => {
                require_user(&store)?;
                let mut form = ActivityForm::new();
                form.name = name;
                form.set_duration(duration);
                if let Some(calories) = calories {
                    form.calories = calories;
                }
                log_activity(&store, &mut form).await?;
            }
            ActivityCommand::Quick { name, duration } => {
                require_user(&store)?;
                let Some(activity) = quick_activity(&name) else {
                    let names: Vec<&str> = QUICK_ACTIVITIES.iter().map(|a| a.name).collect();
                    bail!("unknown quick activity {:?}; choose one of: {}", name, names.join(", "));
                };
                let mut form = ActivityForm::new();
                form.quick_add(activity);
                if let Some(duration) = duration {
                    form.set_duration(duration);
                }
                log_activity(&store, &mut form).await?;
            }
            ActivityCommand::List { all } => {
                require_user(&store)?;
                let state = store.snapshot();
                let entries = if all {
                    state.activity_entries.iter().collect()
                } else {
                    state.activities_on(today())
                };
                if entries.is_empty() {
                    println!("No activities yet");
                }
                for entry in &entries {
                    println!(
                        "{}  {:<20} {:>4} min {:>5} kcal",
                        entry.created_at.format("%Y-%m-%d %H:%M"),
                        entry.name,
                        entry.duration,
                        entry.calories
                    );
                }
                println!("Active: {} min", total_minutes(entries.iter().copied()));
            }
        },

        Commands::Profile { age, weight, goal } => {
            require_user(&store)?;
            let update = ProfileUpdate { age, weight, goal };
            if !update.is_empty() {
                store.update_profile(&update).await?;
            }

            let state = store.snapshot();
            if let Some(user) = &state.current_user {
                println!("{} <{}>", user.username, user.email);
                println!("  Age:    {}", display_or_dash(user.age));
                println!("  Weight: {}", display_or_dash(user.weight));
                println!("  Goal:   {}", display_or_dash(user.goal));
                println!("  Onboarding complete: {}", state.onboarding_completed());
            }
        }

        Commands::Config { .. } => unreachable!("handled before the store is built"),
    }

    Ok(())
}

fn build_store(config: &Config) -> anyhow::Result<Store> {
    let gateway: Arc<dyn Gateway> = match config.gateway.mode {
        GatewayMode::Mock => {
            let gateway = match &config.gateway.mock_data_file {
                Some(path) => MockGateway::open(path)
                    .with_context(|| format!("failed to open mock data file {}", path))?,
                None => MockGateway::new(),
            };
            Arc::new(gateway.with_latency(config.gateway.mock_latency()))
        }
        GatewayMode::Http => Arc::new(HttpGateway::new(
            config.gateway.base_url.as_str(),
            config.gateway.request_timeout(),
        )?),
    };

    tracing::debug!(mode = ?config.gateway.mode, session_file = %config.session.file, "Building store");
    let session = Arc::new(FileSessionStore::new(&config.session.file));
    Ok(Store::new(gateway, session))
}

fn require_user(store: &Store) -> anyhow::Result<()> {
    if !store.snapshot().is_authenticated() {
        bail!("not signed in; run `healthlog login` or `healthlog signup` first");
    }
    Ok(())
}

async fn log_activity(store: &Store, form: &mut ActivityForm) -> anyhow::Result<()> {
    let entry = form.submit(store).await?;
    println!(
        "Logged {} ({} min, {} kcal)",
        entry.name, entry.duration, entry.calories
    );
    Ok(())
}

fn print_status(store: &Store) {
    let state = store.snapshot();
    match &state.current_user {
        Some(user) => {
            println!("Signed in as {} <{}>", user.username, user.email);
            println!("Onboarding complete: {}", state.onboarding_completed());
        }
        None => println!("Not signed in"),
    }
}

fn display_or_dash<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
