//! Churn CLI
//!
//! Terminal front end for the churn-prediction backend:
//! - Render the full dashboard
//! - List high-risk customers (table, CSV, JSON)
//! - Score a customer live
//! - Check backend status
//! - Generate a default config file

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use churn_dashboard::client::{ApiClient, HttpTransport};
use churn_dashboard::config::{generate_default_config, Config};
use churn_dashboard::dashboard::Dashboard;
use churn_dashboard::predict::{PredictionForm, SubmitButton};
use churn_dashboard::report;
use churn_dashboard::view::ViewState;

#[derive(Parser)]
#[command(name = "churn")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Churn intelligence dashboard in the terminal")]
#[command(long_about = "Reads KPIs, segment churn, risk distribution, high-risk customers and model metrics\nfrom a churn-prediction backend, and scores customers live.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend base URL (overrides config and CHURN_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load every widget and print the dashboard
    Dashboard {
        #[arg(short, long, value_enum, default_value_t = DashboardFormat::Table)]
        format: DashboardFormat,
    },

    /// List high-risk customers
    Customers {
        #[arg(short, long, value_enum, default_value_t = CustomerFormat::Table)]
        format: CustomerFormat,
    },

    /// Score a customer with the live model
    Predict {
        #[arg(long)]
        customer_id: Option<String>,
        /// Annual revenue
        #[arg(long)]
        revenue: Option<String>,
        #[arg(long)]
        monthly_charges: Option<String>,
        /// Tenure in months
        #[arg(long)]
        tenure: Option<String>,
        #[arg(long)]
        gender: Option<String>,
        /// Senior citizen (Yes/No)
        #[arg(long)]
        seniorcitizen: Option<String>,
        /// Contract type (Month-to-month, One year, Two year)
        #[arg(long)]
        contract: Option<String>,
        /// Extra form fields in key=value format
        #[arg(short = 'F', long = "field")]
        fields: Vec<String>,
    },

    /// Check that the backend is reachable
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DashboardFormat {
    Table,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum CustomerFormat {
    Table,
    Csv,
    Json,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = Some(url);
    }

    churn_dashboard::logging::init(&config.logging);

    let transport = HttpTransport::from_config(&config.api);
    let base = transport.base().to_string();
    let dashboard =
        Dashboard::new(ApiClient::new(transport), ViewState::new()).with_config(&config.dashboard);

    match cli.command {
        Commands::Dashboard { format } => {
            let load = dashboard.load_all().await;
            print_notices(dashboard.sink());

            if load.loaded.is_empty() {
                bail!("Cannot reach the churn backend at {}", base);
            }

            let view = dashboard.sink().snapshot();
            match format {
                DashboardFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
                DashboardFormat::Table => print!("{}", report::render_dashboard(&view)),
            }
        }

        Commands::Customers { format } => {
            let customers = dashboard
                .fetch_high_risk_customers()
                .await
                .with_context(|| format!("Failed to load customers from {}", base))?;

            match format {
                CustomerFormat::Json => println!("{}", serde_json::to_string_pretty(&customers)?),
                CustomerFormat::Csv => {
                    let mut writer = csv::Writer::from_writer(std::io::stdout());
                    for customer in &customers {
                        writer.serialize(customer)?;
                    }
                    writer.flush()?;
                }
                CustomerFormat::Table => {
                    if let Some(table) = dashboard.sink().snapshot().customers {
                        print!("{}", report::render_customers(&table));
                    }
                }
            }
        }

        Commands::Predict {
            customer_id,
            revenue,
            monthly_charges,
            tenure,
            gender,
            seniorcitizen,
            contract,
            fields,
        } => {
            let mut form = PredictionForm::new();
            let named = [
                ("customer_id", customer_id),
                ("revenue", revenue),
                ("monthly_charges", monthly_charges),
                ("tenure", tenure),
                ("gender", gender),
                ("seniorcitizen", seniorcitizen),
                ("contract", contract),
            ];
            for (name, value) in named {
                if let Some(value) = value {
                    form.set(name, value);
                }
            }
            for field in fields {
                match field.split_once('=') {
                    Some((name, value)) => form.set(name.trim(), value),
                    None => bail!("Invalid field {:?}, expected key=value", field),
                }
            }

            let button = SubmitButton::default();
            let outcome = dashboard.submit_prediction(&form, &button).await;
            print_notices(dashboard.sink());
            outcome?;

            let view = dashboard.sink().snapshot();
            if let Some(prediction) = &view.prediction {
                print!("{}", report::render_prediction(prediction));
            }
            if let Some(kpis) = &view.kpis {
                println!();
                println!(
                    "Portfolio now: {} at risk of {} (churn rate {})",
                    kpis.revenue_at_risk, kpis.total_revenue, kpis.churn_rate
                );
            }
        }

        Commands::Status => match dashboard.client().health().await {
            Ok(health) => {
                println!("Churn dashboard v{}", env!("CARGO_PKG_VERSION"));
                println!();
                println!("Backend: {}", base);
                println!("Status: {}", health.status);
            }
            Err(e) => {
                eprintln!("Cannot connect to the churn backend at {}", base);
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, &content)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Wrote default config to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn print_notices(state: &ViewState) {
    for notice in state.take_notices() {
        eprintln!("{}", notice.message);
    }
}
