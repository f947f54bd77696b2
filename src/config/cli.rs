use crate::domain::model::{Capacity, CustomerDetails, Witness};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "solar-quote")]
#[command(about = "Solar installation quotation, invoice and agreement generator")]
pub struct CliConfig {
    /// Path to TOML configuration file (defaults to ./solar-quote.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, global = true)]
    pub username: Option<String>,

    #[arg(long, global = true, env = "SOLAR_QUOTE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show phase, total and amount in words for a capacity
    Quote {
        #[arg(long, help = "System capacity in kW (3, 4.5, 5 or 10)")]
        capacity: Capacity,
    },
    /// Issue numbers and generate the invoice and agreement documents
    Generate(GenerateArgs),
    /// Show the invoice and agreement counters
    Counters,
    /// List previously generated documents
    History,
}

#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    #[arg(long, default_value = "")]
    pub address: String,

    #[arg(long, default_value = "", help = "APDCL consumer number")]
    pub consumer_no: String,

    #[arg(long, default_value = "")]
    pub subdivision: String,

    #[arg(long, help = "System capacity in kW (3, 4.5, 5 or 10)")]
    pub capacity: Capacity,

    #[arg(long, default_value = "")]
    pub w1_name: String,

    #[arg(long, default_value = "")]
    pub w1_phone: String,

    #[arg(long, default_value = "")]
    pub w2_name: String,

    #[arg(long, default_value = "")]
    pub w2_phone: String,

    /// Document date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Show what would be issued without touching counters or writing files
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateArgs {
    pub fn customer_details(&self) -> CustomerDetails {
        CustomerDetails {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.clone(),
            consumer_no: self.consumer_no.clone(),
            subdivision: self.subdivision.clone(),
            capacity: self.capacity,
            first_witness: Witness {
                name: self.w1_name.clone(),
                phone: self.w1_phone.clone(),
            },
            second_witness: Witness {
                name: self.w2_name.clone(),
                phone: self.w2_phone.clone(),
            },
        }
    }
}
