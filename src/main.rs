use anyhow::Context;
use chrono::Local;
use clap::Parser;
use solar_quote::adapters::register::Register;
use solar_quote::app;
use solar_quote::config::{AppConfig, CliConfig, Command, GenerateArgs, DEFAULT_CONFIG_FILE};
use solar_quote::core::numerals::format_thousands;
use solar_quote::core::sequence::format_reference;
use solar_quote::domain::model::{Capacity, GenerationOutcome};
use solar_quote::utils::error::{ErrorSeverity, QuoteError};
use solar_quote::utils::{logger, validation::Validate};
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting solar-quote");
    if cli.verbose {
        tracing::debug!("CLI command: {:?}", cli.command);
    }

    let config = load_config(cli.config.as_deref())?;

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let result = app::authenticate(&config, cli.username.as_deref(), cli.password.as_deref())
        .and_then(|()| run(&cli.command, &config));

    if let Err(e) = result {
        // 記錄詳細錯誤信息
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建議: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2, // 輸入錯誤
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3, // 儲存錯誤
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn load_config(path: Option<&str>) -> anyhow::Result<AppConfig> {
    match path {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            AppConfig::from_file(path)
                .with_context(|| format!("Failed to load config file '{}'", path))
        }
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            tracing::info!("📁 Loading configuration from: {}", DEFAULT_CONFIG_FILE);
            AppConfig::from_file(DEFAULT_CONFIG_FILE)
                .with_context(|| format!("Failed to load config file '{}'", DEFAULT_CONFIG_FILE))
        }
        None => {
            tracing::debug!("No configuration file, using built-in defaults");
            Ok(AppConfig::default())
        }
    }
}

fn run(command: &Command, config: &AppConfig) -> Result<(), QuoteError> {
    match command {
        Command::Quote { capacity } => {
            display_quote(config, *capacity);
            Ok(())
        }
        Command::Generate(args) => generate(config, args),
        Command::Counters => display_counters(config),
        Command::History => display_history(config),
    }
}

fn display_quote(config: &AppConfig, capacity: Capacity) {
    let quotation = app::build_engine(config).quote(capacity);

    println!("📋 {}", config.business.title);
    println!("  Capacity: {} kW", quotation.capacity);
    println!("  Phase: {}", quotation.phase);
    println!("  Total Amount: ₹{}", format_thousands(quotation.total_amount));
    println!("  {}", quotation.amount_in_words);
}

fn generate(config: &AppConfig, args: &GenerateArgs) -> Result<(), QuoteError> {
    let details = args.customer_details();
    let now = match args.date {
        Some(date) => date.and_time(Local::now().time()),
        None => Local::now().naive_local(),
    };

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - counters and output directory are left untouched");
        let engine = app::build_dry_run_engine(config)?;
        let outcome = engine.generate(&details, now)?;
        display_outcome(&outcome, true);
        return Ok(());
    }

    let engine = app::build_engine(config);
    let outcome = engine.generate(&details, now)?;

    tracing::info!("✅ Documents generated successfully");
    display_outcome(&outcome, false);

    println!();
    println!("---");
    println!("{}", config.business.footer);
    Ok(())
}

fn display_outcome(outcome: &GenerationOutcome, dry_run: bool) {
    if dry_run {
        println!("🔍 Dry Run - nothing was written:");
    } else {
        println!("✅ Documents generated successfully");
    }
    println!("  Reference No: {}", outcome.reference_no);
    println!("  Agreement No: {}", outcome.agreement_no);
    println!("  Phase: {}", outcome.quotation.phase);
    println!(
        "  Total Amount: ₹{}",
        format_thousands(outcome.quotation.total_amount)
    );
    println!("  {}", outcome.quotation.amount_in_words);

    for document in &outcome.documents {
        if dry_run {
            println!("  📄 {}: {} ({} bytes)", document.kind, document.file_name, document.size);
        } else {
            println!("  📁 {}: {}", document.kind, document.location);
        }
    }

    println!("  📲 Share on WhatsApp: {}", outcome.share_link);
}

fn display_counters(config: &AppConfig) -> Result<(), QuoteError> {
    let sequences = [
        ("Invoice", config.invoice_counter_path(), app::invoice_sequence(config)),
        ("Agreement", config.agreement_counter_path(), app::agreement_sequence(config)),
    ];

    for (label, path, sequence) in sequences {
        let counters = sequence.snapshot()?;
        println!("🔢 {} counters ({}):", label, path.display());
        if counters.is_empty() {
            println!("  (none issued)");
        }
        for (period, count) in counters {
            println!("  {} → {}", period, format_reference(sequence.prefix(), &period, count));
        }
    }
    Ok(())
}

fn display_history(config: &AppConfig) -> Result<(), QuoteError> {
    let register = Register::new(config.register_path());
    let entries = register.entries()?;

    if entries.is_empty() {
        println!("No documents generated yet ({})", register.path().display());
        return Ok(());
    }

    println!("📋 {} generated document sets:", entries.len());
    for entry in entries {
        println!(
            "  {}  {}  {}  {}  {}  ₹{}",
            entry.generated_at,
            entry.reference_no,
            entry.agreement_no,
            entry.customer_name,
            entry.capacity,
            format_thousands(entry.total_amount)
        );
    }
    Ok(())
}
