//! Cybertarot CLI entry point

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use eyre::{Context, Result};
use tracing::info;

use cybertarot::catalog::Catalog;
use cybertarot::cli::{Cli, Command, OutputFormat};
use cybertarot::config::Config;
use cybertarot::relay::{HttpRelayClient, RelayClient};
use cybertarot::session::{DrawEngine, Interpreter, ReadingSession, SPREAD_SIZE};

fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cybertarot")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Setup tracing subscriber - write to log file, not stdout/stderr
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("cybertarot.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    config.validate()?;

    info!(
        "Cybertarot loaded config: endpoint={}, catalog={}",
        config.relay.endpoint,
        config.catalog.path.display()
    );

    match cli.command {
        Some(Command::Read {
            question,
            seed,
            show_reference,
        }) => cmd_read(&config, question, seed, show_reference).await,
        Some(Command::Cards { format }) => cmd_cards(&config, format),
        None => {
            // Default: print help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
            Ok(())
        }
    }
}

/// Run one full reading
async fn cmd_read(config: &Config, question: Option<String>, seed: Option<u64>, show_reference: bool) -> Result<()> {
    // The catalog must load before any draw/flip/generation action is possible
    let catalog = Catalog::load(&config.catalog.path).with_context(|| {
        format!(
            "Failed to load card catalog from {}",
            config.catalog.path.display()
        )
    })?;

    let question = match question {
        Some(q) => q,
        None => prompt_question()?,
    };

    let mut engine = match seed {
        Some(seed) => DrawEngine::seeded(seed, config.draw.reversed_probability),
        None => DrawEngine::new(config.draw.reversed_probability),
    };

    let mut session = ReadingSession::new();
    let phase = session.submit_question(&question, &mut engine, &catalog)?;
    if session.drawn_cards().is_empty() {
        println!("请先输入一个想要占卜的问题。");
        return Ok(());
    }
    info!(?phase, "Session started");

    // Flip the three cards in order, revealing each as the web app does
    println!();
    println!("你的牌阵");
    println!("--------");
    for position in 0..SPREAD_SIZE {
        session.flip_card(position)?;
        let card = &session.drawn_cards()[position];
        let entry = catalog
            .get(&card.id)
            .ok_or_else(|| eyre::eyre!("Drawn card '{}' is missing from the catalog", card.id))?;
        println!("第{}张牌：{}（{}）", position + 1, entry.name, card.orientation.label_cn());
    }
    println!();

    let relay: Arc<dyn RelayClient> =
        Arc::new(HttpRelayClient::from_config(&config.relay).context("Failed to create relay client")?);
    let interpreter = Interpreter::new(relay)?;

    println!("大师正在解读你的命运矩阵...");
    println!();
    interpreter
        .generate(&catalog, &mut session)
        .await
        .context("Interpretation failed; the reading is incomplete")?;

    println!("千问占卜");
    println!("--------");
    println!("{}", session.answer());

    if show_reference {
        println!();
        println!("关于你抽到的塔罗牌");
        println!("------------------");
        for card in session.drawn_cards() {
            let entry = catalog
                .get(&card.id)
                .ok_or_else(|| eyre::eyre!("Drawn card '{}' is missing from the catalog", card.id))?;
            let side = entry.side(card.orientation);
            println!();
            println!("{}（{}）", entry.name, card.orientation.label_cn());
            println!("关键词：{}", side.keywords.join(","));
            println!("{}", side.full);
        }
    }

    Ok(())
}

/// Prompt for the question interactively
fn prompt_question() -> Result<String> {
    let mut editor = rustyline::DefaultEditor::new().context("Failed to open terminal input")?;
    let line = editor
        .readline("你想要占卜的问题 > ")
        .context("Failed to read question")?;
    Ok(line)
}

/// List the catalog
fn cmd_cards(config: &Config, format: OutputFormat) -> Result<()> {
    let catalog = Catalog::load(&config.catalog.path).with_context(|| {
        format!(
            "Failed to load card catalog from {}",
            config.catalog.path.display()
        )
    })?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&catalog)?);
        }
        OutputFormat::Text => {
            println!("卡牌目录（{} 张）", catalog.len());
            println!("----------------");
            for (id, entry) in catalog.iter() {
                println!();
                println!("{} [{}]", entry.name, id);
                println!("  正位：{}", entry.upright.keywords.join(","));
                println!("  逆位：{}", entry.reversed.keywords.join(","));
            }
        }
    }

    Ok(())
}
