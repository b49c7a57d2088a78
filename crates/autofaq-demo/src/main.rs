//! AutoFAQ Demo
//!
//! An interactive console chat against a seeded FAQ corpus. Type a
//! message to see whether the engine answers it; slash commands teach
//! the engine new examples, answers, and noise on the fly, and cast
//! votes that move the confidence gate.

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use autofaq_core::{ChannelId, FaqStore, IncomingMessage, MessageId, RESERVED_SHORT};
use autofaq_engine::{FaqRegistry, TopicConfig};
use autofaq_policy::{CheckOutcome, CreateOutcome, CreateRejection, CurationOutcome};

mod console;
mod seed;

use console::ConsolePlatform;

/// Channel id of the simulated chat
const CHANNEL: ChannelId = ChannelId(1);

#[derive(Parser, Debug)]
#[command(name = "autofaq-demo")]
#[command(about = "Interactive console chat against the AutoFAQ engine", long_about = None)]
struct Cli {
    /// Topic configuration file (YAML)
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Topic to start chatting in
    #[arg(short, long, default_value = "support")]
    topic: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => TopicConfig::from_file(path)?,
        None => TopicConfig::default(),
    };

    let store = seed::demo_store()?;
    let platform = Arc::new(ConsolePlatform::new());
    let registry =
        FaqRegistry::build(Arc::clone(&store) as Arc<dyn FaqStore>, platform, config).await?;

    info!(topics = registry.topics().len(), "Engines ready");

    if registry.get(&cli.topic).is_none() {
        anyhow::bail!(
            "unknown topic '{}'; available: {}",
            cli.topic,
            registry.topics().join(", ")
        );
    }

    print_help(&cli.topic);
    repl(&registry, store.as_ref(), cli.topic).await
}

async fn repl(registry: &FaqRegistry, store: &dyn FaqStore, mut topic: String) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut next_id: u64 = 1;
    let mut last_message: Option<IncomingMessage> = None;
    let mut last_reply: Option<MessageId> = None;

    loop {
        print_prompt(&topic)?;
        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break,
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(rest) = line.strip_prefix('/') {
            let mut parts = rest.splitn(2, char::is_whitespace);
            let command = parts.next().unwrap_or("");
            let argument = parts.next().unwrap_or("").trim();

            match command {
                "quit" | "exit" => break,
                "help" => print_help(&topic),
                "status" => print_status(registry, store, &topic)?,
                "topic" => {
                    if argument.is_empty() {
                        println!(
                            "   (current topic: {topic}; available: {})",
                            registry.topics().join(", ")
                        );
                    } else if registry.get(argument).is_some() {
                        topic = argument.to_string();
                        println!("   (switched to {topic})");
                    } else {
                        println!(
                            "   (unknown topic '{argument}'; available: {})",
                            registry.topics().join(", ")
                        );
                    }
                }
                "vote" => {
                    let delta = match argument {
                        "+" | "up" => 1,
                        "-" | "down" => -1,
                        _ => {
                            println!("usage: /vote + or /vote -");
                            continue;
                        }
                    };
                    match last_reply {
                        Some(reply) => {
                            registry.on_vote(reply, delta)?;
                            println!("   (vote recorded)");
                        }
                        None => println!("   (no answer to vote on yet)"),
                    }
                }
                "new" => match argument.split_once("::") {
                    Some((short, answer)) => {
                        let short = short.trim();
                        let answer = answer.trim();
                        if short.is_empty() || answer.is_empty() {
                            println!("usage: /new <short> :: <answer>");
                            continue;
                        }
                        let engine = match registry.get(&topic) {
                            Some(engine) => engine,
                            None => continue,
                        };
                        match engine.create_answer(answer, short, "you").await? {
                            CreateOutcome::Created { id } => println!(
                                "   (created entry {id} under '{short}'; teach it with /learn {short})"
                            ),
                            CreateOutcome::Rejected(CreateRejection::ReservedShort) => {
                                println!("   ('{short}' is reserved for noise)")
                            }
                            CreateOutcome::Rejected(CreateRejection::ShortTaken { answer }) => {
                                println!("   ('{short}' already answers: {answer})")
                            }
                            CreateOutcome::Rejected(CreateRejection::AnswerTaken { short }) => {
                                println!("   (that answer already lives under '{short}')")
                            }
                        }
                    }
                    None => println!("usage: /new <short> :: <answer>"),
                },
                "learn" | "ignore" => {
                    let token = if command == "ignore" {
                        RESERVED_SHORT
                    } else {
                        argument
                    };
                    if token.is_empty() {
                        println!("usage: /learn <short>  (files your previous message)");
                        continue;
                    }
                    let referenced = match &last_message {
                        Some(referenced) => referenced,
                        None => {
                            println!("   (no previous message to teach from)");
                            continue;
                        }
                    };
                    let engine = match registry.get(&topic) {
                        Some(engine) => engine,
                        None => continue,
                    };

                    let command_message =
                        IncomingMessage::new(MessageId(next_id), CHANNEL, "you", line);
                    next_id += 1;

                    match engine
                        .add_example_by_short(&command_message, referenced, token)
                        .await?
                    {
                        CurationOutcome::ExampleAdded { added: true, .. } => {
                            println!("   (example filed and model refitted)")
                        }
                        CurationOutcome::ExampleAdded { added: false, .. } => {
                            println!("   (that example was already known)")
                        }
                        CurationOutcome::NoiseRecorded => {
                            println!("   (filed as noise and model refitted)")
                        }
                        CurationOutcome::Ambiguous => {
                            println!("   (could not resolve that; check the short with /status)")
                        }
                    }
                }
                other => println!("Unknown command /{other}; try /help"),
            }
            continue;
        }

        let message = IncomingMessage::new(MessageId(next_id), CHANNEL, "you", line);
        next_id += 1;

        match registry.check_message(&topic, &message).await? {
            CheckOutcome::Answered {
                reply,
                confidence,
                threshold,
                ..
            } => {
                last_reply = Some(reply);
                println!(
                    "   (confidence {confidence:.3} cleared threshold {threshold:.3}; \
                     /vote + or /vote - rates the answer)"
                );
            }
            CheckOutcome::BelowThreshold {
                confidence,
                threshold,
                ..
            } => {
                println!(
                    "   (matched an entry at {confidence:.3}, below threshold {threshold:.3}; \
                     staying quiet)"
                );
            }
            CheckOutcome::Nonsense { confidence } => {
                println!("   (judged nonsense at {confidence:.3}; staying quiet)");
            }
            CheckOutcome::Rejected => {
                println!("   (not classified; staying quiet)");
            }
        }

        last_message = Some(message);
    }

    println!("bye");
    Ok(())
}

fn print_prompt(topic: &str) -> Result<()> {
    print!("{topic}> ");
    std::io::stdout().flush()?;
    Ok(())
}

fn print_help(topic: &str) {
    println!("Chatting in '{topic}'. Type a message, or:");
    println!("  /learn <short>            file your previous message as an example");
    println!("  /ignore                   file your previous message as noise");
    println!("  /new <short> :: <answer>  register a new answer");
    println!("  /vote + | /vote -         rate the last automatic answer");
    println!("  /topic [name]             show or switch the topic");
    println!("  /status                   corpus overview");
    println!("  /quit                     leave");
}

fn print_status(registry: &FaqRegistry, store: &dyn FaqStore, topic: &str) -> Result<()> {
    for name in registry.topics() {
        let trained = registry
            .get(&name)
            .map(|engine| engine.is_trained())
            .unwrap_or(false);
        let marker = if name == topic { "*" } else { " " };
        println!("{marker} {name} (trained: {trained})");

        for entry in store.entries(&name)? {
            println!(
                "    {}: {} ({} examples, {} up / {} down)",
                entry.short,
                entry.answer,
                entry.examples.len(),
                entry.votes.up,
                entry.votes.down
            );
        }
        println!("    nonsense examples: {}", store.nonsense(&name)?.len());
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("autofaq=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("autofaq=warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
