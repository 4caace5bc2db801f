mod config;
mod error;

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};
use host::sampling::Content;
use host::{
    CallbackChannel, Dispatcher, InvocationArgs, InvocationContext, InvocationResult,
    SamplingEnvelope, SamplingRequest, SamplingResponse,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use config::Config;
use error::{Error, Result};

const CONFIG_FILE: &str = "davit.toml";

#[derive(Parser)]
#[command(name = "davit")]
#[command(about = "A demonstration tool-invocation host", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the tools the host advertises
    Tools,
    /// Invoke a tool once and print the result envelope
    Invoke {
        /// Tool name
        name: String,
        /// Arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,
    },
    /// Start an interactive invocation loop
    Repl,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(CONFIG_FILE)?;
    let registry = toolbox::default_registry(config.session.documents_dir.clone())?;
    let dispatcher = Dispatcher::new(registry);

    match cli.command {
        Some(Commands::Tools) => cmd_tools(&dispatcher),
        Some(Commands::Invoke { name, args }) => cmd_invoke(&dispatcher, &config, &name, &args).await,
        Some(Commands::Repl) | None => cmd_repl(&dispatcher, &config).await,
    }
}

fn cmd_tools(dispatcher: &Dispatcher) -> Result<()> {
    for descriptor in dispatcher.list_tools() {
        println!("{}", descriptor.name);
        println!("  {}", descriptor.description);
        for param in &descriptor.params {
            let requirement = if param.required { "required" } else { "optional" };
            println!("  - {} ({}, {})", param.name, param.kind.type_name(), requirement);
        }
        println!();
    }
    Ok(())
}

async fn cmd_invoke(
    dispatcher: &Dispatcher,
    config: &Config,
    name: &str,
    raw_args: &str,
) -> Result<()> {
    let args = parse_args(raw_args)?;

    let result = if config.session.sampling {
        let (channel, rx) = CallbackChannel::pair();
        let cx = InvocationContext::with_callback(CancellationToken::new(), channel);
        let responder = tokio::spawn(respond_with_digest(rx));
        let result = dispatcher.invoke(name, args, &cx).await;
        drop(cx);
        responder.await.ok();
        result
    } else {
        let cx = InvocationContext::new(CancellationToken::new());
        dispatcher.invoke(name, args, &cx).await
    };

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn cmd_repl(dispatcher: &Dispatcher, config: &Config) -> Result<()> {
    println!("davit repl — 'tools' lists tools, 'quit' exits.");
    println!("usage: <tool-name> [json-arguments]\n");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }
        if line == "tools" {
            cmd_tools(dispatcher)?;
            continue;
        }

        let (name, raw_args) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, "{}"),
        };

        match invoke_line(dispatcher, config, name, raw_args).await {
            Ok(result) => print_result(&result),
            Err(e) => eprintln!("Error: {e}\n"),
        }
    }
    Ok(())
}

/// Run one invocation, answering sampling requests interactively while
/// it is in flight.
async fn invoke_line(
    dispatcher: &Dispatcher,
    config: &Config,
    name: &str,
    raw_args: &str,
) -> Result<InvocationResult> {
    let args = parse_args(raw_args)?;

    if !config.session.sampling {
        let cx = InvocationContext::new(CancellationToken::new());
        return Ok(dispatcher.invoke(name, args, &cx).await);
    }

    let (channel, mut rx) = CallbackChannel::pair();
    let cx = InvocationContext::with_callback(CancellationToken::new(), channel);
    let mut invocation = Box::pin(dispatcher.invoke(name, args, &cx));

    let mut sampling_open = true;
    loop {
        tokio::select! {
            result = &mut invocation => return Ok(result),
            envelope = rx.recv(), if sampling_open => {
                match envelope {
                    Some(envelope) => answer_interactively(envelope)?,
                    None => sampling_open = false,
                }
            }
        }
    }
}

fn parse_args(raw: &str) -> Result<InvocationArgs> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| Error::Args(e.to_string()))?;
    Ok(InvocationArgs::try_from(value)?)
}

/// Show a sampling request and read the caller's reply from stdin.
fn answer_interactively(envelope: SamplingEnvelope) -> Result<()> {
    println!("-- sampling request from invocation {} --", envelope.correlation_id);
    if let Some(prompt) = &envelope.request.system_prompt {
        println!("system: {prompt}");
    }
    for message in &envelope.request.messages {
        match &message.content {
            Content::Text { text } => println!("  text: {text}"),
            Content::Image { mime_type, data } => {
                println!("  attachment: {mime_type} ({} base64 bytes)", data.len());
            }
        }
    }

    print!("reply> ");
    io::stdout().flush()?;

    let mut reply = String::new();
    io::stdin().lock().read_line(&mut reply)?;
    let _ = envelope.reply.send(SamplingResponse::text(reply.trim()));
    Ok(())
}

/// Answer sampling requests with a deterministic digest of the
/// submitted messages, standing in for a remote caller in one-shot mode.
async fn respond_with_digest(mut rx: mpsc::Receiver<SamplingEnvelope>) {
    while let Some(envelope) = rx.recv().await {
        let reply = SamplingResponse::text(digest(&envelope.request));
        let _ = envelope.reply.send(reply);
    }
}

fn digest(request: &SamplingRequest) -> String {
    let snippets: Vec<String> = request
        .messages
        .iter()
        .filter_map(|m| m.content.as_text())
        .map(|text| text.chars().take(48).collect())
        .collect();

    format!(
        "[summary of {} message(s)] {}",
        request.messages.len(),
        snippets.join(" | ")
    )
}

fn print_result(result: &InvocationResult) {
    match result {
        InvocationResult::Success { payload } => match payload {
            serde_json::Value::String(text) => println!("{text}\n"),
            other => {
                let rendered =
                    serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string());
                println!("{rendered}\n");
            }
        },
        InvocationResult::Failure { error } => println!("failed: {error}\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use host::SamplingMessage;

    #[test]
    fn digest_covers_text_messages_only() {
        let request = SamplingRequest::new()
            .with_message(SamplingMessage::user(Content::text("first email body")))
            .with_message(SamplingMessage::user(Content::image("aGk=", "image/png")));

        let summary = digest(&request);
        assert!(summary.contains("2 message(s)"));
        assert!(summary.contains("first email body"));
        assert!(!summary.contains("aGk="));
    }

    #[test]
    fn parse_args_rejects_non_objects() {
        assert!(parse_args("{}").is_ok());
        assert!(parse_args(r#"{"city": "Boston"}"#).is_ok());
        assert!(parse_args("[1,2]").is_err());
        assert!(parse_args("not json").is_err());
    }
}
