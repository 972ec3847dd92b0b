mod config;
mod converters;
mod error;
mod llm_client;
mod logging;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use config::Config;
use error::ConfigError;
use llm_client::LlmClient;
use std::ffi::OsString;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "gemini-ask")]
#[command(about = "Ask Gemini a single question and print the answer")]
struct Args {
    /// question to ask
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    ques: OsString,

    /// Env file holding API_KEY
    #[arg(long, default_value = ".env")]
    env_file: String,

    /// Optional YAML file with api_base and model
    #[arg(short, long)]
    config: Option<String>,

    /// Overrides api_base from the config file
    #[arg(long)]
    api_base: Option<String>,

    /// Overrides model from the config file
    #[arg(long)]
    model: Option<String>,

    /// trace, debug, info, warn, error
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// socks and http proxy, example: socks5://192.168.0.2:10080
    #[arg(long)]
    proxy: Option<String>,
}

/// Accept single dash long flags (`-ques foo`, `-ques=foo`) by
/// rewriting them to their `--` form. Short flags are untouched, and so is
/// the token that follows any flag expecting a value, whatever it looks like.
fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let command = Args::command();
    let longs: Vec<&str> = command.get_arguments().filter_map(|a| a.get_long()).collect();
    let value_longs: Vec<&str> = command
        .get_arguments()
        .filter(|a| a.get_action().takes_values())
        .filter_map(|a| a.get_long())
        .collect();
    let value_shorts: Vec<char> = command
        .get_arguments()
        .filter(|a| a.get_action().takes_values())
        .filter_map(|a| a.get_short())
        .collect();

    let mut out = Vec::new();
    let mut passthrough = false;
    let mut value_next = false;
    for (i, arg) in args.into_iter().enumerate() {
        let arg: OsString = arg.into();
        if i == 0 || passthrough || value_next {
            value_next = false;
            out.push(arg);
            continue;
        }
        // Non UTF-8 tokens can never be flag names.
        let Some(text) = arg.to_str() else {
            out.push(arg);
            continue;
        };
        if text == "--" {
            passthrough = true;
            out.push(arg);
            continue;
        }

        let mut rewritten = None;
        if let Some(rest) = text.strip_prefix("--") {
            let name = rest.split('=').next().unwrap_or(rest);
            value_next = !rest.contains('=') && value_longs.contains(&name);
        } else if let Some(rest) = text.strip_prefix('-') {
            let name = rest.split('=').next().unwrap_or(rest);
            if name.len() > 1 && longs.contains(&name) {
                rewritten = Some(OsString::from(format!("-{}", text)));
                value_next = !rest.contains('=') && value_longs.contains(&name);
            } else if rest.chars().count() == 1 {
                value_next = rest.chars().next().is_some_and(|c| value_shorts.contains(&c));
            }
        }
        out.push(rewritten.unwrap_or(arg));
    }
    out
}

fn build_http_client(proxy: Option<&str>) -> anyhow::Result<reqwest::Client> {
    let client_builder = reqwest::Client::builder();
    let client_builder = if let Some(proxy) = proxy {
        let proxy = reqwest::Proxy::all(proxy).map_err(|source| ConfigError::Proxy {
            proxy: proxy.to_string(),
            source,
        })?;
        client_builder.proxy(proxy)
    } else {
        client_builder
    };
    client_builder.build().context("Error building HTTP client")
}

async fn run(args: Args) -> anyhow::Result<String> {
    config::load_env_file(&args.env_file)?;
    let api_key = config::api_key()?;

    let config = match &args.config {
        Some(path) => {
            let config = Config::from_file(path)?;
            info!("Configuration loaded successfully from: {}", path);
            config
        }
        None => Config::default(),
    };
    let config = config.with_overrides(args.api_base, args.model);

    let http_client = build_http_client(args.proxy.as_deref())?;
    let llm_client = LlmClient::new(http_client, config);

    // Invalid UTF-8 in the question is replaced rather than rejected.
    let question = args.ques.to_string_lossy();
    let answer = llm_client
        .ask(&question, &api_key)
        .await
        .context("Error asking question")?;
    Ok(answer)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse_from(normalize_args(std::env::args_os()));

    logging::init_logging(logging::parse_level(&args.log_level));

    match run(args).await {
        Ok(answer) => {
            println!("Response: {}", answer);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
