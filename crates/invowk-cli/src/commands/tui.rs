//! `invowk tui` — operate the TUI sidecar directly for manual testing.
//! `serve` starts a server and auto-answers prompts so the request/response
//! plumbing can be exercised without a real terminal front-end; `probe`
//! drives an already-running sidecar as a client.

use crate::errors_ext::ActionableResultExt;
use crate::output::Output;
use anyhow::Context;
use clap::{Args, Subcommand};
use invowk_tui::{
    ChooseRequest, ConfirmRequest, InputRequest, TuiClient, TuiServer, ADDR_ENV_VAR, TOKEN_ENV_VAR,
};

#[derive(Debug, Args)]
pub struct TuiArgs {
    #[command(subcommand)]
    pub action: TuiAction,
}

#[derive(Debug, Subcommand)]
pub enum TuiAction {
    /// Start a sidecar server and auto-answer the first prompt, then exit.
    Serve {
        /// Stop after answering a single prompt instead of serving forever.
        #[arg(long)]
        once: bool,
    },
    /// Send one prompt to an already-running sidecar (env-discovered, or
    /// via --addr/--token) and print the result.
    Probe {
        #[arg(long)]
        addr: Option<String>,

        #[arg(long)]
        token: Option<String>,

        /// Prompt title.
        #[arg(long, default_value = "confirm?")]
        title: String,
    },
}

pub fn run(args: TuiArgs) -> anyhow::Result<()> {
    match args.action {
        TuiAction::Serve { once } => run_serve(once),
        TuiAction::Probe { addr, token, title } => run_probe(addr, token, title),
    }
}

fn run_serve(once: bool) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build the tui server's tokio runtime")?;

    runtime.block_on(async {
        let mut server = TuiServer::new();
        let mut queue = server.start().await.map_err(|err| anyhow::anyhow!(err.to_string()))?;

        Output::success("tui sidecar started");
        Output::kv("addr", server.url().unwrap_or_default());
        Output::kv(ADDR_ENV_VAR, server.url().unwrap_or_default());
        Output::kv(TOKEN_ENV_VAR, server.token().unwrap_or_default().to_string());

        loop {
            let Some((request, respond)) = queue.recv().await else {
                break;
            };
            Output::info(format!("received '{}' prompt", request.component));
            let response = invowk_tui::Response::ok(serde_json::json!({
                "confirmed": true,
                "value": "auto-answer",
                "selected": "auto-answer",
            }));
            let _ = respond.send(response);
            if once {
                break;
            }
        }

        server.stop();
        Ok(())
    })
}

fn run_probe(addr: Option<String>, token: Option<String>, title: String) -> anyhow::Result<()> {
    let client = match (addr, token) {
        (Some(addr), Some(token)) => TuiClient::with(addr, token),
        _ => TuiClient::from_environment().ok_or_else(|| {
            anyhow::anyhow!(
                "no sidecar address/token: set {ADDR_ENV_VAR}/{TOKEN_ENV_VAR} or pass --addr/--token"
            )
        })?,
    };

    if !client.is_available() {
        anyhow::bail!("sidecar is not reachable");
    }

    let confirmed = client
        .confirm(ConfirmRequest {
            title: title.clone(),
            description: String::new(),
            affirmative: "Yes".to_string(),
            negative: "No".to_string(),
            default: true,
        })
        .actionable_on("probe tui confirm", title.clone())?;
    Output::kv("confirm result", confirmed.to_string());

    let value = client
        .input(InputRequest {
            title: format!("{title} (input)"),
            placeholder: String::new(),
            default: None,
        })
        .actionable_on("probe tui input", title.clone())?;
    Output::kv("input result", value);

    let choice = client
        .choose(ChooseRequest {
            title: format!("{title} (choose)"),
            options: vec!["a".to_string(), "b".to_string()],
            limit: 1,
            no_limit: false,
        })
        .actionable_on("probe tui choose", title)?;
    Output::kv("choose result", choice.join(", "));

    Ok(())
}
