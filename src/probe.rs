use std::time::Duration;

use anyhow::Context;
use futures::{SinkExt, Stream, StreamExt};
use reqwest::Url;
use tokio::time::timeout;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{self, Message};

use crate::config::Config;
use crate::jsonrpc::SubscribeRequest;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// How a completed probe ended.
///
/// Both variants mean the endpoint accepted the connection and the
/// subscription request. An endpoint that stays silent past the reply
/// deadline is reported but does not fail the probe.
#[derive(Debug, PartialEq)]
pub enum ProbeOutcome {
    /// The endpoint replied within the deadline. Carries the raw reply text.
    Replied(String),
    /// No reply arrived within the deadline.
    TimedOut,
}

/// Runs one connect-subscribe-await exchange against the pubsub endpoint.
///
/// Errors out on any transport failure; a missing reply is not one.
pub async fn run(config: &Config) -> anyhow::Result<ProbeOutcome> {
    if let Some(rpc_url) = &config.rpc_url {
        report_rpc_health(rpc_url).await;
    }

    tracing::info!(url=%config.ws_url, "Connecting");

    let (ws_stream, _response) = timeout(
        config.connect_timeout,
        connect_async(config.ws_url.as_str()),
    )
    .await
    .context("Connection attempt timed out")?
    .context("Failed to connect")?;

    tracing::info!("Connection open");

    let (mut sender, mut receiver) = ws_stream.split();

    let request = SubscribeRequest::new(&config.signature).render()?;
    tracing::info!("Sending subscription request");
    sender
        .send(Message::Text(request))
        .await
        .context("Failed to send subscription request")?;

    match timeout(config.reply_timeout, next_reply(&mut receiver)).await {
        Ok(reply) => {
            let reply = reply?;
            tracing::info!(%reply, "Reply received");
            Ok(ProbeOutcome::Replied(reply))
        }
        Err(_elapsed) => {
            tracing::warn!(
                "No reply within {} seconds",
                config.reply_timeout.as_secs_f64()
            );
            Ok(ProbeOutcome::TimedOut)
        }
    }
}

/// Waits for the first data frame, skipping control frames the endpoint may
/// interleave before its reply.
async fn next_reply<S>(receiver: &mut S) -> anyhow::Result<String>
where
    S: Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
{
    loop {
        let message = receiver
            .next()
            .await
            .context("Connection closed before a reply arrived")?
            .context("Websocket error while awaiting the reply")?;

        match message {
            Message::Text(text) => return Ok(text),
            Message::Binary(bytes) => {
                return String::from_utf8(bytes).context("Reply is not valid UTF-8")
            }
            Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => continue,
            Message::Close(_) => anyhow::bail!("Endpoint closed the connection before replying"),
        }
    }
}

/// Queries the node's HTTP RPC health and logs the result. Failures are
/// swallowed; the websocket probe proceeds either way.
async fn report_rpc_health(rpc_url: &Url) {
    match get_health(rpc_url).await {
        Ok(health) => tracing::info!(%health, "RPC health"),
        Err(e) => tracing::warn!(url=%rpc_url, "RPC health check failed: {e:#}"),
    }
}

// curl -H 'Content-type: application/json' -d '{"jsonrpc":"2.0","id":1,"method":"getHealth"}' http://localhost:8899
async fn get_health(rpc_url: &Url) -> anyhow::Result<String> {
    let json: serde_json::Value = reqwest::ClientBuilder::new()
        .build()?
        .post(rpc_url.clone())
        .json(&serde_json::json!({"jsonrpc":"2.0","id":1,"method":"getHealth"}))
        .timeout(REQUEST_TIMEOUT)
        .send()
        .await?
        .json()
        .await?;

    json["result"]
        .as_str()
        .map(str::to_owned)
        .context("Response 'result' missing")
}
