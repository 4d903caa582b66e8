use std::time::Duration;

use clap::Parser;
use reqwest::Url;

/// Placeholder transaction signature used as the subscription parameter.
///
/// The endpoint does not need to know the signature; the probe only checks
/// that the subscription request is accepted.
pub const DEFAULT_SIGNATURE: &str =
    "5VERv8NMvzbJMEkV8xnrLkEaWRtSz9CosKDYlCJjBRCN8FHXvVSs8h7oprNJfj6gJV26pEgJZNMAUh2tCgKHU9Sy";

#[derive(Debug, Parser)]
#[command(name = "pubsub-probe")]
#[command(about = "Checks that a JSON-RPC pubsub endpoint accepts a websocket subscription")]
struct Cli {
    #[arg(
        long = "ws-url",
        long_help = "Websocket URL of the pubsub endpoint to probe",
        value_name = "WS(S) URL",
        value_hint = clap::ValueHint::Url,
        default_value = "ws://localhost:8900",
        env = "PUBSUB_PROBE_WS_URL"
    )]
    ws_url: Url,

    #[arg(
        long = "signature",
        long_help = "Transaction signature to subscribe to. Any well-formed signature works; the probe only checks that the subscription request is accepted.",
        value_name = "SIGNATURE",
        default_value = DEFAULT_SIGNATURE,
        env = "PUBSUB_PROBE_SIGNATURE"
    )]
    signature: String,

    #[arg(
        long = "reply-timeout",
        long_help = "How long to wait for a reply to the subscription request before giving up. A silent endpoint is reported but is not an error.",
        value_name = "SECONDS",
        default_value = "3",
        env = "PUBSUB_PROBE_REPLY_TIMEOUT"
    )]
    reply_timeout: u64,

    #[arg(
        long = "connect-timeout",
        long_help = "How long to wait for the websocket handshake to complete",
        value_name = "SECONDS",
        default_value = "10",
        env = "PUBSUB_PROBE_CONNECT_TIMEOUT"
    )]
    connect_timeout: u64,

    #[arg(
        long = "rpc-url",
        long_help = "Optional HTTP RPC URL of the same node. When set, the probe first queries getHealth and reports the result. The health check never affects the probe outcome.",
        value_name = "HTTP(S) URL",
        value_hint = clap::ValueHint::Url,
        env = "PUBSUB_PROBE_RPC_URL"
    )]
    rpc_url: Option<Url>,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub ws_url: Url,
    pub signature: String,
    pub reply_timeout: Duration,
    pub connect_timeout: Duration,
    pub rpc_url: Option<Url>,
}

impl Config {
    pub fn parse() -> Self {
        Self::from_cli(Cli::parse())
    }

    fn from_cli(cli: Cli) -> Self {
        Config {
            ws_url: cli.ws_url,
            signature: cli.signature,
            reply_timeout: Duration::from_secs(cli.reply_timeout),
            connect_timeout: Duration::from_secs(cli.connect_timeout),
            rpc_url: cli.rpc_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_local_validator_setup() {
        let config = Config::from_cli(Cli::try_parse_from(["pubsub-probe"]).unwrap());

        assert_eq!(config.ws_url.as_str(), "ws://localhost:8900/");
        assert_eq!(config.signature, DEFAULT_SIGNATURE);
        assert_eq!(config.reply_timeout, Duration::from_secs(3));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert!(config.rpc_url.is_none());
    }

    #[test]
    fn all_options_are_overridable() {
        let config = Config::from_cli(
            Cli::try_parse_from([
                "pubsub-probe",
                "--ws-url",
                "ws://10.0.0.7:9001",
                "--signature",
                "4Nd1mY",
                "--reply-timeout",
                "7",
                "--connect-timeout",
                "2",
                "--rpc-url",
                "http://10.0.0.7:8899",
            ])
            .unwrap(),
        );

        assert_eq!(config.ws_url.as_str(), "ws://10.0.0.7:9001/");
        assert_eq!(config.signature, "4Nd1mY");
        assert_eq!(config.reply_timeout, Duration::from_secs(7));
        assert_eq!(config.connect_timeout, Duration::from_secs(2));
        assert_eq!(
            config.rpc_url.as_ref().map(Url::as_str),
            Some("http://10.0.0.7:8899/")
        );
    }

    #[test]
    fn malformed_url_is_rejected() {
        Cli::try_parse_from(["pubsub-probe", "--ws-url", "not a url"]).unwrap_err();
    }
}
