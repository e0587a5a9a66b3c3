use anyhow::{Context, Result};
use figment::{
    providers::{Format, Json as FigmentJson},
    Figment,
};
use inkgate_core::Config;
use inkgate_svr::router;
use serde_json::json;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use crate::utils::clean_json;

use super::command::SubcommandRun;

pub async fn run(cli: &SubcommandRun) -> Result<()> {
    let configfile = cli.configfile.clone().map(FigmentJson::file);
    let config: Config = Figment::new()
        .merge(configfile.unwrap_or(FigmentJson::string("{}")))
        .merge(figment_merge(cli))
        .extract()
        .context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    let env_filter = config
        .application
        .log_filter
        .as_deref()
        .unwrap_or("info")
        .parse::<EnvFilter>()
        .context("Invalid log filter")?;

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(addr = %config.server.addr, "server started");
    let cancel = CancellationToken::new();
    let listener = tokio::net::TcpListener::bind(config.server.addr).await?;
    let app = router(&config);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel))
        .await?;

    Ok(())
}

async fn shutdown_signal(cancel: CancellationToken) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutting down...");
    cancel.cancel();
}

fn figment_merge(cli: &SubcommandRun) -> figment::providers::Serialized<figment::value::Value> {
    let result = json!({
        "application": {
            "log_filter": cli.log_filter,
        },
        "server": {
            "addr": cli.addr,
        },
        "provider": {
            "client_id": cli.client_id,
            "client_secret": cli.client_secret,
            "redirect_uri": cli.redirect_uri,
            "auth_url": cli.auth_url,
            "token_url": cli.token_url,
            "api_base_url": cli.api_base_url,
            "scopes": cli.scopes,
        },
        "session": {
            "secret": cli.session_secret,
        }
    });

    let figment_value: figment::value::Value =
        serde_json::from_value(clean_json(result)).expect("CLI arguments serialize to JSON");
    figment::providers::Serialized::from(figment_value, figment::Profile::Default)
}
