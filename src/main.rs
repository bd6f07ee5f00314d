use std::sync::Arc;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use travelnote_client::core::config::{Config, DirectorySource};
use travelnote_client::core::http::ApiClient;
use travelnote_client::features::auth::{require_session, CredentialStore, MemoryCredentialStore};
use travelnote_client::features::posts::PostClient;
use travelnote_client::features::regions::{
    HttpRegionDirectory, RegionDirectory, RegionSelector, SelectionEvent, StaticRegionDirectory,
};

fn main() -> anyhow::Result<()> {
    // Region selection is cooperative; one thread is enough
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!("Configuration loaded successfully");

    let credentials = Arc::new(match &config.app.api_token {
        Some(token) => MemoryCredentialStore::with_token(token.clone()),
        None => MemoryCredentialStore::new(),
    });

    let api = match &config.app.api_base_url {
        Some(base_url) => Some(Arc::new(ApiClient::new(
            base_url.clone(),
            &config.http,
            Arc::clone(&credentials) as Arc<dyn CredentialStore>,
            config.app.login_path.clone(),
        )?)),
        None => None,
    };

    let directory: Arc<dyn RegionDirectory> = match (config.directory.source, &api) {
        (DirectorySource::Http, Some(api)) => {
            tracing::info!("Using region directory at {}", api.base_url());
            Arc::new(HttpRegionDirectory::new(Arc::clone(api)))
        }
        _ => {
            tracing::info!(
                "Using built-in region table (latency: {:?})",
                config.directory.latency
            );
            Arc::new(StaticRegionDirectory::korea_sample().with_latency(config.directory.latency))
        }
    };

    let (events_tx, mut events_rx) = mpsc::unbounded_channel::<SelectionEvent>();
    let mut selector = RegionSelector::new(directory, events_tx);

    // A code on the command line wins over INITIAL_REGION_CODE
    let initial_code = std::env::args()
        .nth(1)
        .or_else(|| config.app.initial_region_code.clone());
    if let Some(code) = initial_code.as_deref() {
        tracing::info!("Hydrating selection from {}", code);
        selector.hydrate(code)?;
    }
    selector.settle().await;

    println!("{}", selector.view());
    while let Ok(event) = events_rx.try_recv() {
        match event {
            SelectionEvent::Selected { code, name } => println!("selected: {} ({})", name, code),
            SelectionEvent::Failed(error) => eprintln!("region error: {}", error),
        }
    }

    let region_code = selector.selection().region_code().to_string();
    selector.dispose();

    let Some(api) = api else {
        return Ok(());
    };
    if region_code.is_empty() {
        tracing::info!("No region selected; skipping post listing");
        return Ok(());
    }

    if let Err(e) = require_session(credentials.as_ref(), api.login_path()).await {
        tracing::warn!("{}", e);
        return Ok(());
    }

    let posts = PostClient::new(Arc::clone(&api));
    match posts.list_by_region(&region_code).await {
        Ok(posts) => {
            println!("{} posts in {}", posts.len(), region_code);
            for post in posts {
                println!(
                    "- [{}] {} by {} ({})",
                    post.post_type,
                    post.title,
                    post.author_name,
                    post.created_at.format("%Y-%m-%d")
                );
            }
        }
        Err(e) => match e.redirect_target() {
            Some(target) => tracing::warn!("Session expired; log in again at {}", target),
            None => return Err(e.into()),
        },
    }

    Ok(())
}
