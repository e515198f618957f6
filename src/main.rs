use anyhow::{anyhow, Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ossign::config;
use ossign::{Provider, ProviderManager};

const USAGE: &str = "usage: ossign <put KEY SIZE | get KEY | public KEY | delete KEY... | version>";

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first().map(String::as_str) else {
        return Err(anyhow!(USAGE));
    };

    if command == "version" {
        println!("ossign {} (built {})", env!("CARGO_PKG_VERSION"), env!("OSSIGN_BUILD_TIME"));
        return Ok(());
    }

    let app_config = config::init_config()?.read().clone();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| app_config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    tracing::info!("Loaded configuration from {:?}", config::get_config_path());

    let manager = ProviderManager::new();
    ossign::register_providers(&manager).await;

    let section = &app_config.provider;
    let provider = manager
        .create_provider(&section.id, &section.provider_type, section.config.clone())
        .await?;

    let key = args.get(1).ok_or_else(|| anyhow!(USAGE))?;
    match command {
        "put" => {
            let size: u64 = args
                .get(2)
                .ok_or_else(|| anyhow!(USAGE))?
                .parse()
                .context("SIZE must be a non-negative integer")?;
            let req = provider.signed_put_url(key, "", size, false).await?;
            println!("PUT {}", req.url);
            let mut headers: Vec<_> = req.headers.iter().collect();
            headers.sort();
            for (name, value) in headers {
                println!("{}: {}", name, value);
            }
        }
        "get" => {
            let req = provider.signed_get_url(key, "").await?;
            println!("GET {}", req.url);
            if let Some(expire_at) = req.expires_at {
                println!("expires_at: {}", expire_at);
            }
        }
        "public" => println!("{}", provider.public_url(key)),
        "delete" => {
            provider.objects_delete(&args[1..]).await?;
            tracing::info!("Deleted {} object(s)", args.len() - 1);
        }
        _ => return Err(anyhow!(USAGE)),
    }

    Ok(())
}
