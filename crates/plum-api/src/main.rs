use plum_api::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Only load .env in development; production uses platform-native env injection.
    #[cfg(debug_assertions)]
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("plum_api=info".parse().expect("valid directive"))
                .add_directive("plum_core=info".parse().expect("valid directive")),
        )
        .init();

    let config = AppConfig::from_env()?;
    plum_api::serve(config).await?;
    Ok(())
}
