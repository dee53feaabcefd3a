use quillboard::server::{run, ServerConfig, ServerError};
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> Result<(), ServerError> {
    if tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .is_err()
    {
        eprintln!("tracing subscriber was already initialised");
    }

    let config = ServerConfig::from_env()?;
    run(config).await
}
