#![warn(clippy::all, clippy::pedantic)]

use std::net::{IpAddr, SocketAddr};

use actix_web::{App, HttpServer, web};
use clap::Parser;
use pulse::{Config, Prober, Registry};
use tracing::info;

mod error;
mod routes;
mod settings;
mod views;

use error::AppError;
use logger::init_tracing;
use settings::Settings;

#[actix_web::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let settings = Settings::parse();
    let config = Config::from_config(settings.config.as_ref())?;
    info!("{}", config);

    let prober = Prober::with_default_timeout()?;
    let registry = web::Data::new(Registry::from_config(&config.monitors, &prober)?);

    let ip: IpAddr = settings.bind.parse()?;
    let addr = SocketAddr::new(ip, settings.port);

    registry.start_all();
    let result = run_server(addr, registry.clone(), settings.shutdown_timeout).await;

    // Loops wind down on their own; checks still in flight are abandoned
    registry.stop_all();
    info!("Shut down");
    result
}

async fn run_server(
    addr: SocketAddr,
    registry: web::Data<Registry>,
    shutdown_timeout: u64,
) -> Result<(), AppError> {
    info!("Health Monitor Server running on http://{addr}");

    HttpServer::new(move || App::new().app_data(registry.clone()).configure(routes::routes))
        .shutdown_timeout(shutdown_timeout)
        .bind(addr)?
        .run()
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_shutdown_timeout_fits_a_probe() {
        let settings = Settings::try_parse_from(["pulse-server"]).unwrap();
        assert!(Duration::from_secs(settings.shutdown_timeout) > pulse::DEFAULT_TIMEOUT);
    }
}
