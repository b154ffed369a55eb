use mongodb::bson::doc;
use mongodb::event::sdam::SdamEvent;
use mongodb::event::EventHandler;
use mongodb::options::ClientOptions;
use mongodb::Client;
use tracing::{debug, info, warn};

const APP_NAME: &str = "location-tracker";

/// Connect to MongoDB and verify the server is reachable.
///
/// Connectivity transitions after startup are logged through an SDAM event
/// handler: a lost server is a warning, not a reason to exit. Requests issued
/// during an outage fail at the store and surface as 500s.
pub async fn connect(connection_string: &str) -> Result<Client, mongodb::error::Error> {
    let mut options = ClientOptions::parse(connection_string).await?;
    options.app_name = Some(APP_NAME.to_string());
    options.sdam_event_handler = Some(EventHandler::callback(log_sdam_event));

    let client = Client::with_options(options)?;

    // Fail startup early when the server is unreachable; the driver itself
    // connects lazily on first operation.
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await?;

    Ok(client)
}

fn log_sdam_event(event: SdamEvent) {
    match event {
        SdamEvent::ServerOpening(e) => info!(address = %e.address, "database server connected"),
        SdamEvent::ServerClosed(e) => warn!(address = %e.address, "database server disconnected"),
        SdamEvent::ServerHeartbeatFailed(e) => {
            warn!(address = %e.server_address, failure = %e.failure, "database heartbeat failed")
        }
        SdamEvent::TopologyClosed(_) => debug!("database topology closed"),
        _ => {}
    }
}
