use mongodb::{bson::doc, Client, Database};

use crate::config::Config;

/// Connects to MongoDB and pings the server before handing out the database.
pub async fn init_db(config: &Config) -> Result<Database, mongodb::error::Error> {
    let client = Client::with_uri_str(&config.mongodb_uri).await?;

    // Ping the database to verify connection
    client
        .database("admin")
        .run_command(doc! {"ping": 1})
        .await?;

    log::info!("Successfully connected to MongoDB ({})", config.database_name);

    Ok(client.database(&config.database_name))
}
