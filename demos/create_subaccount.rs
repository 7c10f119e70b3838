use std::io;

use tracing_subscriber::EnvFilter;
use voipms::{NewSubaccount, SubaccountUsername, VoipMsClient};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let username = std::env::var("VOIPMS_SUBACCOUNT").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "VOIPMS_SUBACCOUNT environment variable is required",
        )
    })?;
    let password = std::env::var("VOIPMS_SUBACCOUNT_PASSWORD").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "VOIPMS_SUBACCOUNT_PASSWORD environment variable is required",
        )
    })?;

    let client = VoipMsClient::from_env();
    let request = NewSubaccount {
        description: Some("Created by the voipms demo".to_owned()),
        ..NewSubaccount::with_password(SubaccountUsername::new(username)?, password)
    };

    let response = client.accounts().create_subaccount(&request)?;
    println!(
        "status: {:?}, account: {:?}",
        response.status(),
        response.get("account")
    );

    Ok(())
}
