use tracing_subscriber::EnvFilter;
use voipms::{Params, VoipMsClient};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Credentials come from VOIPMS_API_USER / VOIPMS_API_PASSWORD.
    let client = VoipMsClient::from_env();
    let method = std::env::var("VOIPMS_METHOD").unwrap_or_else(|_| "getBalance".to_owned());

    let mut params = Params::new();
    for arg in std::env::args().skip(1) {
        if let Some((key, value)) = arg.split_once('=') {
            params.insert(key, value);
        }
    }

    let response = client.make_request(&method, params)?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
