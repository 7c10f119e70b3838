use std::io;

use tracing_subscriber::EnvFilter;
use voipms::{MessageText, SendSms, VoipMsClient};

fn required(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let did = required("VOIPMS_DID")?;
    let dst = required("VOIPMS_DST")?;
    let message = std::env::var("VOIPMS_MESSAGE")
        .unwrap_or_else(|_| "Hello from the voipms demo.".to_owned());

    let client = VoipMsClient::from_env();
    let request = SendSms::new(did, dst, MessageText::new(message)?)?;

    let response = client.sms().send_sms(&request)?.ensure_success()?;
    println!("sent, sms id: {:?}", response.get("sms"));

    Ok(())
}
