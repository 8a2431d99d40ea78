//! Example: Decoding an image captcha.
//!
//! Run with: cargo run --example decode_image -- <api_key> <image path or url>

use two_captcha::{DecodeRequest, SolveResult, TwoCaptcha};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing for debug output (optional)
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let mut args = std::env::args().skip(1);
    let (Some(key), Some(image)) = (args.next(), args.next()) else {
        anyhow::bail!("usage: decode_image <api_key> <image path or url>");
    };

    let client = TwoCaptcha::builder(key)
        // Optionally add proxy:
        // .proxy("http://127.0.0.1:8080")
        .build()?;

    println!("Balance: {:.2}", client.balance().await?);

    let request = if image.starts_with("http://") || image.starts_with("https://") {
        DecodeRequest::new().url(image)
    } else {
        DecodeRequest::new().file(image)
    };

    match client.decode(request).await {
        SolveResult::Solved(captcha) => {
            println!("Success!");
            println!("  id: {}", captcha.id);
            println!("  answer: {:?}", captcha.answer);
        }
        SolveResult::Failed { kind, detail } => {
            println!("Failed ({}): {}", kind, detail);
        }
        SolveResult::Reported => {}
    }

    Ok(())
}
