use std::sync::Arc;

use agent_studio_harness::prelude::*;
use agent_studio_harness::vendors::gemini::{GEMINI_PROVIDER, GeminiProvider};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), HarnessError> {
    let harness = Harness::builder()
        .register_provider(Arc::new(GeminiProvider::from_env()?))
        .build()?;

    let image = harness
        .session(SessionConfig::named("imagen"))
        .images(ModelRef::new(GEMINI_PROVIDER, "imagen-3.0-generate-002"))
        .prompt("A red panda wearing a tiny chef hat, cooking a miniature pizza")
        .aspect_ratio(AspectRatio::Square)
        .generate_one()
        .await?;

    let preview: String = image.to_data_uri("image/jpeg").chars().take(40).collect();
    println!("{} bytes, {preview}...", image.bytes.len());
    Ok(())
}
