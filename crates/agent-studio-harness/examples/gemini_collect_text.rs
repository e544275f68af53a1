use std::sync::Arc;

use agent_studio_harness::prelude::*;
use agent_studio_harness::vendors::gemini::{GEMINI_PROVIDER, GeminiProvider};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), HarnessError> {
    let harness = Harness::builder()
        .register_provider(Arc::new(GeminiProvider::from_env()?))
        .build()?;

    let text = harness
        .session(SessionConfig::named("collect"))
        .run(ModelRef::new(GEMINI_PROVIDER, "gemini-2.5-flash"))
        .system_prompt("You are a concise assistant. Reply with a short sentence.")
        .user_json(serde_json::json!({"task":"say hello"}))?
        .temperature(0.5)
        .collect_text()
        .await?;

    println!("{text}");
    Ok(())
}
