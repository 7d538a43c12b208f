//! One-shot question to the beauty concierge.

use maygloss_storefront::state::AppState;

/// Send a question to the assistant and print its reply.
///
/// # Errors
///
/// Returns an error if the assistant is not configured or the API call
/// fails.
#[allow(clippy::print_stdout)]
pub async fn run(state: &AppState, question: &str) -> Result<(), Box<dyn std::error::Error>> {
    let Some(assistant) = state.assistant() else {
        return Err("assistant not configured: set GEMINI_API_KEY".into());
    };

    let reply = assistant.ask(question, state.catalog()).await?;
    println!("{reply}");
    Ok(())
}
