use openai_rust2 as openai_rust;
use openai_rust::chat;
use tokio::sync::Mutex;

use crate::parley::client_wrapper::{Message, ProviderError, Role, TokenUsage};

/// Convert our role-tagged messages into the wire format shared by every
/// OpenAI-compatible backend.
pub fn format_messages(messages: &[Message]) -> Vec<chat::Message> {
    messages
        .iter()
        .map(|msg| chat::Message {
            role: match msg.role {
                Role::System => "system".to_owned(),
                Role::User => "user".to_owned(),
                Role::Assistant => "assistant".to_owned(),
            },
            content: msg.content.clone(),
        })
        .collect()
}

/// Send a chat request, record its token usage, and return the assistant's
/// content.
///
/// An empty completion is an error: a debate turn with no text is
/// indistinguishable from a failed one, so it is rejected here rather than
/// silently appended to the transcript.
pub async fn send_and_track(
    api: &openai_rust::Client,
    model: &str,
    formatted_msgs: Vec<chat::Message>,
    url_path: Option<String>,
    usage_slot: &Mutex<Option<TokenUsage>>,
) -> Result<String, ProviderError> {
    let chat_arguments = chat::ChatArguments::new(model, formatted_msgs);

    let response = api
        .create_chat(chat_arguments, url_path)
        .await
        .map_err(|err| {
            log::error!(
                "parley::clients::common::send_and_track({}): API error: {}",
                model,
                err
            );
            ProviderError::Api(err.to_string())
        })?;

    let usage = TokenUsage {
        input_tokens: response.usage.prompt_tokens as usize,
        output_tokens: response.usage.completion_tokens as usize,
        total_tokens: response.usage.total_tokens as usize,
    };

    // Store it for get_last_usage()
    *usage_slot.lock().await = Some(usage);

    let content = match response.choices.first() {
        Some(choice) => choice.message.content.clone(),
        None => return Err(ProviderError::Api(format!("{}: no choices returned", model))),
    };

    if content.trim().is_empty() {
        return Err(ProviderError::EmptyResponse(model.to_string()));
    }

    Ok(content)
}
