use crate::llm::{ Content, Part };
use crate::models::chat::ChatMessage;

/// Remaps the caller-facing conversation log into the upstream content
/// format: "assistant" becomes "model", every other role passes through
/// unchanged. One text part per message, order preserved.
pub fn translate_history(history: &[ChatMessage]) -> Vec<Content> {
    history
        .iter()
        .map(|msg| {
            let role = match msg.role.as_str() {
                "assistant" => "model",
                other => other,
            };
            Content {
                role: Some(role.to_string()),
                parts: vec![Part::text(msg.text.clone())],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(role: &str, text: &str) -> ChatMessage {
        ChatMessage {
            role: role.to_string(),
            text: text.to_string(),
        }
    }

    #[test]
    fn maps_assistant_to_model_and_keeps_user() {
        let history = vec![msg("user", "hi"), msg("assistant", "hello"), msg("user", "bye")];
        let translated = translate_history(&history);

        assert_eq!(translated.len(), 3);
        assert_eq!(translated[0].role.as_deref(), Some("user"));
        assert_eq!(translated[1].role.as_deref(), Some("model"));
        assert_eq!(translated[2].role.as_deref(), Some("user"));
    }

    #[test]
    fn preserves_order_and_text() {
        let history = vec![msg("user", "first"), msg("assistant", "second")];
        let translated = translate_history(&history);

        assert_eq!(translated[0].parts.len(), 1);
        assert_eq!(translated[0].parts[0].text.as_deref(), Some("first"));
        assert_eq!(translated[1].parts[0].text.as_deref(), Some("second"));
    }

    #[test]
    fn unknown_roles_pass_through() {
        let translated = translate_history(&[msg("system", "note")]);
        assert_eq!(translated[0].role.as_deref(), Some("system"));
    }

    #[test]
    fn translations_are_independent() {
        let a = vec![msg("user", "a")];
        let b = vec![msg("assistant", "b")];
        let ta = translate_history(&a);
        let tb = translate_history(&b);

        assert_eq!(ta[0].parts[0].text.as_deref(), Some("a"));
        assert_eq!(tb[0].parts[0].text.as_deref(), Some("b"));
        assert_eq!(a[0].role, "user");
        assert_eq!(b[0].role, "assistant");
    }
}
