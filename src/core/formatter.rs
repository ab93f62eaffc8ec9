// src/core/formatter.rs — Turns + instruction -> generation request / wire body
//
// Pure transforms. Nothing here mutates its inputs.

use super::types::{GenerationParams, GenerationRequest, Turn};

/// Build a request carrying the whole conversation so far.
pub fn chat_request(
    history: &[Turn],
    instruction: &str,
    params: GenerationParams,
) -> GenerationRequest {
    GenerationRequest {
        system_instruction: instruction.to_string(),
        history: history.to_vec(),
        params,
    }
}

/// Build a request for one piece of text (batch mode): the history is a
/// single synthetic user turn.
pub fn single_text_request(
    text: &str,
    instruction: &str,
    params: GenerationParams,
) -> GenerationRequest {
    GenerationRequest {
        system_instruction: instruction.to_string(),
        history: vec![Turn::user(text)],
        params,
    }
}

/// Serialize a request into the `generateContent` JSON body.
///
/// The instruction travels in `systemInstruction`, never inside `contents`.
pub fn request_body(request: &GenerationRequest) -> serde_json::Value {
    let contents: Vec<serde_json::Value> = request
        .history
        .iter()
        .map(|t| {
            serde_json::json!({
                "role": t.role.wire_name(),
                "parts": [{ "text": t.content }],
            })
        })
        .collect();

    let mut body = serde_json::json!({
        "contents": contents,
        "generationConfig": {
            "temperature": request.params.temperature,
            "topP": request.params.top_p,
        },
    });

    if !request.system_instruction.trim().is_empty() {
        body["systemInstruction"] = serde_json::json!({
            "parts": [{ "text": request.system_instruction }],
        });
    }

    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Role;

    fn params() -> GenerationParams {
        GenerationParams {
            temperature: 0.25,
            top_p: 0.5,
        }
    }

    #[test]
    fn test_roles_map_in_order_without_drops() {
        let history = vec![
            Turn::user("one"),
            Turn::assistant("two"),
            Turn::user("three"),
            Turn::assistant("four"),
            Turn::user("five"),
        ];
        let body = request_body(&chat_request(&history, "sys", params()));
        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), history.len());

        let pairs: Vec<(&str, &str)> = contents
            .iter()
            .map(|c| {
                (
                    c["role"].as_str().unwrap(),
                    c["parts"][0]["text"].as_str().unwrap(),
                )
            })
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("user", "one"),
                ("model", "two"),
                ("user", "three"),
                ("model", "four"),
                ("user", "five"),
            ]
        );
    }

    #[test]
    fn test_instruction_is_separate_from_contents() {
        let history = vec![Turn::user("hello")];
        let body = request_body(&chat_request(&history, "Be kind.", params()));
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "Be kind.");
        let contents = body["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 1);
        assert!(contents
            .iter()
            .all(|c| c["parts"][0]["text"] != "Be kind."));
    }

    #[test]
    fn test_blank_instruction_omitted() {
        let body = request_body(&single_text_request("x", "  ", params()));
        assert!(body.get("systemInstruction").is_none());
    }

    #[test]
    fn test_generation_config_keys() {
        let body = request_body(&single_text_request("x", "sys", params()));
        assert_eq!(body["generationConfig"]["temperature"], 0.25);
        assert_eq!(body["generationConfig"]["topP"], 0.5);
    }

    #[test]
    fn test_single_text_collapses_to_one_user_turn() {
        let req = single_text_request("この実験はすごく成功した", "sys", params());
        assert_eq!(req.history.len(), 1);
        assert_eq!(req.history[0].role, Role::User);
        assert_eq!(req.history[0].content, "この実験はすごく成功した");
        assert_eq!(req.system_instruction, "sys");
    }

    #[test]
    fn test_chat_request_does_not_mutate_history() {
        let history = vec![Turn::user("a"), Turn::assistant("b")];
        let before = history.clone();
        let req = chat_request(&history, "sys", params());
        assert_eq!(history, before);
        assert_eq!(req.history, before);
    }
}
