//! Chat completion wire types used by the probe

use serde::{Deserialize, Serialize};

/// Prompt sent on every probe
pub const PROBE_PROMPT: &str = "Respond with exactly: API is working!";

/// Token cap for the probe reply
pub const PROBE_MAX_TOKENS: u32 = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage
{   pub role: String
  , pub content: String
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest
{   pub model: String
  , pub messages: Vec<ChatMessage>
  , pub max_tokens: u32
  , pub temperature: u32
}

impl ChatRequest
{   /// The fixed single-message probe payload for `model`
    pub fn probe(model: impl Into<String>) -> Self
    {   ChatRequest
        {   model: model.into()
          , messages: vec![
              ChatMessage
              {   role: "user".to_string()
                , content: PROBE_PROMPT.to_string()
              }
            ]
          , max_tokens: PROBE_MAX_TOKENS
          , temperature: 0
        }
    }
}

/// Only the fields the probe reads; everything else is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse
{   pub choices: Vec<Choice>
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice
{   pub message: ResponseMessage
  , #[serde(default)]
    pub finish_reason: Option<String>
}

/// `content` must be a string; a null reply fails to parse.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage
{   pub content: String
}

impl ChatResponse
{   /// Content of `choices[0].message`
    pub fn first_content(&self) -> Result<&str, crate::error::Error>
    {   self.choices
          .first()
          .map(|c| c.message.content.as_str())
          .ok_or(crate::error::Error::NoChoicesInResponse)
    }
}

#[cfg(test)]
mod tests
{   use super::*;
    use serde_json::json;

    #[test]
    fn probe_payload_matches_wire_literal()
    {   let body = serde_json::to_value(ChatRequest::probe("gpt-4o"))
          .unwrap();
        assert_eq!(body, json!({
          "model": "gpt-4o",
          "messages": [
            {"role": "user", "content": "Respond with exactly: API is working!"}
          ],
          "max_tokens": 50,
          "temperature": 0
        }));
    }

    #[test]
    fn response_ignores_extra_fields()
    {   let resp: ChatResponse = serde_json::from_value(json!({
          "id": "chatcmpl-1",
          "object": "chat.completion",
          "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": "API is working!"},
            "finish_reason": "stop"
          }],
          "usage": {"total_tokens": 12}
        })).unwrap();
        assert_eq!(resp.first_content().unwrap(), "API is working!");
        assert_eq!(resp.choices[0].finish_reason.as_deref(), Some("stop"));
    }

    #[test]
    fn null_content_fails_to_parse()
    {   let parsed = serde_json::from_value::<ChatResponse>(json!({
          "choices": [{
            "message": {"role": "assistant", "content": null},
            "finish_reason": "content_filter"
          }]
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn empty_choices_is_an_error()
    {   let resp: ChatResponse =
          serde_json::from_value(json!({"choices": []})).unwrap();
        assert_eq!(
          resp.first_content(),
          Err(crate::error::Error::NoChoicesInResponse)
        );
    }

    #[test]
    fn missing_choices_fails_to_parse()
    {   let parsed = serde_json::from_value::<ChatResponse>(
          json!({"error": "nope"})
        );
        assert!(parsed.is_err());
    }
}
