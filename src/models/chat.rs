use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub text: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub history: Vec<ChatMessage>,
    /// Latest user turn. Tolerated when missing, matching the lenient
    /// decoder the front end was written against.
    #[serde(default)]
    pub new_message: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub history: Vec<ChatMessage>,
    /// Tag sent by the front end; accepted but not used to select a prompt.
    #[serde(default)]
    pub analysis_type: String,
}
