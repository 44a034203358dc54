use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use log::info;

/// System instructions and the fixed analysis prompt. A JSON file at the
/// configured path overrides any subset of the fields; without one the
/// built-in defaults apply.
#[derive(Deserialize, Debug, Clone)]
pub struct PromptConfig {
    #[serde(default = "default_chat_system_instruction")]
    pub chat_system_instruction: String,
    #[serde(default = "default_analysis_system_instruction")]
    pub analysis_system_instruction: String,
    #[serde(default = "default_analysis_prompt")]
    pub analysis_prompt: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            chat_system_instruction: default_chat_system_instruction(),
            analysis_system_instruction: default_analysis_system_instruction(),
            analysis_prompt: default_analysis_prompt(),
        }
    }
}

fn default_chat_system_instruction() -> String {
    "You are an expert Career and Personality Analyst specializing in education and career \
opportunities in Malaysia. Your primary goal is to guide the user toward suitable academic \
courses and career paths based on a comprehensive profile analysis.\n\n\
You will achieve this by engaging the user in a structured, multi-turn interview process. \
Your initial response MUST be a set of 3-4 probing questions designed to uncover their:\n\
1. Strengths and Weaknesses\n\
2. Interests and Values\n\
3. Risk Tolerance and hidden characters.\n\n\
After several turns of conversation, you will use the collected data to provide a summary of \
your findings and suggest 3-5 specific courses and potential careers available in Malaysia \
that align with their analyzed profile. Always ask follow-up questions until you have enough \
data to make a comprehensive suggestion.".to_string()
}

fn default_analysis_system_instruction() -> String {
    "You are an expert Career and Personality Analyst specializing in education and career \
opportunities in Malaysia. You are given a completed interview conversation and produce a \
final written assessment rather than asking further questions.".to_string()
}

fn default_analysis_prompt() -> String {
    "Analyze the conversation so far. Summarize the user's strengths, weaknesses, interests, \
values and risk tolerance, then suggest 3-5 specific courses and potential careers available \
in Malaysia that align with the analyzed profile.".to_string()
}

pub fn load_prompts(path: &str) -> Result<Arc<PromptConfig>, Box<dyn Error + Send + Sync>> {
    if !Path::new(path).exists() {
        info!("Prompts file '{}' not found, using built-in prompts", path);
        return Ok(Arc::new(PromptConfig::default()));
    }
    let file_content = fs
        ::read_to_string(path)
        .map_err(|e| format!("Failed to read prompts file '{}': {}", path, e))?;
    let config: PromptConfig = serde_json
        ::from_str(&file_content)
        .map_err(|e| format!("Failed to parse prompts file '{}': {}", path, e))?;
    info!("Loaded prompts from '{}'", path);
    Ok(Arc::new(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let prompts = load_prompts("does/not/exist.json").unwrap();
        assert!(prompts.chat_system_instruction.contains("Career and Personality Analyst"));
        assert!(!prompts.analysis_prompt.is_empty());
    }

    #[test]
    fn partial_override_keeps_remaining_defaults() {
        let config: PromptConfig = serde_json::from_str(
            r#"{"analysis_prompt":"Summarize the interview."}"#
        ).unwrap();
        assert_eq!(config.analysis_prompt, "Summarize the interview.");
        assert_eq!(config.chat_system_instruction, default_chat_system_instruction());
    }
}
