/// Backend used for text-completion requests.
///
/// The pipeline is provider-agnostic: the prompt goes in, generated text
/// comes back. Gemini is the hosted default; Ollama serves local models
/// during development.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Google Gemini API (`generateContent`).
    Gemini,
    /// Local Ollama runtime.
    Ollama,
}

impl LlmProvider {
    /// Stable lowercase name, as accepted in `LLM_KIND`.
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmProvider::Gemini => "gemini",
            LlmProvider::Ollama => "ollama",
        }
    }
}
