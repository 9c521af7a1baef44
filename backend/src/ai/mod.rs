//! MestreIA assistant: context assembly, the Gemini client and the
//! conversation state.

pub mod assistant;
pub mod context;
pub mod error;
pub mod gemini;

pub use assistant::{AssistantService, APOLOGY, GREETING};
pub use context::{build_prompt, ContextWindowPolicy, UserData};
pub use error::AiError;
pub use gemini::{CompletionProvider, GeminiClient};
