//! MestreIA conversation state.
//!
//! Owns the chat history, the busy flag that mirrors the panel's
//! disabled submit button, and the failure behavior: a provider error
//! never bubbles to the caller, it becomes the fixed apology appended
//! as a model turn.

use log::{error, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::ai::context::{build_prompt, ContextWindowPolicy, UserData};
use crate::ai::error::AiError;
use crate::ai::gemini::CompletionProvider;
use shared::{ChatMessage, MessageRole};

/// Opening message of every conversation.
pub const GREETING: &str =
    "Olá! Sou o MestreIA, seu assistente financeiro pessoal. Como posso te ajudar a organizar suas finanças hoje?";

/// Canned reply when the provider call fails.
pub const APOLOGY: &str =
    "Desculpe, ocorreu um erro ao me conectar. Por favor, tente novamente mais tarde.";

/// Clears the busy flag even when the send future is dropped mid-await.
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Assistant service orchestrating the chat panel
#[derive(Clone)]
pub struct AssistantService {
    provider: Arc<dyn CompletionProvider + Send + Sync>,
    history: Arc<Mutex<Vec<ChatMessage>>>,
    busy: Arc<AtomicBool>,
    policy: ContextWindowPolicy,
}

impl AssistantService {
    /// Create a new AssistantService with the default window policy
    pub fn new(provider: Arc<dyn CompletionProvider + Send + Sync>) -> Self {
        Self::with_policy(provider, ContextWindowPolicy::default())
    }

    /// Create a new AssistantService with an explicit window policy
    pub fn with_policy(
        provider: Arc<dyn CompletionProvider + Send + Sync>,
        policy: ContextWindowPolicy,
    ) -> Self {
        let greeting = ChatMessage {
            role: MessageRole::Model,
            text: GREETING.to_string(),
        };
        Self {
            provider,
            history: Arc::new(Mutex::new(vec![greeting])),
            busy: Arc::new(AtomicBool::new(false)),
            policy,
        }
    }

    /// Send a question together with the user's financial snapshot
    ///
    /// Returns the model's reply text. A provider failure is logged
    /// and answered with the fixed apology; only a concurrent send is
    /// an error to the caller.
    pub async fn ask(&self, question: &str, mut user_data: UserData) -> Result<String, AiError> {
        if self.busy.swap(true, Ordering::SeqCst) {
            return Err(AiError::Busy);
        }
        let _busy = BusyGuard(Arc::clone(&self.busy));

        user_data.transactions = self.policy.window_transactions(std::mem::take(&mut user_data.transactions));
        let prompt = build_prompt(&user_data, question);

        let windowed_history = {
            let history = self.lock_history();
            self.policy.window_history(&history)
        };

        info!("🤖 AI: Sending question ({} chars of prompt)", prompt.len());
        let reply = match self.provider.complete(&windowed_history, &prompt).await {
            Ok(text) => text,
            Err(err) => {
                error!("🤖 AI: Provider call failed: {}", err);
                APOLOGY.to_string()
            }
        };

        {
            let mut history = self.lock_history();
            history.push(ChatMessage {
                role: MessageRole::User,
                text: question.to_string(),
            });
            history.push(ChatMessage {
                role: MessageRole::Model,
                text: reply.clone(),
            });
        }

        Ok(reply)
    }

    /// Whether a send is currently in flight
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Snapshot of the conversation, greeting included
    pub fn history(&self) -> Vec<ChatMessage> {
        self.lock_history().clone()
    }

    /// Drop the conversation and start over from the greeting
    pub fn reset(&self) {
        let mut history = self.lock_history();
        history.clear();
        history.push(ChatMessage {
            role: MessageRole::Model,
            text: GREETING.to_string(),
        });
    }

    fn lock_history(&self) -> std::sync::MutexGuard<'_, Vec<ChatMessage>> {
        match self.history.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shared::KpiSummary;

    struct FixedProvider {
        reply: String,
    }

    #[async_trait]
    impl CompletionProvider for FixedProvider {
        async fn complete(&self, _history: &[ChatMessage], _prompt: &str) -> Result<String, AiError> {
            Ok(self.reply.clone())
        }
    }

    struct PendingProvider;

    #[async_trait]
    impl CompletionProvider for PendingProvider {
        async fn complete(&self, _history: &[ChatMessage], _prompt: &str) -> Result<String, AiError> {
            std::future::pending().await
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl CompletionProvider for FailingProvider {
        async fn complete(&self, _history: &[ChatMessage], _prompt: &str) -> Result<String, AiError> {
            Err(AiError::EmptyResponse)
        }
    }

    fn empty_user_data() -> UserData {
        UserData {
            dashboard: KpiSummary {
                total_balance: 0.0,
                monthly_income: 0.0,
                monthly_expenses: 0.0,
                next_bill: None,
            },
            transactions: vec![],
            calendar_events: vec![],
            goals: vec![],
        }
    }

    #[test]
    fn test_history_starts_with_greeting() {
        let service = AssistantService::new(Arc::new(FixedProvider { reply: "Oi".to_string() }));
        let history = service.history();

        assert_eq!(history.len(), 1);
        assert_eq!(history[0].role, MessageRole::Model);
        assert_eq!(history[0].text, GREETING);
    }

    #[tokio::test]
    async fn test_ask_appends_user_and_model_turns() {
        let service = AssistantService::new(Arc::new(FixedProvider {
            reply: "Guarde 10% do salário.".to_string(),
        }));

        let reply = service.ask("Como economizar?", empty_user_data()).await.unwrap();
        assert_eq!(reply, "Guarde 10% do salário.");

        let history = service.history();
        assert_eq!(history.len(), 3);
        assert_eq!(history[1].role, MessageRole::User);
        assert_eq!(history[1].text, "Como economizar?");
        assert_eq!(history[2].role, MessageRole::Model);
        assert_eq!(history[2].text, "Guarde 10% do salário.");
    }

    #[tokio::test]
    async fn test_provider_failure_surfaces_apology() {
        let service = AssistantService::new(Arc::new(FailingProvider));

        let reply = service.ask("Pergunta", empty_user_data()).await.unwrap();
        assert_eq!(reply, APOLOGY);

        let history = service.history();
        assert_eq!(history.last().unwrap().text, APOLOGY);
        assert_eq!(history.last().unwrap().role, MessageRole::Model);
    }

    #[tokio::test]
    async fn test_busy_flag_clears_after_ask() {
        let service = AssistantService::new(Arc::new(FixedProvider { reply: "Ok".to_string() }));

        assert!(!service.is_busy());
        service.ask("Pergunta", empty_user_data()).await.unwrap();
        assert!(!service.is_busy());
    }

    #[tokio::test]
    async fn test_busy_rejects_concurrent_send() {
        let service = AssistantService::new(Arc::new(FixedProvider { reply: "Ok".to_string() }));
        service.busy.store(true, Ordering::SeqCst);

        let result = service.ask("Pergunta", empty_user_data()).await;
        assert!(matches!(result, Err(AiError::Busy)));
    }

    #[tokio::test]
    async fn test_dropped_send_clears_busy_flag() {
        let service = AssistantService::new(Arc::new(PendingProvider));

        // The timeout drops the in-flight send while it awaits the
        // provider; the flag must not stay latched.
        let result = tokio::time::timeout(
            std::time::Duration::from_millis(20),
            service.ask("Pergunta", empty_user_data()),
        )
        .await;

        assert!(result.is_err());
        assert!(!service.is_busy());
    }

    #[tokio::test]
    async fn test_reset_returns_to_greeting() {
        let service = AssistantService::new(Arc::new(FixedProvider { reply: "Ok".to_string() }));
        service.ask("Pergunta", empty_user_data()).await.unwrap();
        assert!(service.history().len() > 1);

        service.reset();
        let history = service.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].text, GREETING);
    }
}
