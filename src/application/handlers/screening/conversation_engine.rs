//! ConversationEngine - Drives one inbound event through the screening flow.
//!
//! Per event: rate-limit admission, session load, pure transition,
//! save or report, and the reply to the chat.

use std::sync::Arc;

use crate::domain::foundation::{ApplicantToken, ChatId};
use crate::domain::screening::engine::{apply_choice, apply_text};
use crate::domain::screening::{
    Prompt, QuestionCatalog, ScreeningSession, Step, Transition,
};
use crate::ports::{
    PolicySource, Presenter, PresenterError, RateLimitKey, RateLimitResult, RateLimiter,
    ResultSink, SessionStore, SessionStoreError,
};

use super::inbound::{EventOutcome, InboundEvent};
use super::messages;
use super::result_reporter::ResultReporter;

/// Failures that stop an event from being handled.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("session store error: {0}")]
    Store(#[from] SessionStoreError),

    #[error("presenter error: {0}")]
    Presenter(#[from] PresenterError),
}

/// Handler for every inbound screening event.
pub struct ConversationEngine {
    catalog: &'static QuestionCatalog,
    limiter: Arc<dyn RateLimiter>,
    store: Arc<dyn SessionStore>,
    presenter: Arc<dyn Presenter>,
    policy: Arc<dyn PolicySource>,
    reporter: ResultReporter,
}

impl ConversationEngine {
    pub fn new(
        catalog: &'static QuestionCatalog,
        limiter: Arc<dyn RateLimiter>,
        store: Arc<dyn SessionStore>,
        presenter: Arc<dyn Presenter>,
        policy: Arc<dyn PolicySource>,
        sink: Arc<dyn ResultSink>,
    ) -> Self {
        Self {
            catalog,
            limiter,
            reporter: ResultReporter::new(store.clone(), sink),
            store,
            presenter,
            policy,
        }
    }

    pub fn catalog(&self) -> &'static QuestionCatalog {
        self.catalog
    }

    pub async fn handle(&self, event: InboundEvent) -> Result<EventOutcome, EngineError> {
        let chat_id = event.chat_id();

        if let Some(callback_id) = event.callback_id() {
            if let Err(e) = self.presenter.acknowledge(callback_id).await {
                tracing::warn!(%chat_id, "Failed to acknowledge button press: {}", e);
            }
        }

        if !self.admit(chat_id).await {
            return Ok(EventOutcome::RateLimited);
        }

        match event {
            InboundEvent::Start {
                chat_id,
                token,
                display_name,
            } => self.start(chat_id, token, display_name).await,
            InboundEvent::ButtonPressed {
                chat_id, trigger, ..
            } => self.press(chat_id, &trigger).await,
            InboundEvent::TextReceived { chat_id, text } => self.text(chat_id, &text).await,
        }
    }

    async fn admit(&self, chat_id: ChatId) -> bool {
        match self.limiter.check(RateLimitKey::chat(chat_id)).await {
            Ok(RateLimitResult::Allowed(_)) => true,
            Ok(RateLimitResult::Denied(denied)) => {
                tracing::warn!(
                    %chat_id,
                    retry_after_ms = denied.retry_after_ms,
                    "Dropping rate limited event"
                );
                false
            }
            Err(e) => {
                tracing::warn!(%chat_id, "Rate limiter unavailable, admitting event: {}", e);
                true
            }
        }
    }

    async fn start(
        &self,
        chat_id: ChatId,
        token: Option<String>,
        display_name: Option<String>,
    ) -> Result<EventOutcome, EngineError> {
        let token = match token.map(ApplicantToken::new) {
            Some(Ok(token)) => token,
            Some(Err(e)) => {
                tracing::info!(%chat_id, "Rejected start token: {}", e);
                return self.instruct(chat_id, EventOutcome::TokenRejected).await;
            }
            None => {
                tracing::info!(%chat_id, "Start without token");
                return self.instruct(chat_id, EventOutcome::TokenRejected).await;
            }
        };

        let first = self.catalog.first_step();
        let session = ScreeningSession::start(chat_id, token, display_name, first);
        self.store.save(&session).await?;

        tracing::info!(
            %chat_id,
            session_id = %session.session_id(),
            variant = ?self.catalog.variant(),
            "Screening started"
        );

        let prompt = self.question(first).with_notice(messages::WELCOME);
        self.presenter.send(chat_id, &prompt).await?;

        Ok(EventOutcome::Started {
            session_id: *session.session_id(),
            step: first,
        })
    }

    async fn press(&self, chat_id: ChatId, trigger: &str) -> Result<EventOutcome, EngineError> {
        let decoded = match self.catalog.decode(trigger) {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::warn!(%chat_id, "Dropping button press: {}", e);
                return Ok(EventOutcome::Ignored);
            }
        };

        let Some(mut session) = self.store.load(chat_id).await? else {
            tracing::debug!(%chat_id, trigger, "Button press without a live session");
            return Ok(EventOutcome::Ignored);
        };

        let asked = session.step();
        let transition = apply_choice(&mut session, decoded, self.catalog, &self.policy.current());
        self.follow(session, asked, transition).await
    }

    async fn text(&self, chat_id: ChatId, text: &str) -> Result<EventOutcome, EngineError> {
        let Some(mut session) = self.store.load(chat_id).await? else {
            return self.instruct(chat_id, EventOutcome::NoSession).await;
        };

        let asked = session.step();
        let transition = apply_text(&mut session, text, self.catalog, &self.policy.current());
        self.follow(session, asked, transition).await
    }

    async fn follow(
        &self,
        session: ScreeningSession,
        asked: Step,
        transition: Transition,
    ) -> Result<EventOutcome, EngineError> {
        let chat_id = session.chat_id();

        match transition {
            Transition::Advanced(next) => {
                if let Err(e) = self.store.save(&session).await {
                    tracing::error!(%chat_id, step = %asked, "Failed to save answer: {}", e);
                    return self.retry(chat_id, asked).await;
                }
                tracing::debug!(%chat_id, step = %next, "Advanced");
                self.presenter.send(chat_id, &self.question(next)).await?;
                Ok(EventOutcome::Advanced(next))
            }
            Transition::Finished(verdict) => match self.reporter.finish(session, &verdict).await {
                Ok(true) => {
                    self.presenter
                        .send(chat_id, &messages::closing(&verdict))
                        .await?;
                    Ok(EventOutcome::Finished(verdict.outcome()))
                }
                Ok(false) => Ok(EventOutcome::AlreadyReported),
                Err(e) => {
                    tracing::error!(%chat_id, step = %asked, "Failed to claim completion: {}", e);
                    self.retry(chat_id, asked).await
                }
            },
            Transition::Reprompt(reason) => {
                let prompt = self
                    .question(asked)
                    .with_notice(&messages::reprompt_hint(reason));
                self.presenter.send(chat_id, &prompt).await?;
                Ok(EventOutcome::Reprompted(asked))
            }
            Transition::Ignored(reason) => {
                tracing::debug!(%chat_id, ?reason, "Ignored input");
                Ok(EventOutcome::Ignored)
            }
        }
    }

    async fn instruct(
        &self,
        chat_id: ChatId,
        outcome: EventOutcome,
    ) -> Result<EventOutcome, EngineError> {
        self.presenter
            .send(chat_id, &Prompt::text(messages::START_INSTRUCTIONS))
            .await?;
        Ok(outcome)
    }

    async fn retry(&self, chat_id: ChatId, step: Step) -> Result<EventOutcome, EngineError> {
        let prompt = self.question(step).with_notice(messages::RETRY_NOTICE);
        self.presenter.send(chat_id, &prompt).await?;
        Ok(EventOutcome::RetryRequested(step))
    }

    fn question(&self, step: Step) -> Prompt {
        self.catalog
            .render_step(step)
            .unwrap_or_else(|| Prompt::text(messages::RETRY_NOTICE))
    }
}
