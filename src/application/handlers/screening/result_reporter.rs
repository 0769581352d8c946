//! ResultReporter - Hands finished screenings downstream and retires the session.

use std::sync::Arc;

use crate::domain::screening::{ScreeningResult, ScreeningSession, Verdict};
use crate::ports::{ResultSink, SessionStore, SessionStoreError};

/// Reports a verdict at most once per session.
pub struct ResultReporter {
    store: Arc<dyn SessionStore>,
    sink: Arc<dyn ResultSink>,
}

impl ResultReporter {
    pub fn new(store: Arc<dyn SessionStore>, sink: Arc<dyn ResultSink>) -> Self {
        Self { store, sink }
    }

    /// Reports `verdict` for `session` and retires it.
    ///
    /// Returns `Ok(false)` when another caller already reported this
    /// session; nothing is dispatched or written in that case.
    ///
    /// Sequence once the claim is won:
    /// 1. Dispatch the result (not awaited)
    /// 2. Mark the session completed and save it
    /// 3. Delete it
    ///
    /// A crash between 2 and 3 leaves a terminal session that the TTL removes.
    pub async fn finish(
        &self,
        mut session: ScreeningSession,
        verdict: &Verdict,
    ) -> Result<bool, SessionStoreError> {
        if !self.store.claim_completion(&session).await? {
            tracing::debug!(
                session_id = %session.session_id(),
                chat_id = %session.chat_id(),
                "Verdict already reported"
            );
            return Ok(false);
        }

        let result = ScreeningResult::from_session(&session, verdict);
        self.sink.dispatch(result);

        session.complete();
        if let Err(e) = self.store.save(&session).await {
            tracing::error!(
                session_id = %session.session_id(),
                "Failed to persist completed session: {}",
                e
            );
        }
        self.store.delete(session.chat_id()).await;

        tracing::info!(
            session_id = %session.session_id(),
            chat_id = %session.chat_id(),
            outcome = ?verdict.outcome(),
            "Screening finished"
        );
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::recording::RecordingResultSink;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::foundation::{ApplicantToken, ChatId};
    use crate::domain::screening::{Choice, Outcome, Step};

    fn session() -> ScreeningSession {
        let mut session = ScreeningSession::start(
            ChatId::new(11),
            ApplicantToken::new("reporter-1").unwrap(),
            Some("@tester".to_string()),
            Step::TeamRole,
        );
        session
            .record_answer(Step::TeamRole, Choice::No.into())
            .unwrap();
        session
    }

    fn reporter() -> (ResultReporter, Arc<InMemorySessionStore>, Arc<RecordingResultSink>) {
        let store = Arc::new(InMemorySessionStore::default());
        let sink = Arc::new(RecordingResultSink::new());
        (ResultReporter::new(store.clone(), sink.clone()), store, sink)
    }

    #[tokio::test]
    async fn dispatches_result_and_deletes_session() {
        let (reporter, store, sink) = reporter();
        let session = session();
        store.save(&session).await.unwrap();

        let verdict = Verdict::Fail("team_role: no".to_string());
        assert!(reporter.finish(session, &verdict).await.unwrap());

        let results = sink.results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].result, Outcome::Fail);
        assert_eq!(results[0].reason, "team_role: no");
        assert!(store.load(ChatId::new(11)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn second_finish_for_same_session_is_a_no_op() {
        let (reporter, _store, sink) = reporter();
        let session = session();

        assert!(reporter.finish(session.clone(), &Verdict::Pass).await.unwrap());
        assert!(!reporter.finish(session, &Verdict::Pass).await.unwrap());

        assert_eq!(sink.results().len(), 1);
    }
}
