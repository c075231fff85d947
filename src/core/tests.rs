#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::future::Future;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    use futures::executor::block_on;

    use crate::core::{
        Authenticator, Credentials, LoginError, Navigator, Notifier, RequestState, SessionCache,
        SessionInfo, SessionUser, perform_login, submit_login,
    };

    /// Shared log of everything the fakes saw, in order
    #[derive(Default)]
    struct Journal {
        events: RefCell<Vec<String>>,
    }

    impl Journal {
        fn push(&self, event: impl Into<String>) {
            self.events.borrow_mut().push(event.into());
        }

        fn events(&self) -> Vec<String> {
            self.events.borrow().clone()
        }
    }

    /// Future that returns `Pending` once before completing
    struct YieldOnce(bool);

    impl Future for YieldOnce {
        type Output = ();

        fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
            if self.0 {
                Poll::Ready(())
            } else {
                self.0 = true;
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }

    /// Backend that accepts exactly one password
    struct FakeBackend<'a> {
        journal: &'a Journal,
        password: &'static str,
        requests: RefCell<Vec<serde_json::Value>>,
    }

    impl<'a> FakeBackend<'a> {
        fn new(journal: &'a Journal, password: &'static str) -> Self {
            Self {
                journal,
                password,
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    impl Authenticator for FakeBackend<'_> {
        async fn authenticate(&self, credentials: &Credentials) -> Result<(), LoginError> {
            self.requests
                .borrow_mut()
                .push(serde_json::to_value(credentials).unwrap());
            YieldOnce(false).await;

            if credentials.password == self.password {
                self.journal.push("authenticate:200");
                Ok(())
            } else {
                self.journal.push("authenticate:400");
                Err(LoginError::from_response(
                    400,
                    r#"{"non_field_errors": ["Unable to log in with provided credentials."]}"#,
                ))
            }
        }
    }

    struct FakeSession<'a> {
        journal: &'a Journal,
        calls: Cell<usize>,
        fail: bool,
    }

    impl<'a> FakeSession<'a> {
        fn new(journal: &'a Journal) -> Self {
            Self {
                journal,
                calls: Cell::new(0),
                fail: false,
            }
        }

        fn failing(journal: &'a Journal) -> Self {
            Self {
                fail: true,
                ..Self::new(journal)
            }
        }
    }

    impl SessionCache for FakeSession<'_> {
        async fn refetch(&self) -> Result<SessionInfo, LoginError> {
            self.calls.set(self.calls.get() + 1);
            self.journal.push("refetch:start");
            YieldOnce(false).await;
            self.journal.push("refetch:done");

            if self.fail {
                return Err(LoginError::from_response(500, ""));
            }

            Ok(SessionInfo {
                logged_in: true,
                user: Some(SessionUser {
                    id: None,
                    username: "alice".to_string(),
                    display: None,
                }),
                backends: vec![],
            })
        }
    }

    struct FakeNavigator<'a> {
        journal: &'a Journal,
    }

    impl Navigator for FakeNavigator<'_> {
        fn navigate(&self, path: &str) {
            self.journal.push(format!("navigate:{}", path));
        }
    }

    struct FakeNotifier<'a> {
        journal: &'a Journal,
        messages: RefCell<Vec<String>>,
    }

    impl<'a> FakeNotifier<'a> {
        fn new(journal: &'a Journal) -> Self {
            Self {
                journal,
                messages: RefCell::new(Vec::new()),
            }
        }
    }

    impl Notifier for FakeNotifier<'_> {
        fn notify(&self, err: &LoginError) {
            self.journal.push("alert");
            self.messages.borrow_mut().push(err.user_message());
        }
    }

    #[test]
    fn test_successful_login_refetches_then_navigates_home() {
        let journal = Journal::default();
        let backend = FakeBackend::new(&journal, "correct");
        let session = FakeSession::new(&journal);
        let navigator = FakeNavigator { journal: &journal };

        let creds = Credentials::from_form("alice", "correct").unwrap();
        let result = block_on(perform_login(&creds, &backend, &session, &navigator));

        let info = result.unwrap();
        assert_eq!(info.display_name(), Some("alice"));
        assert_eq!(session.calls.get(), 1);
        assert_eq!(
            journal.events(),
            vec![
                "authenticate:200",
                "refetch:start",
                "refetch:done",
                "navigate:/",
            ]
        );
    }

    #[test]
    fn test_request_body_is_exactly_the_form_values() {
        let journal = Journal::default();
        let backend = FakeBackend::new(&journal, "correct");
        let session = FakeSession::new(&journal);
        let navigator = FakeNavigator { journal: &journal };

        let creds = Credentials::from_form("alice", "correct").unwrap();
        block_on(perform_login(&creds, &backend, &session, &navigator)).unwrap();

        assert_eq!(
            backend.requests.borrow().as_slice(),
            &[serde_json::json!({ "username": "alice", "password": "correct" })]
        );
    }

    #[test]
    fn test_rejected_login_skips_refetch_and_navigation() {
        let journal = Journal::default();
        let backend = FakeBackend::new(&journal, "correct");
        let session = FakeSession::new(&journal);
        let navigator = FakeNavigator { journal: &journal };

        let creds = Credentials::from_form("alice", "wrong").unwrap();
        let err = block_on(perform_login(&creds, &backend, &session, &navigator)).unwrap_err();

        assert_eq!(
            err,
            LoginError::Http {
                status: 400,
                detail: Some("Unable to log in with provided credentials.".to_string()),
            }
        );
        assert_eq!(err.user_message(), "Unable to log in with provided credentials.");
        assert_eq!(session.calls.get(), 0);
        assert_eq!(journal.events(), vec!["authenticate:400"]);
    }

    #[test]
    fn test_failed_refetch_does_not_navigate() {
        let journal = Journal::default();
        let backend = FakeBackend::new(&journal, "correct");
        let session = FakeSession::failing(&journal);
        let navigator = FakeNavigator { journal: &journal };

        let creds = Credentials::from_form("alice", "correct").unwrap();
        let err = block_on(perform_login(&creds, &backend, &session, &navigator)).unwrap_err();

        assert!(matches!(err, LoginError::Session(_)));
        assert_eq!(
            journal.events(),
            vec!["authenticate:200", "refetch:start", "refetch:done"]
        );
    }

    #[test]
    fn test_submit_with_empty_field_sends_nothing() {
        let journal = Journal::default();
        let backend = FakeBackend::new(&journal, "correct");
        let session = FakeSession::new(&journal);
        let navigator = FakeNavigator { journal: &journal };
        let notifier = FakeNotifier::new(&journal);
        let state = RefCell::new(RequestState::Idle);

        for (username, password) in [("alice", ""), ("", "correct"), ("", "")] {
            let outcome = block_on(submit_login(
                username.to_string(),
                password.to_string(),
                &state,
                &backend,
                &session,
                &navigator,
                &notifier,
            ));
            assert!(outcome.is_none());
        }

        assert!(backend.requests.borrow().is_empty());
        assert_eq!(session.calls.get(), 0);
        assert_eq!(*state.borrow(), RequestState::Idle);
        assert_eq!(
            notifier.messages.borrow().as_slice(),
            &[
                "Please enter your password.",
                "Please enter your username.",
                "Please enter your username.",
            ]
        );
        assert_eq!(journal.events(), vec!["alert", "alert", "alert"]);
    }

    #[test]
    fn test_overlapping_submits_send_one_request() {
        let journal = Journal::default();
        let backend = FakeBackend::new(&journal, "correct");
        let session = FakeSession::new(&journal);
        let navigator = FakeNavigator { journal: &journal };
        let notifier = FakeNotifier::new(&journal);
        let state = RefCell::new(RequestState::Idle);

        let first = submit_login(
            "alice".to_string(),
            "correct".to_string(),
            &state,
            &backend,
            &session,
            &navigator,
            &notifier,
        );
        let second = submit_login(
            "alice".to_string(),
            "correct".to_string(),
            &state,
            &backend,
            &session,
            &navigator,
            &notifier,
        );

        // Both submits are in flight at once; the first one yields inside
        // authenticate before the second starts
        let (first, second) = block_on(async { futures::join!(first, second) });

        assert!(first.unwrap().is_ok());
        assert!(second.is_none());
        assert_eq!(backend.requests.borrow().len(), 1);
        assert_eq!(session.calls.get(), 1);
        assert_eq!(*state.borrow(), RequestState::Succeeded);
        assert!(notifier.messages.borrow().is_empty());
        assert_eq!(
            journal.events(),
            vec![
                "authenticate:200",
                "refetch:start",
                "refetch:done",
                "navigate:/",
            ]
        );
    }

    #[test]
    fn test_rejected_submit_alerts_once_without_refetch_or_navigation() {
        let journal = Journal::default();
        let backend = FakeBackend::new(&journal, "correct");
        let session = FakeSession::new(&journal);
        let navigator = FakeNavigator { journal: &journal };
        let notifier = FakeNotifier::new(&journal);
        let state = RefCell::new(RequestState::Idle);

        let outcome = block_on(submit_login(
            "alice".to_string(),
            "wrong".to_string(),
            &state,
            &backend,
            &session,
            &navigator,
            &notifier,
        ));

        assert!(outcome.unwrap().is_err());
        assert_eq!(session.calls.get(), 0);
        assert_eq!(
            notifier.messages.borrow().as_slice(),
            &["Unable to log in with provided credentials."]
        );
        assert!(matches!(*state.borrow(), RequestState::Failed(_)));
        assert_eq!(journal.events(), vec!["authenticate:400", "alert"]);

        // The form can be submitted again after a failure
        let outcome = block_on(submit_login(
            "alice".to_string(),
            "correct".to_string(),
            &state,
            &backend,
            &session,
            &navigator,
            &notifier,
        ));
        assert!(outcome.unwrap().is_ok());
        assert_eq!(*state.borrow(), RequestState::Succeeded);
        assert_eq!(backend.requests.borrow().len(), 2);
    }
}
