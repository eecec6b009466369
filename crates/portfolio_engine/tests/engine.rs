use std::sync::{Arc, Mutex};
use std::time::Duration;

use portfolio_core::{DispatchStage, RelayPayload};
use portfolio_engine::{EngineEvent, EngineHandle, RelayClient, RelayError, RelayFailureKind};

#[derive(Default)]
struct ScriptedRelay {
    calls: Mutex<Vec<DispatchStage>>,
}

#[async_trait::async_trait]
impl RelayClient for ScriptedRelay {
    async fn dispatch(
        &self,
        stage: DispatchStage,
        _payload: &RelayPayload,
    ) -> Result<(), RelayError> {
        self.calls.lock().unwrap().push(stage);
        match stage {
            DispatchStage::ApplicantAcknowledgment => Ok(()),
            DispatchStage::AdministratorNotification => Err(RelayError {
                kind: RelayFailureKind::HttpStatus(503),
                message: "unavailable".to_string(),
            }),
        }
    }
}

fn payload() -> RelayPayload {
    RelayPayload {
        from_name: "Ada".to_string(),
        from_email: "ada@example.com".to_string(),
        message: "Hi".to_string(),
    }
}

#[test]
fn rescheduling_a_settle_cancels_the_previous_one() {
    let engine = EngineHandle::new(Arc::new(ScriptedRelay::default())).unwrap();
    engine.schedule_settle(1, Duration::from_millis(200));
    engine.schedule_settle(2, Duration::from_millis(50));

    let event = engine.recv_timeout(Duration::from_secs(2));
    assert_eq!(event, Some(EngineEvent::SettleElapsed { generation: 2 }));
    assert_eq!(engine.recv_timeout(Duration::from_millis(400)), None);
}

#[test]
fn cancelled_settle_never_fires() {
    let engine = EngineHandle::new(Arc::new(ScriptedRelay::default())).unwrap();
    engine.schedule_settle(7, Duration::from_millis(50));
    engine.cancel_settle();
    assert_eq!(engine.recv_timeout(Duration::from_millis(300)), None);
}

#[test]
fn dispatch_results_are_reported_per_stage() {
    let relay = Arc::new(ScriptedRelay::default());
    let engine = EngineHandle::new(relay.clone()).unwrap();

    engine.dispatch(3, DispatchStage::ApplicantAcknowledgment, payload());
    let first = engine.recv_timeout(Duration::from_secs(2));
    assert_eq!(
        first,
        Some(EngineEvent::DispatchFinished {
            submission: 3,
            stage: DispatchStage::ApplicantAcknowledgment,
            result: Ok(()),
        })
    );

    engine.dispatch(3, DispatchStage::AdministratorNotification, payload());
    match engine.recv_timeout(Duration::from_secs(2)) {
        Some(EngineEvent::DispatchFinished {
            submission,
            stage,
            result: Err(err),
        }) => {
            assert_eq!(submission, 3);
            assert_eq!(stage, DispatchStage::AdministratorNotification);
            assert_eq!(err.kind, RelayFailureKind::HttpStatus(503));
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(
        *relay.calls.lock().unwrap(),
        vec![
            DispatchStage::ApplicantAcknowledgment,
            DispatchStage::AdministratorNotification
        ]
    );
}
