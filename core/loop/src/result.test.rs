use super::*;

#[test]
fn completed_reports_model_stop_signal() {
    let result = LoopResult::completed(2, 10, 20, "hi".into(), vec![]);
    assert_eq!(result.stop_reason, StopReason::ModelStopSignal);
    assert_eq!(result.final_text, "hi");
}

#[test]
fn error_carries_message() {
    let result = LoopResult::error(1, 0, 0, "boom".into());
    assert_eq!(result.stop_reason, StopReason::Error { message: "boom".into() });
}

#[test]
fn interrupted_has_no_final_text() {
    let result = LoopResult::interrupted(3, 5, 5);
    assert_eq!(result.stop_reason, StopReason::UserInterrupted);
    assert!(result.final_text.is_empty());
}
