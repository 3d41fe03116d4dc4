use std::sync::Arc;
use std::sync::Mutex as StdMutex;

use super::*;

struct RecordingHost {
    messages: StdMutex<Vec<Value>>,
    entries: StdMutex<Vec<(String, Value)>>,
}

#[async_trait]
impl HookHost for RecordingHost {
    async fn send_message(&self, content: Value, _trigger_turn: bool) -> Result<()> {
        self.messages.lock().unwrap().push(content);
        Ok(())
    }

    async fn append_entry(&self, custom_type: String, data: Value) -> Result<()> {
        self.entries.lock().unwrap().push((custom_type, data));
        Ok(())
    }
}

#[tokio::test]
async fn send_message_and_append_entry_delegate_to_the_host() {
    let host = Arc::new(RecordingHost { messages: StdMutex::new(Vec::new()), entries: StdMutex::new(Vec::new()) });
    let api = HookApi::new(host.clone());

    api.send_message(serde_json::json!("hello"), false).await.unwrap();
    api.append_entry("note", serde_json::json!({"k": "v"})).await.unwrap();

    assert_eq!(host.messages.lock().unwrap().as_slice(), [serde_json::json!("hello")]);
    assert_eq!(host.entries.lock().unwrap().as_slice(), [("note".to_string(), serde_json::json!({"k": "v"}))]);
}

#[tokio::test]
async fn null_host_silently_accepts_calls() {
    let api = HookApi::with_null_host();
    assert!(api.send_message(serde_json::json!("x"), true).await.is_ok());
    assert!(api.append_entry("t", serde_json::json!(null)).await.is_ok());
}

#[test]
fn register_command_and_renderer_are_inspectable() {
    let api = HookApi::with_null_host();
    api.register_command("echo", Arc::new(|args: &[String]| args.join(" ")));
    api.register_message_renderer("note", Arc::new(|v: &Value| v.to_string()));

    assert_eq!(api.registered_commands(), vec!["echo".to_string()]);
    assert_eq!(api.registered_renderers(), vec!["note".to_string()]);
}

#[tokio::test]
async fn exec_runs_a_real_command() {
    let api = HookApi::with_null_host();
    let output = api.exec("echo", &["hi".to_string()]).await.unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "hi");
}
