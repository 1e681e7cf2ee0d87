//! Pipeline behavior through fake hosts.
//!
//! Drives [`Bootstrap`] with in-memory fakes for the host and handle traits,
//! covering the black-box properties of the bootstrap sequence: stage
//! ordering, short-circuit on failure, option passthrough, absent-result
//! rendering, and idempotence. No real runtime or network is involved.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use plugincall_host::{
    ABSENT_MARKER, Bootstrap, HostError, HostResult, InstanceOptions, PluginHandle, PluginHost,
    PluginSource, render,
};

/// What a fake handle does when invoked.
#[derive(Clone)]
enum CallBehavior {
    /// Succeed with a canned (possibly absent) result.
    Reply(Option<String>),
    /// Fail as if the export were missing from the module.
    MissingExport,
}

/// Handle returning canned responses, recording every invocation.
struct FakeHandle {
    behavior: CallBehavior,
    calls: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
}

#[async_trait]
impl PluginHandle for FakeHandle {
    async fn invoke(&mut self, capability: &str, input: &[u8]) -> HostResult<Option<String>> {
        self.calls
            .lock()
            .unwrap()
            .push((capability.to_string(), input.to_vec()));
        match &self.behavior {
            CallBehavior::Reply(result) => Ok(result.clone()),
            CallBehavior::MissingExport => Err(HostError::CapabilityCall {
                capability: capability.to_string(),
                message: "export not found".into(),
            }),
        }
    }
}

/// Host handing out fake handles, recording acquisition arguments.
struct FakeHost {
    behavior: CallBehavior,
    acquire_fails: bool,
    acquired: Arc<Mutex<Vec<(PluginSource, InstanceOptions)>>>,
    calls: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
}

impl FakeHost {
    fn replying(result: Option<&str>) -> Self {
        Self {
            behavior: CallBehavior::Reply(result.map(str::to_string)),
            acquire_fails: false,
            acquired: Arc::new(Mutex::new(Vec::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn missing_export() -> Self {
        Self {
            behavior: CallBehavior::MissingExport,
            ..Self::replying(None)
        }
    }

    fn unreachable() -> Self {
        Self {
            acquire_fails: true,
            ..Self::replying(None)
        }
    }
}

#[async_trait]
impl PluginHost for FakeHost {
    async fn acquire(
        &self,
        source: &PluginSource,
        options: &InstanceOptions,
    ) -> HostResult<Box<dyn PluginHandle>> {
        if self.acquire_fails {
            return Err(HostError::Fetch {
                url: source.to_string(),
                message: "connection refused".into(),
            });
        }
        self.acquired
            .lock()
            .unwrap()
            .push((source.clone(), options.clone()));
        Ok(Box::new(FakeHandle {
            behavior: self.behavior.clone(),
            calls: Arc::clone(&self.calls),
        }))
    }
}

fn demo_source() -> PluginSource {
    PluginSource::url("https://example.com/dist/output.wasm")
}

#[tokio::test]
async fn happy_path_returns_module_output() {
    let host = FakeHost::replying(Some("3"));
    let result = Bootstrap::new(demo_source())
        .run(&host, "count_vowels", "Hello World")
        .await
        .unwrap();

    assert_eq!(result, Some("3".to_string()));
    assert_eq!(render(result), "3");

    let calls = host.calls.lock().unwrap();
    assert_eq!(
        *calls,
        vec![("count_vowels".to_string(), b"Hello World".to_vec())]
    );
}

#[tokio::test]
async fn acquire_failure_short_circuits_invoke() {
    let host = FakeHost::unreachable();
    let result = Bootstrap::new(demo_source())
        .run(&host, "count_vowels", "Hello World")
        .await;

    assert!(matches!(result, Err(HostError::Fetch { .. })));
    // Stage two never ran: no handle was created, no invocation recorded.
    assert!(host.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn missing_capability_fails_the_pipeline() {
    let host = FakeHost::missing_export();
    let result = Bootstrap::new(demo_source())
        .run(&host, "count_vowels", "Hello World")
        .await;

    match result.unwrap_err() {
        HostError::CapabilityCall { capability, .. } => assert_eq!(capability, "count_vowels"),
        other => panic!("expected CapabilityCall, got: {other:?}"),
    }
}

#[tokio::test]
async fn absent_result_renders_marker() {
    let host = FakeHost::replying(None);
    let result = Bootstrap::new(demo_source())
        .run(&host, "count_vowels", "Hello World")
        .await
        .unwrap();

    assert_eq!(result, None);
    assert_eq!(render(result), ABSENT_MARKER);
}

#[tokio::test]
async fn options_reach_the_host_unchanged() {
    let host = FakeHost::replying(Some("3"));
    let options = InstanceOptions::default();
    Bootstrap::new(demo_source())
        .with_options(options.clone())
        .run(&host, "count_vowels", "Hello World")
        .await
        .unwrap();

    let acquired = host.acquired.lock().unwrap();
    assert_eq!(acquired.len(), 1);
    let (source, received) = &acquired[0];
    assert_eq!(*source, demo_source());
    assert_eq!(*received, options);
    assert!(!received.wasi);
}

#[tokio::test]
async fn repeated_runs_are_byte_identical() {
    let host = FakeHost::replying(Some("3"));
    let bootstrap = Bootstrap::new(demo_source());

    let first = bootstrap
        .run(&host, "count_vowels", "Hello World")
        .await
        .unwrap();
    let second = bootstrap
        .run(&host, "count_vowels", "Hello World")
        .await
        .unwrap();

    assert_eq!(first, second);

    // Every acquisition and invocation saw identical arguments.
    let acquired = host.acquired.lock().unwrap();
    assert_eq!(acquired.len(), 2);
    assert_eq!(acquired[0], acquired[1]);

    let calls = host.calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], calls[1]);
}
