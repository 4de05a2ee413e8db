//! Live injection demo.
//!
//! Gives you a few seconds to focus a text field, then replays a correction
//! into it. On macOS this posts real synthetic events; elsewhere it prints
//! the event stream that would have been posted. Run with
//!
//! ```bash
//! cargo run -p vikey-injection --example inject_demo -- --delete 2 --text "chào"
//! ```

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use vikey_injection::{FocusContext, InjectionConfig, Injector};

fn init_tracing() {
    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_target(false)
        .compact()
        .try_init();
}

#[derive(Debug)]
struct CliOptions {
    delete: usize,
    text: String,
}

fn parse_args() -> Result<CliOptions> {
    let mut options = CliOptions {
        delete: 0,
        text: "chào".to_string(),
    };
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--delete" => {
                let value = args.next().context("--delete requires a count")?;
                options.delete = value.parse().context("--delete count must be a number")?;
            }
            "--text" => {
                options.text = args.next().context("--text requires a string")?;
            }
            other => anyhow::bail!("unknown argument: {other} (expected --delete or --text)"),
        }
    }
    Ok(options)
}

#[cfg(target_os = "macos")]
fn build_injector() -> Injector {
    Injector::new(InjectionConfig {
        redact_logs: false,
        ..InjectionConfig::default()
    })
}

#[cfg(not(target_os = "macos"))]
fn build_injector() -> Injector {
    use std::collections::HashMap;
    use vikey_injection::synthesizer::{EventPort, EventSession, KeyEventPair};
    use vikey_injection::{ForegroundApp, ForegroundProvider, InjectionResult, ProcessEnumerator};

    struct StdoutPort;
    struct StdoutSession;

    impl EventPort for StdoutPort {
        fn open_session(&self) -> InjectionResult<Box<dyn EventSession + '_>> {
            Ok(Box::new(StdoutSession))
        }
    }

    impl EventSession for StdoutSession {
        fn post(&mut self, pair: KeyEventPair) -> InjectionResult<()> {
            println!("would post: {pair:?}");
            Ok(())
        }
    }

    struct NoForeground;
    impl ForegroundProvider for NoForeground {
        fn frontmost(&self) -> Option<ForegroundApp> {
            None
        }
    }

    struct NoTree(HashMap<i32, Vec<i32>>);
    impl ProcessEnumerator for NoTree {
        fn children(&mut self, pid: i32) -> Vec<i32> {
            self.0.get(&pid).cloned().unwrap_or_default()
        }
        fn executable_name(&mut self, _pid: i32) -> Option<String> {
            None
        }
    }

    Injector::with_ports(
        InjectionConfig {
            redact_logs: false,
            ..InjectionConfig::default()
        },
        Box::new(NoForeground),
        Box::new(NoTree(HashMap::new())),
        Box::new(StdoutPort),
    )
}

fn main() -> Result<()> {
    init_tracing();
    let options = parse_args()?;

    info!(
        delete = options.delete,
        text = %options.text,
        "focus a text field; injecting in 3 seconds"
    );
    std::thread::sleep(Duration::from_secs(3));

    let injector = build_injector();
    injector.inject_sync(options.delete, &options.text, &FocusContext::default());

    let metrics = injector.metrics();
    let metrics = metrics.lock();
    info!(
        pairs_posted = metrics.pairs_posted,
        pairs_failed = metrics.pairs_failed,
        "injection complete"
    );
    Ok(())
}
