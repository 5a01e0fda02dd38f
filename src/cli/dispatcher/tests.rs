use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use super::{dispatch, launch};
use crate::backends::registry::Registry;
use crate::backends::{Backend, BackendDescriptor};
use crate::cli::args::{BackendInvocation, Cli, GlobalFlags};
use crate::error::{QuarryError, Result};

static RECORDED_ARGS: Mutex<Vec<String>> = Mutex::new(Vec::new());

struct NoopBackend;

impl Backend for NoopBackend {
    fn run(&mut self) -> Result<()> {
        Ok(())
    }
}

struct FailingBackend;

impl Backend for FailingBackend {
    fn run(&mut self) -> Result<()> {
        Err(QuarryError::Other("boom".to_string()))
    }
}

fn recording_factory(forwarded: &[String]) -> Result<Box<dyn Backend>> {
    *RECORDED_ARGS.lock().unwrap() = forwarded.to_vec();
    Ok(Box::new(NoopBackend))
}

fn failing_factory(_: &[String]) -> Result<Box<dyn Backend>> {
    Ok(Box::new(FailingBackend))
}

fn test_registry() -> Registry {
    Registry::from_descriptors(vec![
        BackendDescriptor {
            name: "record",
            summary: "records its arguments",
            factory: recording_factory,
        },
        BackendDescriptor {
            name: "fail",
            summary: "always fails",
            factory: failing_factory,
        },
    ])
    .unwrap()
}

fn base_cli() -> Cli {
    Cli {
        global: GlobalFlags {
            version: false,
            debug: false,
        },
        backend: None,
    }
}

#[test]
fn missing_backend_is_a_usage_error() {
    let cli = base_cli();
    assert!(matches!(dispatch(&cli).unwrap_err(), QuarryError::Usage));
}

#[test]
fn forwarded_arguments_reach_the_factory_unchanged() {
    let registry = test_registry();
    let forwarded = vec!["--uri".to_string(), "repo".to_string(), "-x".to_string()];

    launch(&registry, "record", &forwarded).unwrap();

    assert_eq!(*RECORDED_ARGS.lock().unwrap(), forwarded);
}

#[test]
fn unknown_backend_never_constructs() {
    static TOUCHED: AtomicBool = AtomicBool::new(false);
    fn guarded_factory(_: &[String]) -> Result<Box<dyn Backend>> {
        TOUCHED.store(true, Ordering::SeqCst);
        Ok(Box::new(NoopBackend))
    }

    let registry = Registry::from_descriptors(vec![BackendDescriptor {
        name: "guarded",
        summary: "test backend",
        factory: guarded_factory,
    }])
    .unwrap();

    let err = launch(&registry, "nosuchbackend", &[]).unwrap_err();

    assert_eq!(err.to_string(), "Unknown backend nosuchbackend");
    assert!(matches!(err, QuarryError::UnknownBackend { name } if name == "nosuchbackend"));
    assert!(!TOUCHED.load(Ordering::SeqCst));
}

#[test]
fn backend_failures_propagate_unchanged() {
    let registry = test_registry();
    let err = launch(&registry, "fail", &[]).unwrap_err();
    assert_eq!(err.to_string(), "boom");
}

#[test]
fn dispatch_resolves_against_the_builtin_registry() {
    let mut cli = base_cli();
    cli.backend = Some(BackendInvocation::Backend(vec![
        "nosuchbackend".to_string(),
    ]));

    let err = dispatch(&cli).unwrap_err();
    assert!(matches!(err, QuarryError::UnknownBackend { .. }));
}

#[test]
fn exit_codes_follow_the_error_kind() {
    assert_eq!(QuarryError::Interrupted.exit_code(), 0);
    assert_eq!(QuarryError::Usage.exit_code(), 1);
    assert_eq!(
        QuarryError::UnknownBackend {
            name: "x".to_string()
        }
        .exit_code(),
        1
    );
    assert_eq!(QuarryError::Other("boom".to_string()).exit_code(), 1);
}
