// tests/engine_fake_launcher.rs

mod common;
use crate::common::builders::{cli_args, ManifestBuilder};
use crate::common::{init_tracing, with_timeout, CapturedDiagnostics, FakeLauncher};

use std::error::Error;

use jobrunner::channels::{analyze_channels, resolve_eligible};
use jobrunner::errors::JobrunnerError;
use jobrunner::exec::{Engine, JobStatus};
use jobrunner::manifest::load_manifests;
use jobrunner::run_with;

type TestResult = Result<(), Box<dyn Error>>;

/// Deletes a file in the working directory when dropped, even if the test
/// panics first.
struct RemoveOnDrop(&'static str);

impl Drop for RemoveOnDrop {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(self.0);
    }
}

#[tokio::test]
async fn plain_jobs_launch_in_manifest_order() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let a = ManifestBuilder::new()
        .job("first,-,-")
        .job("second,-,-,0,x")
        .write_to(dir.path(), "a.jobs");
    let b = ManifestBuilder::new().job("third,-,-").write_to(dir.path(), "b.jobs");

    let launcher = FakeLauncher::new();
    let log = launcher.log();
    let capture = CapturedDiagnostics::new();

    let summary = with_timeout(run_with(&cli_args(false, &[a, b]), launcher, capture.diagnostics()))
        .await?;

    let launched = log.lock().unwrap().clone();
    let order: Vec<(usize, &str)> = launched
        .iter()
        .map(|r| (r.index, r.program.as_str()))
        .collect();
    assert_eq!(order, vec![(1, "first"), (2, "second"), (3, "third")]);
    assert_eq!(launched[1].args, vec!["x".to_string()]);
    assert!(!launched[0].redirected_stdin && !launched[0].redirected_stdout);

    assert_eq!(summary.launched, 3);
    let mut reported = capture.lines();
    reported.sort();
    assert_eq!(
        reported,
        vec![
            "Job 1 exited with status 0",
            "Job 2 exited with status 0",
            "Job 3 exited with status 0",
        ]
    );

    Ok(())
}

#[tokio::test]
async fn verbose_trace_precedes_each_launch() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let out = dir.path().join("out.txt");
    let jobs = ManifestBuilder::new()
        .job("cat,-,-")
        .job(&format!("sort,-,{},5,-r,-u", out.display()))
        .write_to(dir.path(), "jobs");

    let capture = CapturedDiagnostics::new();
    run_with(&cli_args(true, &[jobs]), FakeLauncher::new(), capture.diagnostics()).await?;

    let lines = capture.lines();
    assert_eq!(lines[0], "1:cat:stdin:stdout:0");
    assert_eq!(lines[1], format!("2:sort:stdin:{}:5:-r:-u", out.display()));
    assert_eq!(lines.len(), 4);
    assert!(out.exists(), "output file is created before launch");

    Ok(())
}

#[tokio::test]
async fn unopenable_output_skips_only_that_job() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let bad_out = dir.path().join("no/such/dir/out.txt");
    let jobs = ManifestBuilder::new()
        .job(&format!("broken,-,{}", bad_out.display()))
        .job("fine,-,-")
        .write_to(dir.path(), "jobs");

    let launcher = FakeLauncher::new();
    let log = launcher.log();
    let capture = CapturedDiagnostics::new();

    let summary = run_with(&cli_args(true, &[jobs]), launcher, capture.diagnostics()).await?;

    assert_eq!(summary.launched, 1);
    let launched = log.lock().unwrap().clone();
    assert_eq!(launched.len(), 1);
    assert_eq!((launched[0].index, launched[0].program.as_str()), (1, "fine"));

    assert_eq!(
        capture.lines(),
        vec![
            format!("Unable to open \"{}\" for writing", bad_out.display()),
            "1:fine:stdin:stdout:0".to_string(),
            "Job 1 exited with status 0".to_string(),
        ]
    );

    Ok(())
}

#[tokio::test]
async fn unreadable_input_and_output_are_both_reported() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let missing = dir.path().join("missing.txt");
    let bad_out = dir.path().join("gone/out.txt");
    let jobs = ManifestBuilder::new()
        .job(&format!("cat,{},{}", missing.display(), bad_out.display()))
        .write_to(dir.path(), "jobs");

    let capture = CapturedDiagnostics::new();
    let err = run_with(&cli_args(false, &[jobs]), FakeLauncher::new(), capture.diagnostics())
        .await
        .unwrap_err();

    assert!(matches!(err, JobrunnerError::NoRunnableJobs));
    assert_eq!(
        capture.lines(),
        vec![
            format!("Unable to open \"{}\" for reading", missing.display()),
            format!("Unable to open \"{}\" for writing", bad_out.display()),
        ]
    );

    Ok(())
}

#[tokio::test]
async fn statuses_map_to_reported_codes() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let jobs = ManifestBuilder::new()
        .job("ok,-,-")
        .job("fails,-,-")
        .job("killed,-,-")
        .job("missing-program,-,-")
        .write_to(dir.path(), "jobs");

    let launcher = FakeLauncher::new()
        .with_status("fails", JobStatus::Exited(3))
        .with_status("killed", JobStatus::Signaled(9))
        .with_status("missing-program", JobStatus::ExecFailed);
    let capture = CapturedDiagnostics::new();

    let summary = run_with(&cli_args(false, &[jobs]), launcher, capture.diagnostics()).await?;

    let mut by_index: Vec<(usize, i32)> = summary
        .completions
        .iter()
        .map(|c| (c.index, c.status.reported_code()))
        .collect();
    by_index.sort();
    assert_eq!(by_index, vec![(1, 0), (2, 3), (3, 1), (4, 255)]);

    let lines = capture.lines();
    assert!(lines.contains(&"Job 4 exited with status 255".to_string()));
    assert!(lines.contains(&"Job 3 exited with status 1".to_string()));

    Ok(())
}

#[tokio::test]
async fn engine_skips_ineligible_lines_without_using_an_index() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let jobs = ManifestBuilder::new()
        .job("orphan,@in,-")
        .job("a,-,@engine-test-pipe")
        .job("b,@engine-test-pipe,-")
        .write_to(dir.path(), "jobs");

    let manifest = load_manifests(&[jobs])?;
    let capture = CapturedDiagnostics::new();
    let diag = capture.diagnostics();
    let valid = analyze_channels(&manifest, &diag);
    let eligible = resolve_eligible(&manifest, &valid);

    // Channel tokens are opened as literal paths relative to the working directory.
    let _pipe = RemoveOnDrop("@engine-test-pipe");
    let launcher = FakeLauncher::new();
    let log = launcher.log();
    let supervisor = Engine::new(launcher, diag.clone())
        .verbose(true)
        .launch_eligible(&manifest, &eligible);
    assert_eq!(supervisor.launched(), 2);

    let completions = supervisor.wait_all(&diag).await?;
    assert_eq!(completions.len(), 2);

    let launched: Vec<(usize, String)> = log
        .lock()
        .unwrap()
        .iter()
        .map(|r| (r.index, r.program.clone()))
        .collect();
    assert_eq!(launched, vec![(1, "a".to_string()), (2, "b".to_string())]);

    let lines = capture.lines();
    assert_eq!(lines[0], "Invalid pipe usage \"in\"");
    assert_eq!(lines[1], "1:a:stdin:@engine-test-pipe:0");
    assert_eq!(lines[2], "2:b:@engine-test-pipe:stdout:0");
    assert!(std::path::Path::new("@engine-test-pipe").exists());

    Ok(())
}
