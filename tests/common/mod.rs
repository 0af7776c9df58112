#![allow(dead_code)]

pub use jobrunner_test_utils::builders;
pub use jobrunner_test_utils::capture::CapturedDiagnostics;
pub use jobrunner_test_utils::fake_launcher::{FakeLauncher, LaunchRecord};
pub use jobrunner_test_utils::{init_tracing, with_timeout};
