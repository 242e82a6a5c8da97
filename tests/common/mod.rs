//! Common test utilities for docuprox-batch

pub mod server;

pub use fixtures::{ItemFactory, PNG_BYTES};
pub use server::MockDocuProx;

/// Skip test if environment variable is not set
#[macro_export]
macro_rules! skip_without_env {
    ($var:expr) => {
        if std::env::var($var).is_err() {
            eprintln!("Skipping test: {} environment variable not set", $var);
            return;
        }
    };
}

/// Assert that an output record is a failure and return its error message
#[macro_export]
macro_rules! assert_failure {
    ($output:expr) => {
        match &$output.json {
            docuprox_batch::Outcome::Failure(failure) => failure.error.clone(),
            docuprox_batch::Outcome::Success(success) => {
                panic!("Expected failure record, got success: {:?}", success)
            }
        }
    };
}
