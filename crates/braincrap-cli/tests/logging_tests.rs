use tracing::Level;

// Installs the global subscriber, so this file holds a single test.
#[test]
fn test_debug_logging_reaches_both_crates() {
    std::env::remove_var("RUST_LOG");
    braincrap_core::init_tracing(true);

    assert!(tracing::enabled!(target: "braincrap_core::scanner", Level::DEBUG));
    assert!(tracing::enabled!(target: "braincrap_cli::driver", Level::DEBUG));
    assert!(tracing::enabled!(target: "braincrap_cli::driver", Level::WARN));
    assert!(!tracing::enabled!(target: "braincrap_cli::driver", Level::TRACE));
}
