use std::sync::OnceLock;

static QUIET: OnceLock<bool> = OnceLock::new();

/// `CCGRAPH_QUIET=1` (or `true`) turns off decorative terminal output.
/// Warnings, errors and command results are still printed.
pub fn is_quiet() -> bool {
    *QUIET.get_or_init(|| {
        std::env::var("CCGRAPH_QUIET")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    })
}
