use std::sync::OnceLock;

static QUIET: OnceLock<bool> = OnceLock::new();

/// `BIZU_QUIET=1` suppresses banners and spinners (for scripts piping output)
pub fn is_quiet() -> bool {
    *QUIET.get_or_init(|| {
        std::env::var("BIZU_QUIET")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    })
}
