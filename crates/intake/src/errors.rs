use std::sync::OnceLock;

use color_eyre::Result;
use tracing::error;

static INIT: OnceLock<()> = OnceLock::new();

pub fn init() -> Result<()> {
    // idempotent: wenn schon initialisiert, tue nichts
    if INIT.get().is_some() {
        return Ok(());
    }

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .panic_section("This is a bug in the enrollment front-end.")
        .capture_span_trace_by_default(false)
        .display_location_section(false)
        .display_env_section(false)
        .try_into_hooks()?;
    eyre_hook.install()?;

    std::panic::set_hook(Box::new(move |panic_info| {
        error!(%panic_info, "panic");
        eprintln!("{}", panic_hook.panic_report(panic_info));
        std::process::exit(1);
    }));

    let _ = INIT.set(());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Guard only; the real panic hook exits the process.
    #[test]
    fn init_returns_early_once_marked() {
        let _ = INIT.set(());
        assert!(init().is_ok());
        assert!(INIT.get().is_some());
    }
}
