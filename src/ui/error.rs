use cachet::CachetError;

use super::json::{emit_event, events::ErrorEvent};

/// Fix-it hint for errors the operator can act on
fn help_for(err: &CachetError) -> Option<&'static str> {
    match err {
        CachetError::EmptyManifest => Some("Check --source points at the build output."),
        CachetError::MissingEntryPoint { .. } => Some(
            "Build the site first, or set [classifier] entry_filename in cachet.toml.",
        ),
        CachetError::UnconfirmedWildcard => {
            Some("Pass --yes, or set [invalidation] explicit_wildcard_confirmed = true.")
        }
        CachetError::AmbiguousClassification { .. } => {
            Some("Set [classifier] precedence to \"entry-first\" or \"hash-first\".")
        }
        CachetError::NotConfigured { hint, .. } => Some(*hint),
        _ => None,
    }
}

pub fn format_error(err: &anyhow::Error) -> String {
    let mut out = format!("[ERROR] {}\n", err);
    for cause in err.chain().skip(1) {
        out.push_str(&format!("  caused by: {}\n", cause));
    }
    if let Some(help) = err.downcast_ref::<CachetError>().and_then(help_for) {
        out.push_str(&format!("  help: {}\n", help));
    }
    out
}

pub fn print_error(err: &anyhow::Error, command: &str, json: bool) {
    if json {
        let cachet = err.downcast_ref::<CachetError>();
        let code = cachet.map_or("error", CachetError::code);
        let mut event = ErrorEvent::new(command, code, format!("{:#}", err));
        if let Some(help) = cachet.and_then(help_for) {
            event = event.with_help(help);
        }
        let _ = emit_event(&event);
        return;
    }

    eprint!("{}", format_error(err));
}
