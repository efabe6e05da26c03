use serde_json::Value;
use std::io::Read;

/// Read piped JSON from stdin.
///
/// An interactive TTY or an empty pipe yields `None`, letting the caller
/// fall back to flag-based input. Anything piped in must parse as JSON.
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut piped = String::new();
    std::io::stdin().read_to_string(&mut piped)?;
    if piped.trim().is_empty() {
        return Ok(None);
    }

    Ok(Some(serde_json::from_str(piped.trim())?))
}
