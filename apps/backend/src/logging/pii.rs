use std::fmt;

use lazy_regex::{regex, Captures};

/// Masks values that should not reach the logs: email-shaped subjects and
/// opaque tokens (base64 or hex runs of 16+ characters).
///
/// Emails keep the first character of the local part and the full domain.
pub fn redact(input: &str) -> String {
    let emails = regex!(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b")
        .replace_all(input, |caps: &Captures| {
            let full = &caps[0];
            match full.split_once('@') {
                Some((local, domain)) if !local.is_empty() => {
                    format!("{}***@{domain}", &local[..1])
                }
                _ => full.to_string(),
            }
        });

    let tokens = regex!(r"\b[A-Za-z0-9+/]{16,}={0,2}\b").replace_all(&emails, "[REDACTED_TOKEN]");
    regex!(r"\b[A-Fa-f0-9]{16,}\b")
        .replace_all(&tokens, "[REDACTED_TOKEN]")
        .into_owned()
}

/// Display wrapper that redacts on format.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}
