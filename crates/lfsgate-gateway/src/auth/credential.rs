use lfsgate_core::protocol::{Credential, Denial, Headers};

/// Header carrying the caller's credential (looked up case-insensitively).
pub const AUTHORIZATION: &str = "authorization";

/// Pull the credential out of the request headers.
///
/// A missing or blank header yields `Denial::MissingCredential`, which the
/// pipeline turns into the 401 prompt with the `LFS-Authenticate` challenge.
pub fn extract_credential(headers: &Headers) -> Result<Credential, Denial> {
    match headers.get(AUTHORIZATION) {
        Some(v) if !v.trim().is_empty() => {
            tracing::debug!("Authorization header present");
            Ok(Credential::new(v))
        }
        Some(_) => {
            tracing::error!("blank Authorization header");
            Err(Denial::MissingCredential)
        }
        None => {
            tracing::error!("missing Authorization header");
            Err(Denial::MissingCredential)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_raw_value_unparsed() {
        let h: Headers = [("Authorization", "Basic dXNlcjp0b2tlbg==")].into_iter().collect();
        let c = extract_credential(&h).unwrap();
        assert_eq!(c.expose(), "Basic dXNlcjp0b2tlbg==");
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let h: Headers = [("AUTHORIZATION", "token t")].into_iter().collect();
        assert_eq!(extract_credential(&h).unwrap().expose(), "token t");
    }

    #[test]
    fn absent_or_blank_is_missing() {
        assert_eq!(extract_credential(&Headers::new()).unwrap_err(), Denial::MissingCredential);
        let h: Headers = [("authorization", "  ")].into_iter().collect();
        assert_eq!(extract_credential(&h).unwrap_err(), Denial::MissingCredential);
    }
}
