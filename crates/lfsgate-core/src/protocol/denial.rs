//! Terminal authorization denials and their fixed LFS responses.

use super::response::ResponseEnvelope;

const TOKEN_DOCS_URL: &str = "https://help.github.com/en/github/authenticating-to-github/creating-a-personal-access-token-for-the-command-line";
const SCOPES_DOCS_URL: &str = "https://developer.github.com/apps/building-oauth-apps/understanding-scopes-for-oauth-apps/#available-scopes";
const PERMISSIONS_DOCS_URL: &str = "https://help.github.com/en/github/getting-started-with-github/access-permissions-on-github";

/// `LFS-Authenticate` challenge sent with the 401 prompt.
pub const LFS_AUTHENTICATE: &str = r#"Basic realm="Git LFS", charset="UTF-8""#;

/// Why the pipeline stopped before reaching a storage handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// No `authorization` header.
    MissingCredential,
    /// The permission query itself failed.
    UpstreamFailure,
    /// The query succeeded but returned no repository.
    RepositoryInaccessible,
    /// Resolved permission is below the configured minimum.
    PolicyDenied,
}

impl Denial {
    /// Label used in logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            Denial::MissingCredential => "missing_credential",
            Denial::UpstreamFailure => "upstream_failure",
            Denial::RepositoryInaccessible => "repository_inaccessible",
            Denial::PolicyDenied => "policy_denied",
        }
    }

    pub fn status(self) -> u16 {
        match self {
            Denial::MissingCredential => 401,
            Denial::UpstreamFailure | Denial::RepositoryInaccessible | Denial::PolicyDenied => 403,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Denial::MissingCredential => {
                "Pass your GitHub user as username and a personal token as password"
            }
            Denial::UpstreamFailure => {
                "The GitHub API token provided lacks access to this GitHub repository."
            }
            Denial::RepositoryInaccessible => {
                "It seems the GitHub repository is private and the GitHub API token provided lacks access to private repositories. Grant it the corresponding scope and try again."
            }
            Denial::PolicyDenied => "Your permission level for this repository is not enough.",
        }
    }

    pub fn documentation_url(self) -> &'static str {
        match self {
            Denial::MissingCredential | Denial::UpstreamFailure => TOKEN_DOCS_URL,
            Denial::RepositoryInaccessible => SCOPES_DOCS_URL,
            Denial::PolicyDenied => PERMISSIONS_DOCS_URL,
        }
    }

    /// Build the terminal envelope. Every denial carries the LFS media type;
    /// the 401 also carries the `LFS-Authenticate` challenge.
    pub fn envelope(self) -> ResponseEnvelope {
        let env = ResponseEnvelope::lfs_error(
            self.status(),
            self.message(),
            Some(self.documentation_url()),
        );
        match self {
            Denial::MissingCredential => env.with_header("LFS-Authenticate", LFS_AUTHENTICATE),
            _ => env,
        }
    }
}
