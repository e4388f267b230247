use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Permissions that can be requested from the authorization server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OAuthScope {
    /// Read your pets.
    #[serde(rename = "read:pets")]
    ReadPets,

    /// Modify pets in your account.
    #[serde(rename = "write:pets")]
    WritePets,
}

impl OAuthScope {
    pub const ALL: [OAuthScope; 2] = [OAuthScope::ReadPets, OAuthScope::WritePets];

    /// The wire value sent in the `scope` parameter.
    pub const fn as_str(self) -> &'static str {
        match self {
            OAuthScope::ReadPets => "read:pets",
            OAuthScope::WritePets => "write:pets",
        }
    }
}

impl fmt::Display for OAuthScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OAuthScope {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OAuthScope::ALL
            .into_iter()
            .find(|scope| scope.as_str() == s)
            .ok_or_else(|| Error::InvalidArgument(format!("Unknown OAuth scope: {s}")))
    }
}

/// Join scopes into the space-separated form used on the wire.
///
/// Returns `None` for an absent or empty list so that the parameter is left
/// out entirely instead of being sent empty.
pub fn join_scopes(scopes: Option<&[OAuthScope]>) -> Option<String> {
    let joined = scopes?
        .iter()
        .map(|scope| scope.as_str())
        .filter(|value| !value.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_serialization() {
        let json = serde_json::to_string(&OAuthScope::ReadPets).unwrap();
        assert_eq!(json, "\"read:pets\"");

        let scope: OAuthScope = serde_json::from_str("\"write:pets\"").unwrap();
        assert_eq!(scope, OAuthScope::WritePets);
    }

    #[test]
    fn test_join_scopes() {
        let scopes = [OAuthScope::ReadPets, OAuthScope::WritePets];
        assert_eq!(
            join_scopes(Some(&scopes[..])).as_deref(),
            Some("read:pets write:pets")
        );
        assert_eq!(
            join_scopes(Some(&[OAuthScope::WritePets][..])).as_deref(),
            Some("write:pets")
        );
    }

    #[test]
    fn test_join_empty_scopes_is_absent() {
        let empty: Vec<OAuthScope> = Vec::new();
        assert_eq!(join_scopes(None), None);
        assert_eq!(join_scopes(Some(empty.as_slice())), None);
    }

    #[test]
    fn test_parse_scope() {
        assert_eq!("read:pets".parse::<OAuthScope>().unwrap(), OAuthScope::ReadPets);
        assert!("admin".parse::<OAuthScope>().is_err());
    }
}
