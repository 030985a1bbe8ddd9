//! Access-token payload decoding.
//!
//! The signature is NOT verified: the identity provider's keys are not
//! available to the client, and the services re-check every token
//! themselves. Claims decoded here are display metadata (name, roles for
//! menu visibility, expiry to avoid sending dead tokens) and must never
//! gate anything the backend does not also enforce.

use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::roles::RoleSet;

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Expiry as epoch seconds.
    pub fn exp(&self) -> Option<i64> {
        match self.0.get("exp")? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            _ => None,
        }
    }

    pub fn subject(&self) -> Option<&str> {
        self.str_claim("sub")
    }

    pub fn email(&self) -> Option<&str> {
        self.str_claim("email")
    }

    pub fn preferred_username(&self) -> Option<&str> {
        self.str_claim("preferred_username")
    }

    /// Full name if present, falling back to username then email.
    pub fn display_name(&self) -> Option<&str> {
        self.str_claim("name")
            .or_else(|| self.preferred_username())
            .or_else(|| self.email())
    }

    /// Raw role names: a top-level `roles` array wins, otherwise Keycloak's
    /// `realm_access.roles`; empty when neither exists.
    pub fn role_names(&self) -> Vec<String> {
        if let Some(Value::Array(roles)) = self.0.get("roles") {
            return string_items(roles);
        }
        if let Some(Value::Array(roles)) = self
            .0
            .get("realm_access")
            .and_then(|access| access.get("roles"))
        {
            return string_items(roles);
        }
        Vec::new()
    }

    pub fn roles(&self) -> RoleSet {
        RoleSet::from_names(self.role_names())
    }

    pub fn is_expired_at(&self, now_secs: i64) -> bool {
        matches!(self.exp(), Some(exp) if exp < now_secs)
    }

    fn str_claim(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

fn string_items(values: &[Value]) -> Vec<String> {
    values
        .iter()
        .filter_map(|v| v.as_str().map(str::to_owned))
        .collect()
}

/// Decodes the payload segment of a JWT without checking its signature,
/// expiry or audience.
pub fn decode_unverified(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)?;
    Ok(data.claims)
}
