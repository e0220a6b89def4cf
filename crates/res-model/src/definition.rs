//! Flat resource definitions as users declare them
//!
//! A definition mirrors the console's parameter surface: one `type`
//! discriminator plus flat, mostly optional fields for both kinds.
//! [`ResourceDefinition::validate`] is the single boundary where
//! invalid input is rejected and the typed [`Resource`] is built.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::resource::{
    DbResource, DbTlsOptions, LdapEncryption, LdapResource, Resource, ResourceKind,
};

/// One resource definition from a definitions file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDefinition {
    /// Resource kind literal; must be one of `db`, `ldap`.
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_password: Option<String>,
    #[serde(default)]
    pub db_use_ssl: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_ssl_cert: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_ssl_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_ssl_ca: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_ssl_capath: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_ssl_cipher: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ldap_root_dn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ldap_bind_dn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ldap_bind_pw: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ldap_encryption: Option<LdapEncryption>,
}

impl ResourceDefinition {
    /// Validate this definition and build the typed resource.
    ///
    /// The kind is checked first; for an unknown kind no other field
    /// is looked at. Fields belonging to the other kind are ignored,
    /// and `db_ssl_*` values are dropped unless `db_use_ssl` is set.
    pub fn validate(&self) -> Result<Resource> {
        let kind: ResourceKind = self.kind.parse()?;
        match kind {
            ResourceKind::Db => self.validate_db(),
            ResourceKind::Ldap => self.validate_ldap(),
        }
    }

    fn validate_db(&self) -> Result<Resource> {
        const KIND: ResourceKind = ResourceKind::Db;

        let tls = self.db_use_ssl.then(|| DbTlsOptions {
            cert: self.db_ssl_cert.clone(),
            key: self.db_ssl_key.clone(),
            ca: self.db_ssl_ca.clone(),
            capath: self.db_ssl_capath.clone(),
            cipher: self.db_ssl_cipher.clone(),
        });

        Ok(Resource::Db(DbResource {
            host: require(KIND, "host", &self.host)?,
            port: require_port(KIND, self.port)?,
            db_type: require(KIND, "db_type", &self.db_type)?,
            db_name: require(KIND, "db_name", &self.db_name)?,
            db_username: require(KIND, "db_username", &self.db_username)?,
            db_password: require(KIND, "db_password", &self.db_password)?,
            tls,
        }))
    }

    fn validate_ldap(&self) -> Result<Resource> {
        const KIND: ResourceKind = ResourceKind::Ldap;

        Ok(Resource::Ldap(LdapResource {
            host: require(KIND, "host", &self.host)?,
            port: require_port(KIND, self.port)?,
            root_dn: require(KIND, "ldap_root_dn", &self.ldap_root_dn)?,
            bind_dn: require(KIND, "ldap_bind_dn", &self.ldap_bind_dn)?,
            bind_pw: require(KIND, "ldap_bind_pw", &self.ldap_bind_pw)?,
            encryption: self.ldap_encryption.unwrap_or_default(),
        }))
    }
}

fn require(kind: ResourceKind, field: &'static str, value: &Option<String>) -> Result<String> {
    value.clone().ok_or(Error::MissingField { kind, field })
}

fn require_port(kind: ResourceKind, value: Option<u16>) -> Result<u16> {
    value.ok_or(Error::MissingField {
        kind,
        field: "port",
    })
}
