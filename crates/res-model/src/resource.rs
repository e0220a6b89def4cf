//! Typed connection resources and their settings mapping

use std::fmt;
use std::str::FromStr;

use res_ini::SettingsBlock;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The closed set of resource kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Db,
    Ldap,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 2] = [ResourceKind::Db, ResourceKind::Ldap];

    /// The literal written to the `type` key.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Db => "db",
            ResourceKind::Ldap => "ldap",
        }
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "db" => Ok(ResourceKind::Db),
            "ldap" => Ok(ResourceKind::Ldap),
            other => Err(Error::invalid_resource_type(other)),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A SQL database connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbResource {
    pub host: String,
    pub port: u16,
    /// Database backend, e.g. `mysql` or `pgsql`. Open set; unknown
    /// backends pass through to the settings untouched.
    pub db_type: String,
    pub db_name: String,
    pub db_username: String,
    pub db_password: String,
    /// TLS material. Presence enables SSL for the connection.
    pub tls: Option<DbTlsOptions>,
}

/// Optional TLS material for a database connection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DbTlsOptions {
    pub cert: Option<String>,
    pub key: Option<String>,
    pub ca: Option<String>,
    pub capath: Option<String>,
    pub cipher: Option<String>,
}

/// An LDAP directory connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LdapResource {
    pub host: String,
    pub port: u16,
    pub root_dn: String,
    pub bind_dn: String,
    pub bind_pw: String,
    pub encryption: LdapEncryption,
}

/// Connection security for LDAP resources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LdapEncryption {
    #[default]
    None,
    StartTls,
    Ldaps,
}

impl LdapEncryption {
    pub fn as_str(&self) -> &'static str {
        match self {
            LdapEncryption::None => "none",
            LdapEncryption::StartTls => "starttls",
            LdapEncryption::Ldaps => "ldaps",
        }
    }
}

/// A validated connection resource.
///
/// Constructed through [`crate::ResourceDefinition::validate`] or
/// directly from the typed variants; either way an unsupported kind
/// cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Db(DbResource),
    Ldap(LdapResource),
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Db(_) => ResourceKind::Db,
            Resource::Ldap(_) => ResourceKind::Ldap,
        }
    }

    /// Render the settings for this resource's INI section.
    ///
    /// `type` is always the first key and carries the kind literal.
    /// Ports render as decimal strings. Absent optional fields are
    /// omitted entirely.
    pub fn to_settings(&self) -> SettingsBlock {
        let mut settings = SettingsBlock::new();
        settings.insert("type", self.kind().as_str());
        match self {
            Resource::Db(db) => db.fill_settings(&mut settings),
            Resource::Ldap(ldap) => ldap.fill_settings(&mut settings),
        }
        settings
    }
}

impl DbResource {
    fn fill_settings(&self, settings: &mut SettingsBlock) {
        settings.insert("db", self.db_type.as_str());
        settings.insert("host", self.host.as_str());
        settings.insert("port", self.port.to_string());
        settings.insert("dbname", self.db_name.as_str());
        settings.insert("username", self.db_username.as_str());
        settings.insert("password", self.db_password.as_str());

        if let Some(tls) = &self.tls {
            settings.insert("use_ssl", "true");
            let optionals = [
                ("ssl_cert", &tls.cert),
                ("ssl_key", &tls.key),
                ("ssl_ca", &tls.ca),
                ("ssl_capath", &tls.capath),
                ("ssl_cipher", &tls.cipher),
            ];
            for (key, value) in optionals {
                if let Some(value) = value {
                    settings.insert(key, value.as_str());
                }
            }
        }
    }
}

impl LdapResource {
    fn fill_settings(&self, settings: &mut SettingsBlock) {
        settings.insert("hostname", self.host.as_str());
        settings.insert("port", self.port.to_string());
        settings.insert("root_dn", self.root_dn.as_str());
        settings.insert("bind_dn", self.bind_dn.as_str());
        settings.insert("bind_pw", self.bind_pw.as_str());
        settings.insert("encryption", self.encryption.as_str());
    }
}
