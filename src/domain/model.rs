use crate::utils::error::{RegistryError, Result};
use chrono::{Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Second-precision local date-time, always rendered as `YYYY-MM-DD HH:MM:SS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    pub fn now() -> Self {
        let now = Local::now().naive_local();
        Self(now.with_nanosecond(0).unwrap_or(now))
    }

    pub fn as_naive(&self) -> NaiveDateTime {
        self.0
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(value: NaiveDateTime) -> Self {
        Self(value.with_nanosecond(0).unwrap_or(value))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl FromStr for Timestamp {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT)?))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClientCategory {
    #[serde(rename = "Persona")]
    Person,
    #[serde(rename = "Negocio")]
    Business,
}

impl ClientCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Person => "Persona",
            Self::Business => "Negocio",
        }
    }
}

impl fmt::Display for ClientCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ClientCategory {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "Persona" => Ok(Self::Person),
            "Negocio" => Ok(Self::Business),
            other => Err(RegistryError::UnknownLabel {
                kind: "category",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceKind {
    #[serde(rename = "Telefonía")]
    Telephony,
    #[serde(rename = "Internet")]
    Internet,
    #[serde(rename = "TV de paga")]
    PayTv,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 3] = [Self::Telephony, Self::Internet, Self::PayTv];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Telephony => "Telefonía",
            Self::Internet => "Internet",
            Self::PayTv => "TV de paga",
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ServiceKind {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.label() == s)
            .ok_or_else(|| RegistryError::UnknownLabel {
                kind: "service",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRequest {
    #[serde(rename = "tipo")]
    pub kind: ServiceKind,
    #[serde(rename = "fecha_solicitud")]
    pub requested_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "tipo_cliente")]
    pub category: ClientCategory,
    #[serde(rename = "fecha_registro")]
    pub registered_at: Timestamp,
    #[serde(rename = "servicios", default)]
    pub services: Vec<ServiceRequest>,
}

impl Client {
    /// 建立新客戶，註冊時間為目前時間。唯一性由呼叫端負責。
    pub fn new(name: impl Into<String>, category: ClientCategory) -> Self {
        Self {
            name: name.into(),
            category,
            registered_at: Timestamp::now(),
            services: Vec::new(),
        }
    }

    /// 追加一筆服務申請；未提供時間則使用目前時間
    pub fn add_service(
        &mut self,
        kind: ServiceKind,
        requested_at: Option<Timestamp>,
    ) -> &ServiceRequest {
        self.services.push(ServiceRequest {
            kind,
            requested_at: requested_at.unwrap_or_else(Timestamp::now),
        });
        &self.services[self.services.len() - 1]
    }

    pub fn storage_key(&self) -> String {
        crate::core::naming::normalize_name(&self.name)
    }

    /// Display form shown to the operator: services are enumerated from 1.
    pub fn render_text(&self) -> String {
        let mut out = self.header_text();
        for (i, service) in self.services.iter().enumerate() {
            out.push_str(&format!(
                "  {}. Tipo: {}, Fecha: {}\n",
                i + 1,
                service.kind,
                service.requested_at
            ));
        }
        out
    }

    /// Canonical file text (the `.txt` artifact).
    pub fn to_record_text(&self) -> String {
        let mut out = self.header_text();
        for service in &self.services {
            out.push_str(&format!(
                "- Tipo: {}, Fecha: {}\n",
                service.kind, service.requested_at
            ));
        }
        out
    }

    pub fn render_structured(&self) -> serde_json::Value {
        serde_json::json!({
            "nombre": self.name,
            "tipo_cliente": self.category,
            "fecha_registro": self.registered_at,
            "servicios": self.services,
        })
    }

    fn header_text(&self) -> String {
        format!(
            "Nombre: {}\nTipo: {}\nFecha de registro: {}\nServicios:\n",
            self.name, self.category, self.registered_at
        )
    }
}
