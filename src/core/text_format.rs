//! Parser for the canonical `.txt` record.
//!
//! Only used for stores that lack the `.json` sibling. Header lines are
//! strict: a missing prefix on lines 1-3 fails the whole record. Service
//! lines that do not parse are skipped.

use crate::domain::model::{Client, ClientCategory, ServiceKind, ServiceRequest, Timestamp};
use crate::utils::error::{RegistryError, Result};
use regex::Regex;
use std::sync::LazyLock;

const NAME_PREFIX: &str = "Nombre: ";
const CATEGORY_PREFIX: &str = "Tipo: ";
const REGISTERED_PREFIX: &str = "Fecha de registro: ";
const SERVICE_PREFIX: &str = "- Tipo:";

static SERVICE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^- Tipo: (?P<kind>.+?), Fecha: (?P<date>.+)$").expect("service line pattern")
});

pub fn parse_record_text(content: &str) -> Result<Client> {
    let lines: Vec<&str> = content.lines().collect();

    let name = header_value(&lines, 0, NAME_PREFIX)?;
    let category: ClientCategory = header_value(&lines, 1, CATEGORY_PREFIX)?.parse()?;
    let registered_at: Timestamp = header_value(&lines, 2, REGISTERED_PREFIX)?.parse()?;

    let mut client = Client {
        name: name.to_string(),
        category,
        registered_at,
        services: Vec::new(),
    };

    // 從第 4 行之後掃描服務行
    for (index, line) in lines.iter().enumerate().skip(3) {
        if !line.starts_with(SERVICE_PREFIX) {
            continue;
        }
        match parse_service_line(line) {
            Some(service) => client.services.push(service),
            None => {
                tracing::warn!(
                    "Skipping malformed service line {} for '{}': {}",
                    index + 1,
                    client.name,
                    line
                );
            }
        }
    }

    Ok(client)
}

fn header_value<'a>(lines: &[&'a str], index: usize, prefix: &str) -> Result<&'a str> {
    let line = lines
        .get(index)
        .ok_or_else(|| RegistryError::parse(index + 1, "unexpected end of record"))?;
    line.strip_prefix(prefix)
        .map(str::trim)
        .ok_or_else(|| RegistryError::parse(index + 1, format!("expected '{}' prefix", prefix)))
}

fn parse_service_line(line: &str) -> Option<ServiceRequest> {
    let caps = SERVICE_LINE.captures(line.trim_end())?;
    let kind: ServiceKind = caps["kind"].parse().ok()?;
    let requested_at: Timestamp = caps["date"].parse().ok()?;
    Some(ServiceRequest { kind, requested_at })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Nombre: ACME Corp\n\
                          Tipo: Negocio\n\
                          Fecha de registro: 2024-05-01 10:00:00\n\
                          Servicios:\n\
                          - Tipo: Internet, Fecha: 2024-05-02 11:30:00\n\
                          - Tipo: Telefonía, Fecha: 2024-05-03 09:15:00\n";

    #[test]
    fn test_parse_well_formed_record() {
        let client = parse_record_text(SAMPLE).unwrap();
        assert_eq!(client.name, "ACME Corp");
        assert_eq!(client.category, ClientCategory::Business);
        assert_eq!(client.registered_at.to_string(), "2024-05-01 10:00:00");
        assert_eq!(client.services.len(), 2);
        assert_eq!(client.services[0].kind, ServiceKind::Internet);
        assert_eq!(client.services[1].kind, ServiceKind::Telephony);
    }

    #[test]
    fn test_record_text_parses_back() {
        let mut client = Client::new("Ana Li", ClientCategory::Person);
        client.add_service(ServiceKind::PayTv, None);
        let parsed = parse_record_text(&client.to_record_text()).unwrap();
        assert_eq!(parsed, client);
    }

    #[test]
    fn test_header_out_of_order_is_rejected() {
        let content = "Tipo: Negocio\nNombre: ACME Corp\nFecha de registro: 2024-05-01 10:00:00\n";
        let err = parse_record_text(content).unwrap_err();
        assert!(matches!(err, RegistryError::ParseError { line: 1, .. }));
    }

    #[test]
    fn test_truncated_header_is_rejected() {
        let err = parse_record_text("Nombre: ACME Corp\nTipo: Negocio\n").unwrap_err();
        assert!(matches!(err, RegistryError::ParseError { line: 3, .. }));
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let content = "Nombre: X\nTipo: Gobierno\nFecha de registro: 2024-05-01 10:00:00\nServicios:\n";
        assert!(matches!(
            parse_record_text(content),
            Err(RegistryError::UnknownLabel { .. })
        ));
    }

    #[test]
    fn test_malformed_service_lines_are_skipped() {
        let content = "Nombre: X\n\
                       Tipo: Persona\n\
                       Fecha de registro: 2024-05-01 10:00:00\n\
                       Servicios:\n\
                       - Tipo: Internet\n\
                       nota libre\n\
                       - Tipo: Radio, Fecha: 2024-05-02 11:30:00\n\
                       - Tipo: TV de paga, Fecha: 2024-05-04 12:00:00\n";
        let client = parse_record_text(content).unwrap();
        assert_eq!(client.services.len(), 1);
        assert_eq!(client.services[0].kind, ServiceKind::PayTv);
    }
}
