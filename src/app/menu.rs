//! Menu texts and option parsing for the interactive shell.

use crate::domain::model::{ClientCategory, ServiceKind};

pub const RULE_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainMenuOption {
    CreateClient,
    SearchClient,
    ListClients,
    Exit,
}

impl MainMenuOption {
    pub fn from_input(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::CreateClient),
            "2" => Some(Self::SearchClient),
            "3" => Some(Self::ListClients),
            "4" => Some(Self::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailOption {
    AddService,
    ReturnToMain,
}

impl DetailOption {
    pub fn from_input(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::AddService),
            "2" => Some(Self::ReturnToMain),
            _ => None,
        }
    }
}

/// 1 = Persona, 2 = Negocio; anything else is invalid.
pub fn category_from_input(input: &str) -> Option<ClientCategory> {
    match input.trim() {
        "1" => Some(ClientCategory::Person),
        "2" => Some(ClientCategory::Business),
        _ => None,
    }
}

/// 1-3 pick a service; "4" and any other input cancel the selection.
pub fn service_from_input(input: &str) -> Option<ServiceKind> {
    match input.trim() {
        "1" => Some(ServiceKind::Telephony),
        "2" => Some(ServiceKind::Internet),
        "3" => Some(ServiceKind::PayTv),
        _ => None,
    }
}

pub fn banner(title: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("{rule}\n    {title}\n{rule}\n")
}

pub fn main_menu() -> String {
    let mut out = banner("SISTEMA DE GESTIÓN DE CLIENTES SKY");
    out.push_str("1. Crear nuevo cliente\n");
    out.push_str("2. Buscar cliente existente\n");
    out.push_str("3. Listar todos los clientes\n");
    out.push_str("4. Salir\n");
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');
    out
}

pub fn service_menu() -> String {
    let mut out = banner("SELECCIÓN DE SERVICIO");
    for (i, kind) in ServiceKind::ALL.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, kind));
    }
    out.push_str(&format!("{}. Cancelar\n", ServiceKind::ALL.len() + 1));
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');
    out
}

pub fn category_menu() -> String {
    format!(
        "\nTipo de cliente:\n1. {}\n2. {}\n",
        ClientCategory::Person,
        ClientCategory::Business
    )
}
