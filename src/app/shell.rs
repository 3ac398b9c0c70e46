use crate::app::menu::{self, DetailOption, MainMenuOption};
use crate::core::registry::ClientRegistry;
use crate::core::Storage;
use crate::domain::model::{Client, ClientCategory, ServiceKind};
use crate::utils::error::Result;
use crate::utils::validation::validate_client_name;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

const PAUSE_PROMPT: &str = "\nPresione Enter para continuar...";

/// Outcome of one flow: keep looping, or stop because the operator left
/// (Exit option or end of input).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Sequential menu loop over a line reader and a writer.
pub struct Shell<S: Storage, R, W> {
    registry: ClientRegistry<S>,
    input: R,
    output: W,
    clear_lines: usize,
}

impl<S, R, W> Shell<S, R, W>
where
    S: Storage,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(registry: ClientRegistry<S>, input: R, output: W) -> Self {
        Self {
            registry,
            input,
            output,
            clear_lines: 0,
        }
    }

    /// Blank lines printed before each screen.
    pub fn with_clear_lines(mut self, clear_lines: usize) -> Self {
        self.clear_lines = clear_lines;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// 主選單迴圈。只有輸出串流寫入失敗才會回傳錯誤。
    pub async fn run(&mut self) -> Result<()> {
        tracing::info!("Starting client registry shell");

        if let Err(e) = self.registry.storage().ensure_root().await {
            tracing::error!("Cannot create storage directory: {}", e);
        }

        loop {
            match self.main_menu_step().await {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) => {
                    tracing::error!("Unexpected error: {}", e);
                    self.print(&format!("\nOcurrió un error inesperado: {}\n", e))
                        .await?;
                    self.print("El error ha sido registrado.\n").await?;
                    if self.pause().await? == Flow::Quit {
                        break;
                    }
                }
            }
        }

        tracing::info!("Shutting down client registry shell");
        Ok(())
    }

    async fn main_menu_step(&mut self) -> Result<Flow> {
        self.clear_screen().await?;
        self.print(&menu::main_menu()).await?;
        let Some(choice) = self.prompt("Seleccione una opción: ").await? else {
            return Ok(Flow::Quit);
        };

        match MainMenuOption::from_input(&choice) {
            Some(MainMenuOption::CreateClient) => self.create_client().await,
            Some(MainMenuOption::SearchClient) => self.search_client().await,
            Some(MainMenuOption::ListClients) => self.list_clients().await,
            Some(MainMenuOption::Exit) => {
                self.clear_screen().await?;
                self.print("Gracias por utilizar el Sistema de Gestión de Clientes Sky.\n")
                    .await?;
                Ok(Flow::Quit)
            }
            None => {
                self.print("Opción inválida. Intente nuevamente.\n").await?;
                Ok(Flow::Continue)
            }
        }
    }

    async fn create_client(&mut self) -> Result<Flow> {
        self.clear_screen().await?;
        self.print(&menu::banner("CREAR NUEVO CLIENTE")).await?;

        let Some(raw_name) = self.prompt("Ingrese el nombre del cliente: ").await? else {
            return Ok(Flow::Quit);
        };
        let name = raw_name.trim().to_string();

        if let Err(e) = validate_client_name(&name) {
            self.print(&format!("\n{}\n", e.user_friendly_message()))
                .await?;
            return self.pause().await;
        }

        if self.registry.exists(&name).await {
            self.print(&format!("\nYa existe un cliente con el nombre '{}'.\n", name))
                .await?;
            self.print("Por favor, use un nombre diferente o actualice el cliente existente.\n")
                .await?;
            return self.pause().await;
        }

        self.print(&menu::category_menu()).await?;
        let Some(choice) = self.prompt("Seleccione el tipo de cliente: ").await? else {
            return Ok(Flow::Quit);
        };
        let category = match menu::category_from_input(&choice) {
            Some(category) => category,
            None => {
                self.print("Opción inválida. Se asignará como 'Persona' por defecto.\n")
                    .await?;
                ClientCategory::Person
            }
        };

        let mut client = Client::new(name, category);

        let Some(service) = self.select_service().await? else {
            return Ok(Flow::Quit);
        };
        if let Some(kind) = service {
            client.add_service(kind, None);
        }

        if self.registry.save(&client).await {
            self.print("\nCliente creado exitosamente.\n").await?;
            self.print(&client.render_text()).await?;
        } else {
            self.print(
                "\nError al guardar el cliente. Verifique los permisos y vuelva a intentarlo.\n",
            )
            .await?;
        }

        self.pause().await
    }

    async fn search_client(&mut self) -> Result<Flow> {
        self.clear_screen().await?;
        self.print(&menu::banner("BUSCAR CLIENTE")).await?;

        let Some(name) = self
            .prompt("Ingrese el nombre del cliente a buscar: ")
            .await?
        else {
            return Ok(Flow::Quit);
        };

        let Some(mut client) = self.registry.load(&name).await else {
            self.print(&format!(
                "\nNo se encontró ningún cliente con el nombre '{}'.\n",
                name.trim()
            ))
            .await?;
            return self.pause().await;
        };

        loop {
            self.clear_screen().await?;
            self.print(&menu::banner("INFORMACIÓN DEL CLIENTE")).await?;
            self.print(&client.render_text()).await?;
            self.print("\n1. Agregar nuevo servicio\n2. Volver al menú principal\n")
                .await?;

            let Some(choice) = self.prompt("\nSeleccione una opción: ").await? else {
                return Ok(Flow::Quit);
            };

            match DetailOption::from_input(&choice) {
                Some(DetailOption::AddService) => {
                    let Some(service) = self.select_service().await? else {
                        return Ok(Flow::Quit);
                    };
                    if let Some(kind) = service {
                        self.append_service(&mut client, kind).await?;
                    }
                }
                Some(DetailOption::ReturnToMain) => return Ok(Flow::Continue),
                None => self.print("Opción inválida.\n").await?,
            }
        }
    }

    async fn append_service(&mut self, client: &mut Client, kind: ServiceKind) -> Result<()> {
        client.add_service(kind, None);
        if self.registry.save(client).await {
            self.print(&format!("\nServicio '{}' agregado correctamente.\n", kind))
                .await
        } else {
            // 保持記憶體內容與磁碟一致
            client.services.pop();
            self.print("\nError al guardar los cambios.\n").await
        }
    }

    async fn list_clients(&mut self) -> Result<Flow> {
        self.clear_screen().await?;
        self.print(&menu::banner("LISTADO DE CLIENTES")).await?;

        let clients = self.registry.list_all().await;
        if clients.is_empty() {
            self.print("No hay clientes registrados en el sistema.\n")
                .await?;
        } else {
            for (i, name) in clients.iter().enumerate() {
                self.print(&format!("{}. {}\n", i + 1, name)).await?;
            }
            self.print(&format!("\nTotal de clientes: {}\n", clients.len()))
                .await?;
        }

        self.pause().await
    }

    /// Outer `None` means end of input; inner `None` means the operator cancelled.
    async fn select_service(&mut self) -> Result<Option<Option<ServiceKind>>> {
        self.clear_screen().await?;
        self.print(&menu::service_menu()).await?;
        let choice = self.prompt("Seleccione un servicio: ").await?;
        Ok(choice.map(|c| menu::service_from_input(&c)))
    }

    async fn pause(&mut self) -> Result<Flow> {
        match self.prompt(PAUSE_PROMPT).await? {
            Some(_) => Ok(Flow::Continue),
            None => Ok(Flow::Quit),
        }
    }

    /// Prints `label` and reads one line; `None` at end of input.
    async fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        self.print(label).await?;
        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    async fn clear_screen(&mut self) -> Result<()> {
        if self.clear_lines > 0 {
            let blank = "\n".repeat(self.clear_lines);
            self.print(&blank).await?;
        }
        Ok(())
    }

    async fn print(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::cli::LocalStorage;
    use tempfile::TempDir;

    async fn run_script(dir: &TempDir, script: &str) -> String {
        let registry = ClientRegistry::new(LocalStorage::new(dir.path().join("clientes")));
        let mut shell = Shell::new(registry, script.as_bytes(), Vec::new());
        shell.run().await.unwrap();
        String::from_utf8(shell.into_output()).unwrap()
    }

    #[tokio::test]
    async fn test_invalid_main_option_loops() {
        let dir = TempDir::new().unwrap();
        let out = run_script(&dir, "9\n4\n").await;
        assert!(out.contains("Opción inválida. Intente nuevamente."));
        assert!(out.contains("Gracias por utilizar el Sistema de Gestión de Clientes Sky."));
        assert_eq!(out.matches("1. Crear nuevo cliente").count(), 2);
    }

    #[tokio::test]
    async fn test_end_of_input_quits() {
        let dir = TempDir::new().unwrap();
        let out = run_script(&dir, "").await;
        assert!(out.contains("SISTEMA DE GESTIÓN DE CLIENTES SKY"));
        assert!(!out.contains("Gracias"));
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected() {
        let dir = TempDir::new().unwrap();
        let out = run_script(&dir, "1\n   \n\n4\n").await;
        assert!(out.contains("El nombre no puede estar vacío."));
        assert!(!out.contains("Tipo de cliente:"));
    }

    #[tokio::test]
    async fn test_invalid_category_defaults_to_person() {
        let dir = TempDir::new().unwrap();
        let out = run_script(&dir, "1\nLuis\n7\n4\n\n4\n").await;
        assert!(out.contains("Se asignará como 'Persona' por defecto."));
        assert!(out.contains("Cliente creado exitosamente."));
        assert!(out.contains("Tipo: Persona"));
    }

    #[tokio::test]
    async fn test_invalid_detail_option_stays_in_detail() {
        let dir = TempDir::new().unwrap();
        run_script(&dir, "1\nLuis\n1\n4\n\n4\n").await;
        let out = run_script(&dir, "2\nluis\nx\n2\n4\n").await;
        assert!(out.contains("Opción inválida.\n"));
        assert_eq!(out.matches("INFORMACIÓN DEL CLIENTE").count(), 2);
    }

    #[tokio::test]
    async fn test_unexpected_fault_is_reported_and_loop_continues() {
        let dir = TempDir::new().unwrap();
        let registry = ClientRegistry::new(LocalStorage::new(dir.path().join("clientes")));
        let input: &[u8] = b"\xff\xfe\n\n4\n";
        let mut shell = Shell::new(registry, input, Vec::new());

        assert!(shell.run().await.is_ok());
        let out = String::from_utf8(shell.into_output()).unwrap();
        assert!(out.contains("Ocurrió un error inesperado"));
        assert!(out.contains("El error ha sido registrado."));
        assert!(out.contains("Gracias por utilizar el Sistema de Gestión de Clientes Sky."));
    }

    #[tokio::test]
    async fn test_clear_lines_separate_screens() {
        let dir = TempDir::new().unwrap();
        let registry = ClientRegistry::new(LocalStorage::new(dir.path().join("clientes")));
        let mut shell = Shell::new(registry, "4\n".as_bytes(), Vec::new()).with_clear_lines(3);
        shell.run().await.unwrap();
        let out = String::from_utf8(shell.into_output()).unwrap();
        assert!(out.starts_with("\n\n\n===="));
    }
}
