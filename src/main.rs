use std::fmt;

use anyhow::Result;
use citagenda::models::{Appointment, AppointmentForm, AppointmentId, AppointmentPatch};
use citagenda::store::{AppointmentStore, FileStorage, StoragePort};
use citagenda::ui::{self, Tone};
use citagenda::utils::input_validation::validate;
use derive_more::Display;
use inquire::{Confirm, Select, Text};
use log::info;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

const DB_FILE: &str = "citas.json";
const LOG_FILE: &str = "citagenda.log";

type MenuExit = Option<()>;
const MENU_EXIT: MenuExit = None;
const MENU_LOOP: MenuExit = Some(());

/// Menú de texto en bucle. `enter` devuelve None para terminar, o Some(())
/// para relanzarse; `enter_loop` intercepta los errores y los notifica sin
/// salir del menú.
trait Menu {
    fn enter(&mut self) -> Result<MenuExit>;

    fn enter_loop(&mut self) {
        while let Some(result) = self.enter().transpose() {
            if let Err(error) = result {
                ui::notify(&format!("Error: {error}"), Tone::Error);
            }
        }
    }
}

/// Fila seleccionable en los menús de modificar y eliminar. Captura el id
/// almacenado en el momento de renderizar; la posición es solo visual.
struct RowChoice {
    position: usize,
    cita: Appointment,
}

impl fmt::Display for RowChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", ui::summary_line(self.position, &self.cita))
    }
}

pub struct App<S: StoragePort> {
    store: AppointmentStore<S>,
}

impl<S: StoragePort> App<S> {
    pub fn new(store: AppointmentStore<S>) -> Self {
        App { store }
    }

    pub fn start(&mut self, modo: Option<&str>) -> Result<()> {
        println!("CITAGENDA - Gestión de citas de la clínica");
        println!("{}", ui::mode_label(modo));
        ui::render_table(&self.store.list_all());
        self.enter_loop();
        Ok(())
    }

    /// Lee los campos del formulario por consola. `initial` precarga los
    /// valores en modo edición. Devuelve `None` si el usuario cancela
    /// cualquier campo con Esc.
    fn read_form(initial: Option<&AppointmentForm>) -> Result<Option<AppointmentForm>> {
        let base = initial.cloned().unwrap_or_default();

        let Some(fecha) = Text::new("Fecha de la cita (AAAA-MM-DDTHH:MM):")
            .with_initial_value(&base.fecha)
            .prompt_skippable()?
        else {
            return Ok(None);
        };

        let Some(nombre) = Text::new("Nombre y apellidos del paciente:")
            .with_initial_value(&base.nombre)
            .prompt_skippable()?
        else {
            return Ok(None);
        };

        let Some(dni) = Text::new("DNI (00000000A):")
            .with_initial_value(&base.dni)
            .prompt_skippable()?
        else {
            return Ok(None);
        };

        let Some(telefono) = Text::new("Teléfono (9 dígitos):")
            .with_initial_value(&base.telefono)
            .prompt_skippable()?
        else {
            return Ok(None);
        };

        let Some(nacimiento) = Text::new("Fecha de nacimiento (AAAA-MM-DD):")
            .with_initial_value(&base.nacimiento)
            .prompt_skippable()?
        else {
            return Ok(None);
        };

        let Some(observaciones) = Text::new("Observaciones (opcional):")
            .with_initial_value(&base.observaciones)
            .prompt_skippable()?
        else {
            return Ok(None);
        };

        Ok(Some(AppointmentForm {
            id: base.id,
            fecha,
            observaciones,
            nombre,
            dni,
            telefono,
            nacimiento,
        }))
    }

    /// Camino de envío del formulario: valida y, según el campo oculto `id`,
    /// crea o actualiza. Con errores de validación no se toca ningún estado.
    fn submit(&mut self, form: AppointmentForm) -> Result<()> {
        let errores = validate(&form);
        if !errores.is_empty() {
            for (campo, mensaje) in &errores {
                ui::notify(&format!("{campo}: {mensaje}"), Tone::Error);
            }
            return Ok(());
        }

        if let Some(raw_id) = &form.id {
            let id = AppointmentId::from(raw_id.clone());
            if self.store.update(&id, AppointmentPatch::from_form(&form))? {
                ui::notify("Cita actualizada correctamente.", Tone::Ok);
                ui::render_table(&self.store.list_all());
            } else {
                ui::notify("No se ha podido actualizar la cita.", Tone::Error);
            }
        } else {
            // Identificador único del instante de guardado
            self.store
                .save(Appointment::from_form(&form, AppointmentId::now()))?;
            ui::notify("Cita creada correctamente.", Tone::Ok);
            ui::render_table(&self.store.list_all());
        }

        Ok(())
    }

    /// Selector de fila compartido por modificar y eliminar.
    fn pick_row(&self, message: &str) -> Result<Option<RowChoice>> {
        let citas = self.store.list_all();
        if citas.is_empty() {
            ui::notify(ui::EMPTY_TABLE_MESSAGE, Tone::Muted);
            return Ok(None);
        }

        let rows: Vec<RowChoice> = citas
            .into_iter()
            .enumerate()
            .map(|(idx, cita)| RowChoice {
                position: idx + 1,
                cita,
            })
            .collect();

        Ok(Select::new(message, rows).prompt_skippable()?)
    }

    /// Acción de modificar. La fila elegida solo aporta el id capturado al
    /// renderizar: los datos se recargan desde el almacenamiento, nunca desde
    /// el texto mostrado.
    fn edit(&mut self) -> Result<()> {
        let Some(choice) = self.pick_row("Elija la cita a modificar:")? else {
            Self::cancel();
            return Ok(());
        };

        let Some(stored) = self.store.get_by_id(&choice.cita.id) else {
            ui::notify("No se ha podido cargar la cita.", Tone::Error);
            return Ok(());
        };

        ui::notify("Cargando cita en edición…", Tone::Muted);
        match Self::read_form(Some(&AppointmentForm::from_appointment(&stored)))? {
            Some(form) => self.submit(form)?,
            None => Self::cancel(),
        }
        Ok(())
    }

    fn delete(&mut self) -> Result<()> {
        let Some(choice) = self.pick_row("Elija la cita a eliminar:")? else {
            Self::cancel();
            return Ok(());
        };

        if !Confirm::new("¿Eliminar esta cita?")
            .with_default(false)
            .prompt()?
        {
            Self::cancel();
            return Ok(());
        }

        if self.store.delete(&choice.cita.id)? {
            ui::notify("Cita eliminada.", Tone::Ok);
            ui::render_table(&self.store.list_all());
        } else {
            ui::notify("No se ha podido eliminar la cita.", Tone::Error);
        }
        Ok(())
    }

    /// Acción de cancelar: descarta el formulario y avisa con tono neutro.
    fn cancel() {
        ui::notify("Edición cancelada.", Tone::Muted);
    }
}

impl<S: StoragePort> Menu for App<S> {
    fn enter(&mut self) -> Result<MenuExit> {
        #[derive(EnumIter, Display)]
        enum Choice {
            #[display("Nueva cita")]
            Create,
            #[display("Listar citas")]
            List,
            #[display("Modificar cita")]
            Edit,
            #[display("Eliminar cita")]
            Delete,
            #[display("Salir")]
            Exit,
        }

        let choice = Select::new("¿Qué desea hacer?", Choice::iter().collect()).prompt()?;

        match choice {
            Choice::Create => match Self::read_form(None)? {
                Some(form) => self.submit(form)?,
                None => Self::cancel(),
            },
            Choice::List => ui::render_table(&self.store.list_all()),
            Choice::Edit => self.edit()?,
            Choice::Delete => self.delete()?,
            Choice::Exit => return Ok(MENU_EXIT),
        }
        Ok(MENU_LOOP)
    }
}

fn main() -> Result<()> {
    simple_logging::log_to_file(LOG_FILE, log::LevelFilter::Info)?;
    info!("Arranque de citagenda");

    let modo = std::env::args().nth(1);
    let store = AppointmentStore::new(FileStorage::new(DB_FILE));
    App::new(store).start(modo.as_deref())
}
