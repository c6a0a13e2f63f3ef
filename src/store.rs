//! Persistencia de citas: la colección entera como un único blob JSON detrás
//! de un puerto de almacenamiento clave-valor de una sola ranura.

use std::fs;
use std::io::{self, ErrorKind::NotFound};
use std::path::PathBuf;

use log::{info, warn};
use thiserror::Error;

use crate::models::{Appointment, AppointmentId, AppointmentPatch};

/// Puerto de almacenamiento de una sola ranura. En producción es un fichero
/// en disco; los tests inyectan una variante en memoria.
pub trait StoragePort {
    /// Contenido actual de la ranura, o `None` si todavía no existe.
    fn read(&self) -> Option<String>;

    /// Reescribe la ranura entera. Los fallos de escritura se propagan al
    /// llamante, no se capturan aquí.
    fn write(&mut self, contents: &str) -> io::Result<()>;
}

/// Ranura respaldada por un fichero JSON.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StoragePort for FileStorage {
    fn read(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Some(contents),
            Err(e) if e.kind() == NotFound => None,
            Err(e) => {
                warn!("No se pudo leer {}: {e}", self.path.display());
                None
            }
        }
    }

    fn write(&mut self, contents: &str) -> io::Result<()> {
        fs::write(&self.path, contents)
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("No se pudo escribir el almacenamiento: {0}")]
    Write(#[from] io::Error),
}

/// Adaptador de persistencia. Sin caché en memoria: cada operación relee la
/// ranura y cada mutación reescribe la colección completa, conservando el
/// orden de inserción.
pub struct AppointmentStore<S: StoragePort> {
    storage: S,
}

impl<S: StoragePort> AppointmentStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Colección completa en orden de inserción. Contenido ausente, corrupto
    /// o que no sea un array se trata como colección vacía; nunca falla.
    pub fn list_all(&self) -> Vec<Appointment> {
        let Some(raw) = self.storage.read() else {
            return Vec::new();
        };

        match serde_json::from_str(&raw) {
            Ok(citas) => citas,
            Err(e) => {
                warn!("Contenido de almacenamiento ilegible, se recupera como colección vacía: {e}");
                Vec::new()
            }
        }
    }

    fn write_all(&mut self, citas: &[Appointment]) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(citas).map_err(io::Error::from)?;
        self.storage.write(&raw)?;
        Ok(())
    }

    /// Añade la cita al final de la colección y devuelve el identificador
    /// asignado.
    pub fn save(&mut self, cita: Appointment) -> Result<AppointmentId, StoreError> {
        let id = cita.id.clone();
        let mut citas = self.list_all();
        citas.push(cita);
        self.write_all(&citas)?;
        info!("Cita {id} guardada");
        Ok(id)
    }

    /// Búsqueda lineal por identificador.
    pub fn get_by_id(&self, id: &AppointmentId) -> Option<Appointment> {
        self.list_all().into_iter().find(|c| &c.id == id)
    }

    /// Fusión superficial del parche sobre la cita indicada. Devuelve
    /// `false`, sin tocar la colección, si el identificador no existe.
    pub fn update(
        &mut self,
        id: &AppointmentId,
        patch: AppointmentPatch,
    ) -> Result<bool, StoreError> {
        let mut citas = self.list_all();
        let Some(target) = citas.iter_mut().find(|c| &c.id == id) else {
            return Ok(false);
        };

        patch.apply(target);
        self.write_all(&citas)?;
        info!("Cita {id} actualizada");
        Ok(true)
    }

    /// Elimina la cita indicada; `false` si no estaba. Solo reescribe la
    /// ranura cuando la colección ha cambiado de tamaño.
    pub fn delete(&mut self, id: &AppointmentId) -> Result<bool, StoreError> {
        let citas = self.list_all();
        let remaining: Vec<Appointment> = citas.iter().filter(|c| &c.id != id).cloned().collect();

        if remaining.len() == citas.len() {
            return Ok(false);
        }

        self.write_all(&remaining)?;
        info!("Cita {id} eliminada");
        Ok(true)
    }
}
