//! Modelo de datos: citas y pacientes.

use chrono::Utc;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Identificador opaco de una cita, derivado del instante de creación
/// (milisegundos desde la época). Se asigna una sola vez, nunca cambia y es
/// la única clave de búsqueda, actualización y borrado. No se muestra en la
/// tabla.
///
/// Dos creaciones en el mismo milisegundo podrían colisionar; limitación
/// conocida, asumible con un único operador de mostrador.
#[derive(Debug, Serialize, Deserialize, Clone, Eq, PartialEq, Hash, Display)]
#[serde(transparent)]
pub struct AppointmentId(String);

impl AppointmentId {
    /// Genera un identificador a partir del instante actual.
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis().to_string())
    }
}

impl From<String> for AppointmentId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl AsRef<str> for AppointmentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Datos identificativos y de contacto del paciente, incrustados en la cita.
/// El formato se comprueba al teclear, no al almacenar.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub name: String,
    pub national_id: String,
    pub phone: String,
    #[serde(rename = "birthDateISO")]
    pub birth_date_iso: String,
}

/// Una cita programada con un paciente.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: AppointmentId,
    #[serde(rename = "dateISO")]
    pub date_iso: String,
    pub notes: String,
    pub patient: Patient,
    pub created_at: i64,
}

impl Appointment {
    /// Construye una cita a partir del formulario. No valida nada: la
    /// validación es responsabilidad del llamante, antes de invocar esta
    /// fábrica.
    pub fn from_form(form: &AppointmentForm, id: AppointmentId) -> Self {
        Self {
            id,
            date_iso: form.fecha.clone(),
            notes: form.observaciones.clone(),
            patient: Patient {
                name: form.nombre.clone(),
                national_id: form.dni.clone(),
                phone: form.telefono.clone(),
                birth_date_iso: form.nacimiento.clone(),
            },
            created_at: Utc::now().timestamp_millis(),
        }
    }
}

/// Estado bruto del formulario, tal y como lo teclea el usuario.
///
/// `id` es el equivalente del campo oculto: `Some` indica modo edición y
/// dirige el envío hacia una actualización en lugar de una creación.
#[derive(Debug, Default, Clone)]
pub struct AppointmentForm {
    pub id: Option<String>,
    pub fecha: String,
    pub observaciones: String,
    pub nombre: String,
    pub dni: String,
    pub telefono: String,
    pub nacimiento: String,
}

impl AppointmentForm {
    /// Rellena el formulario desde la cita almacenada, incluido el campo
    /// oculto `id`, dejándolo en modo edición.
    pub fn from_appointment(cita: &Appointment) -> Self {
        Self {
            id: Some(cita.id.to_string()),
            fecha: cita.date_iso.clone(),
            observaciones: cita.notes.clone(),
            nombre: cita.patient.name.clone(),
            dni: cita.patient.national_id.clone(),
            telefono: cita.patient.phone.clone(),
            nacimiento: cita.patient.birth_date_iso.clone(),
        }
    }
}

/// Carga parcial para una actualización: un campo presente sustituye por
/// completo al campo de primer nivel homónimo. El paciente anidado se
/// reemplaza entero, sin fusión profunda.
#[derive(Debug, Default, Clone)]
pub struct AppointmentPatch {
    pub date_iso: Option<String>,
    pub notes: Option<String>,
    pub patient: Option<Patient>,
}

impl AppointmentPatch {
    /// Parche completo construido desde el formulario (camino de edición).
    pub fn from_form(form: &AppointmentForm) -> Self {
        Self {
            date_iso: Some(form.fecha.clone()),
            notes: Some(form.observaciones.clone()),
            patient: Some(Patient {
                name: form.nombre.clone(),
                national_id: form.dni.clone(),
                phone: form.telefono.clone(),
                birth_date_iso: form.nacimiento.clone(),
            }),
        }
    }

    /// Aplica el parche sobre la cita; los campos ausentes quedan intactos.
    pub fn apply(self, cita: &mut Appointment) {
        if let Some(date_iso) = self.date_iso {
            cita.date_iso = date_iso;
        }
        if let Some(notes) = self.notes {
            cita.notes = notes;
        }
        if let Some(patient) = self.patient {
            cita.patient = patient;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_form() -> AppointmentForm {
        AppointmentForm {
            id: None,
            fecha: "2026-09-01T10:30".to_string(),
            observaciones: "Revisión anual".to_string(),
            nombre: "Ana Gomez".to_string(),
            dni: "12345678A".to_string(),
            telefono: "612345678".to_string(),
            nacimiento: "1990-04-17".to_string(),
        }
    }

    #[test]
    fn from_form_maps_every_field() {
        let form = sample_form();
        let cita = Appointment::from_form(&form, AppointmentId::from("1000".to_string()));

        assert_eq!(cita.id.as_ref(), "1000");
        assert_eq!(cita.date_iso, "2026-09-01T10:30");
        assert_eq!(cita.notes, "Revisión anual");
        assert_eq!(cita.patient.name, "Ana Gomez");
        assert_eq!(cita.patient.national_id, "12345678A");
        assert_eq!(cita.patient.phone, "612345678");
        assert_eq!(cita.patient.birth_date_iso, "1990-04-17");
    }

    #[test]
    fn from_appointment_fills_hidden_id() {
        let cita = Appointment::from_form(&sample_form(), AppointmentId::from("42".to_string()));
        let form = AppointmentForm::from_appointment(&cita);

        assert_eq!(form.id.as_deref(), Some("42"));
        assert_eq!(form.fecha, cita.date_iso);
        assert_eq!(form.dni, cita.patient.national_id);
    }

    #[test]
    fn patch_replaces_only_present_fields() {
        let mut cita = Appointment::from_form(&sample_form(), AppointmentId::from("1".to_string()));
        let original_patient = cita.patient.clone();

        let patch = AppointmentPatch {
            notes: Some("Reprogramada".to_string()),
            ..AppointmentPatch::default()
        };
        patch.apply(&mut cita);

        assert_eq!(cita.notes, "Reprogramada");
        assert_eq!(cita.date_iso, "2026-09-01T10:30");
        assert_eq!(cita.patient, original_patient);
    }

    #[test]
    fn patch_replaces_nested_patient_wholesale() {
        let mut cita = Appointment::from_form(&sample_form(), AppointmentId::from("1".to_string()));

        let patch = AppointmentPatch {
            patient: Some(Patient {
                name: "Luis Marín".to_string(),
                national_id: "87654321B".to_string(),
                phone: "698765432".to_string(),
                birth_date_iso: "1985-01-02".to_string(),
            }),
            ..AppointmentPatch::default()
        };
        patch.apply(&mut cita);

        assert_eq!(cita.patient.name, "Luis Marín");
        assert_eq!(cita.patient.national_id, "87654321B");
    }

    #[test]
    fn serialized_shape_matches_storage_layout() {
        let cita = Appointment::from_form(&sample_form(), AppointmentId::from("1700".to_string()));
        let json = serde_json::to_value(&cita).unwrap();

        assert_eq!(json["id"], "1700");
        assert!(json["dateISO"].is_string());
        assert!(json["notes"].is_string());
        assert!(json["createdAt"].is_i64());
        assert!(json["patient"]["nationalId"].is_string());
        assert!(json["patient"]["birthDateISO"].is_string());
        assert!(json["patient"]["name"].is_string());
        assert!(json["patient"]["phone"].is_string());
    }
}
