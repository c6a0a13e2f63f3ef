//! Validación de los campos del formulario de citas.

use std::collections::BTreeMap;

use chrono::Local;
use derive_more::Display;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::AppointmentForm;
use crate::utils::dates::parse_iso;

/// Longitud máxima de las observaciones.
pub const MAX_NOTES_LENGTH: usize = 500;

// Regex for DNI: 8 digits + control letter
static DNI_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{8}[A-Za-z]$").expect("Failed to compile DNI regex")
});

// Regex for phone: exactly 9 digits, no separators
static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{9}$").expect("Failed to compile phone regex"));

/// Campo del formulario, con el mismo nombre que usa la interfaz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum Field {
    #[display("fecha")]
    Fecha,
    #[display("observaciones")]
    Observaciones,
    #[display("nombre")]
    Nombre,
    #[display("dni")]
    Dni,
    #[display("telefono")]
    Telefono,
    #[display("nacimiento")]
    Nacimiento,
}

/// Comprueba todos los campos y devuelve un mapa campo → mensaje; un mapa
/// vacío significa formulario válido. Función pura: evalúa todas las reglas
/// de forma independiente, sin cortocircuito entre campos y sin validación
/// cruzada.
pub fn validate(form: &AppointmentForm) -> BTreeMap<Field, String> {
    let mut errores = BTreeMap::new();

    // Fecha: obligatoria y válida
    if form.fecha.trim().is_empty() {
        errores.insert(Field::Fecha, "La fecha es obligatoria.".to_string());
    } else if parse_iso(&form.fecha).is_none() {
        errores.insert(Field::Fecha, "La fecha no es válida.".to_string());
    }

    // Observaciones: opcionales, longitud limitada
    if form.observaciones.chars().count() > MAX_NOTES_LENGTH {
        errores.insert(
            Field::Observaciones,
            format!("Demasiado largo (máx. {MAX_NOTES_LENGTH} caracteres)."),
        );
    }

    // Nombre: mínimo 3 caracteres una vez recortado
    if form.nombre.trim().chars().count() < 3 {
        errores.insert(
            Field::Nombre,
            "Indique nombre y apellidos (mín. 3 caracteres).".to_string(),
        );
    }

    // DNI: 8 dígitos + letra
    if !DNI_REGEX.is_match(form.dni.trim()) {
        errores.insert(
            Field::Dni,
            "DNI no válido. Formato esperado: 00000000A.".to_string(),
        );
    }

    // Teléfono: 9 dígitos, sin separadores ni prefijo
    if !PHONE_REGEX.is_match(form.telefono.trim()) {
        errores.insert(
            Field::Telefono,
            "Teléfono no válido. Debe contener 9 dígitos.".to_string(),
        );
    }

    // Nacimiento: fecha válida y no estrictamente futura
    if form.nacimiento.trim().is_empty() {
        errores.insert(
            Field::Nacimiento,
            "La fecha de nacimiento es obligatoria.".to_string(),
        );
    } else {
        match parse_iso(&form.nacimiento) {
            None => {
                errores.insert(
                    Field::Nacimiento,
                    "Fecha de nacimiento no válida.".to_string(),
                );
            }
            Some(nacimiento) => {
                if nacimiento > Local::now().naive_local() {
                    errores.insert(
                        Field::Nacimiento,
                        "La fecha de nacimiento no puede ser futura.".to_string(),
                    );
                }
            }
        }
    }

    errores
}
