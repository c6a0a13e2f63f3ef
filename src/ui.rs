//! Presentación en terminal: tabla de citas, etiqueta de modo y
//! notificaciones transitorias.

use derive_more::Display;

use crate::models::Appointment;
use crate::utils::dates::format_human;

/// Mensaje neutro de la fila de relleno cuando no hay citas.
pub const EMPTY_TABLE_MESSAGE: &str = "No hay citas registradas.";

/// Tono de una notificación de estado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Tone {
    #[display("[+]")]
    Ok,
    #[display("[!]")]
    Error,
    #[display("[*]")]
    Muted,
}

/// Emite una línea de estado. Las notificaciones no se encolan ni se
/// deduplican: cada una se imprime de forma independiente.
pub fn notify(text: &str, tone: Tone) {
    match tone {
        Tone::Error => eprintln!("{tone} {text}"),
        _ => println!("{tone} {text}"),
    }
}

/// Etiqueta puramente cosmética derivada del argumento `modo`; no cambia
/// ningún comportamiento.
pub fn mode_label(modo: Option<&str>) -> &'static str {
    match modo {
        Some("gestionar") => "Modo: gestionar",
        _ => "Modo: crear",
    }
}

/// Construye las filas de la tabla desde la colección completa, en orden de
/// inserción. Una colección vacía produce exactamente una fila de relleno.
///
/// La primera columna es la posición 1-based, solo visual: nunca se usa como
/// clave de búsqueda.
pub fn table_rows(citas: &[Appointment]) -> Vec<String> {
    if citas.is_empty() {
        return vec![format!("  {EMPTY_TABLE_MESSAGE}")];
    }

    citas
        .iter()
        .enumerate()
        .map(|(idx, cita)| {
            format!(
                "{:>3}  {:<16}  {:<24}  {:<10}  {:<10}  {:<11}  {}",
                idx + 1,
                format_human(&cita.date_iso, false),
                cita.patient.name,
                cita.patient.national_id,
                cita.patient.phone,
                format_human(&cita.patient.birth_date_iso, true),
                cita.notes,
            )
        })
        .collect()
}

/// Reconstruye la tabla completa en pantalla (sin diffing).
pub fn render_table(citas: &[Appointment]) {
    println!(
        "{:>3}  {:<16}  {:<24}  {:<10}  {:<10}  {:<11}  {}",
        "#", "Fecha", "Paciente", "DNI", "Teléfono", "Nacimiento", "Observaciones"
    );
    for row in table_rows(citas) {
        println!("{row}");
    }
}

/// Línea resumen de una cita para los selectores de modificar y eliminar.
pub fn summary_line(position: usize, cita: &Appointment) -> String {
    format!(
        "{position}. {} - {}",
        format_human(&cita.date_iso, false),
        cita.patient.name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AppointmentForm, AppointmentId};

    fn cita(id: &str, nombre: &str, fecha: &str) -> Appointment {
        let form = AppointmentForm {
            id: None,
            fecha: fecha.to_string(),
            observaciones: "sin novedades".to_string(),
            nombre: nombre.to_string(),
            dni: "12345678A".to_string(),
            telefono: "123456789".to_string(),
            nacimiento: "1990-04-17".to_string(),
        };
        Appointment::from_form(&form, AppointmentId::from(id.to_string()))
    }

    #[test]
    fn empty_collection_renders_one_placeholder_row() {
        let rows = table_rows(&[]);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].contains(EMPTY_TABLE_MESSAGE));
    }

    #[test]
    fn renders_one_row_per_record_in_insertion_order() {
        let citas = vec![
            cita("1", "Ana", "2026-09-01T10:30"),
            cita("2", "Luis", "2026-09-02T11:00"),
            cita("3", "Marta", "2026-09-03T12:15"),
        ];

        let rows = table_rows(&citas);
        assert_eq!(rows.len(), 3);
        assert!(rows[0].contains("Ana"));
        assert!(rows[1].contains("Luis"));
        assert!(rows[2].contains("Marta"));
    }

    #[test]
    fn rows_show_position_and_formatted_dates() {
        let rows = table_rows(&[cita("1700000000000", "Ana", "2026-09-01T10:30")]);

        // La posición mostrada es 1-based, nunca el id almacenado
        assert!(rows[0].trim_start().starts_with('1'));
        assert!(!rows[0].contains("1700000000000"));
        assert!(rows[0].contains("01/09/2026 10:30"));
        assert!(rows[0].contains("17/04/1990"));
        assert!(rows[0].contains("sin novedades"));
    }

    #[test]
    fn mode_label_is_cosmetic_text_only() {
        assert_eq!(mode_label(Some("gestionar")), "Modo: gestionar");
        assert_eq!(mode_label(Some("crear")), "Modo: crear");
        assert_eq!(mode_label(Some("otro")), "Modo: crear");
        assert_eq!(mode_label(None), "Modo: crear");
    }

    #[test]
    fn summary_line_shows_position_date_and_name() {
        let line = summary_line(2, &cita("1", "Ana Gomez", "2026-09-01T10:30"));
        assert_eq!(line, "2. 01/09/2026 10:30 - Ana Gomez");
    }
}
