//! Gestión de citas para el mostrador de una clínica: modelo de datos,
//! persistencia en una ranura JSON y presentación en terminal.

pub mod models;
pub mod store;
pub mod ui;
pub mod utils;
