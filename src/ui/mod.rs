pub mod ansi;
pub mod ascii;
pub mod table_printer;
pub mod views;
pub mod width_util;
