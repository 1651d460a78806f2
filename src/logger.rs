use std::fmt::Display;

use yansi::Paint;

pub fn info(message: impl Display) {
    println!("{} {}", " INFO ".on_green().bold(), message);
}

pub fn warn(message: impl Display) {
    println!("{} {}", " WARN ".on_yellow().bold(), message);
}

pub fn error(message: impl Display) {
    eprintln!("{} {}", " EROR ".on_red().bold(), message);
}
