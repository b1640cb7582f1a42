pub mod document;
pub mod workbook;

use chrono::{DateTime, Local};

pub use document::{offer_text, offer_text_on, CURRENCY};
pub use workbook::{package_workbook, write_package_workbook, ExportError};

/// Paired export file names sharing one timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFilenames {
    pub workbook: String,
    pub offer_text: String,
}

/// `Paket_{YYYYMMDD}_{HHMMSS}.xlsx` plus the matching `.txt`.
pub fn export_filenames_at(at: DateTime<Local>) -> ExportFilenames {
    let stamp = at.format("%Y%m%d_%H%M%S").to_string();
    ExportFilenames {
        workbook: format!("Paket_{stamp}.xlsx"),
        offer_text: format!("Paket_{stamp}.txt"),
    }
}

pub fn export_filenames() -> ExportFilenames {
    export_filenames_at(Local::now())
}
