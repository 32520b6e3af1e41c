//! ZIP bundling of generated PDFs

use crate::generate::GeneratedPdf;
use std::io::{Cursor, Write};
use zip::result::ZipResult;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Bundle documents into an in-memory deflated ZIP, one entry per document
pub fn zip_documents(documents: &[GeneratedPdf]) -> ZipResult<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for doc in documents {
        writer.start_file(doc.file_name.as_str(), options)?;
        writer.write_all(&doc.bytes)?;
    }

    Ok(writer.finish()?.into_inner())
}

/// Archive file name for an applicant
pub fn archive_name(last_name: Option<&str>) -> String {
    format!("documents_{}.zip", crate::forms::file_name_part(last_name))
}
