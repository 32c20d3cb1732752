//! Rendering module for writing assembled documents.

mod docx;
mod json;
mod xml;

pub use docx::{document_xml, write_docx, write_docx_to, DocxRenderer, DOCX_MIME_TYPE, PACKAGE_PARTS};
pub use json::{to_json, JsonFormat};
pub use xml::escape;
