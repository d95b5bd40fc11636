//! DOCX package access
//!
//! A DOCX file is an OPC package: a ZIP archive whose parts are tied
//! together by relationship parts (`_rels/*.rels`).
//!
//! - `_rels/.rels`: package relationships, pointing at the main document part
//! - `word/document.xml`: main content (usual location)
//! - `word/_rels/document.xml.rels`: relationships of the main part (images, hyperlinks)

use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::document::{DocumentError, DocumentResult};

/// Main part location when the package relationships don't say otherwise
const DEFAULT_MAIN_PART: &str = "word/document.xml";

/// Package-level relationships part
const PACKAGE_RELS_PART: &str = "_rels/.rels";

/// Relationship type suffix of the main document part
const OFFICE_DOCUMENT_REL: &str = "/officeDocument";

/// Relationship type suffix of embedded images
const IMAGE_REL: &str = "/image";

/// One entry of a relationships part
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g. "rId7")
    pub id: String,
    /// Relationship type URI
    pub rel_type: String,
    /// Target, relative to the source part's directory unless absolute
    pub target: String,
    /// `TargetMode="External"`: the target lives outside the package
    pub external: bool,
}

impl Relationship {
    /// Whether this relationship points at an image
    pub fn is_image(&self) -> bool {
        self.rel_type.ends_with(IMAGE_REL)
    }
}

/// Opened DOCX archive
pub struct DocxPackage {
    archive: ZipArchive<File>,
    main_part: String,
}

impl DocxPackage {
    /// Open a package and locate its main document part
    pub fn open<P: AsRef<Path>>(path: P) -> DocumentResult<Self> {
        let file = File::open(path)?;
        let archive = ZipArchive::new(file)?;
        let mut package = Self {
            archive,
            main_part: DEFAULT_MAIN_PART.to_string(),
        };

        if package.has_part(PACKAGE_RELS_PART) {
            let xml = package.read_string(PACKAGE_RELS_PART)?;
            if let Some(rel) = parse_relationships(&xml)?
                .into_iter()
                .find(|r| r.rel_type.ends_with(OFFICE_DOCUMENT_REL) && !r.external)
            {
                package.main_part = resolve_target("", &rel.target);
            }
        }

        Ok(package)
    }

    /// Name of the main document part
    pub fn main_part(&self) -> &str {
        &self.main_part
    }

    pub fn has_part(&self, name: &str) -> bool {
        self.archive.index_for_name(name).is_some()
    }

    /// Read a part as raw bytes
    pub fn read_bytes(&mut self, name: &str) -> DocumentResult<Vec<u8>> {
        let mut part = self.archive.by_name(name).map_err(|e| match e {
            ZipError::FileNotFound => DocumentError::MissingPart(name.to_string()),
            other => other.into(),
        })?;
        let mut data = Vec::new();
        part.read_to_end(&mut data)?;
        Ok(data)
    }

    /// Read a part as UTF-8 text
    pub fn read_string(&mut self, name: &str) -> DocumentResult<String> {
        let data = self.read_bytes(name)?;
        Ok(String::from_utf8(data)?)
    }

    /// Read the main document part
    pub fn main_document_xml(&mut self) -> DocumentResult<String> {
        let main_part = self.main_part.clone();
        self.read_string(&main_part)
    }

    /// Relationships of the main document part, in enumeration order
    ///
    /// A missing relationships part means no relationships.
    pub fn document_relationships(&mut self) -> DocumentResult<Vec<Relationship>> {
        let rels_part = rels_part_for(&self.main_part);
        if !self.has_part(&rels_part) {
            return Ok(Vec::new());
        }
        let xml = self.read_string(&rels_part)?;
        parse_relationships(&xml)
    }
}

/// Parse a relationships part, keeping document order
pub fn parse_relationships(xml: &str) -> DocumentResult<Vec<Relationship>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut relationships = Vec::new();
    loop {
        match reader.read_event()? {
            Event::Empty(e) | Event::Start(e) if e.local_name().as_ref() == b"Relationship" => {
                if let Some(rel) = relationship_from(&e)? {
                    relationships.push(rel);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(relationships)
}

/// Build a relationship from its element; entries without Id or Target are skipped
fn relationship_from(e: &BytesStart<'_>) -> DocumentResult<Option<Relationship>> {
    let mut id = None;
    let mut rel_type = String::new();
    let mut target = None;
    let mut external = false;

    for attr in e.attributes() {
        let attr = attr?;
        let value = attr.unescape_value()?.into_owned();
        match attr.key.local_name().as_ref() {
            b"Id" => id = Some(value),
            b"Type" => rel_type = value,
            b"Target" => target = Some(value),
            b"TargetMode" => external = value.eq_ignore_ascii_case("External"),
            _ => {}
        }
    }

    Ok(id.zip(target).map(|(id, target)| Relationship {
        id,
        rel_type,
        target,
        external,
    }))
}

/// Relationships part belonging to `part` (`word/document.xml` → `word/_rels/document.xml.rels`)
pub fn rels_part_for(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", part),
    }
}

/// Resolve a relationship target against its source part
///
/// Absolute targets (`/word/media/a.png`) are package-rooted; relative ones
/// are resolved against the source part's directory, honouring `.` and `..`.
pub fn resolve_target(source_part: &str, target: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();

    if !target.starts_with('/') {
        if let Some((dir, _)) = source_part.rsplit_once('/') {
            segments.extend(dir.split('/').filter(|s| !s.is_empty()));
        }
    }

    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    segments.join("/")
}
