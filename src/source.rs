//! Loading pre-resolved documents.
//!
//! Documents arrive as JSON produced by the upstream property-resolution
//! stage; see [`FoDocument`] for the shape.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::FoDocument;

/// Load a document from a JSON file.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<FoDocument> {
    let path = path.as_ref();
    log::debug!("Loading document from {}", path.display());
    let file = File::open(path)?;
    load_reader(BufReader::new(file))
}

/// Load a document from JSON bytes.
pub fn load_bytes(data: &[u8]) -> Result<FoDocument> {
    if data.iter().all(u8::is_ascii_whitespace) {
        return Err(Error::Source("empty input".to_string()));
    }
    Ok(serde_json::from_slice(data)?)
}

/// Load a document from a JSON string.
pub fn load_str(json: &str) -> Result<FoDocument> {
    load_bytes(json.as_bytes())
}

/// Load a document from a reader.
pub fn load_reader<R: Read>(mut reader: R) -> Result<FoDocument> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    load_bytes(&data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_minimal() {
        let json = r#"{
            "declarations": [
                {"type": "simple-page-master", "name": "p", "page_width": 200.0,
                 "page_height": 300.0, "regions": [{"class": "body"}]}
            ],
            "page_sequences": [
                {"master_reference": "p", "flow": {"kind": "flow"}}
            ]
        }"#;
        let doc = load_str(json).unwrap();
        assert_eq!(doc.declarations.len(), 1);
        assert_eq!(doc.page_sequences[0].flow_name, "xsl-region-body");
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(load_bytes(b"  \n"), Err(Error::Source(_))));
    }

    #[test]
    fn test_malformed_input() {
        let err = load_str("{\"declarations\": 3}").unwrap_err();
        assert!(matches!(err, Error::Source(_)));
    }
}
