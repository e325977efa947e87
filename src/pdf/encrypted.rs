//! Loading password-protected PDFs with every object intact.
//!
//! lopdf only materialises the objects of an encrypted file when the empty
//! user password opens it; otherwise just the `/Encrypt` dictionary survives
//! the load and there is nothing left to decrypt. [`load_sealed`] reads the
//! file as if it were unencrypted, leaving strings and streams as ciphertext,
//! and then puts the `/Encrypt` entry back so `Document::decrypt` can run.

use anyhow::{Context, Result};
use lopdf::{Document, Object, ObjectId, Reader};
use std::collections::BTreeMap;
use std::path::Path;

const ENCRYPT_KEY: &[u8] = b"/Encrypt";
/// Same length as `/Encrypt`, so no byte offsets move.
const MASKED_ENCRYPT_KEY: &[u8] = b"/NoCrypt";
/// Object streams are still ciphertext and cannot be unpacked during load.
const SEALED_OBJSTM_TYPE: &[u8] = b"SealedObjStm";

type ObjectFilter = fn(ObjectId, &mut Object) -> Option<(ObjectId, Object)>;

/// Load an encrypted PDF without decrypting anything.
pub fn load_sealed<P: AsRef<Path>>(path: P) -> Result<Document> {
    let path = path.as_ref();
    let mut bytes =
        std::fs::read(path).with_context(|| format!("Failed to read PDF: {}", path.display()))?;

    mask_trailer_encrypt(&mut bytes)
        .with_context(|| format!("No /Encrypt entry in the trailer of {}", path.display()))?;

    let mut doc = Reader {
        buffer: &bytes,
        document: Document::new(),
        encryption_state: None,
        raw_objects: BTreeMap::new(),
    }
    .read(Some(seal_object_streams as ObjectFilter))
    .with_context(|| format!("Failed to open PDF: {}", path.display()))?;

    let encrypt = doc
        .trailer
        .remove(&MASKED_ENCRYPT_KEY[1..])
        .with_context(|| format!("Lost the /Encrypt entry of {}", path.display()))?;
    doc.trailer.set("Encrypt", encrypt);

    for object in doc.objects.values_mut() {
        if let Object::Stream(stream) = object {
            if stream.dict.has_type(SEALED_OBJSTM_TYPE) {
                stream.dict.set("Type", Object::Name(b"ObjStm".to_vec()));
            }
        }
    }

    Ok(doc)
}

/// Rename `/Encrypt` in the last trailer, the one lopdf reads.
fn mask_trailer_encrypt(bytes: &mut [u8]) -> Option<()> {
    let header = bytes.windows(5).position(|w| w == b"%PDF-").unwrap_or(0);
    let marker = bytes.windows(9).rposition(|w| w == b"startxref")?;

    let digits: String = bytes[marker + 9..]
        .iter()
        .skip_while(|b| b.is_ascii_whitespace())
        .take_while(|b| b.is_ascii_digit())
        .map(|&b| b as char)
        .collect();
    let xref_start = header + digits.parse::<usize>().ok()?;

    let offset = bytes
        .get(xref_start..)?
        .windows(ENCRYPT_KEY.len())
        .position(|w| w == ENCRYPT_KEY)?;
    let at = xref_start + offset;
    bytes[at..at + MASKED_ENCRYPT_KEY.len()].copy_from_slice(MASKED_ENCRYPT_KEY);
    Some(())
}

fn seal_object_streams(id: ObjectId, object: &mut Object) -> Option<(ObjectId, Object)> {
    if let Object::Stream(stream) = object {
        if stream.dict.has_type(b"ObjStm") {
            stream
                .dict
                .set("Type", Object::Name(SEALED_OBJSTM_TYPE.to_vec()));
        }
    }
    // The loader only looks at Some/None for top-level objects.
    Some((id, Object::Null))
}
