//! In-memory PDFs for tests. Every page draws its own number as `(Page N)`
//! so split output can be checked page by page.

use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::path::Path;

/// Standard security handler password padding
const PAD_BYTES: [u8; 32] = [
    0x28, 0xBF, 0x4E, 0x5E, 0x4E, 0x75, 0x8A, 0x41, 0x64, 0x00, 0x4E, 0x56, 0xFF, 0xFA, 0x01,
    0x08, 0x2E, 0x2E, 0x00, 0xB6, 0xD0, 0x68, 0x3E, 0x80, 0x2F, 0x0C, 0xA9, 0xFE, 0x64, 0x53,
    0x69, 0x7A,
];

const FILE_ID: &[u8] = b"splitterfixture1";

pub fn page_marker(page: u32) -> String {
    format!("(Page {})", page)
}

/// Build a document with `pages` numbered pages.
pub fn numbered_document(pages: u32) -> Document {
    let mut doc = Document::with_version("1.5");
    let pages_id: ObjectId = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });

    let mut kids = Vec::new();
    for page in 1..=pages {
        let content = format!("BT /F1 24 Tf 72 720 Td {} Tj ET", page_marker(page));
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => Object::Reference(content_id),
            "Resources" => dictionary! {
                "Font" => dictionary! {
                    "F1" => Object::Reference(font_id),
                },
            },
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => i64::from(pages),
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc
}

pub fn write_numbered_pdf(path: &Path, pages: u32) {
    numbered_document(pages).save(path).unwrap();
}

/// Same as [`write_numbered_pdf`], but protected with a user password using
/// the 40-bit RC4 handler (V1, R2). An empty password gives a file that
/// opens without one.
pub fn write_encrypted_pdf(path: &Path, pages: u32, user_password: &[u8]) {
    let mut doc = numbered_document(pages);
    let permissions: i32 = -4;

    let pw_len = user_password.len().min(32);
    let mut padded_pw = user_password[..pw_len].to_vec();
    padded_pw.extend_from_slice(&PAD_BYTES[..32 - pw_len]);

    let o_key_digest = md5::compute(&padded_pw);
    let o_value = rc4(&o_key_digest[..5], &padded_pw);

    let mut key_input = padded_pw.clone();
    key_input.extend_from_slice(&o_value);
    key_input.extend_from_slice(&(permissions as u32).to_le_bytes());
    key_input.extend_from_slice(FILE_ID);
    let key_digest = md5::compute(&key_input);
    let enc_key = key_digest[..5].to_vec();

    let u_value = rc4(&enc_key, &PAD_BYTES);

    for (&obj_id, obj) in doc.objects.iter_mut() {
        let mut obj_key_input = enc_key.clone();
        obj_key_input.extend_from_slice(&obj_id.0.to_le_bytes()[..3]);
        obj_key_input.extend_from_slice(&obj_id.1.to_le_bytes()[..2]);
        let obj_key_digest = md5::compute(&obj_key_input);
        let obj_key = &obj_key_digest[..(enc_key.len() + 5).min(16)];

        match obj {
            Object::Stream(stream) => {
                let encrypted = rc4(obj_key, &stream.content);
                stream.set_content(encrypted);
            }
            Object::String(content, _) => {
                *content = rc4(obj_key, content);
            }
            _ => {}
        }
    }

    let encrypt_id = doc.add_object(dictionary! {
        "Filter" => "Standard",
        "V" => 1_i64,
        "R" => 2_i64,
        "O" => Object::String(o_value, StringFormat::Literal),
        "U" => Object::String(u_value, StringFormat::Literal),
        "P" => i64::from(permissions),
    });
    doc.trailer.set("Encrypt", Object::Reference(encrypt_id));
    doc.trailer.set(
        "ID",
        Object::Array(vec![
            Object::String(FILE_ID.to_vec(), StringFormat::Literal),
            Object::String(FILE_ID.to_vec(), StringFormat::Literal),
        ]),
    );

    doc.save(path).unwrap();
}

fn rc4(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut s: Vec<u8> = (0..=255).collect();
    let mut j: usize = 0;
    for i in 0..256 {
        j = (j + s[i] as usize + key[i % key.len()] as usize) & 0xFF;
        s.swap(i, j);
    }
    let mut out = Vec::with_capacity(data.len());
    let mut i: usize = 0;
    j = 0;
    for &byte in data {
        i = (i + 1) & 0xFF;
        j = (j + s[i] as usize) & 0xFF;
        s.swap(i, j);
        out.push(byte ^ s[(s[i] as usize + s[j] as usize) & 0xFF]);
    }
    out
}

/// 1-based page numbers drawn on each page of the PDF at `path`, in page order.
pub fn page_numbers_in(path: &Path) -> Vec<u32> {
    let doc = Document::load(path).unwrap();
    let mut pages: Vec<_> = doc.get_pages().into_iter().collect();
    pages.sort_by_key(|(num, _)| *num);
    pages
        .into_iter()
        .map(|(_, id)| {
            let content = String::from_utf8(doc.get_page_content(id).unwrap()).unwrap();
            let start = content.find("(Page ").unwrap() + "(Page ".len();
            let end = start + content[start..].find(')').unwrap();
            content[start..end].parse().unwrap()
        })
        .collect()
}
