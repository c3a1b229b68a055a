use crate::error::{Error, Result};
use crate::reader::Reader;

#[derive(Debug, Clone)]
enum Entry {
    Utf8(String),
    Class { name_index: u16 },
    /// Any constant the reader never dereferences; only its kind is kept.
    Other(&'static str),
    /// Second slot of a `Long`/`Double` constant.
    Unusable,
}

impl Entry {
    fn kind(&self) -> &'static str {
        match self {
            Entry::Utf8(_) => "Utf8",
            Entry::Class { .. } => "Class",
            Entry::Other(kind) => kind,
            Entry::Unusable => "Unusable",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct ConstantPool {
    // Index 0 is never valid; keep it as a placeholder so lookups use the raw index.
    entries: Vec<Entry>,
}

impl ConstantPool {
    pub(crate) fn parse(reader: &mut Reader<'_>) -> Result<Self> {
        let count = reader.read_u2()? as usize;
        let mut entries = Vec::with_capacity(count.max(1));
        entries.push(Entry::Unusable);

        while entries.len() < count {
            let tag = reader.read_u1()?;
            let entry = match tag {
                1 => {
                    let len = reader.read_u2()? as usize;
                    Entry::Utf8(decode_modified_utf8(reader.read_bytes(len)?)?)
                }
                3 => {
                    reader.skip(4)?;
                    Entry::Other("Integer")
                }
                4 => {
                    reader.skip(4)?;
                    Entry::Other("Float")
                }
                5 | 6 => {
                    reader.skip(8)?;
                    entries.push(Entry::Other(if tag == 5 { "Long" } else { "Double" }));
                    Entry::Unusable
                }
                7 => Entry::Class {
                    name_index: reader.read_u2()?,
                },
                8 => {
                    reader.skip(2)?;
                    Entry::Other("String")
                }
                9 => {
                    reader.skip(4)?;
                    Entry::Other("Fieldref")
                }
                10 => {
                    reader.skip(4)?;
                    Entry::Other("Methodref")
                }
                11 => {
                    reader.skip(4)?;
                    Entry::Other("InterfaceMethodref")
                }
                12 => {
                    reader.skip(4)?;
                    Entry::Other("NameAndType")
                }
                15 => {
                    reader.skip(3)?;
                    Entry::Other("MethodHandle")
                }
                16 => {
                    reader.skip(2)?;
                    Entry::Other("MethodType")
                }
                17 => {
                    reader.skip(4)?;
                    Entry::Other("Dynamic")
                }
                18 => {
                    reader.skip(4)?;
                    Entry::Other("InvokeDynamic")
                }
                19 => {
                    reader.skip(2)?;
                    Entry::Other("Module")
                }
                20 => {
                    reader.skip(2)?;
                    Entry::Other("Package")
                }
                other => return Err(Error::InvalidConstantPoolTag(other)),
            };
            entries.push(entry);
        }

        if entries.len() > count.max(1) {
            // A wide constant in the last slot claims a slot past the declared count.
            return Err(Error::InvalidConstantPoolIndex(count as u16));
        }

        Ok(Self { entries })
    }

    fn get(&self, index: u16) -> Result<&Entry> {
        if index == 0 {
            return Err(Error::InvalidConstantPoolIndex(index));
        }
        self.entries
            .get(index as usize)
            .ok_or(Error::InvalidConstantPoolIndex(index))
    }

    pub(crate) fn get_utf8(&self, index: u16) -> Result<&str> {
        match self.get(index)? {
            Entry::Utf8(value) => Ok(value),
            other => Err(Error::ConstantPoolTypeMismatch {
                index,
                expected: "Utf8",
                found: other.kind(),
            }),
        }
    }

    /// Resolve a `CONSTANT_Class` entry to its internal name (`java/lang/Object`).
    pub(crate) fn get_class_name(&self, index: u16) -> Result<String> {
        match self.get(index)? {
            Entry::Class { name_index } => Ok(self.get_utf8(*name_index)?.to_string()),
            other => Err(Error::ConstantPoolTypeMismatch {
                index,
                expected: "Class",
                found: other.kind(),
            }),
        }
    }
}

/// Decode the JVM's "modified UTF-8" (JVMS 4.4.7).
///
/// Differs from standard UTF-8 in that NUL is encoded as `C0 80` and
/// supplementary characters are stored as two 3-byte surrogate halves.
fn decode_modified_utf8(bytes: &[u8]) -> Result<String> {
    if bytes.is_ascii() && !bytes.contains(&0) {
        return Ok(String::from_utf8_lossy(bytes).into_owned());
    }

    let mut units: Vec<u16> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        let b0 = bytes[i];
        if b0 & 0x80 == 0 {
            if b0 == 0 {
                return Err(Error::InvalidModifiedUtf8);
            }
            units.push(b0 as u16);
            i += 1;
        } else if b0 & 0xE0 == 0xC0 {
            let b1 = continuation(bytes, i + 1)?;
            units.push((((b0 & 0x1F) as u16) << 6) | b1);
            i += 2;
        } else if b0 & 0xF0 == 0xE0 {
            let b1 = continuation(bytes, i + 1)?;
            let b2 = continuation(bytes, i + 2)?;
            units.push((((b0 & 0x0F) as u16) << 12) | (b1 << 6) | b2);
            i += 3;
        } else {
            return Err(Error::InvalidModifiedUtf8);
        }
    }

    String::from_utf16(&units).map_err(|_| Error::InvalidModifiedUtf8)
}

fn continuation(bytes: &[u8], index: usize) -> Result<u16> {
    match bytes.get(index) {
        Some(b) if b & 0xC0 == 0x80 => Ok((b & 0x3F) as u16),
        _ => Err(Error::InvalidModifiedUtf8),
    }
}
