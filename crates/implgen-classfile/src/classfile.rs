use crate::access;
use crate::constant_pool::ConstantPool;
use crate::error::{Error, Result};
use crate::reader::Reader;

const MAGIC: u32 = 0xCAFE_BABE;

/// The shape of a class: names, flags, members and nesting. Code and
/// annotations are not retained.
#[derive(Debug, Clone)]
pub struct ClassFile {
    pub access_flags: u16,
    /// Internal name, e.g. `java/util/Map$Entry`.
    pub this_class: String,
    pub super_class: Option<String>,
    pub interfaces: Vec<String>,
    pub fields: Vec<ClassMember>,
    pub methods: Vec<ClassMember>,
    pub inner_classes: Vec<InnerClassInfo>,
}

#[derive(Debug, Clone)]
pub struct ClassMember {
    pub access_flags: u16,
    pub name: String,
    pub descriptor: String,
    /// Internal names from the `Exceptions` attribute (methods only).
    pub exceptions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerClassInfo {
    pub inner_class: String,
    pub outer_class: Option<String>,
    pub inner_name: Option<String>,
    pub access_flags: u16,
}

impl ClassFile {
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(bytes);
        let magic = reader.read_u4()?;
        if magic != MAGIC {
            return Err(Error::InvalidMagic(magic));
        }
        // minor_version, major_version
        reader.skip(4)?;
        let cp = ConstantPool::parse(&mut reader)?;

        let access_flags = reader.read_u2()?;
        let this_class = cp.get_class_name(reader.read_u2()?)?;
        let super_class = optional(reader.read_u2()?, |index| cp.get_class_name(index))?;
        let interfaces = read_list(&mut reader, |r| cp.get_class_name(r.read_u2()?))?;
        let fields = read_list(&mut reader, |r| ClassMember::parse(r, &cp))?;
        let methods = read_list(&mut reader, |r| ClassMember::parse(r, &cp))?;

        let mut inner_classes = Vec::new();
        for_each_attribute(&mut reader, &cp, |name, body| {
            if name == "InnerClasses" {
                inner_classes = parse_inner_classes(body, &cp)?;
            }
            Ok(())
        })?;
        reader.ensure_empty()?;

        Ok(Self {
            access_flags,
            this_class,
            super_class,
            interfaces,
            fields,
            methods,
            inner_classes,
        })
    }

    pub fn is_interface(&self) -> bool {
        self.access_flags & access::class::ACC_INTERFACE != 0
    }

    /// The `InnerClasses` record describing this class itself, present when the
    /// class is nested. Its flags carry `private`/`protected`/`static`, which
    /// the top-level `access_flags` cannot express.
    pub fn own_inner_class_info(&self) -> Option<&InnerClassInfo> {
        self.inner_classes
            .iter()
            .find(|info| info.inner_class == self.this_class)
    }
}

impl ClassMember {
    fn parse(reader: &mut Reader<'_>, cp: &ConstantPool) -> Result<Self> {
        let access_flags = reader.read_u2()?;
        let name = cp.get_utf8(reader.read_u2()?)?.to_string();
        let descriptor = cp.get_utf8(reader.read_u2()?)?.to_string();

        let mut exceptions = Vec::new();
        for_each_attribute(reader, cp, |attr, body| {
            if attr == "Exceptions" {
                exceptions = parse_exceptions(body, cp)?;
            }
            Ok(())
        })?;

        Ok(Self {
            access_flags,
            name,
            descriptor,
            exceptions,
        })
    }
}

/// `0` means "absent" for optional constant pool references.
fn optional<T>(index: u16, resolve: impl FnOnce(u16) -> Result<T>) -> Result<Option<T>> {
    if index == 0 {
        Ok(None)
    } else {
        resolve(index).map(Some)
    }
}

/// A `u2` count followed by that many items.
fn read_list<'a, T>(
    reader: &mut Reader<'a>,
    mut item: impl FnMut(&mut Reader<'a>) -> Result<T>,
) -> Result<Vec<T>> {
    let count = reader.read_u2()? as usize;
    let mut items = Vec::with_capacity(count);
    for _ in 0..count {
        items.push(item(reader)?);
    }
    Ok(items)
}

/// Walk an attribute table, handing each attribute's name and body to `visit`.
fn for_each_attribute<'a>(
    reader: &mut Reader<'a>,
    cp: &ConstantPool,
    mut visit: impl FnMut(&str, &'a [u8]) -> Result<()>,
) -> Result<()> {
    let count = reader.read_u2()?;
    for _ in 0..count {
        let name = cp.get_utf8(reader.read_u2()?)?;
        let length = reader.read_u4()? as usize;
        let body = reader.read_bytes(length)?;
        visit(name, body)?;
    }
    Ok(())
}

fn parse_exceptions(body: &[u8], cp: &ConstantPool) -> Result<Vec<String>> {
    let mut sub = Reader::new(body);
    let indices = read_list(&mut sub, |r| r.read_u2())
        .and_then(|indices| sub.ensure_empty().map(|()| indices))
        .map_err(|_| Error::MalformedAttribute("Exceptions"))?;
    indices
        .into_iter()
        .map(|index| cp.get_class_name(index))
        .collect()
}

fn parse_inner_classes(body: &[u8], cp: &ConstantPool) -> Result<Vec<InnerClassInfo>> {
    let mut sub = Reader::new(body);
    let records = read_list(&mut sub, |r| {
        Ok([r.read_u2()?, r.read_u2()?, r.read_u2()?, r.read_u2()?])
    })
    .and_then(|records| sub.ensure_empty().map(|()| records))
    .map_err(|_| Error::MalformedAttribute("InnerClasses"))?;

    records
        .into_iter()
        .map(|[inner, outer, name, access_flags]| {
            Ok(InnerClassInfo {
                inner_class: cp.get_class_name(inner)?,
                outer_class: optional(outer, |index| cp.get_class_name(index))?,
                inner_name: optional(name, |index| cp.get_utf8(index).map(str::to_string))?,
                access_flags,
            })
        })
        .collect()
}
