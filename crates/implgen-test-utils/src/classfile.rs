use std::collections::HashMap;

pub const ACC_PUBLIC: u16 = 0x0001;
pub const ACC_PRIVATE: u16 = 0x0002;
pub const ACC_PROTECTED: u16 = 0x0004;
pub const ACC_STATIC: u16 = 0x0008;
pub const ACC_FINAL: u16 = 0x0010;
pub const ACC_SUPER: u16 = 0x0020;
pub const ACC_VARARGS: u16 = 0x0080;
pub const ACC_NATIVE: u16 = 0x0100;
pub const ACC_INTERFACE: u16 = 0x0200;
pub const ACC_ABSTRACT: u16 = 0x0400;

#[derive(Debug, Clone)]
struct MemberSpec {
    access_flags: u16,
    name: String,
    descriptor: String,
    exceptions: Vec<String>,
}

#[derive(Debug, Clone)]
struct InnerClassSpec {
    inner: String,
    outer: Option<String>,
    name: Option<String>,
    access_flags: u16,
}

/// Assembles a minimal class file. All names are internal names
/// (`com/example/Foo`).
#[derive(Debug, Clone)]
pub struct ClassFileBuilder {
    this_class: String,
    super_class: Option<String>,
    interfaces: Vec<String>,
    access_flags: u16,
    major_version: u16,
    fields: Vec<MemberSpec>,
    methods: Vec<MemberSpec>,
    inner_classes: Vec<InnerClassSpec>,
}

impl ClassFileBuilder {
    /// A `public` class extending `java/lang/Object`.
    pub fn class(internal_name: &str) -> Self {
        Self {
            this_class: internal_name.to_string(),
            super_class: Some("java/lang/Object".to_string()),
            interfaces: Vec::new(),
            access_flags: ACC_PUBLIC | ACC_SUPER,
            major_version: 61,
            fields: Vec::new(),
            methods: Vec::new(),
            inner_classes: Vec::new(),
        }
    }

    /// A `public` interface.
    pub fn interface(internal_name: &str) -> Self {
        Self {
            access_flags: ACC_PUBLIC | ACC_INTERFACE | ACC_ABSTRACT,
            ..Self::class(internal_name)
        }
    }

    pub fn internal_name(&self) -> &str {
        &self.this_class
    }

    pub fn access_flags(mut self, flags: u16) -> Self {
        self.access_flags = flags;
        self
    }

    pub fn extends(mut self, internal_name: &str) -> Self {
        self.super_class = Some(internal_name.to_string());
        self
    }

    /// Drop the superclass entirely (only `java/lang/Object` does this).
    pub fn without_super(mut self) -> Self {
        self.super_class = None;
        self
    }

    pub fn implements(mut self, internal_name: &str) -> Self {
        self.interfaces.push(internal_name.to_string());
        self
    }

    pub fn field(mut self, access_flags: u16, name: &str, descriptor: &str) -> Self {
        self.fields.push(MemberSpec {
            access_flags,
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            exceptions: Vec::new(),
        });
        self
    }

    pub fn method(self, access_flags: u16, name: &str, descriptor: &str) -> Self {
        self.method_throws(access_flags, name, descriptor, &[])
    }

    pub fn method_throws(
        mut self,
        access_flags: u16,
        name: &str,
        descriptor: &str,
        exceptions: &[&str],
    ) -> Self {
        self.methods.push(MemberSpec {
            access_flags,
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            exceptions: exceptions.iter().map(|e| e.to_string()).collect(),
        });
        self
    }

    pub fn constructor(self, access_flags: u16, descriptor: &str) -> Self {
        self.method(access_flags, "<init>", descriptor)
    }

    pub fn inner_class(
        mut self,
        inner: &str,
        outer: Option<&str>,
        simple_name: Option<&str>,
        access_flags: u16,
    ) -> Self {
        self.inner_classes.push(InnerClassSpec {
            inner: inner.to_string(),
            outer: outer.map(str::to_string),
            name: simple_name.map(str::to_string),
            access_flags,
        });
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut cp = PoolBuilder::default();

        let this_index = cp.class(&self.this_class);
        let super_index = self.super_class.as_deref().map_or(0, |name| cp.class(name));
        let interface_indexes: Vec<u16> = self.interfaces.iter().map(|i| cp.class(i)).collect();

        let mut body = Vec::new();
        put_u2(&mut body, self.access_flags);
        put_u2(&mut body, this_index);
        put_u2(&mut body, super_index);
        put_u2(&mut body, interface_indexes.len() as u16);
        for index in interface_indexes {
            put_u2(&mut body, index);
        }

        for members in [&self.fields, &self.methods] {
            put_u2(&mut body, members.len() as u16);
            for member in members {
                put_u2(&mut body, member.access_flags);
                put_u2(&mut body, cp.utf8(&member.name));
                put_u2(&mut body, cp.utf8(&member.descriptor));
                if member.exceptions.is_empty() {
                    put_u2(&mut body, 0);
                } else {
                    put_u2(&mut body, 1);
                    put_u2(&mut body, cp.utf8("Exceptions"));
                    let mut info = Vec::new();
                    put_u2(&mut info, member.exceptions.len() as u16);
                    for exception in &member.exceptions {
                        put_u2(&mut info, cp.class(exception));
                    }
                    put_u4(&mut body, info.len() as u32);
                    body.extend(info);
                }
            }
        }

        if self.inner_classes.is_empty() {
            put_u2(&mut body, 0);
        } else {
            put_u2(&mut body, 1);
            put_u2(&mut body, cp.utf8("InnerClasses"));
            let mut info = Vec::new();
            put_u2(&mut info, self.inner_classes.len() as u16);
            for inner in &self.inner_classes {
                put_u2(&mut info, cp.class(&inner.inner));
                put_u2(&mut info, inner.outer.as_deref().map_or(0, |o| cp.class(o)));
                put_u2(&mut info, inner.name.as_deref().map_or(0, |n| cp.utf8(n)));
                put_u2(&mut info, inner.access_flags);
            }
            put_u4(&mut body, info.len() as u32);
            body.extend(info);
        }

        let mut out = Vec::new();
        put_u4(&mut out, 0xCAFEBABE);
        put_u2(&mut out, 0);
        put_u2(&mut out, self.major_version);
        put_u2(&mut out, cp.entries.len() as u16 + 1);
        for entry in &cp.entries {
            out.extend(entry);
        }
        out.extend(body);
        out
    }
}

#[derive(Default)]
struct PoolBuilder {
    entries: Vec<Vec<u8>>,
    utf8: HashMap<String, u16>,
    classes: HashMap<String, u16>,
}

impl PoolBuilder {
    fn push(&mut self, entry: Vec<u8>) -> u16 {
        self.entries.push(entry);
        self.entries.len() as u16
    }

    fn utf8(&mut self, value: &str) -> u16 {
        if let Some(index) = self.utf8.get(value) {
            return *index;
        }
        let encoded = encode_modified_utf8(value);
        let mut entry = vec![1u8];
        put_u2(&mut entry, encoded.len() as u16);
        entry.extend(encoded);
        let index = self.push(entry);
        self.utf8.insert(value.to_string(), index);
        index
    }

    fn class(&mut self, internal_name: &str) -> u16 {
        if let Some(index) = self.classes.get(internal_name) {
            return *index;
        }
        let name_index = self.utf8(internal_name);
        let mut entry = vec![7u8];
        put_u2(&mut entry, name_index);
        let index = self.push(entry);
        self.classes.insert(internal_name.to_string(), index);
        index
    }
}

fn encode_modified_utf8(value: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.len());
    for unit in value.encode_utf16() {
        match unit {
            0x0001..=0x007F => out.push(unit as u8),
            0x0000 | 0x0080..=0x07FF => {
                out.push(0xC0 | (unit >> 6) as u8);
                out.push(0x80 | (unit & 0x3F) as u8);
            }
            _ => {
                out.push(0xE0 | (unit >> 12) as u8);
                out.push(0x80 | ((unit >> 6) & 0x3F) as u8);
                out.push(0x80 | (unit & 0x3F) as u8);
            }
        }
    }
    out
}

fn put_u2(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

fn put_u4(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_be_bytes());
}
